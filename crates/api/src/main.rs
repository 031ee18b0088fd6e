use anyhow::Context;

use yams_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    yams_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let app = yams_api::app::build_app(&config)
        .await
        .context("failed to initialise services")?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
