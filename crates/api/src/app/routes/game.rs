use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PlayerContext;

#[tracing::instrument(skip_all, fields(player_id = %player.player_id()))]
pub async fn play(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(player): Extension<PlayerContext>,
) -> axum::response::Response {
    match services.game.play(player.player_id()).await {
        Ok(outcome) => (StatusCode::OK, Json(dto::outcome_to_json(&outcome))).into_response(),
        Err(e) => errors::game_error_to_response(e),
    }
}
