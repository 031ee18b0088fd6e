use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use yams_auth::{TokenIssuer, password};
use yams_core::{DomainError, Entity, PlayerId};
use yams_infra::store::{PlayerFilter, StoreError};
use yams_players::Player;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(register))
        .route("/signin", post(sign_in))
        .route("/winners", get(winners))
        .route("/:user_id", get(get_user))
}

#[tracing::instrument(skip_all)]
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RegisterRequest>,
) -> axum::response::Response {
    if let Some(field) = body.missing_field() {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            format!("{field} is required"),
        );
    }

    // Cheap pre-check; the insert below is the authoritative uniqueness test.
    match services.players.find_player_by_email(&body.email).await {
        Ok(Some(_)) => return email_taken(),
        Ok(None) => {}
        Err(e) => return errors::store_error_to_response(e),
    }

    let password = body.password;
    let hash = match tokio::task::spawn_blocking(move || password::hash(&password)).await {
        Ok(Ok(hash)) => hash,
        Ok(Err(e)) => return errors::internal_error("password", e),
        Err(e) => return errors::internal_error("password", e),
    };

    let player = match Player::register(PlayerId::new(), body.name, body.email, hash, Utc::now()) {
        Ok(p) => p,
        Err(e @ DomainError::Validation(_)) => return errors::domain_error_to_response(e),
        Err(e) => return errors::internal_error("register", e),
    };

    let player = match services.players.insert_player(player).await {
        Ok(p) => p,
        Err(StoreError::Duplicate(_)) => return email_taken(),
        Err(e) => return errors::store_error_to_response(e),
    };

    let token = match services.tokens.issue(player.id(), Utc::now()) {
        Ok(t) => t,
        Err(e) => return errors::internal_error("token", e),
    };

    tracing::info!(player_id = %player.id(), "player registered");
    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "User registered successfully",
            "token": token,
        })),
    )
        .into_response()
}

#[tracing::instrument(skip_all)]
pub async fn sign_in(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::SignInRequest>,
) -> axum::response::Response {
    let player = match services.players.find_player_by_email(&body.email).await {
        Ok(Some(p)) => p,
        Ok(None) => return invalid_credentials(),
        Err(e) => return errors::store_error_to_response(e),
    };

    let stored = player.password_hash().to_string();
    let password = body.password;
    let matches = match tokio::task::spawn_blocking(move || password::verify(&password, &stored)).await {
        Ok(matches) => matches,
        Err(e) => return errors::internal_error("password", e),
    };
    if !matches {
        return invalid_credentials();
    }

    let id = player.id();
    let token = match services.tokens.issue(id, Utc::now()) {
        Ok(t) => t,
        Err(e) => return errors::internal_error("token", e),
    };

    tracing::info!(player_id = %id, "player signed in");
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "user": dto::player_to_json(&player),
            "token": token,
        })),
    )
        .into_response()
}

/// Players with at least one pastry won, optionally narrowed by a JSON body.
pub async fn winners(
    Extension(services): Extension<Arc<AppServices>>,
    body: Option<Json<dto::WinnersQuery>>,
) -> axum::response::Response {
    let filter: PlayerFilter = body.map(|Json(q)| q).unwrap_or_default().into();
    match services.players.find_players(&filter).await {
        Ok(players) => (
            StatusCode::OK,
            Json(players.iter().map(dto::player_to_json).collect::<Vec<_>>()),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(user_id): Path<String>,
) -> axum::response::Response {
    let id: PlayerId = match user_id.parse() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.players.get_player(id).await {
        Ok(Some(p)) => (StatusCode::OK, Json(dto::player_to_json(&p))).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

fn email_taken() -> axum::response::Response {
    errors::json_error(StatusCode::BAD_REQUEST, "email_taken", "Email already exists")
}

fn invalid_credentials() -> axum::response::Response {
    errors::json_error(
        StatusCode::UNAUTHORIZED,
        "invalid_credentials",
        "invalid email or password",
    )
}
