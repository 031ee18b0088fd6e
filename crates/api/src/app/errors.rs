use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use yams_core::DomainError;
use yams_infra::GameError;
use yams_infra::store::StoreError;

pub fn game_error_to_response(err: GameError) -> axum::response::Response {
    match err {
        GameError::PlayerNotFound => json_error(StatusCode::NOT_FOUND, "not_found", "player not found"),
        GameError::NoTurnsRemaining => json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "no_turns_remaining",
            "no turns remaining",
        ),
        GameError::Conflict(detail) => conflict(&detail),
        GameError::Domain(e) => internal_error("game", e),
        GameError::Store(e) => store_error_to_response(e),
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        StoreError::Concurrency(detail) => conflict(&detail),
        other => internal_error("store", other),
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::NoTurnsRemaining => json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "no_turns_remaining",
            "no turns remaining",
        ),
        DomainError::Conflict(detail) => conflict(&detail),
        DomainError::Unauthorized => json_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "missing or invalid access token",
        ),
    }
}

/// Log which write lost and answer with a generic 409.
fn conflict(detail: &str) -> axum::response::Response {
    tracing::warn!(detail, "request lost a concurrent update");
    json_error(
        StatusCode::CONFLICT,
        "conflict",
        "the resource was updated concurrently, retry the request",
    )
}

/// Log the cause and answer with a generic 500.
pub fn internal_error(context: &'static str, err: impl std::fmt::Display) -> axum::response::Response {
    tracing::error!(context, error = %err, "internal error");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        "internal server error",
    )
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
