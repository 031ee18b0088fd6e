use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn list_pastries(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.items.list_items().await {
        Ok(items) => (
            StatusCode::OK,
            Json(items.iter().map(dto::pastry_to_json).collect::<Vec<_>>()),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
