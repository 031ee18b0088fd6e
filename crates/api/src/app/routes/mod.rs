use axum::{
    routing::{get, post},
    Router,
};

pub mod game;
pub mod pastries;
pub mod system;
pub mod users;

/// Endpoints reachable without a token.
pub fn public_router() -> Router {
    Router::new()
        .nest("/user", users::router())
        .route("/pastries", get(pastries::list_pastries))
}

/// Endpoints behind the access-token middleware.
pub fn protected_router() -> Router {
    Router::new().route("/game/update", post(game::play))
}
