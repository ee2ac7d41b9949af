//! Contains all the routes that this application can handle.

mod api;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};

use crate::AppState;

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// All the routes of the server
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/api/subscribe",
            post(api::subscribe).fallback(api::method_not_allowed),
        )
        .with_state(app_state)
        .route("/health-check", get(health_check))
}
