pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::generation::handlers;
use crate::site::handlers as pages;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Portfolio pages
        .route("/", get(pages::handle_home))
        .route(
            "/cover-letter-generator",
            get(pages::handle_cover_letter_page),
        )
        // Cover letter API
        .route(
            "/api/v1/cover-letters/validate",
            post(handlers::handle_validate),
        )
        .route("/api/v1/cover-letters", post(handlers::handle_generate))
        .fallback(not_found)
        .with_state(state)
}
