use axum::{extract::State, response::Html};

use crate::errors::AppError;
use crate::site::Page;
use crate::state::AppState;

/// GET /
pub async fn handle_home(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Ok(Html(state.pages.render(Page::Home)?))
}

/// GET /cover-letter-generator
pub async fn handle_cover_letter_page(
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    Ok(Html(state.pages.render(Page::CoverLetter)?))
}
