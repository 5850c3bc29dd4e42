//! Axum route handlers for the cover letter API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::generation::generator::{generate_cover_letter, GenerationError};
use crate::generation::models::{
    CoverLetterForm, FailureKind, GenerationResult, ValidationReport,
};
use crate::generation::validation::check_form;
use crate::state::AppState;

/// POST /api/v1/cover-letters/validate
///
/// Evaluates the shared rule set and reports field-scoped violations.
/// Never contacts the generation service.
pub async fn handle_validate(
    payload: Result<Json<CoverLetterForm>, JsonRejection>,
) -> Result<Json<ValidationReport>, AppError> {
    let Json(form) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    Ok(Json(check_form(form)))
}

/// POST /api/v1/cover-letters
///
/// Always answers with a `GenerationResult`, including for bodies that do not parse.
pub async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<CoverLetterForm>, JsonRejection>,
) -> (StatusCode, Json<GenerationResult>) {
    let result = match payload {
        Ok(Json(form)) => generate_cover_letter(state.generator.as_ref(), form).await,
        Err(rejection) => {
            info!("Rejected unparseable cover letter body: {}", rejection.body_text());
            GenerationError::InvalidInput(vec![]).into()
        }
    };

    (status_for(&result), Json(result))
}

fn status_for(result: &GenerationResult) -> StatusCode {
    match result {
        GenerationResult::Success { .. } => StatusCode::OK,
        GenerationResult::Failure {
            kind: FailureKind::InvalidInput,
            ..
        } => StatusCode::UNPROCESSABLE_ENTITY,
        GenerationResult::Failure {
            kind: FailureKind::Service,
            ..
        } => StatusCode::BAD_GATEWAY,
    }
}
