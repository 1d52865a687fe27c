//! Axum route handlers for the Documents API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::latex::fill;
use crate::models::resume::ResumeRecord;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct FillResponse {
    pub document: String,
}

/// POST /api/v1/documents/fill
///
/// Returns the filled LaTeX source without compiling it.
pub async fn handle_fill(
    State(state): State<AppState>,
    Json(record): Json<ResumeRecord>,
) -> Result<Json<FillResponse>, AppError> {
    let template = state.template.load().await?;
    let document = fill(&template, &record);

    Ok(Json(FillResponse { document }))
}
