//! Axum route handlers for the Preview API.
//!
//! A consumer is any caller-chosen key (an editor session, a browser tab).
//! Each POST starts a new generation request for that consumer; only the most
//! recently started one may replace what the consumer displays.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::generate;
use crate::models::resume::ResumeRecord;
use crate::preview::PreviewHandle;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    #[serde(flatten)]
    pub preview: PreviewHandle,
    pub url: String,
}

impl From<PreviewHandle> for PreviewResponse {
    fn from(preview: PreviewHandle) -> Self {
        let url = format!("/api/v1/artifacts/{}", preview.handle);
        Self { preview, url }
    }
}

/// POST /api/v1/previews/:consumer
///
/// Loads the template, fills it with the posted record, compiles it and installs
/// the artifact as the consumer's current preview. Returns 409 when a newer
/// request for the same consumer was started while this one was compiling.
pub async fn handle_create_preview(
    State(state): State<AppState>,
    Path(consumer): Path<String>,
    Json(record): Json<ResumeRecord>,
) -> Result<Json<PreviewResponse>, AppError> {
    let ticket = state.previews.begin(&consumer);
    let template = state.template.load().await?;

    let artifact = match generate(&template, &record, state.compiler.as_ref()).await {
        Ok(artifact) => artifact,
        Err(e) => {
            if !state.previews.is_current(&ticket) {
                warn!(
                    "Preview #{} for '{}' failed after being superseded: {e}",
                    ticket.sequence, consumer
                );
            }
            state.previews.abandon(&ticket);
            return Err(e.into());
        }
    };

    let preview = state.previews.complete(&ticket, artifact)?;
    info!(
        "Preview #{} for '{}' ready: {} ({} bytes)",
        preview.sequence, consumer, preview.handle, preview.size_bytes
    );

    Ok(Json(preview.into()))
}

/// GET /api/v1/previews/:consumer
pub async fn handle_get_preview(
    State(state): State<AppState>,
    Path(consumer): Path<String>,
) -> Result<Json<PreviewResponse>, AppError> {
    let preview = state
        .previews
        .current(&consumer)
        .ok_or_else(|| AppError::NotFound(format!("No preview for '{consumer}'")))?;

    Ok(Json(preview.into()))
}

/// DELETE /api/v1/previews/:consumer
///
/// Teardown: releases the consumer's handle and invalidates in-flight requests.
pub async fn handle_release_preview(
    State(state): State<AppState>,
    Path(consumer): Path<String>,
) -> StatusCode {
    if let Some(released) = state.previews.release(&consumer) {
        info!(
            "Preview {} for '{}' released, {} previews still live",
            released.handle,
            consumer,
            state.previews.live_handles()
        );
    }
    StatusCode::NO_CONTENT
}

/// GET /api/v1/artifacts/:handle
///
/// Streams the artifact bytes. Released handles are gone.
pub async fn handle_get_artifact(
    State(state): State<AppState>,
    Path(handle): Path<Uuid>,
) -> Result<Response, AppError> {
    let (preview, artifact) = state
        .previews
        .artifact(handle)
        .ok_or_else(|| AppError::NotFound(format!("Artifact {handle} not found")))?;

    Ok((
        [
            (header::CONTENT_TYPE, preview.media_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"resume-{}.pdf\"", preview.sequence),
            ),
        ],
        artifact.bytes,
    )
        .into_response())
}
