pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as documents;
use crate::preview::handlers as previews;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Documents API
        .route("/api/v1/documents/fill", post(documents::handle_fill))
        // Preview API
        .route(
            "/api/v1/previews/:consumer",
            post(previews::handle_create_preview)
                .get(previews::handle_get_preview)
                .delete(previews::handle_release_preview),
        )
        .route(
            "/api/v1/artifacts/:handle",
            get(previews::handle_get_artifact),
        )
        .with_state(state)
}
