use std::sync::Arc;

use crate::compiler::DocumentCompiler;
use crate::latex::TemplateSource;
use crate::preview::PreviewRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable compiler backend. Default: `CompilationClient` against `COMPILER_URL`.
    pub compiler: Arc<dyn DocumentCompiler>,
    /// Read fresh on every generation request.
    pub template: TemplateSource,
    pub previews: PreviewRegistry,
}
