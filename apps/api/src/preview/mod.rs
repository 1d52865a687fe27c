// Preview orchestration: per-consumer request sequencing and ownership of the
// compiled artifacts' display handles.

pub mod handlers;
pub mod registry;

pub use registry::{PreviewError, PreviewHandle, PreviewRegistry};
