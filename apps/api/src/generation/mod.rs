// Document generation: fill a LaTeX template from a resume record and compile it.
// The remote compiler is reached only through `compiler::DocumentCompiler`.

pub mod handlers;
pub mod pipeline;

pub use pipeline::generate;
