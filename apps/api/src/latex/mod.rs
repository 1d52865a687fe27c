// Document filling: escaping, placeholder substitution, template loading.
// Everything here is synchronous and pure apart from `template::TemplateSource::load`.

pub mod escape;
pub mod filler;
pub mod sections;
pub mod template;

pub use filler::fill;
pub use template::{TemplateError, TemplateSource};
