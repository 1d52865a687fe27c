//! Template source — where the LaTeX template text comes from.
//!
//! The text is read fresh on every generation request and handed to the
//! filler unmodified. Nothing is cached between requests, so edits to a
//! template file show up on the next preview.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Template compiled into the binary, used when no `TEMPLATE_PATH` is configured.
pub const BUILTIN_TEMPLATE: &str = include_str!("../../templates/resume.tex");

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub enum TemplateSource {
    Builtin,
    File(PathBuf),
}

impl TemplateSource {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => TemplateSource::File(path),
            None => TemplateSource::Builtin,
        }
    }

    pub async fn load(&self) -> Result<String, TemplateError> {
        match self {
            TemplateSource::Builtin => Ok(BUILTIN_TEMPLATE.to_string()),
            TemplateSource::File(path) => read_template(path).await,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            TemplateSource::Builtin => "built-in".to_string(),
            TemplateSource::File(path) => path.display().to_string(),
        }
    }
}

async fn read_template(path: &Path) -> Result<String, TemplateError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("Loaded template {} ({} bytes)", path.display(), text.len());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_builtin_source_returns_embedded_template() {
        let text = TemplateSource::from_path(None).load().await.unwrap();
        assert_eq!(text, BUILTIN_TEMPLATE);
        assert!(text.contains("\\begin{document}"));
    }

    #[tokio::test]
    async fn test_file_source_is_read_on_every_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Hello [FULL_NAME]").unwrap();
        file.flush().unwrap();

        let source = TemplateSource::from_path(Some(file.path().to_path_buf()));
        assert_eq!(source.load().await.unwrap(), "Hello [FULL_NAME]");

        std::fs::write(file.path(), "Bye [FULL_NAME]").unwrap();
        assert_eq!(source.load().await.unwrap(), "Bye [FULL_NAME]");
    }

    #[tokio::test]
    async fn test_missing_file_reports_path() {
        let source = TemplateSource::File(PathBuf::from("/definitely/not/here.tex"));
        let err = source.load().await.unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.tex"));
    }
}
