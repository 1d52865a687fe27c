//! Document generation — fill the template, then compile it.
//!
//! Flow: template text + resume record → `fill` → `DocumentCompiler::compile`
//! → `CompiledArtifact`. The filled document is rebuilt on every call.

use tracing::info;

use crate::compiler::{CompileError, CompiledArtifact, DocumentCompiler};
use crate::latex::fill;
use crate::models::resume::ResumeRecord;

/// Runs the filler and hands its output to `compiler`.
pub async fn generate(
    template: &str,
    record: &ResumeRecord,
    compiler: &dyn DocumentCompiler,
) -> Result<CompiledArtifact, CompileError> {
    let filled = fill(template, record);
    info!(
        "Filled template: {} bytes, {} experience / {} education entries",
        filled.len(),
        record.experience.len(),
        record.education.len()
    );

    compiler.compile(&filled).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    /// Records what it was asked to compile and echoes it back as the artifact.
    #[derive(Default)]
    struct EchoCompiler {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl DocumentCompiler for EchoCompiler {
        async fn compile(&self, filled: &str) -> Result<CompiledArtifact, CompileError> {
            self.seen.lock().unwrap().push(filled.to_string());
            Ok(CompiledArtifact::pdf(filled.as_bytes().to_vec()))
        }
    }

    struct FailingCompiler;

    #[async_trait]
    impl DocumentCompiler for FailingCompiler {
        async fn compile(&self, _filled: &str) -> Result<CompiledArtifact, CompileError> {
            Err(CompileError::Remote("undefined control sequence".to_string()))
        }
    }

    #[tokio::test]
    async fn test_generate_compiles_the_filled_document() {
        let compiler = EchoCompiler::default();
        let record = ResumeRecord {
            full_name: "Jane_Doe".into(),
            ..Default::default()
        };

        let artifact = generate("Name: [FULL_NAME]", &record, &compiler)
            .await
            .unwrap();

        assert_eq!(artifact.bytes.as_ref(), b"Name: Jane\\_Doe");
        assert_eq!(compiler.seen.lock().unwrap().as_slice(), ["Name: Jane\\_Doe"]);
    }

    #[tokio::test]
    async fn test_generate_refills_on_every_call() {
        let compiler = EchoCompiler::default();
        let record = ResumeRecord::default();

        generate("[CITY]", &record, &compiler).await.unwrap();
        generate("[CITY]", &record, &compiler).await.unwrap();

        assert_eq!(compiler.seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_generate_propagates_compiler_errors() {
        let err = generate("[SUMMARY]", &ResumeRecord::default(), &FailingCompiler)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("undefined control sequence"));
    }
}
