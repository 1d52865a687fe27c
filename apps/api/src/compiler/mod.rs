//! Compilation Client — sends a filled LaTeX document to the remote compiler.
//!
//! One POST per call: no retry, no cancellation. The service answers with a
//! JSON envelope carrying either a base64 artifact or an error message.
//!
//! `AppState` holds an `Arc<dyn DocumentCompiler>`, so tests and alternative
//! backends can stand in for the HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Compiler selector sent with every request.
pub const COMPILER: &str = "pdflatex";
/// Output-format selector sent with every request.
pub const OUTPUT_FORMAT: &str = "pdf";
/// Media type implied by `OUTPUT_FORMAT`.
pub const MEDIA_TYPE: &str = "application/pdf";

const GENERIC_REMOTE_ERROR: &str = "compiler reported failure without details";

#[derive(Debug, Error)]
pub enum CompileError {
    /// The request never produced a usable HTTP response.
    #[error("failed to generate document")]
    Transport(#[from] reqwest::Error),

    /// The compiler answered with a non-2xx status. The body is ignored.
    #[error("failed to generate document")]
    Status { status: u16 },

    #[error("remote compilation failed: {0}")]
    Remote(String),

    #[error("remote compilation failed: invalid document payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

impl CompileError {
    /// True for failures to reach the compiler, as opposed to failures it reported.
    pub fn is_transport(&self) -> bool {
        matches!(self, CompileError::Transport(_) | CompileError::Status { .. })
    }
}

/// A compiled binary document.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledArtifact {
    pub bytes: Bytes,
    pub media_type: &'static str,
}

impl CompiledArtifact {
    pub fn pdf(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            media_type: MEDIA_TYPE,
        }
    }
}

/// Anything that turns filled LaTeX text into a binary artifact.
#[async_trait]
pub trait DocumentCompiler: Send + Sync {
    async fn compile(&self, filled: &str) -> Result<CompiledArtifact, CompileError>;
}

#[derive(Debug, Serialize)]
struct CompileRequest<'a> {
    compiler: &'a str,
    code: &'a str,
    output: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompileResponse {
    #[serde(default)]
    success: bool,
    output: Option<String>,
    error: Option<String>,
}

/// HTTP client for the remote compile-as-a-service endpoint.
#[derive(Clone)]
pub struct CompilationClient {
    client: Client,
    endpoint: String,
}

impl CompilationClient {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, CompileError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl DocumentCompiler for CompilationClient {
    async fn compile(&self, filled: &str) -> Result<CompiledArtifact, CompileError> {
        let request_body = CompileRequest {
            compiler: COMPILER,
            code: filled,
            output: OUTPUT_FORMAT,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Compiler returned HTTP {}", status);
            return Err(CompileError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let parsed: CompileResponse = serde_json::from_slice(&body)
            .map_err(|e| CompileError::Remote(format!("malformed response from compiler: {e}")))?;

        let artifact = decode_response(parsed)?;
        debug!(
            "Compilation succeeded: {} source bytes -> {} artifact bytes",
            filled.len(),
            artifact.bytes.len()
        );
        Ok(artifact)
    }
}

/// Turns a parsed compiler envelope into an artifact or a remote error.
fn decode_response(response: CompileResponse) -> Result<CompiledArtifact, CompileError> {
    let payload = match (response.success, response.output) {
        (true, Some(payload)) if !payload.trim().is_empty() => payload,
        _ => {
            let message = response
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| GENERIC_REMOTE_ERROR.to_string());
            return Err(CompileError::Remote(message));
        }
    };

    let bytes = STANDARD.decode(payload.trim())?;
    Ok(CompiledArtifact::pdf(bytes))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    /// Serves a fixed response on `/compile` and records every request body.
    pub(crate) async fn stub_compiler(
        status: StatusCode,
        body: Value,
    ) -> (String, Arc<Mutex<Vec<Value>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = seen.clone();
        let app = Router::new().route(
            "/compile",
            post(move |Json(request): Json<Value>| {
                let recorder = recorder.clone();
                let body = body.clone();
                async move {
                    recorder.lock().unwrap().push(request);
                    (status, Json(body))
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}/compile"), seen)
    }

    fn client(endpoint: String) -> CompilationClient {
        CompilationClient::new(endpoint, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_success_decodes_payload_bytes() {
        let pdf = b"%PDF-1.5 fake".to_vec();
        let (url, seen) = stub_compiler(
            StatusCode::OK,
            json!({"success": true, "output": STANDARD.encode(&pdf)}),
        )
        .await;

        let artifact = client(url).compile("\\documentclass{article}").await.unwrap();
        assert_eq!(artifact.bytes.as_ref(), pdf.as_slice());
        assert_eq!(artifact.media_type, "application/pdf");

        let requests = seen.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0],
            json!({"compiler": "pdflatex", "code": "\\documentclass{article}", "output": "pdf"})
        );
    }

    #[tokio::test]
    async fn test_remote_failure_carries_remote_message() {
        let (url, _) = stub_compiler(
            StatusCode::OK,
            json!({"success": false, "error": "syntax error"}),
        )
        .await;

        let err = client(url).compile("broken").await.unwrap_err();
        assert!(matches!(err, CompileError::Remote(_)));
        assert!(err.to_string().contains("syntax error"));
        assert!(!err.is_transport());
    }

    #[tokio::test]
    async fn test_non_success_status_is_transport_error_regardless_of_body() {
        let (url, _) = stub_compiler(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"success": true, "output": STANDARD.encode(b"pdf")}),
        )
        .await;

        let err = client(url).compile("x").await.unwrap_err();
        assert!(matches!(err, CompileError::Status { status: 500 }));
        assert_eq!(err.to_string(), "failed to generate document");
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(format!("http://{addr}/compile"))
            .compile("x")
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.to_string(), "failed to generate document");
    }

    #[tokio::test]
    async fn test_malformed_body_is_remote_error() {
        let (url, _) = stub_compiler(StatusCode::OK, json!("compiler exploded")).await;

        let err = client(url).compile("x").await.unwrap_err();
        assert!(matches!(err, CompileError::Remote(_)));
    }

    #[test]
    fn test_missing_payload_uses_generic_message() {
        let err = decode_response(CompileResponse {
            success: true,
            output: None,
            error: None,
        })
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("remote compilation failed: {GENERIC_REMOTE_ERROR}")
        );
    }

    #[test]
    fn test_empty_payload_is_remote_failure() {
        for payload in ["", "   "] {
            let err = decode_response(CompileResponse {
                success: true,
                output: Some(payload.to_string()),
                error: None,
            })
            .unwrap_err();
            assert!(matches!(err, CompileError::Remote(_)));
            assert_eq!(
                err.to_string(),
                format!("remote compilation failed: {GENERIC_REMOTE_ERROR}")
            );
        }
    }

    #[tokio::test]
    async fn test_empty_payload_over_http_is_remote_failure() {
        let (url, _) =
            stub_compiler(StatusCode::OK, json!({"success": true, "output": ""})).await;

        let err = client(url).compile("x").await.unwrap_err();
        assert!(matches!(err, CompileError::Remote(_)));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_invalid_base64_is_reported_as_remote_failure() {
        let err = decode_response(CompileResponse {
            success: true,
            output: Some("***not base64***".to_string()),
            error: None,
        })
        .unwrap_err();
        assert!(matches!(err, CompileError::Decode(_)));
        assert!(err.to_string().starts_with("remote compilation failed"));
        assert!(!err.is_transport());
    }
}
