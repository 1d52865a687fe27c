mod compiler;
mod config;
mod errors;
mod generation;
mod latex;
mod models;
mod preview;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::compiler::CompilationClient;
use crate::config::Config;
use crate::latex::TemplateSource;
use crate::preview::PreviewRegistry;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cvtex API v{}", env!("CARGO_PKG_VERSION"));

    let compiler = CompilationClient::new(config.compiler_url.clone(), config.compile_timeout)
        .context("Failed to build HTTP client for the LaTeX compiler")?;
    info!(
        "Compilation client initialized (endpoint: {}, timeout: {}s)",
        compiler.endpoint(),
        config.compile_timeout.as_secs()
    );

    let template = TemplateSource::from_path(config.template_path.clone());
    info!("Template source: {}", template.describe());

    let state = AppState {
        compiler: Arc::new(compiler),
        template,
        previews: PreviewRegistry::new(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
