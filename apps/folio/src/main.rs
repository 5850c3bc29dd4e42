mod config;
mod errors;
mod generation;
mod llm_client;
mod routes;
mod site;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::site::content::SiteContent;
use crate::site::SitePages;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.llm_api_key.clone(),
        config.llm_api_url.clone(),
        config.llm_timeout,
    )
    .context("Failed to build LLM HTTP client")?;
    info!(
        "LLM client initialized (model: {}, timeout: {}s)",
        llm_client::MODEL,
        config.llm_timeout.as_secs()
    );

    // Load portfolio content and compile page templates
    let content = match &config.site_content_path {
        Some(path) => {
            info!("Loading site content from {}", path.display());
            SiteContent::load(path)?
        }
        None => SiteContent::default(),
    };
    let pages = SitePages::new(content).context("Failed to compile page templates")?;

    // Build app state
    let state = AppState {
        generator: Arc::new(llm),
        pages: Arc::new(pages),
    };

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
