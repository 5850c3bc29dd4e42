use std::sync::Arc;

use crate::generation::generator::GenerationService;
use crate::site::SitePages;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable generation backend. Default: the Anthropic-backed `LlmClient`.
    pub generator: Arc<dyn GenerationService>,
    pub pages: Arc<SitePages>,
}
