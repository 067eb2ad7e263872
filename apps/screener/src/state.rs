use std::sync::Arc;

use crate::llm_client::LlmBackend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The one LLM backend built at startup; `LlmClient` in production.
    pub llm: Arc<dyn LlmBackend>,
}
