use std::sync::Arc;

use lexclass_core::pipeline::Pipeline;

use crate::page::IndexPage;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Pipeline,
    pub page: Arc<IndexPage>,
    pub max_upload_bytes: usize,
}
