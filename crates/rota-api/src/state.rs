//! Application state shared across route handlers.

use std::sync::Arc;

use rota_assistant::HrAssistant;

/// Shared application state, cheap to clone into handler tasks.
#[derive(Clone)]
pub struct AppState {
    /// The query pipeline.
    pub assistant: Arc<HrAssistant>,
}

impl AppState {
    pub fn new(assistant: HrAssistant) -> Self {
        Self {
            assistant: Arc::new(assistant),
        }
    }
}
