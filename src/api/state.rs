//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::services::ConversationService;

/// State shared by all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub conversation_service: Arc<ConversationService>,
}

impl AppState {
    pub fn new(conversation_service: Arc<ConversationService>) -> Self {
        Self {
            conversation_service,
        }
    }
}
