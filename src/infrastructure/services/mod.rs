//! Infrastructure services

mod conversation_service;
mod thread_locks;

pub use conversation_service::{
    ConversationService, ConversationServiceConfig, ConversationTurn, TurnError,
};
pub use thread_locks::{ThreadGuard, ThreadLocks};
