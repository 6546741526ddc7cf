//! Thread endpoint payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Checkpoint, Message, ThreadId};

#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadCreatedResponse {
    pub thread_id: ThreadId,
}

/// Stored thread as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadResponse {
    pub thread_id: ThreadId,
    pub messages: Vec<Message>,
    pub version: u64,
    pub updated_at: DateTime<Utc>,
}

impl From<Checkpoint> for ThreadResponse {
    fn from(checkpoint: Checkpoint) -> Self {
        Self {
            thread_id: checkpoint.thread_id,
            messages: checkpoint.state.messages,
            version: checkpoint.version,
            updated_at: checkpoint.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConversationState;

    #[test]
    fn test_thread_response_from_checkpoint() {
        let id = ThreadId::new("t-9").unwrap();
        let checkpoint = Checkpoint::initial(id.clone(), ConversationState::from_user_message("hi"));

        let response = ThreadResponse::from(checkpoint);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["thread_id"], "t-9");
        assert_eq!(json["version"], 1);
        assert_eq!(json["messages"][0]["role"], "user");
        assert!(json.get("documents").is_none());
    }
}
