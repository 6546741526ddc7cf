use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::conversation::{ConversationState, ThreadId};

/// Persisted snapshot of a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub thread_id: ThreadId,
    pub state: ConversationState,
    /// Incremented on every save, starting at 1
    pub version: u64,
    pub updated_at: DateTime<Utc>,
}

impl Checkpoint {
    /// First checkpoint for a thread
    pub fn initial(thread_id: ThreadId, state: ConversationState) -> Self {
        Self {
            thread_id,
            state,
            version: 1,
            updated_at: Utc::now(),
        }
    }

    /// Checkpoint that supersedes `previous`
    pub fn next(previous: Option<&Checkpoint>, thread_id: ThreadId, state: ConversationState) -> Self {
        match previous {
            Some(previous) => Self {
                thread_id,
                state,
                version: previous.version + 1,
                updated_at: Utc::now(),
            },
            None => Self::initial(thread_id, state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_increments() {
        let id = ThreadId::new("t-1").unwrap();
        let first = Checkpoint::next(None, id.clone(), ConversationState::default());
        assert_eq!(first.version, 1);

        let second = Checkpoint::next(Some(&first), id, ConversationState::from_user_message("hi"));
        assert_eq!(second.version, 2);
        assert!(second.updated_at >= first.updated_at);
    }

    #[test]
    fn test_checkpoint_serde() {
        let checkpoint = Checkpoint::initial(
            ThreadId::new("t-1").unwrap(),
            ConversationState::from_user_message("hello"),
        );

        let json = serde_json::to_string(&checkpoint).unwrap();
        let parsed: Checkpoint = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, checkpoint);
    }
}
