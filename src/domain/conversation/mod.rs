//! Conversation domain
//!
//! Holds the typed state threaded through one graph execution and the identifier that
//! keys persisted conversations.

mod state;
mod thread_id;

pub use state::{ConversationState, RegenerateFlag, StateUpdate, append_messages, overwrite};
pub use thread_id::{MAX_THREAD_ID_LENGTH, ThreadId, ThreadIdError};
