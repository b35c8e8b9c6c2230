//! Storage abstraction for the persisted unread state.
//!
//! The state is a single JSON object mapping titles to the last chapter
//! notified. It is read once at the start of a run and replaced wholesale at
//! the end.

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::UnreadState;

// Re-export for convenience
pub use local::LocalStateStore;

/// Trait for state storage backends.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load the persisted state. A missing or unparsable record is an empty
    /// state; any other read failure is an error.
    async fn load(&self) -> Result<UnreadState>;

    /// Replace the persisted state with `state`.
    async fn save(&self, state: &UnreadState) -> Result<()>;

    /// Human-readable location, for log lines.
    fn location(&self) -> String;
}
