//! Reply source trait.
//!
//! Defines the interface for producing assistant replies.

use crate::error::Result;
use async_trait::async_trait;

/// An abstract source of assistant replies.
///
/// This trait is the boundary between the session engine and whatever
/// produces reply text (a hosted LLM API, a local model, a mock). The
/// engine awaits the full reply before revealing it with the typewriter,
/// so implementations return the complete text, not a stream.
///
/// # Implementation Notes
///
/// Implementations should handle:
/// - Their own retries and timeouts (the engine does not retry)
/// - Concurrent calls if the host runs several engines
#[async_trait]
pub trait ReplySource: Send + Sync {
    /// Produces the full reply for a submitted user message.
    ///
    /// # Arguments
    ///
    /// * `session_id` - The session the submission belongs to
    /// * `text` - The trimmed user input text
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The complete reply text
    /// - `Err(_)`: The backend failed; the engine logs and gives up
    async fn produce_reply(&self, session_id: &str, text: &str) -> Result<String>;
}
