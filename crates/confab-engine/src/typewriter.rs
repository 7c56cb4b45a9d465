//! Typewriter reveal of a completed reply.
//!
//! The reply text is already fully known when the reveal starts; this
//! module only paces its appearance, writing a growing prefix into the
//! assistant placeholder once per tick. Each tick checks the abort token
//! first, so a session switch or a newer submission stops the reveal at
//! the next tick with the partial text left in place.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use confab_core::session::{AbortToken, ThreadStore};

use crate::event::{EngineEvent, EventSink};

/// Pacing parameters for the reveal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypewriterConfig {
    /// Characters revealed per tick
    pub chunk_chars: usize,
    /// Milliseconds between ticks
    pub tick_ms: u64,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            chunk_chars: 8,
            tick_ms: 60,
        }
    }
}

impl TypewriterConfig {
    /// Returns the tick interval as a [`Duration`].
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

/// Splits `text` into chunks of at most `chunk_chars` characters.
///
/// Boundaries fall on character boundaries, never inside a multi-byte
/// sequence. A zero chunk size is treated as one.
fn chunk_text(text: &str, chunk_chars: usize) -> Vec<&str> {
    let chunk_chars = chunk_chars.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;
    for (idx, _) in text.char_indices() {
        if count == chunk_chars {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }
    chunks
}

/// Reveals `full_text` into an assistant message chunk by chunk.
///
/// Sleeps one tick, checks the token, then writes the accumulated prefix
/// through the store; after `ceil(len / chunk_chars)` undisturbed ticks
/// the message holds `full_text` exactly. Returns true when the reveal
/// ran to completion, false when the token aborted it. Partial writes are
/// never rolled back.
pub(crate) async fn reveal(
    store: &ThreadStore,
    config: &TypewriterConfig,
    session_id: &str,
    message_id: &str,
    full_text: &str,
    token: &AbortToken,
    events: &EventSink,
) -> bool {
    let mut revealed = String::with_capacity(full_text.len());
    for chunk in chunk_text(full_text, config.chunk_chars) {
        tokio::time::sleep(config.tick()).await;
        if token.is_aborted() {
            tracing::debug!(
                "[Typewriter] Reveal for message '{}' aborted at {} chars",
                message_id,
                revealed.chars().count()
            );
            return false;
        }
        revealed.push_str(chunk);
        store
            .update_message_text(session_id, message_id, revealed.clone())
            .await;
        events.emit(EngineEvent::ReplyDelta {
            session_id: session_id.to_string(),
            message_id: message_id.to_string(),
            delta: chunk.to_string(),
        });
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use confab_core::session::Message;

    #[test]
    fn test_chunking_counts_characters_not_bytes() {
        let chunks = chunk_text("héllo wörld!", 4);
        assert_eq!(chunks, vec!["héll", "o wö", "rld!"]);
    }

    #[test]
    fn test_chunking_edge_sizes() {
        assert!(chunk_text("", 8).is_empty());
        assert_eq!(chunk_text("abc", 8), vec!["abc"]);
        assert_eq!(chunk_text("abcd", 2), vec!["ab", "cd"]);
        // Zero is clamped rather than looping forever.
        assert_eq!(chunk_text("ab", 0), vec!["a", "b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reveal_writes_full_text() {
        let store = ThreadStore::new();
        let placeholder = Message::assistant_placeholder();
        let id = placeholder.id.clone();
        store.append_message("s-1", placeholder).await;

        let config = TypewriterConfig::default();
        let token = store.begin_typing();
        let completed = reveal(
            &store,
            &config,
            "s-1",
            &id,
            "twenty characters ok",
            &token,
            &EventSink::disabled(),
        )
        .await;

        assert!(completed);
        let messages = store.messages("s-1").await;
        assert_eq!(messages[0].text(), Some("twenty characters ok"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_aborted_token_stops_before_first_write() {
        let store = ThreadStore::new();
        let placeholder = Message::assistant_placeholder();
        let id = placeholder.id.clone();
        store.append_message("s-1", placeholder).await;

        let config = TypewriterConfig::default();
        let token = store.begin_typing();
        store.switch_session("elsewhere").await;

        let completed = reveal(
            &store,
            &config,
            "s-1",
            &id,
            "never shown",
            &token,
            &EventSink::disabled(),
        )
        .await;

        assert!(!completed);
        assert_eq!(store.messages("s-1").await[0].text(), Some(""));
    }
}
