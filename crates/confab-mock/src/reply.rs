//! Mock reply sources.
//!
//! Stand-ins for the real language-model backend. Both simulate network
//! latency with a short random delay before returning, so the submit
//! gate stays observably locked for a while even in demos.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use confab_core::error::Result;
use confab_core::reply::ReplySource;

async fn network_jitter() {
    let ms = rand::thread_rng().gen_range(500..=1000);
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

const CANNED_REPLY: &str = "This is a long mock reply used to simulate streaming output \
(the typewriter effect).\n\n\
Swap it for the real backend response later:\n\
1. Append the user message\n\
2. Append an empty assistant placeholder\n\
3. Keep rewriting that placeholder's content\n\n\
For something closer to a production feel, reveal by tokens or sentences, \
or add a little random pause between chunks.";

/// Reply source returning the same fixed text for every submission.
///
/// Long enough that the typewriter reveal is clearly visible.
#[derive(Debug, Clone)]
pub struct CannedReplySource {
    reply: String,
}

impl CannedReplySource {
    pub fn new() -> Self {
        Self {
            reply: CANNED_REPLY.to_string(),
        }
    }

    /// Uses a custom reply text instead of the built-in one.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

impl Default for CannedReplySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReplySource for CannedReplySource {
    async fn produce_reply(&self, _session_id: &str, _text: &str) -> Result<String> {
        network_jitter().await;
        Ok(self.reply.clone())
    }
}

/// Reply source echoing the submitted text back.
#[derive(Debug, Clone, Default)]
pub struct EchoReplySource;

impl EchoReplySource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ReplySource for EchoReplySource {
    async fn produce_reply(&self, _session_id: &str, text: &str) -> Result<String> {
        network_jitter().await;
        let shown = if text.trim().is_empty() {
            "(no text)"
        } else {
            text
        };
        Ok(format!("Received your question: {}", shown))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_canned_source_returns_custom_reply() {
        let source = CannedReplySource::with_reply("short answer");

        let reply = source.produce_reply("s-1", "anything").await.unwrap();
        assert_eq!(reply, "short answer");
    }

    #[tokio::test(start_paused = true)]
    async fn test_echo_source_quotes_the_question() {
        let source = EchoReplySource::new();

        let reply = source.produce_reply("s-1", "what's new?").await.unwrap();
        assert_eq!(reply, "Received your question: what's new?");
    }

    #[tokio::test(start_paused = true)]
    async fn test_echo_source_falls_back_for_attachment_only_input() {
        let source = EchoReplySource::new();

        let reply = source.produce_reply("s-1", "  ").await.unwrap();
        assert_eq!(reply, "Received your question: (no text)");
    }
}
