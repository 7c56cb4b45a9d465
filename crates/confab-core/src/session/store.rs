//! In-memory thread store.
//!
//! Owns every conversation thread: the session directory, the per-session
//! message lists, and the active session id. All mutation goes through this
//! store, so ordering is decided by its single lock.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::message::{Message, MessageBody};
use super::model::Session;
use super::typing::{AbortToken, TypingAbort};

/// Read-only view of the active thread.
///
/// This is the outbound surface for hosts: the active session id (if any)
/// and a clone of its message list. Hosts re-read it after mutations or on
/// engine events; they never hold references into the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadView {
    /// Currently active session id, `None` before the first switch
    pub active_session_id: Option<String>,
    /// Messages of the active session, in append order
    pub messages: Vec<Message>,
}

#[derive(Debug, Default)]
struct ThreadState {
    /// Session directory in display order (newest first)
    sessions: Vec<Session>,
    /// Message lists keyed by session id
    messages: HashMap<String, Vec<Message>>,
    /// Active session id; `Some(id)` implies `messages` has an entry for it
    active_session_id: Option<String>,
}

/// The central state manager for conversation threads.
///
/// `ThreadStore` is responsible for:
/// - Keeping the session directory and per-session message lists
/// - Tracking the active session
/// - Appending messages and rewriting streaming assistant text
/// - Owning the typewriter abort registry, so switching sessions
///   invalidates the in-flight emission
///
/// Lookup misses during text updates are silent no-ops: an emission whose
/// target vanished (cleared thread, stale session) must degrade quietly
/// rather than fail the whole flow.
#[derive(Debug)]
pub struct ThreadStore {
    state: RwLock<ThreadState>,
    typing: TypingAbort,
}

impl ThreadStore {
    /// Creates an empty store with no sessions and no active session.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(ThreadState::default()),
            typing: TypingAbort::new(),
        }
    }

    /// Creates a store pre-populated with a session directory and message
    /// history.
    ///
    /// Every listed session is guaranteed a message list entry, even when
    /// `messages` has no history for it. No session becomes active; callers
    /// switch explicitly.
    pub fn with_seed(sessions: Vec<Session>, mut messages: HashMap<String, Vec<Message>>) -> Self {
        for session in &sessions {
            messages.entry(session.id.clone()).or_default();
        }
        Self {
            state: RwLock::new(ThreadState {
                sessions,
                messages,
                active_session_id: None,
            }),
            typing: TypingAbort::new(),
        }
    }

    /// Ensures a message list entry exists for the session.
    ///
    /// Idempotent: existing lists are left untouched.
    pub async fn ensure_session(&self, session_id: &str) {
        let mut state = self.state.write().await;
        if !state.messages.contains_key(session_id) {
            state.messages.insert(session_id.to_string(), Vec::new());
            tracing::trace!("[ThreadStore] Created empty thread for '{}'", session_id);
        }
    }

    /// Adds a session to the front of the directory and ensures its thread.
    ///
    /// A session already in the directory is not duplicated; only its
    /// message list entry is ensured.
    pub async fn insert_session(&self, session: Session) {
        let mut state = self.state.write().await;
        state
            .messages
            .entry(session.id.clone())
            .or_default();
        if state.sessions.iter().any(|s| s.id == session.id) {
            tracing::debug!("[ThreadStore] Session '{}' already listed", session.id);
            return;
        }
        tracing::debug!("[ThreadStore] Inserted session '{}'", session.id);
        state.sessions.insert(0, session);
    }

    /// Switches the active session.
    ///
    /// The in-flight typewriter emission (if any) is aborted first, then the
    /// target session's thread is ensured and made active. Unknown ids are
    /// valid targets: they get an empty thread. The directory is not
    /// touched; directory membership comes from `insert_session` or seeding.
    pub async fn switch_session(&self, session_id: &str) {
        self.typing.abort_current();
        let mut state = self.state.write().await;
        if !state.messages.contains_key(session_id) {
            state.messages.insert(session_id.to_string(), Vec::new());
        }
        state.active_session_id = Some(session_id.to_string());
        tracing::debug!("[ThreadStore] Switched active session to '{}'", session_id);
    }

    /// Appends a message to a session's thread, creating the thread if
    /// needed. Messages are never reordered after append.
    pub async fn append_message(&self, session_id: &str, message: Message) {
        let mut state = self.state.write().await;
        tracing::trace!(
            "[ThreadStore] Appending message '{}' to '{}'",
            message.id,
            session_id
        );
        state
            .messages
            .entry(session_id.to_string())
            .or_default()
            .push(message);
    }

    /// Replaces the text of a streaming assistant message.
    ///
    /// The whole accumulated text is written each time, not a delta. Silent
    /// no-op when the session has no thread, the message id is missing, or
    /// the message is not a `Text` body; a stale emission must not be able
    /// to fail the store.
    pub async fn update_message_text(
        &self,
        session_id: &str,
        message_id: &str,
        text: impl Into<String>,
    ) {
        let mut state = self.state.write().await;
        let Some(thread) = state.messages.get_mut(session_id) else {
            tracing::trace!(
                "[ThreadStore] Text update for unknown session '{}' dropped",
                session_id
            );
            return;
        };
        let Some(message) = thread.iter_mut().find(|m| m.id == message_id) else {
            tracing::trace!(
                "[ThreadStore] Text update for missing message '{}' dropped",
                message_id
            );
            return;
        };
        match &mut message.body {
            MessageBody::Text { text: current, .. } => *current = text.into(),
            _ => tracing::trace!(
                "[ThreadStore] Text update for non-text message '{}' dropped",
                message_id
            ),
        }
    }

    /// Empties a session's thread without removing it.
    ///
    /// An emission still streaming into the cleared thread degrades to
    /// no-op updates from the next tick on. Unknown sessions are ignored.
    pub async fn clear_messages(&self, session_id: &str) {
        let mut state = self.state.write().await;
        if let Some(thread) = state.messages.get_mut(session_id) {
            thread.clear();
            tracing::debug!("[ThreadStore] Cleared thread '{}'", session_id);
        }
    }

    /// Returns the session directory in display order.
    pub async fn sessions(&self) -> Vec<Session> {
        let state = self.state.read().await;
        state.sessions.clone()
    }

    /// Returns a session's messages in append order (empty for unknown ids).
    pub async fn messages(&self, session_id: &str) -> Vec<Message> {
        let state = self.state.read().await;
        state.messages.get(session_id).cloned().unwrap_or_default()
    }

    /// Returns the ID of the currently active session.
    pub async fn active_session_id(&self) -> Option<String> {
        let state = self.state.read().await;
        state.active_session_id.clone()
    }

    /// Returns the read-only view of the active thread.
    pub async fn snapshot(&self) -> ThreadView {
        let state = self.state.read().await;
        let messages = state
            .active_session_id
            .as_ref()
            .and_then(|id| state.messages.get(id))
            .cloned()
            .unwrap_or_default();
        ThreadView {
            active_session_id: state.active_session_id.clone(),
            messages,
        }
    }

    /// Invalidates the previous emission's token and returns a fresh one.
    ///
    /// Called by the engine right before spawning a typewriter task; the
    /// returned token is the one that emission checks each tick.
    pub fn begin_typing(&self) -> AbortToken {
        self.typing.begin()
    }
}

impl Default for ThreadStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::message::MessageRole;

    fn seeded_store() -> ThreadStore {
        let sessions = vec![
            Session::new("s-1", "First", "Today", "10:32"),
            Session::new("s-2", "Second", "Today", "09:05"),
        ];
        let mut messages = HashMap::new();
        messages.insert("s-1".to_string(), vec![Message::assistant("hello")]);
        ThreadStore::with_seed(sessions, messages)
    }

    #[tokio::test]
    async fn test_append_preserves_order() {
        let store = ThreadStore::new();

        store.append_message("s-1", Message::user("one")).await;
        store.append_message("s-1", Message::user("two")).await;
        store.append_message("s-1", Message::user("three")).await;

        let texts: Vec<_> = store
            .messages("s-1")
            .await
            .iter()
            .map(|m| m.text().unwrap().to_string())
            .collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_ensure_session_is_idempotent() {
        let store = ThreadStore::new();

        store.ensure_session("s-1").await;
        store.append_message("s-1", Message::user("kept")).await;
        store.ensure_session("s-1").await;

        assert_eq!(store.messages("s-1").await.len(), 1);
    }

    #[tokio::test]
    async fn test_seed_creates_entries_for_all_listed_sessions() {
        let store = seeded_store();

        // s-2 had no history in the seed map but must still have a thread.
        assert_eq!(store.messages("s-2").await.len(), 0);
        assert_eq!(store.messages("s-1").await.len(), 1);
        assert_eq!(store.sessions().await.len(), 2);
    }

    #[tokio::test]
    async fn test_insert_session_prepends_without_duplicating() {
        let store = seeded_store();

        store
            .insert_session(Session::new("s-3", "Third", "Today", "11:00"))
            .await;
        store
            .insert_session(Session::new("s-3", "Third", "Today", "11:00"))
            .await;

        let sessions = store.sessions().await;
        assert_eq!(sessions.len(), 3);
        assert_eq!(sessions[0].id, "s-3");
    }

    #[tokio::test]
    async fn test_switch_activates_and_ensures() {
        let store = ThreadStore::new();
        assert_eq!(store.active_session_id().await, None);

        store.switch_session("fresh").await;

        assert_eq!(store.active_session_id().await, Some("fresh".to_string()));
        assert_eq!(store.messages("fresh").await.len(), 0);
    }

    #[tokio::test]
    async fn test_switch_aborts_in_flight_typing() {
        let store = ThreadStore::new();
        let token = store.begin_typing();

        store.switch_session("elsewhere").await;

        assert!(token.is_aborted());
    }

    #[tokio::test]
    async fn test_update_text_rewrites_whole_content() {
        let store = ThreadStore::new();
        let message = Message::assistant_placeholder();
        let id = message.id.clone();
        store.append_message("s-1", message).await;

        store.update_message_text("s-1", &id, "partial").await;
        store.update_message_text("s-1", &id, "partial grown").await;

        let messages = store.messages("s-1").await;
        assert_eq!(messages[0].text(), Some("partial grown"));
    }

    #[tokio::test]
    async fn test_update_missing_message_is_noop() {
        let store = ThreadStore::new();
        store.append_message("s-1", Message::user("kept")).await;

        store.update_message_text("s-1", "no-such-id", "ghost").await;
        store.update_message_text("no-such-session", "x", "ghost").await;

        let messages = store.messages("s-1").await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text(), Some("kept"));
    }

    #[tokio::test]
    async fn test_update_non_text_body_is_noop() {
        let store = ThreadStore::new();
        let card = Message::new(
            MessageRole::Assistant,
            MessageBody::AnalysisCard {
                title: "Analysis complete".to_string(),
                subtitle: None,
                duration: None,
                sections: vec![],
            },
        );
        let id = card.id.clone();
        store.append_message("s-1", card).await;

        store.update_message_text("s-1", &id, "overwritten").await;

        let messages = store.messages("s-1").await;
        assert!(matches!(
            messages[0].body,
            MessageBody::AnalysisCard { .. }
        ));
    }

    #[tokio::test]
    async fn test_clear_messages_keeps_thread_entry() {
        let store = seeded_store();

        store.clear_messages("s-1").await;
        store.append_message("s-1", Message::user("after")).await;

        assert_eq!(store.messages("s-1").await.len(), 1);
    }

    #[tokio::test]
    async fn test_snapshot_follows_active_session() {
        let store = seeded_store();

        let empty = store.snapshot().await;
        assert_eq!(empty.active_session_id, None);
        assert!(empty.messages.is_empty());

        store.switch_session("s-1").await;
        let view = store.snapshot().await;
        assert_eq!(view.active_session_id, Some("s-1".to_string()));
        assert_eq!(view.messages.len(), 1);

        store.switch_session("s-2").await;
        let other = store.snapshot().await;
        assert!(other.messages.is_empty());
    }
}
