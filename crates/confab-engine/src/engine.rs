//! Chat engine: submission flow and session navigation.
//!
//! `ChatEngine` wires the thread store, the reply source, the submit gate
//! and the typewriter into the flow the host drives: submit text, watch
//! the reply stream in, switch sessions at will. It owns no UI concerns;
//! hosts render from `snapshot()` and the event channel.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use uuid::Uuid;

use confab_core::error::Result;
use confab_core::reply::ReplySource;
use confab_core::session::{Attachment, Message, Session, ThreadStore, ThreadView};

use crate::event::{EngineEvent, EventSink};
use crate::gate::SubmitGate;
use crate::typewriter::{self, TypewriterConfig};

/// User input for one submission: trimmed text plus uploaded attachments.
#[derive(Debug, Clone, Default)]
pub struct MessageDraft {
    pub text: String,
    pub attachments: Vec<Attachment>,
}

impl MessageDraft {
    /// Creates a text-only draft.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attachments: Vec::new(),
        }
    }

    /// Adds attachments to the draft.
    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }
}

/// Outcome of a submission.
///
/// Dropped submissions are values, not errors: the guard semantics are
/// "do nothing further", and callers that care (a composer disabling its
/// send button) match on the variant.
#[derive(Debug)]
pub enum Submission {
    /// The submission was accepted and a reply emission is running.
    Accepted {
        user_message_id: String,
        assistant_message_id: String,
        emission: Emission,
    },
    /// Dropped: a reply is already in flight.
    DroppedBusy,
    /// Dropped: no text and no attachments.
    DroppedEmpty,
}

/// Handle on a running typewriter emission.
#[derive(Debug)]
pub struct Emission {
    handle: JoinHandle<bool>,
}

impl Emission {
    /// Waits for the emission to finish.
    ///
    /// Returns true when the reply was revealed completely, false when it
    /// was aborted (or its task failed).
    pub async fn wait(self) -> bool {
        self.handle.await.unwrap_or(false)
    }
}

/// Engine tuning knobs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Typewriter pacing
    pub typewriter: TypewriterConfig,
    /// Assistant greeting seeded into every new session, if set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome_message: Option<String>,
}

/// The chat session engine.
///
/// One engine drives one conversation surface. All methods take `&self`;
/// the engine is shared behind `Arc` between the input side and any
/// background consumers of its events.
pub struct ChatEngine {
    store: Arc<ThreadStore>,
    reply_source: Arc<dyn ReplySource>,
    gate: SubmitGate,
    config: EngineConfig,
    events: EventSink,
}

impl ChatEngine {
    /// Creates an engine with default config and no event channel.
    pub fn new(store: Arc<ThreadStore>, reply_source: Arc<dyn ReplySource>) -> Self {
        Self {
            store,
            reply_source,
            gate: SubmitGate::new(),
            config: EngineConfig::default(),
            events: EventSink::disabled(),
        }
    }

    /// Replaces the engine config.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Attaches an event sink.
    pub fn with_events(mut self, events: EventSink) -> Self {
        self.events = events;
        self
    }

    /// Returns the shared thread store.
    pub fn store(&self) -> &Arc<ThreadStore> {
        &self.store
    }

    /// Submits user input to a session.
    ///
    /// The flow on acceptance: ensure the session, append the user
    /// message, append an empty assistant placeholder, obtain the full
    /// reply from the reply source, then spawn the typewriter emission
    /// that reveals it. The gate stays locked until the emission ends.
    ///
    /// Empty input (trimmed text and no attachments) and input arriving
    /// while a reply is in flight are dropped without touching any state.
    ///
    /// # Errors
    ///
    /// Fails only when the reply source fails; the user message and the
    /// empty placeholder stay in the thread and the gate is released.
    pub async fn submit(&self, session_id: &str, draft: MessageDraft) -> Result<Submission> {
        let text = draft.text.trim().to_string();
        if text.is_empty() && draft.attachments.is_empty() {
            tracing::debug!("[ChatEngine] Empty submission dropped");
            return Ok(Submission::DroppedEmpty);
        }
        let Some(pass) = self.gate.try_acquire() else {
            tracing::debug!("[ChatEngine] Submission dropped, reply already in flight");
            return Ok(Submission::DroppedBusy);
        };

        self.store.ensure_session(session_id).await;

        let user_message = Message::user(text.as_str()).with_attachments(draft.attachments);
        let user_message_id = user_message.id.clone();
        self.store.append_message(session_id, user_message.clone()).await;
        self.events.emit(EngineEvent::MessageAppended {
            session_id: session_id.to_string(),
            message: user_message,
        });

        let placeholder = Message::assistant_placeholder();
        let assistant_message_id = placeholder.id.clone();
        self.store.append_message(session_id, placeholder.clone()).await;
        self.events.emit(EngineEvent::MessageAppended {
            session_id: session_id.to_string(),
            message: placeholder,
        });

        let reply = match self.reply_source.produce_reply(session_id, &text).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!("[ChatEngine] Reply source failed: {}", e);
                drop(pass);
                return Err(e);
            }
        };

        let token = self.store.begin_typing();
        let store = Arc::clone(&self.store);
        let typewriter_config = self.config.typewriter.clone();
        let events = self.events.clone();
        let emission_session = session_id.to_string();
        let emission_message = assistant_message_id.clone();
        let handle = tokio::spawn(async move {
            let completed = typewriter::reveal(
                &store,
                &typewriter_config,
                &emission_session,
                &emission_message,
                &reply,
                &token,
                &events,
            )
            .await;
            events.emit(EngineEvent::ReplyFinished {
                session_id: emission_session,
                message_id: emission_message,
                completed,
            });
            drop(pass);
            completed
        });

        Ok(Submission::Accepted {
            user_message_id,
            assistant_message_id,
            emission: Emission { handle },
        })
    }

    /// Text-only convenience over [`submit`](Self::submit).
    pub async fn submit_text(&self, session_id: &str, text: &str) -> Result<Submission> {
        self.submit(session_id, MessageDraft::text(text)).await
    }

    /// Switches the active session, aborting any in-flight emission.
    pub async fn select_session(&self, session_id: &str) {
        self.store.switch_session(session_id).await;
        self.events.emit(EngineEvent::SessionSwitched {
            session_id: session_id.to_string(),
        });
    }

    /// Creates a session, seeds its welcome message, and makes it active.
    pub async fn create_session(&self) -> Session {
        let session = Session::new(
            format!("session-{}", Uuid::new_v4()),
            "New conversation",
            "Today",
            chrono::Local::now().format("%H:%M").to_string(),
        );
        self.store.insert_session(session.clone()).await;
        if let Some(welcome) = &self.config.welcome_message {
            self.store
                .append_message(&session.id, Message::assistant(welcome.clone()))
                .await;
        }
        self.store.switch_session(&session.id).await;
        tracing::debug!("[ChatEngine] Created session '{}'", session.id);
        self.events.emit(EngineEvent::SessionCreated {
            session: session.clone(),
        });
        self.events.emit(EngineEvent::SessionSwitched {
            session_id: session.id.clone(),
        });
        session
    }

    /// Empties a session's thread without removing it from the directory.
    pub async fn clear_session(&self, session_id: &str) {
        self.store.clear_messages(session_id).await;
    }

    /// Returns the read-only view of the active thread.
    pub async fn snapshot(&self) -> ThreadView {
        self.store.snapshot().await
    }

    /// Returns the session directory in display order.
    pub async fn sessions(&self) -> Vec<Session> {
        self.store.sessions().await
    }

    /// Returns true while a reply is being produced or revealed.
    pub fn is_replying(&self) -> bool {
        self.gate.is_running()
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
