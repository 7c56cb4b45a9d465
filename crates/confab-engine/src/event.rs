//! Engine events streamed to the host.
//!
//! Hosts that want push notifications (a UI re-render, a live terminal
//! printer) hand the engine an unbounded channel sender; every mutation
//! emits one event. Hosts that only poll `snapshot()` skip the channel
//! entirely. Sends never block and a dropped receiver is ignored.

use serde::Serialize;
use tokio::sync::mpsc;

use confab_core::session::{Message, Session};

/// One state change inside the engine.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    /// A new session was created and made active.
    SessionCreated { session: Session },
    /// The active session changed.
    SessionSwitched { session_id: String },
    /// A message was appended to a session's thread.
    MessageAppended {
        session_id: String,
        message: Message,
    },
    /// The typewriter revealed another chunk of the in-flight reply.
    ReplyDelta {
        session_id: String,
        message_id: String,
        delta: String,
    },
    /// The in-flight reply ended; `completed` is false when it was aborted.
    ReplyFinished {
        session_id: String,
        message_id: String,
        completed: bool,
    },
}

/// Fan-out point for [`EngineEvent`]s.
///
/// Cloned freely into spawned emission tasks. With no sender attached,
/// `emit` is a no-op.
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    sender: Option<mpsc::UnboundedSender<EngineEvent>>,
}

impl EventSink {
    /// Creates a sink that forwards events into `sender`.
    pub fn new(sender: mpsc::UnboundedSender<EngineEvent>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    /// Creates a sink that discards everything.
    pub fn disabled() -> Self {
        Self { sender: None }
    }

    /// Sends an event; closed or missing channels are ignored.
    pub fn emit(&self, event: EngineEvent) {
        if let Some(sender) = &self.sender {
            let _ = sender.send(event);
        }
    }
}
