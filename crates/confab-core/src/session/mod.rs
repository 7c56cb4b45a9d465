//! Session domain module.
//!
//! This module contains all session-related domain models and the in-memory
//! thread store.
//!
//! # Module Structure
//!
//! - `model`: Session directory entry (`Session`)
//! - `message`: Message types (`Message`, `MessageRole`, `MessageBody`,
//!   `Attachment`)
//! - `typing`: Typewriter cancellation (`AbortToken`, `TypingAbort`)
//! - `store`: Thread state and mutations (`ThreadStore`, `ThreadView`)

mod message;
mod model;
mod store;
mod typing;

// Re-export public API
pub use message::{
    AnalysisSection, Attachment, AttachmentKind, AttachmentStatus, Message, MessageBody,
    MessageRole,
};
pub use model::Session;
pub use store::{ThreadStore, ThreadView};
pub use typing::{AbortToken, TypingAbort};
