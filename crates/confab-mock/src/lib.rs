//! Mock backends and demo data for Confab.
//!
//! Everything the engine delegates outward has a mock here: reply
//! sources, the attachment uploader, and seed sessions with message
//! history. Demos and integration tests build on this crate; nothing in
//! it performs real I/O.
//!
//! # Module Structure
//!
//! - `reply`: Mock reply sources (`CannedReplySource`, `EchoReplySource`)
//! - `upload`: Attachment upload simulation (`MockUploader`)
//! - `seed`: Demo sessions and message history (`demo_store`)

pub mod reply;
pub mod seed;
pub mod upload;

pub use reply::{CannedReplySource, EchoReplySource};
pub use seed::{WELCOME_TEXT, demo_messages, demo_sessions, demo_store};
pub use upload::MockUploader;
