//! Chat engine for the Confab session state manager.
//!
//! This crate drives the submission flow on top of `confab-core`:
//! accepting user input behind a submit gate, obtaining the full reply
//! from a [`ReplySource`](confab_core::reply::ReplySource), and revealing
//! it with the typewriter while staying cancellable from session
//! navigation.
//!
//! # Module Structure
//!
//! - `engine`: Submission flow and session navigation (`ChatEngine`)
//! - `gate`: Overlap guard for submissions (`SubmitGate`, `GatePass`)
//! - `typewriter`: Paced reveal of a completed reply (`TypewriterConfig`)
//! - `event`: Push notifications for hosts (`EngineEvent`, `EventSink`)

pub mod engine;
pub mod event;
pub mod gate;
pub mod typewriter;

pub use engine::{ChatEngine, Emission, EngineConfig, MessageDraft, Submission};
pub use event::{EngineEvent, EventSink};
pub use gate::{GatePass, SubmitGate};
pub use typewriter::TypewriterConfig;
