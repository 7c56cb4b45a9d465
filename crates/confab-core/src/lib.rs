pub mod error;
pub mod reply;
pub mod session;

// Re-export common error type
pub use error::ConfabError;
