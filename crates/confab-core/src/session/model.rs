//! Session domain model.
//!
//! This module contains the core Session entity that represents
//! one conversation thread in the session drawer.

use serde::{Deserialize, Serialize};

/// Metadata for one conversation thread.
///
/// A session is a directory entry: the id keys the message list in the
/// store, the remaining fields are display strings for the session drawer
/// (title, grouping label like "Today" / "Yesterday", and a short time
/// label). Display fields are plain strings on purpose; the store never
/// interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier
    pub id: String,
    /// Human-readable session title
    pub title: String,
    /// Drawer group label ("Today", "Yesterday", "This week", ...)
    pub group: String,
    /// Short time label shown next to the title ("10:32", "11/07", ...)
    pub time_label: String,
}

impl Session {
    /// Creates a session with all fields given.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        group: impl Into<String>,
        time_label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            group: group.into(),
            time_label: time_label.into(),
        }
    }
}
