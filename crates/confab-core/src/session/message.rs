//! Chat message types.
//!
//! This module contains types for representing messages in a conversation:
//! roles, message bodies (one variant per renderable kind), and file
//! attachments.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the AI assistant.
    Assistant,
    /// System-generated message.
    System,
}

/// One section of an analysis card body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSection {
    /// Section heading ("Retrieving", "Summarizing", ...)
    pub title: String,
    /// Section detail text
    pub description: String,
}

/// The renderable content of a message.
///
/// Each variant carries exactly the fields its kind needs, so consumers
/// match exhaustively instead of probing an open metadata bag. Only the
/// `Text` variant is mutable after append (the typewriter rewrites its
/// `text` while streaming); all other variants are append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageBody {
    /// Plain text, optionally annotated with a footer line
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        footer: Option<String>,
    },
    /// Collapsible analysis summary card
    AnalysisCard {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subtitle: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration: Option<String>,
        #[serde(default)]
        sections: Vec<AnalysisSection>,
    },
    /// Tool invocation record
    ToolCall {
        tool_name: String,
        args: serde_json::Value,
    },
    /// Grouped child messages under a shared title
    Nested {
        title: String,
        children: Vec<Message>,
    },
}

impl MessageBody {
    /// Creates a plain text body without a footer.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            footer: None,
        }
    }
}

/// Upload lifecycle state of an attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentStatus {
    /// Selected but not yet uploaded.
    Idle,
    /// Upload in progress.
    Uploading,
    /// Upload finished successfully.
    Success,
    /// Upload failed.
    Error,
}

/// Coarse file category used for icons and previews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    Image,
    Pdf,
    Doc,
    Archive,
    Other,
}

impl AttachmentKind {
    /// Infers the kind from a file name's extension.
    pub fn from_name(name: &str) -> Self {
        let name = name.to_lowercase();
        if name.ends_with(".pdf") {
            Self::Pdf
        } else if name.ends_with(".doc") || name.ends_with(".docx") {
            Self::Doc
        } else if name.ends_with(".zip") || name.ends_with(".rar") || name.ends_with(".7z") {
            Self::Archive
        } else if name.ends_with(".png")
            || name.ends_with(".jpg")
            || name.ends_with(".jpeg")
            || name.ends_with(".webp")
            || name.ends_with(".gif")
        {
            Self::Image
        } else {
            Self::Other
        }
    }
}

/// A file attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Unique attachment identifier
    pub id: String,
    /// Original file name
    pub name: String,
    /// File size in bytes
    pub size: u64,
    /// Upload lifecycle state
    pub status: AttachmentStatus,
    /// Coarse file category
    pub kind: AttachmentKind,
    /// Upload progress percentage (0-100), if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    /// Download URL once uploaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Error detail when `status` is `Error`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl Attachment {
    /// Creates an idle attachment, inferring the kind from the file name.
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        let name = name.into();
        let kind = AttachmentKind::from_name(&name);
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            size,
            status: AttachmentStatus::Idle,
            kind,
            progress: None,
            url: None,
            error_message: None,
        }
    }

    /// Formats the size for display ("0KB", "712KB", "2.4MB").
    pub fn human_size(&self) -> String {
        if self.size == 0 {
            return "0KB".to_string();
        }
        let kb = self.size as f64 / 1024.0;
        if kb < 1024.0 {
            format!("{:.0}KB", kb)
        } else {
            format!("{:.1}MB", kb / 1024.0)
        }
    }
}

/// A single message in a conversation.
///
/// Each message has a stable id (unique within its session's list), a role,
/// a body, optional attachments, and a creation timestamp in ISO 8601
/// format. Seeded demo messages leave the timestamp unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Message identifier, unique within a session
    pub id: String,
    /// The role of the message sender
    pub role: MessageRole,
    /// The renderable content
    pub body: MessageBody,
    /// Files attached to the message
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    /// Timestamp when the message was created (ISO 8601 format)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Message {
    /// Creates a message with a random UUID id and the current timestamp.
    pub fn new(role: MessageRole, body: MessageBody) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            body,
            attachments: Vec::new(),
            created_at: Some(Utc::now().to_rfc3339()),
        }
    }

    /// Creates a user text message ("u-" prefixed id).
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: format!("u-{}", Uuid::new_v4()),
            role: MessageRole::User,
            body: MessageBody::text(text),
            attachments: Vec::new(),
            created_at: Some(Utc::now().to_rfc3339()),
        }
    }

    /// Creates an assistant text message ("a-" prefixed id).
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            id: format!("a-{}", Uuid::new_v4()),
            role: MessageRole::Assistant,
            body: MessageBody::text(text),
            attachments: Vec::new(),
            created_at: Some(Utc::now().to_rfc3339()),
        }
    }

    /// Creates the empty assistant message a typewriter emission fills in.
    pub fn assistant_placeholder() -> Self {
        Self::assistant("")
    }

    /// Attaches files to the message.
    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    /// Returns the text content for `Text` bodies, `None` otherwise.
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            MessageBody::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_ids_carry_role_prefix() {
        let user = Message::user("hello");
        let assistant = Message::assistant_placeholder();

        assert!(user.id.starts_with("u-"));
        assert!(assistant.id.starts_with("a-"));
        assert_eq!(assistant.text(), Some(""));
    }

    #[test]
    fn test_text_accessor_is_none_for_structured_bodies() {
        let card = Message::new(
            MessageRole::Assistant,
            MessageBody::AnalysisCard {
                title: "Analysis complete".to_string(),
                subtitle: None,
                duration: Some("1.5s".to_string()),
                sections: vec![],
            },
        );

        assert_eq!(card.text(), None);
    }

    #[test]
    fn test_attachment_kind_inference() {
        assert_eq!(AttachmentKind::from_name("Report.PDF"), AttachmentKind::Pdf);
        assert_eq!(AttachmentKind::from_name("notes.docx"), AttachmentKind::Doc);
        assert_eq!(AttachmentKind::from_name("bundle.7z"), AttachmentKind::Archive);
        assert_eq!(AttachmentKind::from_name("photo.jpeg"), AttachmentKind::Image);
        assert_eq!(AttachmentKind::from_name("data.csv"), AttachmentKind::Other);
    }

    #[test]
    fn test_attachment_human_size() {
        assert_eq!(Attachment::new("a.txt", 0).human_size(), "0KB");
        assert_eq!(Attachment::new("a.txt", 729_088).human_size(), "712KB");
        assert_eq!(Attachment::new("a.txt", 2_516_582).human_size(), "2.4MB");
    }

    #[test]
    fn test_body_serializes_with_type_tag() {
        let body = MessageBody::ToolCall {
            tool_name: "search".to_string(),
            args: serde_json::json!({ "query": "weather" }),
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["type"], "tool_call");
        assert_eq!(json["tool_name"], "search");
    }
}
