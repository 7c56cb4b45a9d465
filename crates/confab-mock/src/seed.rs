//! Seed data for demos and tests.
//!
//! A small session drawer with history in three of six sessions,
//! exercising every message body kind: plain text, a footer-annotated
//! text, an analysis card, and a nested group. Seeded messages carry
//! fixed ids and no timestamps.

use std::collections::HashMap;

use confab_core::session::{
    AnalysisSection, Message, MessageBody, MessageRole, Session, ThreadStore,
};

/// Greeting seeded as the first assistant message of new sessions.
pub const WELCOME_TEXT: &str = "Hi, I'm the assistant. How can I help you today?";

/// Returns the demo session drawer, newest group first.
pub fn demo_sessions() -> Vec<Session> {
    vec![
        Session::new(
            "session-1",
            "National weather overview and travel advice",
            "Today",
            "10:32",
        ),
        Session::new(
            "session-2",
            "Key factors in enterprise digital transformation",
            "Today",
            "09:05",
        ),
        Session::new(
            "session-3",
            "Knowledge base planning and rollout",
            "Yesterday",
            "18:22",
        ),
        Session::new(
            "session-4",
            "Sales metrics review and forecast",
            "This week",
            "11/10",
        ),
        Session::new(
            "session-5",
            "Channel operations retrospective",
            "This week",
            "11/07",
        ),
        Session::new(
            "session-6",
            "Customer profile update suggestions",
            "This month",
            "11/01",
        ),
    ]
}

fn seeded(id: &str, role: MessageRole, body: MessageBody) -> Message {
    Message {
        id: id.to_string(),
        role,
        body,
        attachments: Vec::new(),
        created_at: None,
    }
}

/// Returns the demo message history, keyed by session id.
///
/// Sessions without an entry start empty; `ThreadStore::with_seed` still
/// creates their threads.
pub fn demo_messages() -> HashMap<String, Vec<Message>> {
    let mut messages = HashMap::new();

    messages.insert(
        "session-1".to_string(),
        vec![
            seeded("msg-1", MessageRole::Assistant, MessageBody::text(WELCOME_TEXT)),
            seeded(
                "msg-2",
                MessageRole::User,
                MessageBody::text(
                    "Which key factors should we prioritize in an enterprise digital \
                     transformation?",
                ),
            ),
            seeded(
                "msg-3",
                MessageRole::Assistant,
                MessageBody::AnalysisCard {
                    title: "Analysis complete".to_string(),
                    subtitle: Some("Overall company performance this fiscal year".to_string()),
                    duration: Some("1.5s".to_string()),
                    sections: vec![AnalysisSection {
                        title: "Retrieving".to_string(),
                        description: "The sales and financial datasets correlate strongly with \
                                      the company performance indicators; proceeding to deeper \
                                      analysis."
                            .to_string(),
                    }],
                },
            ),
            seeded(
                "msg-4",
                MessageRole::Assistant,
                MessageBody::Text {
                    text: "Preliminary conclusions: core business metrics remain stable; we \
                           recommend focusing on process standardization and data governance."
                        .to_string(),
                    footer: Some("AI generated, for reference only".to_string()),
                },
            ),
        ],
    );

    messages.insert(
        "session-2".to_string(),
        vec![seeded(
            "msg-2-1",
            MessageRole::Assistant,
            MessageBody::text("This is a fresh conversation example."),
        )],
    );

    messages.insert(
        "session-3".to_string(),
        vec![seeded(
            "msg-3-1",
            MessageRole::Assistant,
            MessageBody::Nested {
                title: "Knowledge base rollout suggestions".to_string(),
                children: vec![
                    seeded(
                        "msg-3-1-1",
                        MessageRole::Assistant,
                        MessageBody::text("1. Map the business knowledge structure"),
                    ),
                    seeded(
                        "msg-3-1-2",
                        MessageRole::Assistant,
                        MessageBody::text("2. Tag high-frequency questions and facts"),
                    ),
                ],
            },
        )],
    );

    messages
}

/// Returns a store pre-populated with the full demo data set.
pub fn demo_store() -> ThreadStore {
    ThreadStore::with_seed(demo_sessions(), demo_messages())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_store_has_threads_for_every_session() {
        let store = demo_store();

        assert_eq!(store.sessions().await.len(), 6);
        // History only in the first three; the rest start empty but exist.
        assert_eq!(store.messages("session-1").await.len(), 4);
        assert_eq!(store.messages("session-4").await.len(), 0);
    }

    #[tokio::test]
    async fn test_demo_history_covers_every_body_kind() {
        let store = demo_store();
        let s1 = store.messages("session-1").await;

        assert!(matches!(s1[0].body, MessageBody::Text { .. }));
        assert!(matches!(s1[2].body, MessageBody::AnalysisCard { .. }));
        assert!(matches!(
            s1[3].body,
            MessageBody::Text { footer: Some(_), .. }
        ));

        let s3 = store.messages("session-3").await;
        let MessageBody::Nested { children, .. } = &s3[0].body else {
            panic!("session-3 should hold a nested message");
        };
        assert_eq!(children.len(), 2);
    }
}
