//! Message model and chat wire types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    User,
    Agent,
}

/// One entry of the conversation log. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    origin: Origin,
    body: String,
    produces_links: bool,
    sent_at: DateTime<Utc>,
}

impl Message {
    /// A message typed by the visitor. User text never carries links.
    pub fn user(body: impl Into<String>) -> Self {
        Self::new(Origin::User, body.into(), false)
    }

    /// An agent answer with an explicit link flag.
    pub fn agent(body: impl Into<String>, produces_links: bool) -> Self {
        Self::new(Origin::Agent, body.into(), produces_links)
    }

    /// An agent answer whose link flag is inferred from an anchor tag.
    pub fn agent_inferred(body: impl Into<String>) -> Self {
        let body = body.into();
        let produces_links = contains_anchor(&body);
        Self::new(Origin::Agent, body, produces_links)
    }

    fn new(origin: Origin, body: String, produces_links: bool) -> Self {
        Self {
            origin,
            body,
            produces_links,
            sent_at: Utc::now(),
        }
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn produces_links(&self) -> bool {
        self.produces_links
    }

    pub fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }
}

/// `true` when an HTML fragment contains an anchor opening tag.
pub fn contains_anchor(fragment: &str) -> bool {
    fragment.contains("<a ")
}

/// Append-only, ordered message log. Insertion order is display order.
#[derive(Debug, Default, Clone)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub language: String,
}

/// Body returned by a chat endpoint, on success and on most errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    #[serde(default)]
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_links: Option<bool>,
}
