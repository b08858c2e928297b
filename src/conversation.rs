//! Conversation and message types
//!
//! Conversations arrive from the messaging pipeline as camelCase JSON and
//! are treated as append-only: new messages are pushed to the end and
//! existing ones never change.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a message within a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Sent by the customer
    Inbound,
    /// Sent by the business (agent or assistant)
    Outbound,
}

impl fmt::Display for Direction {
    /// Speaker label used in summaries and transcripts
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Inbound => "Customer",
            Self::Outbound => "Agent",
        };
        f.write_str(label)
    }
}

/// A single message in a conversation
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Who sent the message
    pub direction: Direction,
    /// Message text
    pub content: String,
    /// When the message was received or sent
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Inbound (customer) message stamped with the current time
    #[must_use]
    pub fn inbound(content: impl Into<String>) -> Self {
        Self {
            direction: Direction::Inbound,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Outbound (business) message stamped with the current time
    #[must_use]
    pub fn outbound(content: impl Into<String>) -> Self {
        Self {
            direction: Direction::Outbound,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A customer conversation, identified by phone number
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Customer phone number in E.164 form
    pub phone: String,
    /// Messages in chronological order
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Empty conversation for a phone number
    #[must_use]
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            messages: Vec::new(),
        }
    }

    /// Append a message
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }
}

/// Take the first `max_chars` characters of `text`.
///
/// Cuts on character boundaries, so multi-byte content never splits
/// mid-codepoint.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    text.char_indices()
        .nth(max_chars)
        .map_or(text, |(idx, _)| &text[..idx])
}
