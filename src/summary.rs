//! Conversation summarization and long-history compression
//!
//! Two reductions of the same history: a rendered text summary suitable for
//! prompt context, and a compressed transcript that keeps head and tail
//! messages verbatim while collapsing the middle into a topic summary.

use std::fmt;

use crate::conversation::{Message, truncate_chars};
use crate::keywords::extract_conversation_topics;

/// Message count at or under which a summary renders every message
const SHORT_SUMMARY_MESSAGES: usize = 4;

/// Recent messages rendered verbatim in a long-conversation summary
const RECENT_SUMMARY_MESSAGES: usize = 3;

/// Characters of content kept per line in a short summary
const SHORT_LINE_CHARS: usize = 50;

/// Characters of content kept per line for recent messages
const RECENT_LINE_CHARS: usize = 60;

/// Message count above which `compress_long_conversation` compresses
const COMPRESSION_THRESHOLD: usize = 6;

/// Leading messages kept verbatim by compression
const COMPRESSION_HEAD: usize = 2;

/// Trailing messages kept verbatim by compression
const COMPRESSION_TAIL: usize = 4;

/// Render a conversation summary without touching any cache.
///
/// Short conversations (up to four messages) render one speaker-labelled
/// line per message, content clipped to 50 characters. Longer ones derive
/// topics from the older messages and render only the last three, clipped
/// to 60 characters, under a `Previous topics:` line.
#[must_use]
pub fn render_summary(messages: &[Message]) -> String {
    if messages.len() <= SHORT_SUMMARY_MESSAGES {
        return messages
            .iter()
            .map(|message| summary_line(message, SHORT_LINE_CHARS))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let split = messages.len() - RECENT_SUMMARY_MESSAGES;
    let (older, recent) = messages.split_at(split);

    let mut lines = Vec::with_capacity(RECENT_SUMMARY_MESSAGES + 1);
    let topics = extract_conversation_topics(older);
    if !topics.is_empty() {
        lines.push(format!("Previous topics: {}", topics.join(", ")));
    }
    for message in recent {
        lines.push(summary_line(message, RECENT_LINE_CHARS));
    }
    lines.join("\n")
}

fn summary_line(message: &Message, max_chars: usize) -> String {
    format!(
        "{}: {}",
        message.direction,
        truncate_chars(&message.content, max_chars)
    )
}

/// Summary of a message span omitted by compression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanSummary {
    /// Number of messages the span replaced
    pub omitted: usize,
    /// Up to three topic labels derived from the omitted span
    pub topics: Vec<String>,
}

/// One entry of a compressed transcript
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptEntry<'a> {
    /// A message kept verbatim
    Message(&'a Message),
    /// A span of messages replaced by a summary
    Summary(SpanSummary),
}

impl fmt::Display for TranscriptEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(message) => {
                write!(f, "{}: {}", message.direction, message.content)
            }
            Self::Summary(summary) => {
                if summary.topics.is_empty() {
                    write!(f, "[{} earlier messages]", summary.omitted)
                } else {
                    write!(
                        f,
                        "[{} earlier messages about {}]",
                        summary.omitted,
                        summary.topics.join(", ")
                    )
                }
            }
        }
    }
}

/// Compress a long conversation to head, summary, tail.
///
/// Conversations over six messages keep the first two and last four
/// verbatim; the middle span collapses into one [`TranscriptEntry::Summary`]
/// carrying its message count and topics. Shorter conversations pass
/// through unchanged.
#[must_use]
pub fn compress_long_conversation(messages: &[Message]) -> Vec<TranscriptEntry<'_>> {
    if messages.len() <= COMPRESSION_THRESHOLD {
        return messages.iter().map(TranscriptEntry::Message).collect();
    }

    let middle = &messages[COMPRESSION_HEAD..messages.len() - COMPRESSION_TAIL];
    let summary = SpanSummary {
        omitted: middle.len(),
        topics: extract_conversation_topics(middle),
    };

    let mut entries = Vec::with_capacity(COMPRESSION_HEAD + 1 + COMPRESSION_TAIL);
    entries.extend(messages[..COMPRESSION_HEAD].iter().map(TranscriptEntry::Message));
    entries.push(TranscriptEntry::Summary(summary));
    entries.extend(
        messages[messages.len() - COMPRESSION_TAIL..]
            .iter()
            .map(TranscriptEntry::Message),
    );
    entries
}
