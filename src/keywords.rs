//! Keyword extraction and topic derivation
//!
//! One shared tokenizer feeds both conversation summarization and
//! relevant-context selection, so topic labels and issue matching stay
//! consistent across the optimizer.

use crate::conversation::{Direction, Message};

/// Filler words carrying no signal for issue matching or topic derivation
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "was", "were", "with", "this", "that", "have",
    "has", "had", "from", "your", "you", "all", "any", "can", "could", "will", "would", "should",
    "there", "their", "them", "then", "than", "what", "when", "where", "which", "who", "how",
    "why", "about", "into", "been", "being", "just", "like", "very", "really", "please", "thanks",
    "thank", "hello", "want", "need", "get", "got", "its", "also", "some", "more", "now",
];

/// Keywords extracted from a single text, at most
const MAX_KEYWORDS: usize = 10;

/// Topic labels derived from a message span, at most
const MAX_TOPICS: usize = 3;

/// Keyword-to-label taxonomy for topic derivation, in priority order
const TOPIC_TAXONOMY: &[(&str, &[&str])] = &[
    (
        "technical issues",
        &[
            "error", "bug", "crash", "broken", "website", "login", "password", "page", "slow",
            "down",
        ],
    ),
    (
        "billing",
        &[
            "charge",
            "charged",
            "payment",
            "invoice",
            "bill",
            "billing",
            "refund",
            "price",
            "subscription",
        ],
    ),
    (
        "delivery",
        &[
            "delivery", "deliver", "shipping", "shipped", "order", "package", "tracking",
            "arrived",
        ],
    ),
    (
        "account",
        &[
            "account", "profile", "settings", "upgrade", "cancel", "access", "email",
        ],
    ),
    (
        "product feedback",
        &[
            "feature",
            "product",
            "quality",
            "improvement",
            "feedback",
            "suggestion",
        ],
    ),
];

/// Extract up to 10 lowercase keywords from free text.
///
/// Tokens are split on whitespace, trimmed of non-alphanumeric edge
/// characters, and dropped when two characters or shorter or on the
/// stop-word list. Order follows the text and duplicates are kept.
#[must_use]
pub fn extract_keywords(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    lowered
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|token| token.chars().count() > 2 && !STOP_WORDS.contains(token))
        .map(ToString::to_string)
        .take(MAX_KEYWORDS)
        .collect()
}

/// Derive up to three topic labels from the customer side of a message span.
///
/// Only inbound messages contribute keywords. Labels are ordered by keyword
/// hit count, taxonomy order breaking ties.
#[must_use]
pub fn extract_conversation_topics(messages: &[Message]) -> Vec<String> {
    let keywords: Vec<String> = messages
        .iter()
        .filter(|message| message.direction == Direction::Inbound)
        .flat_map(|message| extract_keywords(&message.content))
        .collect();
    topics_from_keywords(&keywords)
}

fn topics_from_keywords(keywords: &[String]) -> Vec<String> {
    let mut scored: Vec<(usize, usize, &str)> = Vec::new();
    for (priority, (label, terms)) in TOPIC_TAXONOMY.iter().enumerate() {
        let hits = keywords
            .iter()
            .filter(|keyword| {
                terms
                    .iter()
                    .any(|term| keyword.contains(term) || term.contains(keyword.as_str()))
            })
            .count();
        if hits > 0 {
            scored.push((hits, priority, label));
        }
    }
    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    scored
        .into_iter()
        .take(MAX_TOPICS)
        .map(|(_, _, label)| label.to_string())
        .collect()
}
