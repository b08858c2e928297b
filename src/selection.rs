//! Relevant-context selection
//!
//! Instead of forwarding the whole personalization bundle with every
//! request, the optimizer picks the slice that matters for one message: the
//! customer's type and style always, known issues the message appears to
//! touch, and two risk flags the assistant should act on.

use serde::{Deserialize, Serialize};

use crate::keywords::extract_keywords;
use crate::profile::PersonalizedContext;

/// Satisfaction score below which the concern flag is always set
const SATISFACTION_CONCERN_THRESHOLD: f64 = 3.5;

/// Escalation rate above which the risk flag is always set
const ESCALATION_RATE_THRESHOLD: f64 = 0.2;

/// Message substrings signalling dissatisfaction
const FRUSTRATION_MARKERS: &[&str] = &["angry", "frustrated", "terrible", "bad"];

/// Message substrings signalling a demand for a human
const ESCALATION_MARKERS: &[&str] = &["agent", "human", "manager", "escalate"];

/// Known issues attached to a single message, at most
const MAX_RELEVANT_ISSUES: usize = 2;

/// Context fields selected as relevant to one message
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelevantContext {
    /// Customer classification, always included
    pub user_type: String,
    /// Preferred communication style, always included
    pub communication_style: String,
    /// Known issues overlapping the message keywords, in upstream order
    pub relevant_issues: Vec<String>,
    /// Satisfaction below threshold, or frustration wording in the message
    pub satisfaction_concern: bool,
    /// Escalation rate above threshold, or a human being demanded
    pub escalation_risk: bool,
}

/// Select the context relevant to one inbound message.
///
/// Issue matching is substring overlap in either direction between the
/// lowercased issue text and each extracted keyword. Flag markers match
/// anywhere in the lowercased message.
#[must_use]
pub fn select_relevant_context(message: &str, context: &PersonalizedContext) -> RelevantContext {
    let profile = &context.user_profile;
    let history = &context.conversation_history;

    let keywords = extract_keywords(message);
    let lowered = message.to_lowercase();

    let relevant_issues = history
        .common_issues
        .iter()
        .filter(|issue| {
            let issue_lower = issue.to_lowercase();
            keywords
                .iter()
                .any(|keyword| issue_lower.contains(keyword) || keyword.contains(issue_lower.as_str()))
        })
        .take(MAX_RELEVANT_ISSUES)
        .cloned()
        .collect();

    RelevantContext {
        user_type: profile.user_type.clone(),
        communication_style: profile.communication_style.clone(),
        relevant_issues,
        satisfaction_concern: history.satisfaction_score < SATISFACTION_CONCERN_THRESHOLD
            || FRUSTRATION_MARKERS
                .iter()
                .any(|marker| lowered.contains(marker)),
        escalation_risk: history.escalation_rate > ESCALATION_RATE_THRESHOLD
            || ESCALATION_MARKERS
                .iter()
                .any(|marker| lowered.contains(marker)),
    }
}
