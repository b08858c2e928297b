//! Compressed system-prompt assembly
//!
//! Builds the system prompt from a fixed template instead of interpolating
//! every personalization field the profiler collected. Each section is
//! bounded, so the prompt stays a handful of lines no matter how much
//! context accumulates upstream.

use std::fmt::Write;

use crate::conversation::Conversation;
use crate::profile::PersonalizedContext;

/// Substrings that mark a contextual reminder as critical.
///
/// Matching is case-sensitive, as authored upstream: `VIP` matches, `vip`
/// does not. The first matching reminder in list order wins; markers are not
/// ranked against each other.
pub const CRITICAL_REMINDER_MARKERS: &[&str] = &["escalation", "negative", "VIP"];

/// Common issues included in the prompt, at most
const MAX_PROMPT_ISSUES: usize = 3;

/// Personalized instructions included in the prompt, at most
const MAX_PROMPT_INSTRUCTIONS: usize = 2;

/// Prompt lines kept for a brand-new conversation
const NEW_CONVERSATION_LINES: usize = 5;

/// Prompt lines kept while a conversation is still short
const EARLY_CONVERSATION_LINES: usize = 10;

/// Message count under which a conversation counts as early-stage
const EARLY_CONVERSATION_THRESHOLD: usize = 5;

/// Build the compressed system prompt for a personalization context.
///
/// The template is one line per section, empty sections omitted: a role
/// line, a style line, a customer line, up to three common issues, the
/// first two personalized instructions, and at most one critical reminder
/// rendered as an `IMPORTANT:` line.
#[must_use]
pub fn compress_system_prompt(context: &PersonalizedContext) -> String {
    let profile = &context.user_profile;
    let history = &context.conversation_history;

    let mut prompt = format!(
        "You are an AI customer support assistant replying over WhatsApp.\n\
         Style: {} tone, {} responses, {} technical level.\n\
         Customer: {} ({} tier), {} past conversations, satisfaction {:.1}/5.",
        profile.communication_style,
        profile.response_preference,
        profile.technical_level,
        profile.user_type,
        profile.tier,
        history.total_conversations,
        history.satisfaction_score,
    );

    if !history.common_issues.is_empty() {
        let issues = history
            .common_issues
            .iter()
            .take(MAX_PROMPT_ISSUES)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let _ = write!(prompt, "\nCommon issues: {issues}.");
    }

    if !context.personalized_instructions.is_empty() {
        let guidelines = context
            .personalized_instructions
            .iter()
            .take(MAX_PROMPT_INSTRUCTIONS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("; ");
        let _ = write!(prompt, "\nGuidelines: {guidelines}");
    }

    if let Some(reminder) = critical_reminder(&context.contextual_reminders) {
        let _ = write!(prompt, "\nIMPORTANT: {reminder}");
    }

    prompt
}

/// First reminder containing a critical marker, in list order
#[must_use]
pub fn critical_reminder(reminders: &[String]) -> Option<&str> {
    reminders.iter().map(String::as_str).find(|reminder| {
        CRITICAL_REMINDER_MARKERS
            .iter()
            .any(|marker| reminder.contains(marker))
    })
}

/// Trim a base prompt according to conversation stage.
///
/// New conversations (no prior messages) keep the first 5 lines, short ones
/// (under 5 messages) the first 10, established ones the full prompt. The
/// cut is by line count, not tokens, so it can land mid-thought.
#[must_use]
pub fn adjust_prompt_for_stage(conversation: &Conversation, base_prompt: &str) -> String {
    let message_count = conversation.messages.len();
    let keep = if message_count == 0 {
        NEW_CONVERSATION_LINES
    } else if message_count < EARLY_CONVERSATION_THRESHOLD {
        EARLY_CONVERSATION_LINES
    } else {
        return base_prompt.to_string();
    };
    base_prompt.lines().take(keep).collect::<Vec<_>>().join("\n")
}
