//! Shared test fixtures

use chrono::{DateTime, Utc};
use cortex_optimizer::{
    Conversation, ConversationHistory, Direction, Message, PersonalizedContext, UserProfile,
};

/// Deterministic timestamp `offset` seconds after a fixed base
#[must_use]
pub fn timestamp(offset: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_750_000_000 + offset, 0).expect("valid timestamp")
}

/// Message with a deterministic timestamp
#[must_use]
pub fn make_message(direction: Direction, content: &str, offset: i64) -> Message {
    Message {
        direction,
        content: content.to_string(),
        timestamp: timestamp(offset),
    }
}

/// Conversation built from (direction, content) turns, one second apart
#[must_use]
pub fn make_conversation(phone: &str, turns: &[(Direction, &str)]) -> Conversation {
    let mut conversation = Conversation::new(phone);
    for (offset, (direction, content)) in (0_i64..).zip(turns.iter()) {
        conversation.push(make_message(*direction, content, offset));
    }
    conversation
}

/// Premium returning-customer profile
#[must_use]
pub fn premium_profile() -> UserProfile {
    UserProfile {
        user_type: "returning".to_string(),
        tier: "premium".to_string(),
        communication_style: "formal".to_string(),
        response_preference: "concise".to_string(),
        technical_level: "intermediate".to_string(),
    }
}

/// History with recurring billing and technical issues
#[must_use]
pub fn support_history() -> ConversationHistory {
    ConversationHistory {
        total_conversations: 15,
        satisfaction_score: 4.1,
        common_issues: vec![
            "payment failures".to_string(),
            "website login errors".to_string(),
            "delivery delays".to_string(),
        ],
        escalation_rate: 0.05,
    }
}

/// Full personalization bundle used across scenarios
#[must_use]
pub fn personalized_context() -> PersonalizedContext {
    PersonalizedContext {
        user_profile: premium_profile(),
        conversation_history: support_history(),
        personalized_instructions: vec![
            "Greet the customer by first name".to_string(),
            "Offer the loyalty discount when relevant".to_string(),
            "Keep answers under three sentences".to_string(),
        ],
        contextual_reminders: vec![
            "prefers replies before noon".to_string(),
            "had a negative experience with a late delivery".to_string(),
        ],
    }
}
