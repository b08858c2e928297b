//! Customer profile and personalization context types
//!
//! These records are produced by the upstream profiling pipeline and arrive
//! as camelCase JSON. The optimizer treats them as read-only inputs.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Profile of the customer a conversation belongs to
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Customer classification (e.g. "new", "returning", "vip")
    #[serde(rename = "type")]
    pub user_type: String,
    /// Subscription tier (e.g. "free", "premium")
    pub tier: String,
    /// Preferred communication style (e.g. "formal", "casual")
    pub communication_style: String,
    /// Preferred response shape (e.g. "detailed", "concise")
    pub response_preference: String,
    /// Technical sophistication (e.g. "beginner", "advanced")
    pub technical_level: String,
}

impl UserProfile {
    /// Cache fingerprint for the system-prompt cache.
    ///
    /// Joins type, tier, communication style, and technical level with `_`.
    /// Response preference is not part of the key.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        format!(
            "{}_{}_{}_{}",
            self.user_type, self.tier, self.communication_style, self.technical_level
        )
    }

    fn validate(&self) -> Result<()> {
        let required = [
            ("type", &self.user_type),
            ("tier", &self.tier),
            ("communicationStyle", &self.communication_style),
            ("responsePreference", &self.response_preference),
            ("technicalLevel", &self.technical_level),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(Error::InvalidInput(format!(
                    "profile field `{name}` is empty"
                )));
            }
        }
        Ok(())
    }
}

/// Aggregate statistics over a customer's past conversations
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationHistory {
    /// Number of past conversations
    #[serde(default)]
    pub total_conversations: u32,
    /// Mean satisfaction score on a 0 to 5 scale
    #[serde(default = "default_satisfaction_score")]
    pub satisfaction_score: f64,
    /// Recurring issue descriptions, most significant first
    #[serde(default)]
    pub common_issues: Vec<String>,
    /// Fraction of conversations escalated to a human, 0 to 1
    #[serde(default)]
    pub escalation_rate: f64,
}

/// Neutral score that trips neither the concern nor the risk flag
const fn default_satisfaction_score() -> f64 {
    3.5
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self {
            total_conversations: 0,
            satisfaction_score: default_satisfaction_score(),
            common_issues: Vec::new(),
            escalation_rate: 0.0,
        }
    }
}

/// Personalization bundle assembled upstream and consumed whole
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizedContext {
    /// Who the customer is
    pub user_profile: UserProfile,
    /// How their past conversations went
    #[serde(default)]
    pub conversation_history: ConversationHistory,
    /// Freeform instructions for the assistant, most important first
    #[serde(default)]
    pub personalized_instructions: Vec<String>,
    /// Situational reminders, some of which may be critical
    #[serde(default)]
    pub contextual_reminders: Vec<String>,
}

impl PersonalizedContext {
    /// Check required fields and numeric ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when a profile field is empty, the
    /// satisfaction score falls outside 0 to 5, or the escalation rate falls
    /// outside 0 to 1. `NaN` fails both range checks.
    pub fn validate(&self) -> Result<()> {
        self.user_profile.validate()?;

        let history = &self.conversation_history;
        if !(0.0..=5.0).contains(&history.satisfaction_score) {
            return Err(Error::InvalidInput(format!(
                "satisfaction score {} outside 0-5",
                history.satisfaction_score
            )));
        }
        if !(0.0..=1.0).contains(&history.escalation_rate) {
            return Err(Error::InvalidInput(format!(
                "escalation rate {} outside 0-1",
                history.escalation_rate
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_profile() -> UserProfile {
        UserProfile {
            user_type: "returning".to_string(),
            tier: "premium".to_string(),
            communication_style: "casual".to_string(),
            response_preference: "concise".to_string(),
            technical_level: "advanced".to_string(),
        }
    }

    fn make_context() -> PersonalizedContext {
        PersonalizedContext {
            user_profile: make_profile(),
            conversation_history: ConversationHistory::default(),
            personalized_instructions: Vec::new(),
            contextual_reminders: Vec::new(),
        }
    }

    #[test]
    fn test_fingerprint_shape() {
        assert_eq!(
            make_profile().fingerprint(),
            "returning_premium_casual_advanced"
        );
    }

    #[test]
    fn test_fingerprint_ignores_response_preference() {
        let mut profile = make_profile();
        profile.response_preference = "detailed".to_string();
        assert_eq!(profile.fingerprint(), make_profile().fingerprint());
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(make_context().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_profile_field() {
        let mut context = make_context();
        context.user_profile.tier = "  ".to_string();
        let err = context.validate().unwrap_err();
        assert!(err.to_string().contains("tier"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_scores() {
        let mut context = make_context();
        context.conversation_history.satisfaction_score = 5.1;
        assert!(context.validate().is_err());

        let mut context = make_context();
        context.conversation_history.escalation_rate = -0.1;
        assert!(context.validate().is_err());

        let mut context = make_context();
        context.conversation_history.satisfaction_score = f64::NAN;
        assert!(context.validate().is_err());
    }

    #[test]
    fn test_profile_serde_uses_type_key() {
        let json = serde_json::to_string(&make_profile()).unwrap();
        assert!(json.contains("\"type\":\"returning\""));
        assert!(json.contains("\"communicationStyle\":\"casual\""));

        let parsed: UserProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, make_profile());
    }

    #[test]
    fn test_history_defaults_from_sparse_json() {
        let history: ConversationHistory = serde_json::from_str("{}").unwrap();
        assert_eq!(history.total_conversations, 0);
        assert!((history.satisfaction_score - 3.5).abs() < f64::EPSILON);
        assert!(history.common_issues.is_empty());
        assert!(history.escalation_rate.abs() < f64::EPSILON);
    }

    #[test]
    fn test_context_deserializes_without_history() {
        let json = r#"{
            "userProfile": {
                "type": "new",
                "tier": "free",
                "communicationStyle": "formal",
                "responsePreference": "detailed",
                "technicalLevel": "beginner"
            }
        }"#;
        let context: PersonalizedContext = serde_json::from_str(json).unwrap();
        assert_eq!(context.user_profile.user_type, "new");
        assert!(context.validate().is_ok());
    }
}
