//! The context optimizer
//!
//! Owns the summary and prompt caches and orchestrates compression,
//! summarization, selection, and savings accounting for each inbound
//! message.

use serde::{Deserialize, Serialize};

use crate::cache::{BoundedCache, CacheStats};
use crate::config::OptimizerConfig;
use crate::conversation::{Conversation, Message};
use crate::profile::{PersonalizedContext, UserProfile};
use crate::prompt::compress_system_prompt;
use crate::report::{OptimizationReport, ReductionReport, generate_optimization_report, percentage};
use crate::selection::{RelevantContext, select_relevant_context};
use crate::summary::render_summary;
use crate::tokens::{CHARS_PER_TOKEN, estimate_tokens};
use crate::window::manage_context_window;
use crate::{Error, Result};

/// Strategy labels reported per optimized prompt, in application order
const STRATEGY_COMPRESSION: &str = "prompt-compression";
const STRATEGY_SUMMARIZATION: &str = "conversation-summarization";
const STRATEGY_SELECTION: &str = "relevance-selection";
const STRATEGY_CACHE: &str = "prompt-cache";

/// Prompt payload assembled for the LLM provider
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedPayload {
    /// Compressed (or cache-warmed) system prompt
    pub system_prompt: String,
    /// Summarized conversation history
    pub conversation_context: String,
    /// Context fields selected as relevant to this message
    pub user_context: RelevantContext,
    /// The customer message being answered
    pub current_message: String,
}

/// Result of optimizing one inbound message
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedPrompt {
    /// Token accounting for this optimization
    pub optimization: OptimizationReport,
    /// The payload to forward to the LLM provider
    pub optimized_data: OptimizedPayload,
}

/// Cache key for conversation summaries.
///
/// Conversations are append-only, so an unchanged `(phone, message count)`
/// pair means unchanged content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SummaryKey {
    phone: String,
    message_count: usize,
}

/// Prepares token-budgeted prompts from conversation history and
/// personalization context.
///
/// Create one per process and reuse it: the two caches live for the
/// optimizer's lifetime and are only emptied by [`clear_caches`]. Methods
/// that touch a cache take `&mut self`; a concurrent host serializes access
/// by wrapping the optimizer in its own mutex.
///
/// [`clear_caches`]: ContextOptimizer::clear_caches
#[derive(Debug)]
pub struct ContextOptimizer {
    config: OptimizerConfig,
    summaries: BoundedCache<SummaryKey, String>,
    prompts: BoundedCache<String, String>,
}

impl ContextOptimizer {
    /// Create an optimizer with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(OptimizerConfig::default())
    }

    /// Create an optimizer with explicit configuration
    #[must_use]
    pub fn with_config(config: OptimizerConfig) -> Self {
        let summaries = BoundedCache::new(config.summary_cache_capacity);
        let prompts = BoundedCache::new(config.prompt_cache_capacity);
        Self {
            config,
            summaries,
            prompts,
        }
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Optimize one inbound message against its conversation and
    /// personalization context.
    ///
    /// Applies, in order: system-prompt compression, conversation
    /// summarization (cached per conversation snapshot), relevant-context
    /// selection, and a prompt-cache lookup by profile fingerprint. A cached
    /// prompt replaces the freshly compressed one when present; the cache is
    /// never written here, only by [`set_cached_prompt`].
    ///
    /// The returned report compares the assembled payload against the raw
    /// inputs (serialized context plus full history plus the message), both
    /// estimated at 4 characters per token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when the message is blank, the
    /// conversation has no phone number, or the context fails validation.
    /// Returns [`Error::Serialization`] when context serialization fails.
    ///
    /// [`set_cached_prompt`]: ContextOptimizer::set_cached_prompt
    pub fn optimize_for_ai(
        &mut self,
        message: &str,
        conversation: &Conversation,
        context: &PersonalizedContext,
    ) -> Result<OptimizedPrompt> {
        if message.trim().is_empty() {
            return Err(Error::InvalidInput("message is empty".to_string()));
        }
        if conversation.phone.trim().is_empty() {
            return Err(Error::InvalidInput(
                "conversation phone is empty".to_string(),
            ));
        }
        context.validate()?;

        let original_estimate = baseline_estimate(message, conversation, context)?;

        let compressed_prompt = compress_system_prompt(context);
        let conversation_context = self.summarize_conversation(conversation);
        let user_context = select_relevant_context(message, context);

        let fingerprint = context.user_profile.fingerprint();
        let cached = self.prompts.get(&fingerprint).cloned();
        let cache_hit = cached.is_some();
        let system_prompt = cached.unwrap_or(compressed_prompt);

        let final_tokens = estimate_tokens(&system_prompt)
            + estimate_tokens(&conversation_context)
            + estimate_tokens(&serde_json::to_string(&user_context)?)
            + estimate_tokens(message);

        let token_savings = original_estimate.saturating_sub(final_tokens);
        let savings_percentage = percentage(token_savings, original_estimate);

        let mut strategies = vec![
            STRATEGY_COMPRESSION.to_string(),
            STRATEGY_SUMMARIZATION.to_string(),
            STRATEGY_SELECTION.to_string(),
        ];
        if cache_hit {
            strategies.push(STRATEGY_CACHE.to_string());
        }

        tracing::debug!(
            phone = %conversation.phone,
            original_estimate,
            final_tokens,
            savings_percentage,
            cache_hit,
            "prompt optimized"
        );

        Ok(OptimizedPrompt {
            optimization: OptimizationReport {
                original_estimate,
                final_tokens,
                token_savings,
                savings_percentage,
                strategies,
            },
            optimized_data: OptimizedPayload {
                system_prompt,
                conversation_context,
                user_context,
                current_message: message.to_string(),
            },
        })
    }

    /// Summarize a conversation, reusing the cached text when the
    /// conversation has not grown since it was rendered.
    pub fn summarize_conversation(&mut self, conversation: &Conversation) -> String {
        let key = SummaryKey {
            phone: conversation.phone.clone(),
            message_count: conversation.messages.len(),
        };
        if let Some(cached) = self.summaries.get(&key) {
            tracing::trace!(
                phone = %conversation.phone,
                messages = key.message_count,
                "summary cache hit"
            );
            return cached.clone();
        }

        let summary = render_summary(&conversation.messages);
        self.summaries.insert(key, summary.clone());
        summary
    }

    /// Window the history to the configured token budget.
    ///
    /// See [`manage_context_window`](crate::window::manage_context_window)
    /// for the selection rules.
    #[must_use]
    pub fn manage_context_window<'a>(&self, messages: &'a [Message]) -> Vec<&'a Message> {
        manage_context_window(messages, self.config.context_window_tokens)
    }

    /// Compare token counts using the configured cost rate.
    #[must_use]
    pub fn generate_optimization_report(&self, before: usize, after: usize) -> ReductionReport {
        generate_optimization_report(before, after, self.config.cost_per_1k_tokens)
    }

    /// Warm the system-prompt cache for a profile.
    ///
    /// `optimize_for_ai` only reads this cache; hits happen after a
    /// deliberate warm-up through this call.
    pub fn set_cached_prompt(&mut self, profile: &UserProfile, prompt: impl Into<String>) {
        let fingerprint = profile.fingerprint();
        tracing::debug!(%fingerprint, "system prompt cached");
        self.prompts.insert(fingerprint, prompt.into());
    }

    /// Cached system prompt for a profile, if warmed
    pub fn cached_prompt(&mut self, profile: &UserProfile) -> Option<String> {
        self.prompts.get(&profile.fingerprint()).cloned()
    }

    /// Empty both caches
    pub fn clear_caches(&mut self) {
        self.summaries.clear();
        self.prompts.clear();
        tracing::debug!("optimizer caches cleared");
    }

    /// Entry counts of both caches
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            summaries: self.summaries.len(),
            prompts: self.prompts.len(),
        }
    }
}

impl Default for ContextOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Token estimate of the raw inputs: the JSON-serialized personalization
/// context, the concatenated history contents, and the new message.
fn baseline_estimate(
    message: &str,
    conversation: &Conversation,
    context: &PersonalizedContext,
) -> Result<usize> {
    let context_json = serde_json::to_string(context)?;
    let history_chars: usize = conversation
        .messages
        .iter()
        .map(|m| m.content.len())
        .sum();
    Ok(estimate_tokens(&context_json) + history_chars / CHARS_PER_TOKEN + estimate_tokens(message))
}
