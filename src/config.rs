//! Configuration for the context optimizer

use crate::report::DEFAULT_COST_PER_1K_TOKENS;

/// Tunable limits for the context optimizer
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Token budget used by `manage_context_window`
    pub context_window_tokens: usize,

    /// Capacity of the conversation-summary cache
    pub summary_cache_capacity: usize,

    /// Capacity of the system-prompt cache
    pub prompt_cache_capacity: usize,

    /// USD cost per 1000 tokens used by savings reports
    pub cost_per_1k_tokens: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            context_window_tokens: 400,
            summary_cache_capacity: 256,
            prompt_cache_capacity: 64,
            cost_per_1k_tokens: DEFAULT_COST_PER_1K_TOKENS,
        }
    }
}

impl OptimizerConfig {
    /// Build configuration from environment variables with fallback to
    /// defaults.
    ///
    /// Reads `CORTEX_CONTEXT_WINDOW`, `CORTEX_SUMMARY_CACHE_CAPACITY`,
    /// `CORTEX_PROMPT_CACHE_CAPACITY`, and `CORTEX_COST_PER_1K_TOKENS`.
    /// Unset or unparsable values keep their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(window) = std::env::var("CORTEX_CONTEXT_WINDOW") {
            if let Ok(tokens) = window.parse() {
                config.context_window_tokens = tokens;
            }
        }

        if let Ok(capacity) = std::env::var("CORTEX_SUMMARY_CACHE_CAPACITY") {
            if let Ok(entries) = capacity.parse() {
                config.summary_cache_capacity = entries;
            }
        }

        if let Ok(capacity) = std::env::var("CORTEX_PROMPT_CACHE_CAPACITY") {
            if let Ok(entries) = capacity.parse() {
                config.prompt_cache_capacity = entries;
            }
        }

        if let Ok(cost) = std::env::var("CORTEX_COST_PER_1K_TOKENS") {
            if let Ok(rate) = cost.parse() {
                config.cost_per_1k_tokens = rate;
            }
        }

        config
    }
}
