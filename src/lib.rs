//! Cortex Optimizer - token and context optimization for AI customer support
//!
//! This library prepares LLM prompts for WhatsApp support conversations
//! under a token budget:
//! - System-prompt compression to a fixed, bounded template
//! - Conversation summarization with a snapshot-keyed cache
//! - Relevant-context selection per inbound message
//! - Savings accounting against the raw, unoptimized inputs
//!
//! The optimizer is a pure in-memory component: no network, no disk, no wire
//! protocol. The upstream message pipeline hands it the inbound message, the
//! conversation so far, and a personalization bundle; it hands back the
//! payload for the LLM provider plus a savings report.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │              Message pipeline (caller)               │
//! │   inbound message │ conversation │ personalization  │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │                Context Optimizer                     │
//! │   compression │ summarization │ selection │ report  │
//! │   summary cache (LRU)   │   prompt cache (LRU)      │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │        LLM provider request (outside this crate)     │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod cache;
pub mod config;
pub mod conversation;
pub mod error;
pub mod keywords;
pub mod optimizer;
pub mod profile;
pub mod prompt;
pub mod report;
pub mod selection;
pub mod summary;
pub mod tokens;
pub mod window;

pub use cache::CacheStats;
pub use config::OptimizerConfig;
pub use conversation::{Conversation, Direction, Message, truncate_chars};
pub use error::{Error, Result};
pub use keywords::{extract_conversation_topics, extract_keywords};
pub use optimizer::{ContextOptimizer, OptimizedPayload, OptimizedPrompt};
pub use profile::{ConversationHistory, PersonalizedContext, UserProfile};
pub use prompt::{
    CRITICAL_REMINDER_MARKERS, adjust_prompt_for_stage, compress_system_prompt, critical_reminder,
};
pub use report::{
    DEFAULT_COST_PER_1K_TOKENS, OptimizationLevel, OptimizationReport, ReductionReport,
    generate_optimization_report, percentage,
};
pub use selection::{RelevantContext, select_relevant_context};
pub use summary::{SpanSummary, TranscriptEntry, compress_long_conversation, render_summary};
pub use tokens::{CHARS_PER_TOKEN, estimate_tokens};
pub use window::manage_context_window;
