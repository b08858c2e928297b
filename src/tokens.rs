//! Token estimation heuristics
//!
//! The optimizer never calls a real tokenizer. All budgeting uses a
//! 4-characters-per-token approximation, which is deterministic, free, and
//! accurate enough for relative savings math.

/// Approximate characters per token
pub const CHARS_PER_TOKEN: usize = 4;

/// Rough token estimation (4 chars per token)
#[must_use]
pub const fn estimate_tokens(text: &str) -> usize {
    text.len() / CHARS_PER_TOKEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_tokens() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abc"), 0);
        assert_eq!(estimate_tokens("hello"), 1);
        assert_eq!(estimate_tokens("hello world"), 2);
    }

    #[test]
    fn test_estimate_counts_bytes_not_chars() {
        // Multi-byte content costs more tokens, mirroring real tokenizers.
        assert_eq!(estimate_tokens("日本語"), 2);
    }
}
