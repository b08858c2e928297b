//! Token-budgeted context windows

use crate::conversation::Message;
use crate::tokens::estimate_tokens;

/// Select the most recent messages fitting a token budget.
///
/// Walks backward from the newest message, accumulating estimated tokens
/// until adding another message would exceed the budget. The newest message
/// is always included, over budget or not. The returned references are in
/// chronological order.
#[must_use]
pub fn manage_context_window(messages: &[Message], max_tokens: usize) -> Vec<&Message> {
    let mut selected = Vec::new();
    let mut used = 0;

    for message in messages.iter().rev() {
        let cost = estimate_tokens(&message.content);
        if !selected.is_empty() && used + cost > max_tokens {
            break;
        }
        selected.push(message);
        used += cost;
    }

    selected.reverse();
    selected
}
