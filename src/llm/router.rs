//! Model tier routing
//!
//! Pure function of the conversation about to be sent; nothing is carried
//! between calls.

use crate::config::DEFAULT_TIER_THRESHOLD_CHARS;
use crate::models::{Message, Tier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutingPolicy {
    /// Conversations strictly longer than this go to the advanced tier
    pub threshold_chars: usize,
}

impl Default for RoutingPolicy {
    fn default() -> Self {
        Self {
            threshold_chars: DEFAULT_TIER_THRESHOLD_CHARS,
        }
    }
}

/// Total characters of text content. Non-text content counts as zero.
pub fn conversation_chars(messages: &[Message]) -> usize {
    messages
        .iter()
        .filter_map(|message| message.content.as_text())
        .map(|text| text.chars().count())
        .sum()
}

pub fn choose_tier(messages: &[Message], policy: &RoutingPolicy) -> Tier {
    if conversation_chars(messages) > policy.threshold_chars {
        Tier::Advanced
    } else {
        Tier::Baseline
    }
}
