//! Token usage tracking for one session.

use crate::TokenUsage;

/// Cumulative token usage across successful provider calls.
#[derive(Debug, Default)]
pub struct TokenTracker {
    total: TokenUsage,
    call_count: u64,
}

impl TokenTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record token usage from a successful provider call.
    pub fn record(&mut self, usage: &TokenUsage) {
        self.total.input_tokens = self.total.input_tokens.saturating_add(usage.input_tokens);
        self.total.output_tokens = self.total.output_tokens.saturating_add(usage.output_tokens);
        self.call_count += 1;
    }

    pub fn total(&self) -> &TokenUsage {
        &self.total
    }

    pub fn total_tokens(&self) -> u64 {
        self.total.total_tokens()
    }

    pub fn call_count(&self) -> u64 {
        self.call_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(input: u64, output: u64) -> TokenUsage {
        TokenUsage {
            input_tokens: input,
            output_tokens: output,
        }
    }

    #[test]
    fn records_totals_across_calls() {
        let mut tracker = TokenTracker::new();
        tracker.record(&usage(10, 3));
        tracker.record(&usage(25, 7));

        assert_eq!(tracker.call_count(), 2);
        assert_eq!(*tracker.total(), usage(35, 10));
        assert_eq!(tracker.total_tokens(), 45);
    }

    #[test]
    fn totals_saturate() {
        let mut tracker = TokenTracker::new();
        tracker.record(&usage(u64::MAX, 1));
        tracker.record(&usage(1, 1));
        assert_eq!(tracker.total().input_tokens, u64::MAX);
        assert_eq!(tracker.total_tokens(), u64::MAX);
    }
}
