use std::time::Duration;

/// Retry policy for one generation operation.
///
/// Attempts run `0..=max_retries`; the delay before re-attempting after
/// attempt `n` is `backoff * 2^n`. There is deliberately no jitter and
/// no request deadline — both are known gaps in the current contract,
/// kept rather than silently re-specified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub const fn new(max_retries: u32, backoff_ms: u64) -> Self {
        Self { max_retries, backoff: Duration::from_millis(backoff_ms) }
    }

    /// Default policy for course outline generation.
    pub const fn outline() -> Self {
        Self::new(3, 800)
    }

    /// Default policy for chapter notes.
    pub const fn notes() -> Self {
        Self::new(3, 500)
    }

    /// Default policy for flashcards.
    pub const fn flashcards() -> Self {
        Self::new(2, 400)
    }

    /// Default policy for quiz questions.
    pub const fn quiz() -> Self {
        Self::new(2, 600)
    }

    /// Default policy for the final course summary.
    pub const fn summary() -> Self {
        Self::new(2, 700)
    }

    /// Delay to wait after the given 0-based attempt fails.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(2u32.saturating_pow(attempt))
    }
}
