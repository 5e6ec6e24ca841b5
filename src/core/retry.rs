//! Attempt loop with exponential backoff.
//!
//! A call moves through `Attempting(n)`, then either returns or enters
//! `Backoff(n)`. After the backoff it becomes `Attempting(n + 1)`, or fails
//! with [`GenerationError::Exhausted`] once the budget is spent.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use super::error::GenerationError;

/// Which failed attempts are worth another try.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryMode {
    /// Retry every failure: network, any non-2xx status, undecodable bodies.
    #[default]
    Uniform,
    /// Retry only network failures, 429 and 5xx. Other errors fail immediately.
    TransientOnly,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Wait after the first failed attempt; doubles after each further failure
    pub base_delay: Duration,
    pub mode: RetryMode,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(1),
            mode: RetryMode::Uniform,
        }
    }
}

enum AttemptState {
    Attempting(u32),
    Backoff { attempt: u32, error: GenerationError },
}

impl RetryPolicy {
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    pub fn with_mode(mut self, mode: RetryMode) -> Self {
        self.mode = mode;
        self
    }

    /// Backoff after the failed 1-indexed `attempt`: `base_delay * 2^(attempt - 1)`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.base_delay.saturating_mul(1u32 << exponent)
    }

    /// Time spent waiting when every attempt fails.
    pub fn total_backoff(&self) -> Duration {
        (1..=self.max_attempts.max(1))
            .map(|attempt| self.delay_after(attempt))
            .fold(Duration::ZERO, Duration::saturating_add)
    }

    fn should_retry(&self, error: &GenerationError) -> bool {
        match self.mode {
            RetryMode::Uniform => true,
            RetryMode::TransientOnly => error.is_transient(),
        }
    }

    /// Drive `attempt_fn` until it succeeds or the budget runs out.
    ///
    /// `attempt_fn` receives the 1-indexed attempt number. The backoff is a
    /// tokio timer, so other in-flight calls keep running while this one waits.
    pub async fn run<T, F, Fut>(&self, mut attempt_fn: F) -> Result<T, GenerationError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, GenerationError>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut state = AttemptState::Attempting(1);

        loop {
            state = match state {
                AttemptState::Attempting(attempt) => match attempt_fn(attempt).await {
                    Ok(value) => {
                        debug!(attempt, "attempt succeeded");
                        return Ok(value);
                    }
                    Err(error) if !self.should_retry(&error) => {
                        warn!(attempt, error = %error, "attempt failed with non-retryable error");
                        return Err(error);
                    }
                    Err(error) => {
                        warn!(attempt, max_attempts, error = %error, "attempt failed");
                        AttemptState::Backoff { attempt, error }
                    }
                },
                AttemptState::Backoff { attempt, error } => {
                    let delay = self.delay_after(attempt);
                    let delay_ms = delay.as_millis() as u64;
                    debug!(attempt, delay_ms, "backing off");
                    tokio::time::sleep(delay).await;

                    if attempt >= max_attempts {
                        return Err(GenerationError::Exhausted {
                            attempts: attempt,
                            last: Box::new(error),
                        });
                    }
                    AttemptState::Attempting(attempt + 1)
                }
            };
        }
    }
}
