//! Retry classification and exponential backoff.

use std::time::Duration;

use reqwest::StatusCode;

use crate::{transport::AttemptOutcome, ClientOptions};

const BACKOFF_BASE: u32 = 2;

/// Returns `true` for statuses worth retrying: `429` and any `5xx`.
pub fn is_transient_status(status: u16) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS.as_u16() || (500..600).contains(&status)
}

/// Whether to retry after a failed attempt, and how long to wait first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryDecision {
    pub should_retry: bool,
    pub delay: Duration,
}

impl RetryDecision {
    fn stop() -> Self {
        Self {
            should_retry: false,
            delay: Duration::ZERO,
        }
    }

    fn after(delay: Duration) -> Self {
        Self {
            should_retry: true,
            delay,
        }
    }
}

/// Bounded retry policy with `unit * 2^k` backoff and no jitter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt.
    pub max_retries: usize,
    /// Backoff unit; retry `k` waits `unit * 2^k`.
    pub backoff_unit: Duration,
    /// Minimum delay for a `429` without a `Retry-After` hint.
    pub rate_limit_delay: Duration,
    /// Optional upper bound on any single delay.
    pub max_backoff: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&ClientOptions::default())
    }
}

impl From<&ClientOptions> for RetryPolicy {
    fn from(options: &ClientOptions) -> Self {
        Self {
            max_retries: options.max_retries,
            backoff_unit: Duration::from_millis(options.retry_backoff_ms),
            rate_limit_delay: Duration::from_millis(options.rate_limit_retry_delay_ms),
            max_backoff: options.max_backoff_ms.map(Duration::from_millis),
        }
    }
}

impl RetryPolicy {
    /// Decides what follows a non-success attempt.
    ///
    /// `retry_index` is the number of attempts already made, so the first
    /// retry is index 1. A retry is granted only while
    /// `retry_index <= max_retries`, which bounds an operation to
    /// `max_retries + 1` attempts.
    pub fn decide(&self, outcome: &AttemptOutcome, retry_index: usize) -> RetryDecision {
        let delay = match outcome {
            AttemptOutcome::TransportFailure(_) => self.backoff(retry_index),
            AttemptOutcome::HttpResponse {
                status,
                retry_after,
                ..
            } if *status == StatusCode::TOO_MANY_REQUESTS => retry_after
                .unwrap_or_else(|| self.backoff(retry_index).max(self.rate_limit_delay)),
            AttemptOutcome::HttpResponse { status, .. } if status.is_server_error() => {
                self.backoff(retry_index)
            }
            AttemptOutcome::HttpResponse { .. } => return RetryDecision::stop(),
        };

        if retry_index > self.max_retries {
            return RetryDecision::stop();
        }

        let delay = match self.max_backoff {
            Some(cap) => delay.min(cap),
            None => delay,
        };
        RetryDecision::after(delay)
    }

    /// Exponential delay for the given retry index, saturating on overflow.
    pub fn backoff(&self, retry_index: usize) -> Duration {
        let exp = u32::try_from(retry_index).unwrap_or(u32::MAX);
        let factor = BACKOFF_BASE.checked_pow(exp).unwrap_or(u32::MAX);
        self.backoff_unit.saturating_mul(factor)
    }
}
