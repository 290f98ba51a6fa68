/// Configures HTTP timeout and retry behavior.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum number of retries after the initial attempt.
    pub max_retries: usize,
    /// Backoff unit in milliseconds. Retry `k` waits `retry_backoff_ms * 2^k`.
    pub retry_backoff_ms: u64,
    /// Minimum wait before retrying a `429` that carries no `Retry-After` hint.
    pub rate_limit_retry_delay_ms: u64,
    /// Optional upper bound on any single backoff delay.
    pub max_backoff_ms: Option<u64>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            max_retries: 3,
            retry_backoff_ms: 1_000,
            rate_limit_retry_delay_ms: 1_000,
            max_backoff_ms: None,
        }
    }
}
