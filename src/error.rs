use crate::retry::is_transient_status;

/// Boxed cause of a transport-level failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum JwtRevokeError {
    /// Connection, DNS, TLS, timeout or body-read failure before a complete
    /// HTTP response was received.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),
    /// Non-success HTTP status code with raw response body.
    #[error("request failed with status {status}: {body}")]
    Http { status: u16, body: String },
    /// Success status whose body did not match the expected shape.
    #[error("{message} (status {status})")]
    Decode {
        /// HTTP status of the (successful) response.
        status: u16,
        /// Summary including the underlying parser error.
        message: String,
        /// Raw response body.
        body: String,
    },
    /// Request body could not be serialized.
    #[error("request encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
    /// Invalid client construction input.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// Caller-supplied argument that cannot be sent as-is.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl JwtRevokeError {
    /// HTTP status of the response that ended the operation, or `0` when no
    /// HTTP response was ever received.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Http { status, .. } | Self::Decode { status, .. } => *status,
            Self::Transport(_) | Self::Encode(_) | Self::Config(_) | Self::InvalidInput(_) => 0,
        }
    }

    /// Human-readable summary of the failure.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Raw response body, when an HTTP response was received.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Http { body, .. } | Self::Decode { body, .. } => Some(body.as_str()),
            Self::Transport(_) | Self::Encode(_) | Self::Config(_) | Self::InvalidInput(_) => None,
        }
    }

    /// Returns `true` when the failure was of a kind the retry policy would
    /// retry, i.e. it surfaced only because retries were exhausted.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Http { status, .. } => is_transient_status(*status),
            Self::Decode { .. } | Self::Encode(_) | Self::Config(_) | Self::InvalidInput(_) => {
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::JwtRevokeError;

    #[test]
    fn http_error_exposes_status_and_body() {
        let err = JwtRevokeError::Http {
            status: 404,
            body: "{\"error\":\"not found\"}".to_owned(),
        };

        assert_eq!(err.status_code(), 404);
        assert_eq!(err.response_body(), Some("{\"error\":\"not found\"}"));
        assert!(err.message().contains("404"));
        assert!(!err.is_transient());
    }

    #[test]
    fn transport_error_reports_zero_status() {
        let err = JwtRevokeError::Transport("connection refused".into());

        assert_eq!(err.status_code(), 0);
        assert_eq!(err.response_body(), None);
        assert!(err.is_transient());
    }

    #[test]
    fn exhausted_server_errors_are_transient() {
        for status in [429, 500, 503] {
            let err = JwtRevokeError::Http {
                status,
                body: String::new(),
            };
            assert!(err.is_transient(), "status {status} must be transient");
        }
    }

    #[test]
    fn decode_error_keeps_success_status() {
        let err = JwtRevokeError::Decode {
            status: 200,
            message: "deserialization failed: expected value".to_owned(),
            body: "not json".to_owned(),
        };

        assert_eq!(err.status_code(), 200);
        assert_eq!(err.response_body(), Some("not json"));
        assert!(err.message().starts_with("deserialization failed"));
        assert!(!err.is_transient());
    }
}
