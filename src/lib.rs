//! `jwt-revoke-client` is an async HTTP client for a JWT revocation service.
//!
//! The crate wraps the `/api/revocations` endpoints with typed methods:
//! - [`JwtRevokeClient::list_revoked_tokens`]
//! - [`JwtRevokeClient::revoke_token`]
//! - [`JwtRevokeClient::delete_revoked_token`]
//!
//! All three run through one [`RequestExecutor`], which retries transport
//! failures, `429` and `5xx` responses with exponential backoff (2 s, 4 s,
//! 8 s, ...) for at most [`ClientOptions::max_retries`] retries. Backoff has no
//! jitter, so many clients failing together will retry together.

mod client;
mod error;
mod executor;
mod options;
mod request;
mod retry;
mod transport;
mod types;

pub use client::{JwtRevokeClient, DEFAULT_BASE_URL};
pub use error::{BoxError, JwtRevokeError};
pub use executor::RequestExecutor;
pub use options::ClientOptions;
pub use request::{Method, RequestDescriptor};
pub use retry::{is_transient_status, RetryDecision, RetryPolicy};
pub use transport::{AttemptOutcome, ReqwestTransport, Transport, TransportRequest};
pub use types::{RevokeRequest, RevokeResponse, RevokedToken, RevokedTokenList};

pub type Result<T> = std::result::Result<T, JwtRevokeError>;
