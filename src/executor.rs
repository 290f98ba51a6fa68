use std::{fmt, time::Duration};

use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    StatusCode, Url,
};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::{
    request::RequestDescriptor,
    retry::RetryPolicy,
    transport::{AttemptOutcome, Transport, TransportRequest},
    ClientOptions, JwtRevokeError, Result,
};

const API_KEY_HEADER: &str = "x-api-key";

/// Runs request descriptors through a [`Transport`] with bounded retries.
///
/// The executor holds only read-only configuration, so one instance can serve
/// any number of concurrent calls.
#[derive(Clone)]
pub struct RequestExecutor<T> {
    transport: T,
    base_url: Url,
    headers: HeaderMap,
    policy: RetryPolicy,
    timeout: Duration,
}

impl<T> fmt::Debug for RequestExecutor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("policy", &self.policy)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> RequestExecutor<T> {
    /// Validates the base URL and API key and builds an executor.
    pub fn new(
        transport: T,
        base_url: &str,
        api_key: &str,
        options: &ClientOptions,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|err| JwtRevokeError::Config(format!("invalid base URL: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(JwtRevokeError::Config(format!(
                "base URL cannot carry a path: {base_url}"
            )));
        }

        let mut api_key = HeaderValue::from_str(api_key.trim()).map_err(|_| {
            JwtRevokeError::Config("API key is not a valid header value".to_owned())
        })?;
        api_key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);

        Ok(Self {
            transport,
            base_url,
            headers,
            policy: RetryPolicy::from(options),
            timeout: Duration::from_millis(options.timeout_ms),
        })
    }

    pub(crate) fn set_options(&mut self, options: &ClientOptions) {
        self.policy = RetryPolicy::from(options);
        self.timeout = Duration::from_millis(options.timeout_ms);
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Runs `descriptor` and decodes the success body as `R`.
    ///
    /// A success body that does not decode is returned as
    /// [`JwtRevokeError::Decode`] without retrying.
    pub async fn execute<R: DeserializeOwned>(&self, descriptor: &RequestDescriptor) -> Result<R> {
        let (status, body) = self.dispatch(descriptor).await?;

        serde_json::from_slice(&body).map_err(|err| JwtRevokeError::Decode {
            status: status.as_u16(),
            message: format!("deserialization failed: {err}"),
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }

    /// Runs `descriptor` for an endpoint whose success body carries nothing.
    pub async fn execute_empty(&self, descriptor: &RequestDescriptor) -> Result<()> {
        self.dispatch(descriptor).await.map(|_| ())
    }

    async fn dispatch(&self, descriptor: &RequestDescriptor) -> Result<(StatusCode, Vec<u8>)> {
        let url = self.url_for(descriptor);
        let mut attempts = 0usize;

        loop {
            attempts += 1;

            #[cfg(feature = "tracing")]
            tracing::trace!(
                method = ?descriptor.method(),
                path = %descriptor.path(),
                attempt = attempts,
                "sending request"
            );

            let outcome = self
                .transport
                .send(TransportRequest {
                    method: descriptor.method(),
                    url: &url,
                    headers: &self.headers,
                    body: descriptor.body(),
                    timeout: self.timeout,
                })
                .await;

            let outcome = match outcome {
                AttemptOutcome::HttpResponse { status, body, .. } if status.is_success() => {
                    return Ok((status, body));
                }
                other => other,
            };

            let decision = self.policy.decide(&outcome, attempts);
            if !decision.should_retry {
                return Err(into_error(outcome));
            }

            #[cfg(feature = "tracing")]
            match &outcome {
                AttemptOutcome::HttpResponse { status, .. } => tracing::debug!(
                    %status,
                    attempt = attempts,
                    delay = ?decision.delay,
                    "retrying request after transient status"
                ),
                AttemptOutcome::TransportFailure(err) => tracing::debug!(
                    error = %err,
                    attempt = attempts,
                    delay = ?decision.delay,
                    "retrying request after transport failure"
                ),
            }

            sleep(decision.delay).await;
        }
    }

    fn url_for(&self, descriptor: &RequestDescriptor) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL always accepts path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(descriptor.segments());
        }
        url
    }
}

fn into_error(outcome: AttemptOutcome) -> JwtRevokeError {
    match outcome {
        AttemptOutcome::TransportFailure(cause) => JwtRevokeError::Transport(cause),
        AttemptOutcome::HttpResponse { status, body, .. } => JwtRevokeError::Http {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&body).into_owned(),
        },
    }
}
