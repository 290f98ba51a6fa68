//! HTTP transport boundary.
//!
//! [`Transport`] is the only dependency the executor has on an HTTP stack.
//! [`ReqwestTransport`] is the default implementation; tests and callers with
//! their own stack can provide another one.

use std::{future::Future, time::Duration};

use reqwest::{
    header::{HeaderMap, RETRY_AFTER},
    StatusCode, Url,
};
use time::{format_description::well_known::Rfc2822, OffsetDateTime};

use crate::{error::BoxError, request::Method};

/// Result of a single attempt, before classification.
#[derive(Debug)]
pub enum AttemptOutcome {
    /// No complete HTTP response was received (connect, TLS, DNS, timeout,
    /// body read).
    TransportFailure(BoxError),
    /// The server answered with a status code.
    HttpResponse {
        status: StatusCode,
        /// Server-supplied `Retry-After` hint, if any.
        retry_after: Option<Duration>,
        body: Vec<u8>,
    },
}

impl AttemptOutcome {
    /// Builds an HTTP outcome without a retry hint.
    pub fn response(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self::HttpResponse {
            status,
            retry_after: None,
            body: body.into(),
        }
    }

    /// Builds a transport failure from any error.
    pub fn failure(cause: impl Into<BoxError>) -> Self {
        Self::TransportFailure(cause.into())
    }
}

/// One outgoing HTTP request as seen by a [`Transport`].
#[derive(Clone, Copy, Debug)]
pub struct TransportRequest<'a> {
    pub method: Method,
    pub url: &'a Url,
    pub headers: &'a HeaderMap,
    pub body: Option<&'a serde_json::Value>,
    /// Deadline for this attempt only.
    pub timeout: Duration,
}

/// Performs single HTTP attempts for the executor.
///
/// Implementations must not retry on their own and must report timeouts as
/// [`AttemptOutcome::TransportFailure`].
pub trait Transport: Send + Sync {
    fn send(&self, request: TransportRequest<'_>) -> impl Future<Output = AttemptOutcome> + Send;
}

/// [`Transport`] backed by a shared [`reqwest::Client`].
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport(reqwest::Client);

impl ReqwestTransport {
    /// Wraps an existing reqwest client, e.g. one with custom TLS or proxy
    /// settings.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self(client)
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest<'_>) -> AttemptOutcome {
        let mut builder = self
            .0
            .request(request.method.as_reqwest(), request.url.clone())
            .headers(request.headers.clone())
            .timeout(request.timeout);
        if let Some(body) = request.body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => return AttemptOutcome::failure(err),
        };
        let status = response.status();
        let retry_after = parse_retry_after(response.headers());

        match response.bytes().await {
            Ok(body) => AttemptOutcome::HttpResponse {
                status,
                retry_after,
                body: body.to_vec(),
            },
            Err(err) => AttemptOutcome::failure(err),
        }
    }
}

/// Reads `Retry-After` as delta-seconds or an HTTP-date in the future.
pub(crate) fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let raw = headers.get(RETRY_AFTER)?.to_str().ok()?.trim();

    if let Ok(secs) = raw.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }

    let moment = OffsetDateTime::parse(raw, &Rfc2822).ok()?;
    let delta = moment - OffsetDateTime::now_utc();
    if delta.is_positive() {
        Duration::try_from(delta).ok()
    } else {
        None
    }
}
