use std::fmt;

use time::OffsetDateTime;

use crate::{
    executor::RequestExecutor,
    request::RequestDescriptor,
    transport::{ReqwestTransport, Transport},
    ClientOptions, JwtRevokeError, Result, RevokeRequest, RevokeResponse, RevokedTokenList,
};

/// Base URL of the hosted revocation service.
pub const DEFAULT_BASE_URL: &str = "https://api.jwtrevoke.com";

/// HTTP client for the JWT revocation API.
///
/// Every operation goes through the same [`RequestExecutor`], so retry and
/// error classification are identical across endpoints.
#[derive(Clone)]
pub struct JwtRevokeClient<T = ReqwestTransport> {
    executor: RequestExecutor<T>,
    options: ClientOptions,
}

impl<T> fmt::Debug for JwtRevokeClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtRevokeClient")
            .field("executor", &self.executor)
            .field("options", &self.options)
            .finish()
    }
}

impl JwtRevokeClient {
    /// Creates a client for the hosted service at [`DEFAULT_BASE_URL`].
    pub fn new(api_key: impl AsRef<str>) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    /// Creates a client for a service at `base_url`.
    pub fn with_base_url(base_url: impl AsRef<str>, api_key: impl AsRef<str>) -> Result<Self> {
        Self::with_transport(base_url, api_key, ReqwestTransport::default())
    }

    /// Creates a client from environment variables.
    ///
    /// Reads:
    /// - `JWT_REVOKE_API_KEY` — API key sent as `X-API-Key` (required)
    /// - `JWT_REVOKE_BASE_URL` — service URL (optional, defaults to
    ///   [`DEFAULT_BASE_URL`])
    ///
    /// # Example
    ///
    /// ```no_run
    /// use jwt_revoke_client::JwtRevokeClient;
    ///
    /// let client = JwtRevokeClient::from_env().expect("missing JWT_REVOKE_API_KEY");
    /// ```
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("JWT_REVOKE_API_KEY").map_err(|_| {
            JwtRevokeError::Config("missing JWT_REVOKE_API_KEY environment variable".to_owned())
        })?;
        if api_key.trim().is_empty() {
            return Err(JwtRevokeError::Config(
                "JWT_REVOKE_API_KEY is set but empty".to_owned(),
            ));
        }

        match std::env::var("JWT_REVOKE_BASE_URL") {
            Ok(base_url) if !base_url.trim().is_empty() => Self::with_base_url(base_url, api_key),
            _ => Self::new(api_key),
        }
    }
}

impl<T: Transport> JwtRevokeClient<T> {
    /// Creates a client that sends requests through a custom [`Transport`].
    pub fn with_transport(
        base_url: impl AsRef<str>,
        api_key: impl AsRef<str>,
        transport: T,
    ) -> Result<Self> {
        let options = ClientOptions::default();
        let executor =
            RequestExecutor::new(transport, base_url.as_ref(), api_key.as_ref(), &options)?;
        Ok(Self { executor, options })
    }

    /// Applies client options such as timeout and retry behavior.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.executor.set_options(&opts);
        self.options = opts;
        self
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Shared executor, for issuing requests this client has no method for.
    pub fn executor(&self) -> &RequestExecutor<T> {
        &self.executor
    }

    /// Lists all revocation records visible to this API key.
    pub async fn list_revoked_tokens(&self) -> Result<RevokedTokenList> {
        let descriptor = RequestDescriptor::get(["api", "revocations", "list"]);
        self.executor.execute(&descriptor).await
    }

    /// Revokes the token identified by `jwt_id` until `expiry_date`.
    pub async fn revoke_token(
        &self,
        jwt_id: impl Into<String>,
        reason: impl Into<String>,
        expiry_date: OffsetDateTime,
    ) -> Result<RevokeResponse> {
        let request = RevokeRequest {
            jwt_id: jwt_id.into(),
            reason: reason.into(),
            expiry_date,
        };
        let descriptor = RequestDescriptor::post(["api", "revocations", "revoke"], &request)?;
        self.executor.execute(&descriptor).await
    }

    /// Deletes the revocation record for `jwt_id`.
    ///
    /// Ids that would not survive as a single path segment (empty, `.` or
    /// `..`) are rejected with [`JwtRevokeError::InvalidInput`] before any
    /// request is sent.
    pub async fn delete_revoked_token(&self, jwt_id: &str) -> Result<()> {
        if matches!(jwt_id, "" | "." | "..") {
            return Err(JwtRevokeError::InvalidInput(format!(
                "JWT id {jwt_id:?} is not a usable path segment"
            )));
        }

        let descriptor = RequestDescriptor::delete(["api", "revocations", jwt_id]);
        self.executor.execute_empty(&descriptor).await
    }
}
