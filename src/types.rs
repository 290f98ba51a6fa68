use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A revocation record as stored by the service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevokedToken {
    pub id: String,
    pub jwt_id: String,
    pub reason: String,
    #[serde(with = "time::serde::rfc3339")]
    pub expiry_date: OffsetDateTime,
    pub revoked_by_email: String,
}

/// Response body of the list endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevokedTokenList {
    #[serde(default)]
    pub data: Vec<RevokedToken>,
}

/// Request body of the revoke endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevokeRequest {
    pub jwt_id: String,
    pub reason: String,
    #[serde(with = "time::serde::rfc3339")]
    pub expiry_date: OffsetDateTime,
}

/// Response body of the revoke endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevokeResponse {
    pub success: bool,
    pub message: String,
    /// The stored record; absent when the service declines the revocation.
    #[serde(default)]
    pub token: Option<RevokedToken>,
}
