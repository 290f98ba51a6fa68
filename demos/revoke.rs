use jwt_revoke_client::{ClientOptions, JwtRevokeClient};
use time::{Duration, OffsetDateTime};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let jwt_id = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: revoke <jwt-id> [reason]"))?;
    let reason = std::env::args()
        .nth(2)
        .unwrap_or_else(|| "revoked from CLI".to_owned());

    let client = JwtRevokeClient::from_env()?.with_options(ClientOptions {
        max_retries: 5,
        max_backoff_ms: Some(30_000),
        ..ClientOptions::default()
    });

    let expiry = OffsetDateTime::now_utc() + Duration::days(1);
    match client.revoke_token(&jwt_id, reason, expiry).await {
        Ok(response) => println!("{}: {}", response.success, response.message),
        Err(err) if err.status_code() == 409 => {
            eprintln!("{jwt_id} is already revoked: {:?}", err.response_body());
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
