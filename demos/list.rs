use jwt_revoke_client::JwtRevokeClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = JwtRevokeClient::from_env()?;

    let list = client.list_revoked_tokens().await?;

    for token in list.data {
        println!(
            "{} revoked by {} until {}: {}",
            token.jwt_id, token.revoked_by_email, token.expiry_date, token.reason
        );
    }

    Ok(())
}
