use crate::client::SlackClient;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Deserialize, Serialize, Debug, Clone)]
struct TestResponse {
    ok: bool,
    error: Option<String>,
}

pub fn token_from_env() -> Result<String> {
    match env::var("SLACK_TOKEN") {
        Ok(token) if !token.is_empty() => Ok(token),
        _ => Err(Error::MissingToken),
    }
}

pub async fn validate_token(client: &SlackClient) -> Result<()> {
    let response: TestResponse = client.get_json("auth.test", &[]).await?;

    response.ok.then_some(()).ok_or_else(|| {
        Error::Auth(response.error.unwrap_or_else(|| "unknown error".to_string()))
    })
}
