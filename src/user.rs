use crate::client::SlackClient;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Profile {
    #[serde(default)]
    pub real_name_normalized: String,

    #[serde(default)]
    pub display_name_normalized: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct User {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub deleted: bool,

    #[serde(default)]
    pub is_bot: bool,

    pub profile: Option<Profile>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct UsersResponse {
    pub ok: bool,
    pub error: Option<String>,
    #[serde(default)]
    pub members: Vec<User>,
}

pub async fn get_users(client: &SlackClient) -> Result<Vec<User>> {
    let response: UsersResponse = client.get_json("users.list", &[]).await?;

    if !response.ok {
        return Err(Error::Api(
            response
                .error
                .unwrap_or_else(|| "users.list failed".to_string()),
        ));
    }

    Ok(response.members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn directory_listing_returns_members() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users.list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "members": [
                    {
                        "id": "U1",
                        "name": "ada",
                        "profile": { "real_name_normalized": "Ada Lovelace" },
                        "tz": "Europe/London",
                    },
                    { "id": "U2", "name": "bot", "is_bot": true },
                ],
            })))
            .mount(&server)
            .await;

        let client = SlackClient::with_base_url("xoxb-test", &server.uri()).unwrap();
        let users = get_users(&client).await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].extra["tz"], "Europe/London");
        assert!(users[1].is_bot);
    }
}
