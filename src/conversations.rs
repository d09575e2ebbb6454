use crate::client::SlackClient;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

#[derive(Display, EnumIter, Clone, Copy, PartialEq)]
pub enum ConversationType {
    #[strum(serialize = "public_channel")]
    PublicChannel,

    #[strum(serialize = "private_channel")]
    PrivateChannel,

    #[strum(serialize = "mpim")]
    Mpim,

    #[strum(serialize = "im")]
    Im,
}

pub fn all_types_param() -> String {
    ConversationType::iter()
        .map(|conversation_type| conversation_type.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Channel {
    pub id: String,

    /// Empty for direct message channels
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub is_im: bool,

    /// Counterpart user of a direct message channel
    pub user: Option<String>,

    #[serde(default)]
    pub is_private: bool,

    #[serde(default)]
    pub is_archived: bool,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Channel {
    pub fn folder_name(&self) -> String {
        let name = if self.name.is_empty() && self.is_im {
            format!("im-{}", self.user.clone().unwrap_or_default())
        } else {
            self.name.clone()
        };

        format!("{name}-{}", self.id)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ListResponse {
    pub ok: bool,
    pub error: Option<String>,
    #[serde(default)]
    pub channels: Vec<Channel>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Message {
    /// Might not exist for bots
    pub user: Option<String>,

    /// Timestamp
    pub ts: String,

    #[serde(default)]
    pub text: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ResponseMetadata {
    #[serde(default)]
    pub next_cursor: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct HistoryResponse {
    pub ok: bool,
    pub error: Option<String>,
    pub messages: Option<Vec<Message>>,
    pub has_more: Option<bool>,
    pub response_metadata: Option<ResponseMetadata>,
}

pub async fn get_conversations(client: &SlackClient) -> Result<Vec<Channel>> {
    let response: ListResponse = client
        .get_json(
            "conversations.list",
            &[
                ("limit", "500".to_string()),
                ("types", all_types_param()),
            ],
        )
        .await?;

    if !response.ok {
        return Err(Error::Api(
            response
                .error
                .unwrap_or_else(|| "conversations.list failed".to_string()),
        ));
    }

    Ok(response.channels)
}
