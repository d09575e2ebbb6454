use crate::client::SlackClient;
use crate::error::{Error, Result};
use crate::terminal::{get_formatted_left_output, OutputColor};
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::Path;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct EmojiListResponse {
    pub ok: bool,
    pub error: Option<String>,
    /// Name -> image url, ordered by name
    #[serde(default)]
    pub emoji: BTreeMap<String, String>,
}

pub async fn get_emojis(client: &SlackClient) -> Result<BTreeMap<String, String>> {
    let response: EmojiListResponse = client.get_json("emoji.list", &[]).await?;

    if !response.ok {
        return Err(Error::Api(
            response
                .error
                .unwrap_or_else(|| "emoji.list failed".to_string()),
        ));
    }

    Ok(response.emoji)
}

pub fn emoji_file_name(name: &str, url: &str) -> String {
    match Path::new(url).extension().and_then(|ext| ext.to_str()) {
        Some(extension) => format!("{name}.{extension}"),
        None => name.to_string(),
    }
}

/// Downloads every custom emoji image. Per-emoji failures (including
/// `alias:` pseudo-urls, which are not fetchable) are reported and skipped.
pub async fn download_emojis(
    client: &SlackClient,
    emojis_dir: &Path,
    emojis: &BTreeMap<String, String>,
    pb: &ProgressBar,
) -> Result<()> {
    fs::create_dir_all(emojis_dir)
        .map_err(|e| Error::io("failed to create emojis directory", e))?;

    for (name, url) in emojis {
        pb.set_message(format!(": :{name}:"));

        match download_emoji(client, emojis_dir, name, url).await {
            Ok(()) => pb.println(format!(
                "{} :{name}:",
                get_formatted_left_output("Downloaded", &OutputColor::Green)
            )),
            Err(e) => pb.println(format!(
                "{} :{name}: ({e})",
                get_formatted_left_output("Failed", &OutputColor::Red)
            )),
        }

        pb.inc(1);
    }

    Ok(())
}

async fn download_emoji(
    client: &SlackClient,
    emojis_dir: &Path,
    name: &str,
    url: &str,
) -> Result<()> {
    let path = emojis_dir.join(emoji_file_name(name, url));

    let mut dest = File::create(&path)
        .map_err(|e| Error::io(format!("failed to create {}", path.display()), e))?;

    client.download(url, &mut dest).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use wiremock::matchers::{method, path as url_path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn file_name_takes_extension_from_url() {
        assert_eq!(
            emoji_file_name("party", "https://emoji.example.com/party/image.gif"),
            "party.gif"
        );
    }

    #[test]
    fn file_name_without_url_extension_is_bare() {
        assert_eq!(emoji_file_name("blob", "https://emoji.example.com/blob"), "blob");
    }

    #[tokio::test]
    async fn alias_entry_fails_without_stopping_the_pass() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(url_path("/emoji/party.gif"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"gif".as_slice()))
            .mount(&server)
            .await;

        let mut emojis = BTreeMap::new();
        emojis.insert("also-party".to_string(), "alias:party".to_string());
        emojis.insert(
            "party".to_string(),
            format!("{}/emoji/party.gif", server.uri()),
        );

        let dir = tempdir().unwrap();
        let client = SlackClient::with_base_url("xoxb-test", &server.uri()).unwrap();
        download_emojis(&client, dir.path(), &emojis, &ProgressBar::hidden())
            .await
            .unwrap();

        assert_eq!(fs::read(dir.path().join("party.gif")).unwrap(), b"gif");
    }
}
