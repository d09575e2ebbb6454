use crate::archive::write_archive;
use crate::client::SlackClient;
use crate::conversations::{Channel, HistoryResponse, Message};
use crate::error::{Error, Result};
use crate::pagination::{drain_pages, Page};
use crate::terminal::{get_formatted_left_output, OutputColor};
use chrono::{DateTime, Utc};
use indicatif::ProgressBar;
use std::fs;
use std::path::Path;

pub async fn get_messages(
    client: &SlackClient,
    channel_id: &str,
    channel_name: &str,
    pb: &ProgressBar,
) -> Result<Vec<Message>> {
    let mut page = 0u32;

    drain_pages(String::new(), |cursor: String| {
        page += 1;
        if page > 1 {
            pb.set_message(format!(": #{channel_name} ({page})"));
        }

        let request = history_page(client, channel_id, cursor);
        async move {
            let history = request.await?;

            if !history.ok {
                return Err(Error::Api(
                    history
                        .error
                        .unwrap_or_else(|| "conversations.history failed".to_string()),
                ));
            }

            let next = match (history.has_more, history.response_metadata) {
                (Some(true), Some(metadata)) if !metadata.next_cursor.is_empty() => {
                    Some(metadata.next_cursor)
                }
                _ => None,
            };

            Ok(Page {
                items: history.messages.unwrap_or_default(),
                next,
            })
        }
    })
    .await
}

async fn history_page(
    client: &SlackClient,
    channel_id: &str,
    cursor: String,
) -> Result<HistoryResponse> {
    let mut query = vec![
        ("channel", channel_id.to_string()),
        ("limit", "999".to_string()),
    ];
    if !cursor.is_empty() {
        query.push(("cursor", cursor));
    }

    client.get_json("conversations.history", &query).await
}

/// Writes `info.json` and, when the channel has any history, `messages.json`
/// under the channel's folder.
pub async fn archive_channel(
    client: &SlackClient,
    channels_dir: &Path,
    channel: &Channel,
    pb: &ProgressBar,
) -> Result<()> {
    let folder = channel.folder_name();
    let channel_dir = channels_dir.join(&folder);

    fs::create_dir_all(&channel_dir)
        .map_err(|e| Error::io(format!("failed to create directory for #{folder}"), e))?;

    write_archive(&channel_dir, "info", channel)?;

    let messages = get_messages(client, &channel.id, &folder, pb).await?;

    // Messages arrive newest first; the first element is the channel's latest
    let newest = messages
        .first()
        .map(|message| format!(", newest {}", format_message_ts(&message.ts)));

    if !messages.is_empty() {
        write_archive(&channel_dir, "messages", &messages)?;
    }

    pb.println(format!(
        "{} #{folder} ({} messages{})",
        get_formatted_left_output("Archived", &OutputColor::Green),
        messages.len(),
        newest.unwrap_or_default()
    ));

    Ok(())
}

fn format_message_ts(ts: &str) -> String {
    let Ok(seconds) = ts.split('.').next().unwrap_or(ts).parse::<i64>() else {
        return "invalid timestamp".to_string();
    };

    match DateTime::<Utc>::from_timestamp(seconds, 0) {
        Some(datetime) => datetime.format("%Y-%m-%d %I:%M %p").to_string(),
        None => "invalid timestamp".to_string(),
    }
}
