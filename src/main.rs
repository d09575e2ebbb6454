#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::cast_possible_truncation)]

use archive::write_archive;
use args::Args;
use auth::{token_from_env, validate_token};
use channel::archive_channel;
use clap::Parser;
use client::SlackClient;
use emoji::{download_emojis, get_emojis};
use error::{Error, Result};
use files::{list_files, sync_files};
use indicatif::{ProgressBar, ProgressStyle};
use std::{fs, process};
use terminal::{create_new_pb, get_formatted_left_output, OutputColor};
use user::get_users;

use crate::conversations::get_conversations;

mod archive;
mod args;
mod auth;
mod channel;
mod client;
mod conversations;
mod emoji;
mod error;
mod files;
mod pagination;
mod terminal;
mod user;

async fn start(pb: &ProgressBar) -> Result<()> {
    let start_time = std::time::Instant::now();

    let args = Args::parse();
    let output_dir = args.output_dir()?;

    pb.set_message(": token");

    let token = token_from_env()?;
    let client = SlackClient::new(&token)?;
    validate_token(&client).await?;

    pb.println(format!(
        "{} token scopes",
        get_formatted_left_output("Validated", &OutputColor::Green),
    ));
    pb.inc(1);

    fs::create_dir_all(&output_dir)
        .map_err(|e| Error::io("failed to create archive directory", e))?;

    pb.println(format!(
        "{} archive directory ({})",
        get_formatted_left_output("Created", &OutputColor::Green),
        output_dir.display()
    ));
    pb.inc(1);

    pb.set_message(": users");

    let users = get_users(&client).await?;
    write_archive(&output_dir, "users", &users)?;

    pb.println(format!(
        "{} {} users",
        get_formatted_left_output("Found", &OutputColor::Green),
        users.len()
    ));
    pb.inc(1);

    pb.set_message(": channels");

    let channels = get_conversations(&client).await?;

    pb.println(format!(
        "{} {} channels",
        get_formatted_left_output("Found", &OutputColor::Green),
        channels.len()
    ));
    pb.inc(1);
    pb.inc_length(channels.len() as u64);

    let channels_dir = output_dir.join("channels");

    for channel in &channels {
        pb.set_message(format!(": #{}", channel.folder_name()));
        archive_channel(&client, &channels_dir, channel, pb).await?;
        pb.inc(1);
    }

    pb.set_message(": files");

    let files = list_files(&client, pb).await?;
    write_archive(&output_dir, "files", &files)?;

    pb.println(format!(
        "{} {} files",
        get_formatted_left_output("Found", &OutputColor::Green),
        files.len()
    ));
    pb.inc(1);
    pb.inc_length(files.len() as u64);

    sync_files(&client, &output_dir.join("files"), &files, pb).await?;

    pb.set_message(": emojis");

    let emojis = get_emojis(&client).await?;

    pb.println(format!(
        "{} {} emojis",
        get_formatted_left_output("Found", &OutputColor::Green),
        emojis.len()
    ));
    pb.inc(1);
    pb.inc_length(emojis.len() as u64);

    download_emojis(&client, &output_dir.join("emojis"), &emojis, pb).await?;

    pb.println(format!(
        "{} workspace archive ({})",
        get_formatted_left_output("Exported", &OutputColor::Green),
        output_dir.display()
    ));

    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{msg}} in {}s",
                (start_time.elapsed().as_secs_f32() * 10.0).round() / 10.0
            ))
            .unwrap(),
    );
    pb.finish_with_message(get_formatted_left_output("Finished", &OutputColor::Green));

    Ok(())
}

fn main() {
    let pb = &create_new_pb(6, "Running");

    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let _ = start(pb).await.map_err(|e| {
            pb.abandon();

            eprintln!(
                "{} {}",
                get_formatted_left_output("Error", &OutputColor::Red),
                e
            );

            process::exit(1);
        });
    });
}
