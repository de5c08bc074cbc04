//! Print the feed, newest first
//!
//! ```bash
//! qsocial feed --json | jq -r '.messages[].content' | head -5
//! ```

use anyhow::{anyhow, Result};
use chrono::Local;
use clap::Parser;
use qsocial_client::{ApiClient, Feed};
use qsocial_core::{ListMessagesResponse, Message};

#[derive(Parser, Debug)]
pub struct FeedArgs {
    /// API base URL (overrides QSOCIAL_API_URL)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Show at most this many messages
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub async fn run_feed(args: FeedArgs, base_url: String) -> Result<()> {
    let base_url = args.api_url.unwrap_or(base_url);
    let mut feed = Feed::new(ApiClient::new(base_url)?);

    if feed.load().await.is_err() {
        return Err(anyhow!(feed.error().unwrap_or_default().to_string()));
    }

    let limit = args.limit.unwrap_or(usize::MAX);
    let messages: Vec<Message> = feed.messages().iter().take(limit).cloned().collect();

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&ListMessagesResponse { messages })?
        );
        return Ok(());
    }

    if messages.is_empty() {
        println!("No messages yet.");
        return Ok(());
    }
    for message in &messages {
        println!("{}", format_message(message));
    }
    Ok(())
}

pub(crate) fn format_message(message: &Message) -> String {
    let when = message
        .created_at_utc()
        .map(|ts| ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| message.created_at.to_string());
    format!("[{}] {}", when, message.content)
}
