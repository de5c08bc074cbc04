//! Post one message
//!
//! Content comes from the argument, or stdin when omitted:
//! ```bash
//! echo "shipped it" | qsocial post
//! ```

use std::io::Read;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use qsocial_client::{ApiClient, Feed, SubmitOutcome};
use qsocial_core::CreateMessageResponse;

use super::feed::format_message;

#[derive(Parser, Debug)]
pub struct PostArgs {
    /// Message text (reads stdin if omitted)
    pub content: Option<String>,

    /// API base URL (overrides QSOCIAL_API_URL)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Emit the created message as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run_post(args: PostArgs, base_url: String) -> Result<()> {
    let content = match args.content {
        Some(content) => content,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read message from stdin")?;
            buf
        }
    };

    let base_url = args.api_url.unwrap_or(base_url);
    let mut feed = Feed::new(ApiClient::new(base_url)?);
    feed.set_draft(content);

    match feed.submit().await {
        SubmitOutcome::Posted(message) => {
            if args.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&CreateMessageResponse { message })?
                );
            } else {
                println!("{}", format_message(&message));
            }
            Ok(())
        }
        SubmitOutcome::Skipped => bail!("Nothing to post: message is empty"),
        SubmitOutcome::Failed(e) => {
            tracing::debug!(status = e.status, code = %e.code, "post failed");
            Err(anyhow!(feed.error().unwrap_or_default().to_string()))
        }
    }
}
