//! Function-hosting entry point: one proxy event on stdin, one response on stdout

use anyhow::{Context, Result};
use clap::Parser;
use qsocial_core::config::parse_origins;
use qsocial_core::AppConfig;
use qsocial_server::{open_store, Gateway, GatewayRequest, MessageService};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

#[derive(Parser, Debug)]
pub struct GatewayArgs {
    /// Database URL (overrides DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Comma-separated allowed browser origins (overrides CORS_ORIGINS)
    #[arg(long)]
    pub cors_origins: Option<String>,
}

pub async fn run_gateway(args: GatewayArgs, mut config: AppConfig) -> Result<()> {
    if let Some(url) = args.database_url {
        config.database_url = url;
    }
    if let Some(origins) = args.cors_origins {
        config.cors_origins = parse_origins(&origins);
    }
    config.validate().context("Invalid gateway configuration")?;

    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .context("Failed to read event from stdin")?;
    let event: GatewayRequest =
        serde_json::from_str(&input).context("stdin is not a proxy request event")?;

    let store = open_store(&config.database_url)
        .await
        .with_context(|| format!("Failed to open store at {}", config.database_url))?;
    let gateway = Gateway::new(MessageService::new(store), config.cors_origins);

    let response = gateway.handle_event(event).await;
    tracing::debug!(status = response.status_code, "gateway response");

    let mut out = serde_json::to_vec(&response)?;
    out.push(b'\n');
    let mut stdout = tokio::io::stdout();
    stdout.write_all(&out).await?;
    stdout.flush().await?;
    Ok(())
}
