use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use qsocial_client::{app, ApiClient, Feed};
use qsocial_core::AppConfig;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "qsocial-tui", about = "Read and post short messages", version)]
struct Args {
    /// Base URL of the message API
    #[arg(long, env = "QSOCIAL_API_URL")]
    api_url: Option<String>,

    /// Config file (defaults to ~/.qsocial/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Log to ~/.qsocial/tui.log; stdout belongs to the terminal UI.
fn init_tracing() -> Result<()> {
    let home = dirs::home_dir().context("Could not find home directory")?;
    let dir = home.join(".qsocial");
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("tui.log"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    init_tracing()?;

    let config = AppConfig::load(args.config.as_deref())?;
    let base_url = args.api_url.unwrap_or(config.api_base_url);
    tracing::info!(%base_url, "starting");

    let client = ApiClient::new(base_url)?;
    let mut feed = Feed::new(client);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app::run(&mut terminal, &mut feed).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
