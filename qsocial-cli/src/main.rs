//! qsocial CLI - run the message API and use it from the shell
//!
//! - `serve`: local HTTP server (SQLite by default)
//! - `gateway`: handle one function-hosting proxy event from stdin
//! - `feed` / `post`: read and write through the API client

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "qsocial",
    author,
    version,
    about = "Micro-blog of short public messages",
    long_about = "Run the qsocial message API locally or as a function handler, \
                  and read or post messages from scripts."
)]
struct Cli {
    /// Enable debug logging (unless RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: ~/.qsocial/config.toml if present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Handle one API-gateway proxy event (stdin -> stdout)
    Gateway(commands::gateway::GatewayArgs),
    /// Show messages, newest first
    Feed(commands::feed::FeedArgs),
    /// Post a message
    Post(commands::post::PostArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG may come from a .env file
    config::load_dotenv();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    if let Commands::Completions(args) = &cli.command {
        return run_completions(args);
    }

    let app_config = config::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, app_config).await?,
        Commands::Gateway(args) => commands::run_gateway(args, app_config).await?,
        Commands::Feed(args) => commands::run_feed(args, app_config.api_base_url).await?,
        Commands::Post(args) => commands::run_post(args, app_config.api_base_url).await?,
        Commands::Completions(_) => {}
    }
    Ok(())
}

fn run_completions(args: &CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
