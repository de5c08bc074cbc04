//! HTTP server command
//!
//! Runs the message API as a local process with the configured store.

use std::net::IpAddr;

use anyhow::{Context, Result};
use clap::Parser;
use qsocial_core::config::parse_origins;
use qsocial_core::{AppConfig, Environment};
use qsocial_server::{open_store, run_server, MessageService, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on (overrides PORT)
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Database URL: sqlite://, postgres:// or memory: (overrides DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Comma-separated allowed browser origins, `*` for any (overrides CORS_ORIGINS)
    #[arg(long)]
    pub cors_origins: Option<String>,

    /// Deployment environment: local or cloud (overrides QSOCIAL_ENV)
    #[arg(long)]
    pub environment: Option<Environment>,
}

impl ServeArgs {
    /// Flags win over everything already resolved.
    pub fn apply(&self, config: &mut AppConfig) -> Result<()> {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(url) = &self.database_url {
            config.database_url = url.clone();
        }
        if let Some(origins) = &self.cors_origins {
            config.cors_origins = parse_origins(origins);
        }
        if let Some(environment) = self.environment {
            config.environment = environment;
        }
        config.validate().context("Invalid server configuration")?;
        Ok(())
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, mut config: AppConfig) -> Result<()> {
    args.apply(&mut config)?;

    let store = open_store(&config.database_url)
        .await
        .with_context(|| format!("Failed to open store at {}", config.database_url))?;

    tracing::info!(
        environment = %config.environment,
        store = store.kind(),
        origins = ?config.cors_origins,
        "starting qsocial server"
    );

    let service = MessageService::new(store);
    let server_config = ServerConfig::from_app_config(&config, args.host);

    // Blocks until shutdown
    run_server(service, server_config)
        .await
        .context("Server error")?;

    Ok(())
}
