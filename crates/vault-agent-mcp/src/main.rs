//! Vault Agent MCP Server - Entry Point
//!
//! Provides both stdio (for local clients) and HTTP transports.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vault_agent_mcp::config::{defaults, Config};
use vault_agent_mcp::{server::McpServer, VaultStore};

#[derive(Parser, Debug)]
#[command(name = "vault-agent-mcp")]
#[command(about = "MCP server for an Obsidian-style note vault")]
#[command(version)]
struct Cli {
    /// Directory holding the note vault
    #[arg(long, default_value = defaults::VAULT_PATH, env = "VAULT_PATH")]
    vault_path: PathBuf,

    /// Transport mode: stdio or http
    #[arg(long, default_value = "stdio")]
    transport: Transport,

    /// HTTP server port (only used with --transport http)
    #[arg(long, default_value_t = defaults::PORT, env = "PORT")]
    port: u16,

    /// Public base URL used as OAuth issuer and resource identifier
    #[arg(long, env = "BASE_URL")]
    base_url: Option<String>,

    /// Accept unregistered client ids at the authorization endpoint.
    /// Deployment-time relaxation for front-ends that cannot register.
    #[arg(long, env = "ALLOW_AMBIENT_CLIENTS")]
    allow_ambient_clients: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum Transport {
    /// Standard input/output (for local clients)
    #[default]
    Stdio,
    /// Streamable HTTP with the OAuth gateway
    Http,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        transport = ?cli.transport,
        "Starting vault agent MCP server"
    );

    if !cli.vault_path.is_dir() {
        anyhow::bail!("vault path {} is not a directory", cli.vault_path.display());
    }

    let base_url =
        cli.base_url.clone().unwrap_or_else(|| format!("http://localhost:{}", cli.port));

    let mut config = Config::new(cli.vault_path.clone(), base_url);
    config.allow_ambient_clients = cli.allow_ambient_clients;
    if config.allow_ambient_clients {
        tracing::warn!("Ambient clients enabled: unregistered client ids will be accepted");
    }

    let vault = VaultStore::new(cli.vault_path);
    let server = McpServer::new(vault, config);

    match cli.transport {
        Transport::Stdio => {
            tracing::info!("Running in stdio mode");
            server.run_stdio().await?;
        }
        Transport::Http => {
            tracing::info!(port = cli.port, base_url = ?cli.base_url, "Running in HTTP mode");
            server.run_http(cli.port).await?;
        }
    }

    Ok(())
}
