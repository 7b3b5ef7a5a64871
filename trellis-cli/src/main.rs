use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trellis::ClientConfig;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "trellis")]
#[command(about = "Trellis CLI - query and watch search clusters through a failover client")]
#[command(version)]
struct Cli {
    /// Client configuration file (TOML or YAML)
    #[arg(short, long, global = true, env = "TRELLIS_CONFIG")]
    config: Option<PathBuf>,

    /// Bootstrap server, repeatable; overrides the configured servers
    #[arg(short, long = "server", global = true)]
    servers: Vec<String>,

    /// Total attempts per request
    #[arg(long, global = true)]
    max_attempts: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that a node answers
    Ping,

    /// List cluster nodes and their HTTP addresses
    Nodes {
        /// Node filter
        #[arg(long, default_value = "_all")]
        filter: String,
    },

    /// Send an arbitrary request
    Request {
        /// HTTP method (GET, POST, PUT, DELETE, HEAD)
        method: String,

        /// Request path, e.g. /_cluster/health
        path: String,

        /// JSON request body
        #[arg(short, long)]
        body: Option<String>,
    },

    /// Run discovery on a schedule and print pool changes
    Watch {
        /// Seconds between discovery runs
        #[arg(long, default_value = "10")]
        interval: u64,

        /// Stop after this many runs
        #[arg(long)]
        count: Option<usize>,
    },
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::load(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => ClientConfig::default(),
    };

    if !cli.servers.is_empty() {
        config.servers = cli.servers.clone();
    }
    if config.servers.is_empty() {
        config.servers.push("http://localhost:9200".to_string());
    }
    if let Some(max_attempts) = cli.max_attempts {
        config.retry.max_attempts = max_attempts;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Ping => commands::run_ping(config).await?,
        Commands::Nodes { filter } => commands::run_nodes(config, &filter).await?,
        Commands::Request { method, path, body } => {
            commands::run_request(config, &method, &path, body).await?
        }
        Commands::Watch { interval, count } => {
            commands::run_watch(config, interval, count).await?
        }
    }

    Ok(())
}
