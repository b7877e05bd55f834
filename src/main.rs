use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use statbank_mcp_server::config::{AppConfig, CliConfig, FileConfig};
use statbank_mcp_server::server::{metrics, run_server, RequestsLoggingLevel};
use statbank_mcp_server::statbank::{StatbankClient, DEFAULT_BASE_URL};

#[derive(Parser, Debug)]
struct CliArgs {
    /// URL of the upstream Statistikbank API.
    #[clap(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Timeout in seconds for upstream requests.
    #[clap(long, default_value_t = 300)]
    pub upstream_timeout_sec: u64,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 8000)]
    pub port: u16,

    /// The port for the metrics server (Prometheus scraping).
    #[clap(long, default_value_t = 9091)]
    pub metrics_port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to an optional TOML config file; file values override CLI.
    #[clap(long)]
    pub config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = cli_args
        .config
        .as_ref()
        .map(|path| FileConfig::load(path))
        .transpose()?;

    let cli_config = CliConfig {
        base_url: cli_args.base_url,
        upstream_timeout_sec: cli_args.upstream_timeout_sec,
        port: cli_args.port,
        metrics_port: cli_args.metrics_port,
        logging_level: cli_args.logging_level,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    info!("Initializing metrics...");
    metrics::init_metrics();

    info!("Forwarding to Statistikbank API at {}", config.base_url);
    let statbank = Arc::new(StatbankClient::new(
        &config.base_url,
        config.upstream_timeout_sec,
    )?);

    info!("Ready to serve at port {}!", config.port);
    info!("Metrics available at port {}!", config.metrics_port);
    run_server(
        statbank,
        config.logging_level,
        config.port,
        config.metrics_port,
    )
    .await
}
