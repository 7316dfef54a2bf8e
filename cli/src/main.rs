//! CLI entrypoint for gdrive-mcp
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use gdrive_application::ToolExecutorFactory;
use gdrive_infrastructure::{
    ConfigLoader, DriveToolExecutorFactory, FileConfig, JsonSchemaToolConverter,
};
use gdrive_presentation::{Cli, McpHandler, McpServer, cancel_on_ctrl_c};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// File name prefix of the rotated log files under `--log-dir`
const LOG_FILE_PREFIX: &str = "gdrive-mcp.log";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // .env must reach the process environment before figment reads it
    let dotenv = ConfigLoader::load_dotenv();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let _log_guard = init_logging(&cli);
    if let Some(path) = dotenv {
        debug!("Loaded environment from {}", path.display());
    }

    let config = load_config(&cli)?;
    let missing = config.credentials.missing();
    if !missing.is_empty() {
        warn!(
            "No {} configured; requests must supply them via ?config",
            missing.join(", ")
        );
    }

    // === Dependency Injection ===
    let executors: Arc<dyn ToolExecutorFactory> = Arc::new(
        DriveToolExecutorFactory::from_config(&config).context("Failed to create Drive client")?,
    );
    let handler = Arc::new(McpHandler::new(executors, Arc::new(JsonSchemaToolConverter)));

    let server = McpServer::bind(&config.server.bind_address(), handler).await?;
    info!("Starting gdrive-mcp {}", env!("CARGO_PKG_VERSION"));

    let shutdown = CancellationToken::new();
    tokio::spawn(cancel_on_ctrl_c(shutdown.clone()));
    server.serve(shutdown).await?;

    Ok(())
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let loaded = if cli.no_config {
        ConfigLoader::load_without_files()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    };
    let mut config = loaded.context("Failed to load configuration")?;

    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Initialize logging: stderr always, plus a daily file under `--log-dir`.
///
/// `RUST_LOG` takes precedence over `-v` flags. The returned guard flushes
/// the file writer on drop and must live until exit.
fn init_logging(cli: &Cli) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    let (file_layer, guard) = match &cli.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(file_layer)
        .init();

    guard
}
