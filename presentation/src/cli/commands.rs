//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for gdrive-mcp
#[derive(Parser, Debug)]
#[command(name = "gdrive-mcp")]
#[command(author, version, about = "Google Drive tools over the Model Context Protocol")]
#[command(long_about = r#"
gdrive-mcp serves Google Drive operations as MCP tools over HTTP.

Clients POST JSON-RPC messages to /mcp. Credentials come from the
configuration, or per request from a base64-encoded JSON `config` query
parameter holding CLIENT_ID, CLIENT_SECRET and REFRESH_TOKEN.

Configuration is loaded from (in priority order):
1. Command-line flags (--port, --host)
2. GDRIVE_MCP_<SECTION>__<KEY> and CLIENT_ID, CLIENT_SECRET, REFRESH_TOKEN, PORT, HOST
3. --config <path>       Explicit config file
4. ./gdrive-mcp.toml     Project-level config
5. ~/.config/gdrive-mcp/config.toml   Global config

Example:
  gdrive-mcp --port 8081
  gdrive-mcp -vv --log-dir ./logs
"#)]
pub struct Cli {
    /// Port to listen on
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Also write logs to a daily rotated file in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Log level selected by `-v` flags, used when `RUST_LOG` is unset
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
