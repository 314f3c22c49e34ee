//! Server configuration via CLI args and environment variables.

use std::path::PathBuf;

use clap::Parser;

use gatehouse_service::cache::DEFAULT_CAPACITY;

/// HTTP Basic authentication gate backed by bcrypt password hashes.
#[derive(Parser, Debug, Clone)]
#[command(name = "gatehouse-server", version, about)]
pub struct Config {
    /// Bind address.
    #[arg(long, default_value = "0.0.0.0", env = "GATEHOUSE_HOST")]
    pub host: String,

    /// Bind port.
    #[arg(long, default_value_t = 8080, env = "GATEHOUSE_PORT")]
    pub port: u16,

    /// YAML web configuration holding `basic_auth_users`. Re-read on every
    /// request. Omit to disable authentication.
    #[arg(long, env = "GATEHOUSE_WEB_CONFIG_FILE")]
    pub web_config_file: Option<PathBuf>,

    /// Number of verification outcomes kept in memory (0 disables caching).
    #[arg(long, default_value_t = DEFAULT_CAPACITY, env = "GATEHOUSE_CACHE_SIZE")]
    pub cache_size: usize,

    /// Directory to serve behind the gate. Omit for a placeholder response.
    #[arg(long, env = "GATEHOUSE_WEB_ROOT")]
    pub web_root: Option<PathBuf>,

    /// Validate the web configuration and exit.
    #[arg(long)]
    pub check_config: bool,

    /// Log level, used when `RUST_LOG` is unset.
    #[arg(long, default_value = "info", env = "GATEHOUSE_LOG_LEVEL")]
    pub log_level: String,

    /// Log format: `text` or `json`.
    #[arg(long, default_value = "text", env = "GATEHOUSE_LOG_FORMAT")]
    pub log_format: String,
}

impl Config {
    /// Parses configuration from CLI args and env vars.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
