use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::config::RateScope;

/// Rate-limited calculation service.
#[derive(Debug, Default, Parser)]
#[command(name = "calcgate-web", version)]
pub struct Cli {
    /// Path to a TOML configuration file (overrides CALCGATE_CONFIG)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long)]
    pub bind: Option<SocketAddr>,

    /// Maximum admitted requests per window
    #[arg(long)]
    pub limit: Option<u32>,

    /// Window length in seconds
    #[arg(long)]
    pub interval: Option<u64>,

    /// Count requests globally or per client IP
    #[arg(long, value_enum)]
    pub scope: Option<RateScope>,
}
