use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::cli::Cli;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    #[serde(default)]
    pub tls: TlsConfig,
}

/// How requests are grouped into rate windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RateScope {
    /// Every request shares one window.
    #[default]
    Global,
    /// One window per client IP.
    PerClient,
}

impl std::str::FromStr for RateScope {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "global" => Ok(RateScope::Global),
            "per_client" | "per-client" => Ok(RateScope::PerClient),
            other => anyhow::bail!("unknown rate limit scope: {other}"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default)]
    pub scope: RateScope,
}

impl RateLimitConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            interval_secs: default_interval_secs(),
            scope: RateScope::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TlsConfig {
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

/// Longest accepted window: one year.
pub const MAX_INTERVAL_SECS: u64 = 365 * 24 * 60 * 60;

fn default_limit() -> u32 { 5 }
fn default_interval_secs() -> u64 { 5 }
fn default_max_body_bytes() -> usize { 64 * 1024 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            rate_limit: RateLimitConfig::default(),
            max_body_bytes: default_max_body_bytes(),
            tls: TlsConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn tls_enabled(&self) -> bool {
        self.tls.cert_path.is_some() && self.tls.key_path.is_some()
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Builds the effective configuration: defaults, then the TOML file,
    /// then `CALCGATE_*` environment variables, then command-line flags.
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let config_path = cli
            .config
            .clone()
            .or_else(|| std::env::var("CALCGATE_CONFIG").map(PathBuf::from).ok());

        let mut config = match config_path {
            Some(path) => {
                tracing::info!("Loading config from {}", path.display());
                Self::from_file(&path)?
            }
            None => ServerConfig::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(addr) = var("CALCGATE_BIND_ADDR") {
            self.bind_addr = addr.parse()?;
        }
        if let Some(limit) = var("CALCGATE_LIMIT") {
            self.rate_limit.limit = limit.parse()?;
        }
        if let Some(secs) = var("CALCGATE_INTERVAL") {
            self.rate_limit.interval_secs = secs.parse()?;
        }
        if let Some(scope) = var("CALCGATE_RATE_SCOPE") {
            self.rate_limit.scope = scope.parse()?;
        }
        if let Some(bytes) = var("CALCGATE_MAX_BODY_BYTES") {
            self.max_body_bytes = bytes.parse()?;
        }
        if let Some(cert) = var("CALCGATE_TLS_CERT") {
            self.tls.cert_path = Some(cert);
        }
        if let Some(key) = var("CALCGATE_TLS_KEY") {
            self.tls.key_path = Some(key);
        }
        Ok(())
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(addr) = cli.bind {
            self.bind_addr = addr;
        }
        if let Some(limit) = cli.limit {
            self.rate_limit.limit = limit;
        }
        if let Some(secs) = cli.interval {
            self.rate_limit.interval_secs = secs;
        }
        if let Some(scope) = cli.scope {
            self.rate_limit.scope = scope;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.rate_limit.limit == 0 {
            anyhow::bail!("rate_limit.limit must be at least 1");
        }
        if self.rate_limit.interval_secs == 0 {
            anyhow::bail!("rate_limit.interval_secs must be at least 1");
        }
        if self.rate_limit.interval_secs > MAX_INTERVAL_SECS {
            anyhow::bail!(
                "rate_limit.interval_secs must be at most {MAX_INTERVAL_SECS} (one year)"
            );
        }
        if self.tls.cert_path.is_some() != self.tls.key_path.is_some() {
            tracing::warn!("TLS needs both cert_path and key_path; serving plain HTTP");
        }
        Ok(())
    }
}
