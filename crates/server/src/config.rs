use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use billscan_ocr::{DEFAULT_OCR_ENDPOINT, DEFAULT_THRESHOLD};
use clap::Parser;
use serde::Deserialize;

pub const DEFAULT_LISTEN: &str = "0.0.0.0:8090";
pub const DEFAULT_OCR_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Parser)]
#[command(name = "billscan-server")]
#[command(about = "Reconstructs bill line items from OCR output")]
#[command(version)]
pub struct Cli {
    /// Cognitive Services subscription key
    #[arg(long, env = "BILLSCAN_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Address to listen on
    #[arg(long, env = "BILLSCAN_LISTEN")]
    pub listen: Option<String>,

    /// OCR endpoint URL
    #[arg(long, env = "BILLSCAN_OCR_ENDPOINT")]
    pub ocr_endpoint: Option<String>,

    /// Timeout for a single OCR request, in seconds
    #[arg(long)]
    pub ocr_timeout_secs: Option<u64>,

    /// Vertical proximity threshold in pixels (exclusive)
    #[arg(long)]
    pub threshold: Option<u32>,

    /// Optional TOML file supplying values not given on the command line
    #[arg(long, env = "BILLSCAN_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Values accepted in the TOML config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    api_key: Option<String>,
    listen: Option<String>,
    ocr_endpoint: Option<String>,
    ocr_timeout_secs: Option<u64>,
    threshold: Option<u32>,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing config file {}", path.display()))
    }
}

#[derive(Clone)]
pub struct ServerConfig {
    pub api_key: String,
    pub listen: SocketAddr,
    pub ocr_endpoint: String,
    pub ocr_timeout: Duration,
    pub threshold: u32,
}

impl ServerConfig {
    /// Merge CLI/env values over the optional config file, then defaults.
    pub fn resolve(cli: Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        let api_key = cli
            .api_key
            .or(file.api_key)
            .filter(|k| !k.trim().is_empty());
        let Some(api_key) = api_key else {
            bail!("API key not provided");
        };

        let listen_raw = cli
            .listen
            .or(file.listen)
            .unwrap_or_else(|| DEFAULT_LISTEN.to_string());
        let listen = listen_raw
            .parse()
            .with_context(|| format!("invalid listen address '{listen_raw}'"))?;

        let ocr_timeout_secs = cli
            .ocr_timeout_secs
            .or(file.ocr_timeout_secs)
            .unwrap_or(DEFAULT_OCR_TIMEOUT_SECS);
        if ocr_timeout_secs == 0 {
            bail!("OCR timeout must be at least one second");
        }

        Ok(Self {
            api_key,
            listen,
            ocr_endpoint: cli
                .ocr_endpoint
                .or(file.ocr_endpoint)
                .unwrap_or_else(|| DEFAULT_OCR_ENDPOINT.to_string()),
            ocr_timeout: Duration::from_secs(ocr_timeout_secs),
            threshold: cli.threshold.or(file.threshold).unwrap_or(DEFAULT_THRESHOLD),
        })
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("api_key", &"<redacted>")
            .field("listen", &self.listen)
            .field("ocr_endpoint", &self.ocr_endpoint)
            .field("ocr_timeout", &self.ocr_timeout)
            .field("threshold", &self.threshold)
            .finish()
    }
}
