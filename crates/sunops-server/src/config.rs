//! Server configuration

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sunops_common::GlobalPricingConfig;
use tracing::warn;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

/// SunOps server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    /// JSON file with premissas and global config to load at startup
    pub seed_file: Option<PathBuf>,
    /// Initial global pricing defaults
    pub defaults: GlobalPricingConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            log_format: LogFormat::Pretty,
            seed_file: None,
            defaults: GlobalPricingConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env` and the process environment
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Ok(Self::from_lookup(|key| std::env::var(key).ok()))
    }

    /// Build from a variable lookup; unparseable values keep the default
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(host) = lookup("SUNOPS_HOST") {
            cfg.host = host;
        }
        if let Some(port) = parsed::<u16>(&lookup, "SUNOPS_PORT") {
            cfg.port = port;
        }
        // Platform-assigned port wins
        if let Some(port) = parsed::<u16>(&lookup, "PORT") {
            cfg.port = port;
        }
        if let Some(format) = parsed::<LogFormat>(&lookup, "SUNOPS_LOG_FORMAT") {
            cfg.log_format = format;
        }
        if let Some(path) = lookup("SUNOPS_SEED_FILE").filter(|p| !p.trim().is_empty()) {
            cfg.seed_file = Some(PathBuf::from(path));
        }

        let mut defaults = cfg.defaults;
        if let Some(margin) = parsed::<Decimal>(&lookup, "SUNOPS_DEFAULT_MARGIN") {
            defaults.default_margin = margin;
        }
        if let Some(commission) = parsed::<Decimal>(&lookup, "SUNOPS_DEFAULT_COMMISSION") {
            defaults.default_commission = commission;
        }
        match defaults.validate() {
            Ok(()) => cfg.defaults = defaults,
            Err(err) => warn!(error = %err, "Ignoring configured pricing defaults"),
        }

        cfg
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparseable configuration value");
            None
        }
    }
}
