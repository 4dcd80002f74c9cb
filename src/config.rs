use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("sampling interval must be a positive number of seconds, got {0}")]
    InvalidInterval(f64),

    #[error("sampling interval '{0}' is not a number of seconds")]
    UnparseableInterval(String),
}

const DEFAULT_INTERVAL_SECS: f64 = 1.0;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Idle gap between sampling cycles, in seconds, as given; unset means 1
    pub interval_secs: Option<String>,
    pub disk_mount: PathBuf,
    pub proc_path: PathBuf,
    /// Read-only HTTP view; disabled when unset
    pub http_port: Option<u16>,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            interval_secs: lookup("RESMON_INTERVAL_SECS"),
            disk_mount: lookup("RESMON_DISK_MOUNT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("/")),
            proc_path: lookup("RESMON_PROC_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("/proc")),
            http_port: lookup("RESMON_HTTP_PORT").and_then(|s| s.trim().parse().ok()),
            log_level: lookup("RESMON_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        }
    }

    /// Parsed sampling interval; rejects values that are malformed or not strictly positive
    pub fn interval(&self) -> Result<Duration, ConfigError> {
        let secs = match &self.interval_secs {
            None => DEFAULT_INTERVAL_SECS,
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::UnparseableInterval(raw.clone()))?,
        };

        if !secs.is_finite() || secs <= 0.0 {
            return Err(ConfigError::InvalidInterval(secs));
        }

        // Sub-nanosecond values round down to zero
        match Duration::try_from_secs_f64(secs) {
            Ok(interval) if !interval.is_zero() => Ok(interval),
            _ => Err(ConfigError::InvalidInterval(secs)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
