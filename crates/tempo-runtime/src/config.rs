//! Runtime configuration

use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use tempo_core::{parse_duration, ParseError};
use thiserror::Error;

/// Tick period used when nothing else is configured
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(96);

pub const TICK_INTERVAL_ENV: &str = "TEMPO_TICK_INTERVAL";
pub const LOG_FORMAT_ENV: &str = "TEMPO_LOG_FORMAT";
pub const LOG_FILTER_ENV: &str = "TEMPO_LOG";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid tick interval: {0}")]
    InvalidTickInterval(#[from] ParseError),

    #[error("Tick interval must be greater than zero")]
    ZeroTickInterval,

    #[error("Unknown log format: {0} (expected \"pretty\" or \"json\")")]
    UnknownLogFormat(String),

    #[error("Malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Log output format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::UnknownLogFormat(s.to_string())),
        }
    }
}

/// Logging configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    /// `EnvFilter` directives; `RUST_LOG` takes precedence when set
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            format: LogFormat::Pretty,
            filter: "info".to_string(),
        }
    }
}

/// Runtime configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Period of the tick driver, fixed once the driver starts
    pub tick_interval: Duration,
    pub log: LogConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            tick_interval: DEFAULT_TICK_INTERVAL,
            log: LogConfig::default(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInterval {
    Millis(u64),
    Text(String),
}

#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawLog {
    format: Option<LogFormat>,
    filter: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
struct RawConfig {
    tick_interval: Option<RawInterval>,
    log: Option<RawLog>,
}

impl RuntimeConfig {
    /// Defaults overridden by `TEMPO_TICK_INTERVAL`, `TEMPO_LOG_FORMAT`
    /// and `TEMPO_LOG`
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = RuntimeConfig::default();

        if let Ok(raw) = env::var(TICK_INTERVAL_ENV) {
            config.tick_interval = parse_tick_interval(&raw)?;
        }
        if let Ok(raw) = env::var(LOG_FORMAT_ENV) {
            config.log.format = raw.parse()?;
        }
        if let Ok(filter) = env::var(LOG_FILTER_ENV) {
            config.log.filter = filter;
        }

        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by a JSON document
    ///
    /// `{"tickInterval": "100ms", "log": {"format": "json", "filter": "debug"}}`
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json)?;
        let mut config = RuntimeConfig::default();

        match raw.tick_interval {
            Some(RawInterval::Millis(ms)) => config.tick_interval = Duration::from_millis(ms),
            Some(RawInterval::Text(text)) => config.tick_interval = parse_tick_interval(&text)?,
            None => {}
        }
        if let Some(log) = raw.log {
            if let Some(format) = log.format {
                config.log.format = format;
            }
            if let Some(filter) = log.filter {
                config.log.filter = filter;
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }
}

fn parse_tick_interval(text: &str) -> Result<Duration, ConfigError> {
    let ms = parse_duration(text)?;
    Ok(Duration::from_millis(ms.unsigned_abs()))
}
