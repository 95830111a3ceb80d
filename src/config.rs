//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct aggregating all settings.
//! Configuration is loaded from a TOML file with environment-variable
//! overrides for secrets (`TELEGRAM_BOT_TOKEN`, `COINGLASS_API_KEY`);
//! secrets are never read from the file itself.
//!
//! # Example
//!
//! ```no_run
//! use fundwatch::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::domain::AlertThresholds;
use crate::error::{ConfigError, Result};

const fn default_true() -> bool {
    true
}

/// Telegram delivery configuration.
///
/// The bot token is loaded from the `TELEGRAM_BOT_TOKEN` environment
/// variable, never from the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Enable Telegram delivery and bot commands.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Target chat ID for reports.
    pub chat_id: Option<i64>,
    /// Bot API token, injected from the environment at load time.
    #[serde(skip)]
    pub bot_token: Option<String>,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            chat_id: None,
            bot_token: None,
        }
    }
}

/// Alert tier thresholds on the percentage scale.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AlertConfig {
    /// Percentage at or below which an entry is Critical.
    #[serde(default = "default_critical_threshold")]
    pub critical_threshold: Decimal,
    /// Percentage at or below which an entry is Warning.
    #[serde(default = "default_warning_threshold")]
    pub warning_threshold: Decimal,
}

fn default_critical_threshold() -> Decimal {
    Decimal::new(-3, 1) // -0.3%
}

fn default_warning_threshold() -> Decimal {
    Decimal::new(-1, 1) // -0.1%
}

impl AlertConfig {
    /// Validated thresholds for the classifier.
    #[must_use]
    pub fn thresholds(&self) -> AlertThresholds {
        AlertThresholds {
            critical: self.critical_threshold,
            warning: self.warning_threshold,
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            critical_threshold: default_critical_threshold(),
            warning_threshold: default_warning_threshold(),
        }
    }
}

/// Periodic report schedule.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ScheduleConfig {
    /// Seconds between scheduled reports (default: 3600).
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Seconds before the first scheduled report (default: 10).
    #[serde(default = "default_initial_delay_secs")]
    pub initial_delay_secs: u64,
}

const fn default_interval_secs() -> u64 {
    3600
}

const fn default_initial_delay_secs() -> u64 {
    10
}

impl ScheduleConfig {
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    #[must_use]
    pub const fn initial_delay(&self) -> Duration {
        Duration::from_secs(self.initial_delay_secs)
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            initial_delay_secs: default_initial_delay_secs(),
        }
    }
}

/// Market-data source variant.
///
/// The active variant is determined by the `type` field in the TOML config.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    /// Binance USDⓈ-M futures premium index endpoint.
    Binance(BinanceSourceConfig),
    /// CoinGlass funding aggregator, filtered to a single exchange.
    Coinglass(CoinglassSourceConfig),
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::Binance(BinanceSourceConfig::default())
    }
}

impl SourceConfig {
    /// HTTP timeout for a single fetch.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        let secs = match self {
            Self::Binance(c) => c.timeout_secs,
            Self::Coinglass(c) => c.timeout_secs,
        };
        Duration::from_secs(secs)
    }
}

/// Binance futures REST configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BinanceSourceConfig {
    /// REST API base URL.
    #[serde(default = "default_binance_api_url")]
    pub api_url: String,
    /// Fetch timeout in seconds (default: 10).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_binance_api_url() -> String {
    "https://fapi.binance.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for BinanceSourceConfig {
    fn default() -> Self {
        Self {
            api_url: default_binance_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// CoinGlass aggregator configuration.
///
/// The API key is loaded from the `COINGLASS_API_KEY` environment variable.
#[derive(Debug, Clone, Deserialize)]
pub struct CoinglassSourceConfig {
    /// REST API base URL.
    #[serde(default = "default_coinglass_api_url")]
    pub api_url: String,
    /// Fetch timeout in seconds (default: 10).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Exchange whose records to keep from the aggregate feed.
    #[serde(default = "default_exchange")]
    pub exchange: String,
    /// API key, injected from the environment at load time.
    #[serde(skip)]
    pub api_key: Option<String>,
}

fn default_coinglass_api_url() -> String {
    "https://open-api.coinglass.com".to_string()
}

fn default_exchange() -> String {
    "Binance".to_string()
}

impl Default for CoinglassSourceConfig {
    fn default() -> Self {
        Self {
            api_url: default_coinglass_api_url(),
            timeout_secs: default_timeout_secs(),
            exchange: default_exchange(),
            api_key: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Telegram delivery settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Alert tier thresholds.
    #[serde(default)]
    pub alerts: AlertConfig,

    /// Periodic report schedule.
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Market-data source selection and settings.
    #[serde(default)]
    pub source: SourceConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Secrets are loaded from the environment (never from the file):
    /// `TELEGRAM_BOT_TOKEN`, and `COINGLASS_API_KEY` when the CoinGlass
    /// source is selected.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation
    /// fails (missing secrets, inverted thresholds, zero intervals).
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        config.telegram.bot_token = std::env::var("TELEGRAM_BOT_TOKEN").ok();
        if let SourceConfig::Coinglass(ref mut coinglass) = config.source {
            coinglass.api_key = std::env::var("COINGLASS_API_KEY").ok();
        }

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    ///
    /// Invariants checked here hold for the whole process lifetime; the
    /// pipeline never re-validates them at run time.
    pub fn validate(&self) -> Result<()> {
        if self.telegram.enabled {
            if self.telegram.bot_token.is_none() {
                return Err(ConfigError::MissingField {
                    field: "TELEGRAM_BOT_TOKEN",
                }
                .into());
            }
            if self.telegram.chat_id.is_none() {
                return Err(ConfigError::MissingField {
                    field: "telegram.chat_id",
                }
                .into());
            }
        }

        if self.alerts.warning_threshold > Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "warning_threshold",
                reason: "must be 0 or below (percentage scale)".to_string(),
            }
            .into());
        }
        if self.alerts.critical_threshold > self.alerts.warning_threshold {
            return Err(ConfigError::InvalidValue {
                field: "critical_threshold",
                reason: "must be <= warning_threshold".to_string(),
            }
            .into());
        }

        if self.schedule.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "interval_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        match &self.source {
            SourceConfig::Binance(binance) => {
                if binance.api_url.is_empty() {
                    return Err(ConfigError::MissingField { field: "api_url" }.into());
                }
                if binance.timeout_secs == 0 {
                    return Err(ConfigError::InvalidValue {
                        field: "timeout_secs",
                        reason: "must be greater than 0".to_string(),
                    }
                    .into());
                }
            }
            SourceConfig::Coinglass(coinglass) => {
                if coinglass.api_url.is_empty() {
                    return Err(ConfigError::MissingField { field: "api_url" }.into());
                }
                if coinglass.timeout_secs == 0 {
                    return Err(ConfigError::InvalidValue {
                        field: "timeout_secs",
                        reason: "must be greater than 0".to_string(),
                    }
                    .into());
                }
                if coinglass.exchange.is_empty() {
                    return Err(ConfigError::MissingField { field: "exchange" }.into());
                }
                if coinglass.api_key.is_none() {
                    return Err(ConfigError::MissingField {
                        field: "COINGLASS_API_KEY",
                    }
                    .into());
                }
            }
        }

        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
