//! Command-line interface definitions.

pub mod report;
pub mod run;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
#[cfg(feature = "telegram")]
use tracing::warn;

use crate::adapter::binance::BinanceFuturesClient;
use crate::adapter::coinglass::CoinglassClient;
#[cfg(feature = "telegram")]
use crate::adapter::telegram::TelegramNotifier;
use crate::config::{Config, SourceConfig};
use crate::port::{FundingSource, LogNotifier, Notifier};

/// Fundwatch - negative funding rate monitoring and alerting.
#[derive(Parser, Debug)]
#[command(name = "fundwatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Default)]
pub enum Command {
    /// Run the scheduler and command listener (foreground)
    #[default]
    Run,

    /// Render one report immediately
    Report {
        /// Deliver to the configured chat instead of printing
        #[arg(long)]
        send: bool,
    },
}

/// Build the configured funding source.
pub(crate) fn build_source(config: &Config) -> Arc<dyn FundingSource> {
    match &config.source {
        SourceConfig::Binance(binance) => Arc::new(BinanceFuturesClient::from_config(binance)),
        SourceConfig::Coinglass(coinglass) => Arc::new(CoinglassClient::from_config(coinglass)),
    }
}

/// Build the delivery channel from configuration.
///
/// Falls back to logging reports when Telegram is disabled or not
/// compiled in.
pub(crate) fn build_notifier(config: &Config) -> Arc<dyn Notifier> {
    #[cfg(feature = "telegram")]
    if config.telegram.enabled {
        if let (Some(token), Some(chat_id)) = (&config.telegram.bot_token, config.telegram.chat_id)
        {
            info!(chat_id, "Telegram delivery enabled");
            return Arc::new(TelegramNotifier::new(token, chat_id));
        }
        // Config validation guarantees the secrets when enabled.
        warn!("Telegram enabled but TELEGRAM_BOT_TOKEN or chat_id not set");
    }

    #[cfg(not(feature = "telegram"))]
    let _ = config;

    info!("Telegram delivery inactive, logging reports instead");
    Arc::new(LogNotifier)
}
