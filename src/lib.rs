//! Fundwatch - negative funding rate monitoring and alerting.
//!
//! This crate watches perpetual-futures funding rates on a market-data
//! source, isolates the instruments whose funding has gone negative, ranks
//! them by depth, and delivers a formatted report to a Telegram chat on a
//! fixed schedule or on manual request.
//!
//! # Architecture
//!
//! The crate follows a ports-and-adapters layout:
//!
//! - [`domain`] - Pure pipeline logic: snapshots, ranking, alert tiers,
//!   report assembly. No I/O.
//! - [`port`] - Trait seams for external collaborators:
//!   `FundingSource` (market data) and `Notifier` (delivery channel).
//! - [`adapter`] - Concrete sources (Binance futures REST, CoinGlass
//!   aggregator) and the Telegram notifier/command listener.
//! - [`app`] - The fetch → rank → classify → format → deliver pipeline,
//!   its scheduler, and the delivery dispatcher.
//! - [`config`] - TOML configuration with environment-variable secrets.
//! - [`error`] - Error types for the crate.
//!
//! # Features
//!
//! - `telegram` (default) - Telegram delivery and bot commands via teloxide
//! - `testkit` - Scripted sources and recording notifiers for tests
//!
//! # Example
//!
//! ```no_run
//! use fundwatch::config::Config;
//!
//! let config = Config::load("config.toml").expect("config");
//! config.init_logging();
//! ```

pub mod adapter;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
