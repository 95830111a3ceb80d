//! CoinGlass funding aggregator source.

mod client;
mod dto;

pub use client::CoinglassClient;
pub use dto::{FundingEnvelope, FundingRow};
