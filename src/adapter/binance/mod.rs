//! Binance USDⓈ-M futures funding source.

mod client;
mod dto;

pub use client::BinanceFuturesClient;
pub use dto::PremiumIndexRow;
