//! Report rendering.
//!
//! Pure functions: identical inputs always produce byte-identical text.
//! Markup is lightweight inline emphasis (`*bold*`, `` `code` ``,
//! `_italic_`) understood by the delivery channel's legacy Markdown mode.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{AlertTier, Report};
use crate::error::FetchError;

/// Canonical report when no instrument has negative funding.
pub const NO_NEGATIVE_FUNDING_TEXT: &str = "No negative funding rates on Binance right now.";

const REPORT_TITLE: &str = "*Top 10 deepest negative funding rates* (Binance perpetuals)";
const ALERT_HEADER: &str = "\n*🚨 Deep funding alerts*";

/// Entries at or below this percentage get a visual depth marker in the
/// main list. Independent of the configured alert tiers.
const DEPTH_MARKER_THRESHOLD: Decimal = dec!(-0.05);

/// Render a report into delivery-ready text.
#[must_use]
pub fn render(report: &Report) -> String {
    if report.is_empty() {
        return NO_NEGATIVE_FUNDING_TEXT.to_string();
    }

    let mut lines = vec![
        REPORT_TITLE.to_string(),
        format!(
            "_Updated: {}_\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
    ];

    for entry in &report.top {
        let marker = if entry.percentage <= DEPTH_MARKER_THRESHOLD {
            " 🔻"
        } else {
            ""
        };
        lines.push(format!(
            "{}. *{}* : `{:.4}%`  (mark: {}){}",
            entry.position,
            entry.symbol(),
            entry.percentage,
            thousands(entry.snapshot.mark_price),
            marker
        ));
    }

    if !report.alerts.is_empty() {
        lines.push(ALERT_HEADER.to_string());
        for (entry, tier) in &report.alerts {
            let badge = match tier {
                AlertTier::Critical => "🔥",
                AlertTier::Warning => "⚠️",
                AlertTier::None => continue,
            };
            lines.push(format!(
                "{} *{}* : `{:.3}%`",
                badge,
                entry.symbol(),
                entry.percentage
            ));
        }
    }

    lines.join("\n")
}

/// Render the distinct error text dispatched when a fetch fails.
#[must_use]
pub fn render_fetch_failure(error: &FetchError) -> String {
    format!("⚠️ *Funding report unavailable*\n`{error}`")
}

/// Fixed two-decimal rendering with thousands separators.
fn thousands(value: Decimal) -> String {
    let raw = format!("{value:.2}");
    let (int_part, frac_part) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));
    let (sign, digits) = int_part
        .strip_prefix('-')
        .map_or(("", int_part), |rest| ("-", rest));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{sign}{grouped}.{frac_part}")
}
