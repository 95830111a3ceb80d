//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the seams to external collaborators: the market-data
//! source and the notification channel. Adapters implement them.

pub mod notifier;
pub mod source;

pub use notifier::{LogNotifier, Notifier, NullNotifier};
pub use source::FundingSource;
