//! Handler for the `report` command.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::app::{Dispatcher, Pipeline};
use crate::config::Config;
use crate::error::Result;
use crate::port::NullNotifier;

/// Render one report now; print it, or deliver it with `--send`.
pub async fn execute(config: Config, send: bool) -> Result<()> {
    let source = super::build_source(&config);
    let pipeline = Pipeline::new(
        source,
        config.alerts.thresholds(),
        Dispatcher::new(Arc::new(NullNotifier)),
    );

    let text = pipeline.render_report(Utc::now()).await;

    if send {
        let notifier = super::build_notifier(&config);
        notifier.send(&text).await?;
        info!(channel = notifier.channel_name(), "Report delivered");
    } else {
        println!("{text}");
    }

    Ok(())
}
