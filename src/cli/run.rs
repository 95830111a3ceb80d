//! Handler for the `run` command.

use std::sync::Arc;

use tokio::signal;
use tracing::info;

use crate::app::{Dispatcher, Pipeline, Scheduler};
use crate::config::Config;
use crate::error::Result;

#[cfg(feature = "telegram")]
use crate::adapter::telegram::{command_listener, ListenerConfig};

/// Run the scheduler and the command listener until shutdown.
pub async fn execute(config: Config) -> Result<()> {
    let source = super::build_source(&config);
    let notifier = super::build_notifier(&config);

    info!(
        source = source.source_name(),
        channel = notifier.channel_name(),
        "Pipeline assembled"
    );

    let pipeline = Arc::new(Pipeline::new(
        source,
        config.alerts.thresholds(),
        Dispatcher::new(notifier),
    ));
    let handle = Scheduler::new(
        pipeline,
        config.schedule.interval(),
        config.schedule.initial_delay(),
    )
    .spawn();

    #[cfg(feature = "telegram")]
    if config.telegram.enabled {
        if let (Some(token), Some(chat_id)) =
            (config.telegram.bot_token.clone(), config.telegram.chat_id)
        {
            let listener = ListenerConfig {
                bot_token: token,
                chat_id,
            };
            tokio::spawn(command_listener(listener, handle.manual_trigger()));
        }
    }

    signal::ctrl_c().await?;
    info!("Shutdown signal received");

    // Cancel the pending timer; an in-flight run finishes on its own.
    handle.stop();
    handle.join().await;

    Ok(())
}
