use std::sync::Arc;

use tracing::error;

use crate::config::Config;
use crate::platform::{ChatRef, Messenger};
use crate::scheduler::Scheduler;

/// Register built-in background tasks
pub fn register_builtin_tasks(
    scheduler: &mut Scheduler,
    config: &Config,
    messenger: Arc<dyn Messenger>,
) -> anyhow::Result<()> {
    let group = config.telegram.group.clone();
    let text = Arc::new(config.messages.daily_post.clone());

    // Daily post into the group
    scheduler.add_repeated_job(
        "daily_post",
        config.schedule.daily_post_interval(),
        move || {
            let messenger = messenger.clone();
            let group = group.clone();
            let text = text.clone();
            Box::pin(async move {
                send_daily_post(messenger.as_ref(), &group, &text).await;
            })
        },
    )
}

async fn send_daily_post(messenger: &dyn Messenger, group: &ChatRef, text: &str) {
    if let Err(e) = messenger.send_text(group, text).await {
        error!("Failed to send daily post to {}: {:#}", group, e);
    }
}
