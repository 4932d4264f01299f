mod bot;
mod command;
mod config;
mod dispatch;
mod forward;
mod platform;
mod post;
mod scheduler;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::bot::Relay;
use crate::config::Config;
use crate::platform::telegram::TelegramMessenger;
use crate::platform::Messenger;
use crate::scheduler::tasks::register_builtin_tasks;
use crate::scheduler::Scheduler;

#[tokio::main]
async fn main() -> Result<()> {
    // Optional .env; real environment variables take precedence
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,kimchibot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let explicit = std::env::args().nth(1).map(PathBuf::from);
    let config_path = explicit
        .clone()
        .unwrap_or_else(|| PathBuf::from("kimchibot.toml"));

    info!("Loading configuration from: {}", config_path.display());
    let config = Config::load(&config_path, explicit.is_some())
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    info!("Configuration loaded successfully");
    info!("  Source channel: {}", config.telegram.channel);
    info!("  Destination group: {}", config.telegram.group);
    info!("  Command: {}", config.command.trigger);
    info!(
        "  Daily post every: {}s",
        config.schedule.daily_post_interval_secs
    );

    let bot = teloxide::Bot::new(&config.telegram.bot_token);
    let messenger: Arc<dyn Messenger> = Arc::new(TelegramMessenger::new(bot.clone()));

    // Background jobs
    let mut scheduler = Scheduler::new();
    register_builtin_tasks(&mut scheduler, &config, messenger.clone())?;
    scheduler.start();

    let relay = Arc::new(Relay::new(&config, messenger));

    info!("KimchiBot is running...");
    bot::run(bot, relay).await?;

    scheduler.shutdown().await;
    Ok(())
}
