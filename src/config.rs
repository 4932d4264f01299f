use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::platform::ChatRef;

/// Resolved runtime configuration, built once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub messages: MessagesConfig,
    pub command: CommandConfig,
    pub schedule: ScheduleConfig,
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// Channel whose posts are relayed
    pub channel: ChatRef,
    /// Group that receives forwarded posts and the daily broadcast
    pub group: ChatRef,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MessagesConfig {
    #[serde(default = "default_announcement_prefix")]
    pub announcement_prefix: String,
    #[serde(default = "default_fallback")]
    pub fallback: String,
    #[serde(default = "default_greeting")]
    pub greeting: String,
    #[serde(default = "default_daily_post")]
    pub daily_post: String,
    /// `{question}` is replaced with the poll question
    #[serde(default = "default_poll_notice")]
    pub poll_notice: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CommandConfig {
    #[serde(default = "default_trigger")]
    pub trigger: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScheduleConfig {
    #[serde(default = "default_daily_post_interval_secs")]
    pub daily_post_interval_secs: u64,
}

impl ScheduleConfig {
    pub fn daily_post_interval(&self) -> Duration {
        Duration::from_secs(self.daily_post_interval_secs)
    }
}

/// On-disk layout. Telegram values are optional here since the
/// environment may supply them.
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    #[serde(default)]
    telegram: FileTelegramConfig,
    #[serde(default)]
    messages: Option<MessagesConfig>,
    #[serde(default)]
    command: Option<CommandConfig>,
    #[serde(default)]
    schedule: Option<ScheduleConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct FileTelegramConfig {
    bot_token: Option<String>,
    channel_id: Option<String>,
    group_id: Option<String>,
}

pub const ENV_BOT_TOKEN: &str = "BOT_TOKEN";
pub const ENV_CHANNEL_ID: &str = "CHANNEL_ID";
pub const ENV_GROUP_ID: &str = "GROUP_ID";

fn default_announcement_prefix() -> String {
    "📢".to_string()
}

fn default_fallback() -> String {
    "Check the K Global Channel - a new post is there! 🍄‍🟫".to_string()
}

fn default_greeting() -> String {
    "🔥 Kimchi is life! Glad you made it to the Kimchi Token Community! 👑".to_string()
}

fn default_daily_post() -> String {
    "🔥 Stay spicy! #KimchiToTheMoon 🚀 🌕 ".to_string()
}

fn default_poll_notice() -> String {
    "📊 New poll in channel: \"{question}\". Check the channel to vote!".to_string()
}

fn default_trigger() -> String {
    "/kimchi".to_string()
}

fn default_daily_post_interval_secs() -> u64 {
    24 * 60 * 60
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            announcement_prefix: default_announcement_prefix(),
            fallback: default_fallback(),
            greeting: default_greeting(),
            daily_post: default_daily_post(),
            poll_notice: default_poll_notice(),
        }
    }
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            trigger: default_trigger(),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            daily_post_interval_secs: default_daily_post_interval_secs(),
        }
    }
}

impl Config {
    /// Load from an optional TOML file, then apply process environment.
    ///
    /// `required` marks a path the user asked for explicitly; a missing
    /// default file is not an error.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        let content = if path.exists() {
            Some(
                std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?,
            )
        } else if required {
            anyhow::bail!("Config file not found: {}", path.display());
        } else {
            None
        };

        Self::from_sources(content.as_deref(), |key| std::env::var(key).ok())
            .with_context(|| format!("Invalid configuration (file: {})", path.display()))
    }

    /// Build from file content and an environment lookup; env wins over file.
    pub fn from_sources<F>(content: Option<&str>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file: FileConfig = match content {
            Some(c) => toml::from_str(c).context("Failed to parse config file")?,
            None => FileConfig::default(),
        };

        let lookup = |key: &str, from_file: Option<String>| -> Result<String> {
            env(key)
                .filter(|v| !v.trim().is_empty())
                .or(from_file)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("{} is not set", key))
        };

        let bot_token = lookup(ENV_BOT_TOKEN, file.telegram.bot_token)?;
        let channel = lookup(ENV_CHANNEL_ID, file.telegram.channel_id)?
            .parse::<ChatRef>()
            .with_context(|| format!("{} is invalid", ENV_CHANNEL_ID))?;
        let group = lookup(ENV_GROUP_ID, file.telegram.group_id)?
            .parse::<ChatRef>()
            .with_context(|| format!("{} is invalid", ENV_GROUP_ID))?;

        let config = Config {
            telegram: TelegramConfig {
                bot_token,
                channel,
                group,
            },
            messages: file.messages.unwrap_or_default(),
            command: file.command.unwrap_or_default(),
            schedule: file.schedule.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.command.trigger.trim().is_empty() {
            anyhow::bail!("command.trigger must not be empty");
        }
        if self.schedule.daily_post_interval_secs == 0 {
            anyhow::bail!("schedule.daily_post_interval_secs must be greater than zero");
        }
        Ok(())
    }
}
