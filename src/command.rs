use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::config::{CommandConfig, MessagesConfig};
use crate::platform::{ChatRef, Messenger};

/// Replies with a fixed greeting when a message mentions the trigger command
pub struct CommandResponder {
    messenger: Arc<dyn Messenger>,
    trigger: String,
    greeting: String,
}

impl CommandResponder {
    pub fn new(
        messenger: Arc<dyn Messenger>,
        command: &CommandConfig,
        messages: &MessagesConfig,
    ) -> Self {
        Self {
            messenger,
            trigger: command.trigger.clone(),
            greeting: messages.greeting.clone(),
        }
    }

    /// Case-sensitive match anywhere in the text
    pub fn matches(&self, text: &str) -> bool {
        text.contains(&self.trigger)
    }

    /// Reply into `chat` if `text` carries the trigger.
    ///
    /// Returns whether a reply was sent. Send failures are logged, not returned.
    pub async fn respond(&self, chat: &ChatRef, text: &str) -> bool {
        if !self.matches(text) {
            return false;
        }

        match self.reply(chat).await {
            Ok(()) => {
                info!("Answered {} in chat {}", self.trigger, chat);
                true
            }
            Err(e) => {
                error!("Failed to answer command: {:#}", e);
                false
            }
        }
    }

    async fn reply(&self, chat: &ChatRef) -> Result<()> {
        self.messenger
            .send_text(chat, &self.greeting)
            .await
            .with_context(|| format!("Failed to send greeting to {}", chat))
    }
}
