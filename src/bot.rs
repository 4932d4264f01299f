use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use tracing::{debug, info};

use crate::command::CommandResponder;
use crate::config::Config;
use crate::dispatch::PostDispatcher;
use crate::forward::Forwarder;
use crate::platform::telegram::post_fields;
use crate::platform::{ChatRef, Messenger};

/// Shared application state
pub struct Relay {
    source: ChatRef,
    forwarder: Forwarder,
    responder: CommandResponder,
}

impl Relay {
    pub fn new(config: &Config, messenger: Arc<dyn Messenger>) -> Self {
        let dispatcher = PostDispatcher::new(&config.messages);
        Self {
            source: config.telegram.channel.clone(),
            forwarder: Forwarder::new(
                messenger.clone(),
                config.telegram.group.clone(),
                dispatcher,
            ),
            responder: CommandResponder::new(messenger, &config.command, &config.messages),
        }
    }

    fn is_source(&self, chat: &teloxide::types::Chat) -> bool {
        let matched = self.source.matches_chat(chat);
        if !matched {
            debug!("Ignoring post from chat {} (not the source channel)", chat.id.0);
        }
        matched
    }

    fn is_command(&self, msg: &Message) -> bool {
        msg.text().is_some_and(|text| self.responder.matches(text))
    }
}

/// Start the Telegram bot and relay until interrupted
pub async fn run(bot: Bot, relay: Arc<Relay>) -> Result<()> {
    info!(
        "Relaying channel {} into group {}",
        relay.source,
        relay.forwarder.destination()
    );

    let handler = dptree::entry()
        .branch(
            Update::filter_channel_post()
                .filter(|msg: Message, relay: Arc<Relay>| relay.is_source(&msg.chat))
                .endpoint(handle_channel_post),
        )
        .branch(
            Update::filter_message()
                .filter(|msg: Message, relay: Arc<Relay>| relay.is_command(&msg))
                .endpoint(handle_command),
        );

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![relay])
        .default_handler(|upd| async move {
            debug!("Unhandled update: {:?}", upd.id);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("relay"))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn handle_channel_post(msg: Message, relay: Arc<Relay>) -> ResponseResult<()> {
    let post = post_fields(&msg).into_post();
    debug!(
        "Channel post {} from {}: {}",
        msg.id.0,
        msg.chat.id.0,
        post.content.kind()
    );
    relay.forwarder.forward(&post).await;
    Ok(())
}

async fn handle_command(msg: Message, relay: Arc<Relay>) -> ResponseResult<()> {
    if let Some(text) = msg.text() {
        relay
            .responder
            .respond(&ChatRef::Id(msg.chat.id.0), text)
            .await;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CommandConfig, MessagesConfig, ScheduleConfig, TelegramConfig};
    use crate::platform::mock::RecordingMessenger;

    fn relay() -> Relay {
        let config = Config {
            telegram: TelegramConfig {
                bot_token: "t".into(),
                channel: ChatRef::Id(-1001),
                group: ChatRef::Id(-1002),
            },
            messages: MessagesConfig::default(),
            command: CommandConfig::default(),
            schedule: ScheduleConfig::default(),
        };
        Relay::new(&config, Arc::new(RecordingMessenger::new()))
    }

    fn message(chat_id: i64, chat_type: &str, text: &str) -> Message {
        serde_json::from_value(serde_json::json!({
            "message_id": 1,
            "date": 1_700_000_000,
            "chat": { "id": chat_id, "title": "Kimchi", "type": chat_type },
            "text": text
        }))
        .unwrap()
    }

    #[test]
    fn test_only_source_channel_is_relayed() {
        let relay = relay();
        assert!(relay.is_source(&message(-1001, "channel", "hi").chat));
        assert!(!relay.is_source(&message(-1003, "channel", "hi").chat));
    }

    #[test]
    fn test_command_detection() {
        let relay = relay();
        assert!(relay.is_command(&message(-1002, "supergroup", "/kimchi")));
        assert!(!relay.is_command(&message(-1002, "supergroup", "kimchi")));
    }
}
