use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::dispatch::{OutboundAction, PostDispatcher};
use crate::platform::{ChatRef, Messenger};
use crate::post::InboundPost;

/// Outcome of forwarding one channel post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The post went out via the named send operation
    Forwarded(&'static str),
    /// Forwarding failed and the fallback notice was sent instead
    FellBack,
    /// Forwarding failed and the fallback notice failed too
    Lost,
}

/// Forwards channel posts into the destination group.
///
/// Any failure while forwarding turns into exactly one fallback notice;
/// errors are logged and never returned to the caller.
pub struct Forwarder {
    messenger: Arc<dyn Messenger>,
    destination: ChatRef,
    dispatcher: PostDispatcher,
}

impl Forwarder {
    pub fn new(
        messenger: Arc<dyn Messenger>,
        destination: ChatRef,
        dispatcher: PostDispatcher,
    ) -> Self {
        Self {
            messenger,
            destination,
            dispatcher,
        }
    }

    pub fn destination(&self) -> &ChatRef {
        &self.destination
    }

    pub async fn forward(&self, post: &InboundPost) -> Delivery {
        match self.try_forward(post).await {
            Ok(operation) => {
                info!(
                    "Forwarded {} post to {} via {}",
                    post.content.kind(),
                    self.destination,
                    operation
                );
                Delivery::Forwarded(operation)
            }
            Err(e) => {
                error!("Error forwarding channel post: {:#}", e);
                match self
                    .messenger
                    .send_text(&self.destination, self.dispatcher.fallback_notice())
                    .await
                {
                    Ok(()) => Delivery::FellBack,
                    Err(e) => {
                        error!("Failed to send fallback notice: {:#}", e);
                        Delivery::Lost
                    }
                }
            }
        }
    }

    async fn try_forward(&self, post: &InboundPost) -> Result<&'static str> {
        let action = self.dispatcher.select(post);
        let operation = action.operation();
        self.execute(action)
            .await
            .with_context(|| format!("{} to {} failed", operation, self.destination))?;
        Ok(operation)
    }

    async fn execute(&self, action: OutboundAction) -> Result<()> {
        let chat = &self.destination;
        let m = &self.messenger;
        match action {
            OutboundAction::Text(text) => m.send_text(chat, &text).await,
            OutboundAction::Photo { file_id, caption } => {
                m.send_photo(chat, &file_id, &caption).await
            }
            OutboundAction::Video { file_id, caption } => {
                m.send_video(chat, &file_id, &caption).await
            }
            OutboundAction::Document { file_id, caption } => {
                m.send_document(chat, &file_id, &caption).await
            }
            OutboundAction::Audio { file_id, caption } => {
                m.send_audio(chat, &file_id, &caption).await
            }
            OutboundAction::Voice { file_id, caption } => {
                m.send_voice(chat, &file_id, &caption).await
            }
            OutboundAction::VideoNote { file_id } => m.send_video_note(chat, &file_id).await,
            OutboundAction::Sticker { file_id } => m.send_sticker(chat, &file_id).await,
            OutboundAction::Animation { file_id, caption } => {
                m.send_animation(chat, &file_id, &caption).await
            }
            OutboundAction::Location {
                latitude,
                longitude,
            } => m.send_location(chat, latitude, longitude).await,
            OutboundAction::Venue(venue) => {
                m.send_venue(
                    chat,
                    venue.latitude,
                    venue.longitude,
                    &venue.title,
                    &venue.address,
                )
                .await
            }
            OutboundAction::Contact(contact) => {
                m.send_contact(
                    chat,
                    &contact.phone_number,
                    &contact.first_name,
                    contact.last_name.as_deref(),
                )
                .await
            }
        }
    }
}
