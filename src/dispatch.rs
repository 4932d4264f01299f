use crate::config::MessagesConfig;
use crate::post::{Contact, InboundPost, PostContent, Venue};

/// A resolved outbound send, not yet bound to a destination
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundAction {
    Text(String),
    Photo { file_id: String, caption: String },
    Video { file_id: String, caption: String },
    Document { file_id: String, caption: String },
    Audio { file_id: String, caption: String },
    Voice { file_id: String, caption: String },
    VideoNote { file_id: String },
    Sticker { file_id: String },
    Animation { file_id: String, caption: String },
    Location { latitude: f64, longitude: f64 },
    Venue(Venue),
    Contact(Contact),
}

impl OutboundAction {
    /// Name of the send operation this action maps to
    pub fn operation(&self) -> &'static str {
        match self {
            OutboundAction::Text(_) => "send_text",
            OutboundAction::Photo { .. } => "send_photo",
            OutboundAction::Video { .. } => "send_video",
            OutboundAction::Document { .. } => "send_document",
            OutboundAction::Audio { .. } => "send_audio",
            OutboundAction::Voice { .. } => "send_voice",
            OutboundAction::VideoNote { .. } => "send_video_note",
            OutboundAction::Sticker { .. } => "send_sticker",
            OutboundAction::Animation { .. } => "send_animation",
            OutboundAction::Location { .. } => "send_location",
            OutboundAction::Venue(_) => "send_venue",
            OutboundAction::Contact(_) => "send_contact",
        }
    }
}

/// Picks the outbound action for a channel post
#[derive(Debug, Clone)]
pub struct PostDispatcher {
    announcement_prefix: String,
    fallback: String,
    poll_notice: String,
}

impl PostDispatcher {
    pub fn new(messages: &MessagesConfig) -> Self {
        Self {
            announcement_prefix: messages.announcement_prefix.clone(),
            fallback: messages.fallback.clone(),
            poll_notice: messages.poll_notice.clone(),
        }
    }

    pub fn fallback_notice(&self) -> &str {
        &self.fallback
    }

    pub fn select(&self, post: &InboundPost) -> OutboundAction {
        let caption = post.caption.clone().unwrap_or_default();

        match &post.content {
            PostContent::Photo(sizes) => match sizes.last() {
                Some(largest) => OutboundAction::Photo {
                    file_id: largest.clone(),
                    caption,
                },
                None => OutboundAction::Text(self.fallback.clone()),
            },
            PostContent::Video(id) => OutboundAction::Video {
                file_id: id.clone(),
                caption,
            },
            PostContent::Document(id) => OutboundAction::Document {
                file_id: id.clone(),
                caption,
            },
            PostContent::Audio(id) => OutboundAction::Audio {
                file_id: id.clone(),
                caption,
            },
            PostContent::Voice(id) => OutboundAction::Voice {
                file_id: id.clone(),
                caption,
            },
            PostContent::VideoNote(id) => OutboundAction::VideoNote {
                file_id: id.clone(),
            },
            PostContent::Sticker(id) => OutboundAction::Sticker {
                file_id: id.clone(),
            },
            PostContent::Animation(id) => OutboundAction::Animation {
                file_id: id.clone(),
                caption,
            },
            PostContent::Location {
                latitude,
                longitude,
            } => OutboundAction::Location {
                latitude: *latitude,
                longitude: *longitude,
            },
            PostContent::Venue(venue) => OutboundAction::Venue(venue.clone()),
            PostContent::Contact(contact) => OutboundAction::Contact(contact.clone()),
            PostContent::Poll { question } => {
                OutboundAction::Text(self.poll_notice.replace("{question}", question))
            }
            PostContent::Text(text) => {
                OutboundAction::Text(format!("{} {}", self.announcement_prefix, text))
            }
            PostContent::Unrecognized => OutboundAction::Text(self.fallback.clone()),
        }
    }
}
