use anyhow::Result;
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{Chat, ChatId, FileId, InputFile, Recipient};

use crate::platform::{ChatRef, Messenger};
use crate::post::{Contact, PostFields, Venue};

impl From<&ChatRef> for Recipient {
    fn from(chat: &ChatRef) -> Self {
        match chat {
            ChatRef::Id(id) => Recipient::Id(ChatId(*id)),
            ChatRef::Username(name) => Recipient::ChannelUsername(format!("@{}", name)),
        }
    }
}

impl ChatRef {
    /// Whether a Telegram chat is the one this reference points at
    pub fn matches_chat(&self, chat: &Chat) -> bool {
        match self {
            ChatRef::Id(id) => chat.id.0 == *id,
            ChatRef::Username(name) => chat
                .username()
                .is_some_and(|u| u.eq_ignore_ascii_case(name)),
        }
    }
}

fn file(id: &str) -> InputFile {
    InputFile::file_id(FileId(id.to_string()))
}

/// Capture every content field of a Telegram message
pub fn post_fields(msg: &Message) -> PostFields {
    PostFields {
        photo: msg
            .photo()
            .map(|sizes| sizes.iter().map(|p| p.file.id.0.clone()).collect()),
        video: msg.video().map(|v| v.file.id.0.clone()),
        document: msg.document().map(|d| d.file.id.0.clone()),
        audio: msg.audio().map(|a| a.file.id.0.clone()),
        voice: msg.voice().map(|v| v.file.id.0.clone()),
        video_note: msg.video_note().map(|v| v.file.id.0.clone()),
        sticker: msg.sticker().map(|s| s.file.id.0.clone()),
        animation: msg.animation().map(|a| a.file.id.0.clone()),
        // Venue messages carry a top-level location on the wire too
        location: msg
            .location()
            .or_else(|| msg.venue().map(|v| &v.location))
            .map(|l| (l.latitude, l.longitude)),
        venue: msg.venue().map(|v| Venue {
            latitude: v.location.latitude,
            longitude: v.location.longitude,
            title: v.title.clone(),
            address: v.address.clone(),
        }),
        contact: msg.contact().map(|c| Contact {
            phone_number: c.phone_number.clone(),
            first_name: c.first_name.clone(),
            last_name: c.last_name.clone(),
        }),
        poll_question: msg.poll().map(|p| p.question.clone()),
        text: msg.text().map(str::to_string),
        caption: msg.caption().map(str::to_string),
    }
}

/// [`Messenger`] backed by the Telegram Bot API
#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send_text(&self, chat: &ChatRef, text: &str) -> Result<()> {
        self.bot.send_message(Recipient::from(chat), text).await?;
        Ok(())
    }

    async fn send_photo(&self, chat: &ChatRef, file_id: &str, caption: &str) -> Result<()> {
        self.bot
            .send_photo(Recipient::from(chat), file(file_id))
            .caption(caption)
            .await?;
        Ok(())
    }

    async fn send_video(&self, chat: &ChatRef, file_id: &str, caption: &str) -> Result<()> {
        self.bot
            .send_video(Recipient::from(chat), file(file_id))
            .caption(caption)
            .await?;
        Ok(())
    }

    async fn send_document(&self, chat: &ChatRef, file_id: &str, caption: &str) -> Result<()> {
        self.bot
            .send_document(Recipient::from(chat), file(file_id))
            .caption(caption)
            .await?;
        Ok(())
    }

    async fn send_audio(&self, chat: &ChatRef, file_id: &str, caption: &str) -> Result<()> {
        self.bot
            .send_audio(Recipient::from(chat), file(file_id))
            .caption(caption)
            .await?;
        Ok(())
    }

    async fn send_voice(&self, chat: &ChatRef, file_id: &str, caption: &str) -> Result<()> {
        self.bot
            .send_voice(Recipient::from(chat), file(file_id))
            .caption(caption)
            .await?;
        Ok(())
    }

    async fn send_video_note(&self, chat: &ChatRef, file_id: &str) -> Result<()> {
        self.bot
            .send_video_note(Recipient::from(chat), file(file_id))
            .await?;
        Ok(())
    }

    async fn send_sticker(&self, chat: &ChatRef, file_id: &str) -> Result<()> {
        self.bot
            .send_sticker(Recipient::from(chat), file(file_id))
            .await?;
        Ok(())
    }

    async fn send_animation(&self, chat: &ChatRef, file_id: &str, caption: &str) -> Result<()> {
        self.bot
            .send_animation(Recipient::from(chat), file(file_id))
            .caption(caption)
            .await?;
        Ok(())
    }

    async fn send_location(&self, chat: &ChatRef, latitude: f64, longitude: f64) -> Result<()> {
        self.bot
            .send_location(Recipient::from(chat), latitude, longitude)
            .await?;
        Ok(())
    }

    async fn send_venue(
        &self,
        chat: &ChatRef,
        latitude: f64,
        longitude: f64,
        title: &str,
        address: &str,
    ) -> Result<()> {
        self.bot
            .send_venue(Recipient::from(chat), latitude, longitude, title, address)
            .await?;
        Ok(())
    }

    async fn send_contact(
        &self,
        chat: &ChatRef,
        phone_number: &str,
        first_name: &str,
        last_name: Option<&str>,
    ) -> Result<()> {
        let mut req = self
            .bot
            .send_contact(Recipient::from(chat), phone_number, first_name);
        if let Some(last_name) = last_name {
            req = req.last_name(last_name);
        }
        req.await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::PostContent;

    fn channel_post(content: serde_json::Value) -> Message {
        let mut value = serde_json::json!({
            "message_id": 7,
            "date": 1_700_000_000,
            "chat": {
                "id": -1001234,
                "title": "K Global Channel",
                "username": "kglobal",
                "type": "channel"
            }
        });
        if let (Some(base), Some(extra)) = (value.as_object_mut(), content.as_object()) {
            base.extend(extra.clone());
        }
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_text_post_fields() {
        let msg = channel_post(serde_json::json!({ "text": "Kimchi is the best!" }));
        let post = post_fields(&msg).into_post();
        assert_eq!(post.content, PostContent::Text("Kimchi is the best!".into()));
        assert_eq!(post.caption, None);
    }

    #[test]
    fn test_photo_post_fields_keep_size_order() {
        let msg = channel_post(serde_json::json!({
            "photo": [
                { "file_id": "small_photo", "file_unique_id": "s1", "width": 90, "height": 90 },
                { "file_id": "large_photo", "file_unique_id": "l1", "width": 1280, "height": 1280 }
            ],
            "caption": "Spicy Kimchi 🔥"
        }));
        let post = post_fields(&msg).into_post();
        assert_eq!(
            post.content,
            PostContent::Photo(vec!["small_photo".into(), "large_photo".into()])
        );
        assert_eq!(post.caption.as_deref(), Some("Spicy Kimchi 🔥"));
    }

    #[test]
    fn test_recipient_from_chat_ref() {
        assert_eq!(
            Recipient::from(&ChatRef::Id(-100)),
            Recipient::Id(ChatId(-100))
        );
        assert_eq!(
            Recipient::from(&ChatRef::Username("kglobal".into())),
            Recipient::ChannelUsername("@kglobal".into())
        );
    }

    #[test]
    fn test_chat_ref_matches_source_channel() {
        let msg = channel_post(serde_json::json!({ "text": "hi" }));
        assert!(ChatRef::Id(-1001234).matches_chat(&msg.chat));
        assert!(ChatRef::Username("kglobal".into()).matches_chat(&msg.chat));
        assert!(ChatRef::Username("KGlobal".into()).matches_chat(&msg.chat));
        assert!(!ChatRef::Id(-1).matches_chat(&msg.chat));
        assert!(!ChatRef::Username("other".into()).matches_chat(&msg.chat));
    }

    #[test]
    fn test_venue_post_is_relayed_as_location() {
        let msg = channel_post(serde_json::json!({
            "location": { "latitude": 37.57, "longitude": 126.98 },
            "venue": {
                "location": { "latitude": 37.57, "longitude": 126.98 },
                "title": "Gwangjang Market",
                "address": "88 Changgyeonggung-ro"
            }
        }));
        let fields = post_fields(&msg);
        assert!(fields.venue.is_some());
        assert_eq!(
            fields.into_post().content,
            PostContent::Location {
                latitude: 37.57,
                longitude: 126.98
            }
        );
    }

    #[test]
    fn test_animation_post_is_relayed_as_document() {
        let msg = channel_post(serde_json::json!({
            "animation": {
                "file_id": "gif", "file_unique_id": "g1",
                "width": 320, "height": 240, "duration": 3
            },
            "document": { "file_id": "gif", "file_unique_id": "g1" }
        }));
        assert_eq!(
            post_fields(&msg).into_post().content,
            PostContent::Document("gif".into())
        );
    }
}
