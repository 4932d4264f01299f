//! Recording [`Messenger`] for tests.
//!
//! Every call is recorded as the [`OutboundAction`] it corresponds to, even
//! when the call is configured to fail.

use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use super::{ChatRef, Messenger};
use crate::dispatch::OutboundAction;
use crate::post::{Contact, Venue};

#[derive(Debug, Clone, PartialEq)]
pub struct SentCall {
    pub chat: ChatRef,
    pub action: OutboundAction,
}

#[derive(Default)]
pub struct RecordingMessenger {
    calls: Mutex<Vec<SentCall>>,
    /// Operation name (e.g. "send_photo") that returns an error
    fail_on: Option<&'static str>,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(operation: &'static str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on: Some(operation),
        }
    }

    pub fn calls(&self) -> Vec<SentCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, chat: &ChatRef, action: OutboundAction) -> Result<()> {
        let operation = action.operation();
        self.calls.lock().unwrap().push(SentCall {
            chat: chat.clone(),
            action,
        });
        if self.fail_on == Some(operation) {
            anyhow::bail!("{} rejected: API error", operation);
        }
        Ok(())
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_text(&self, chat: &ChatRef, text: &str) -> Result<()> {
        self.record(chat, OutboundAction::Text(text.to_string()))
    }

    async fn send_photo(&self, chat: &ChatRef, file_id: &str, caption: &str) -> Result<()> {
        self.record(
            chat,
            OutboundAction::Photo {
                file_id: file_id.to_string(),
                caption: caption.to_string(),
            },
        )
    }

    async fn send_video(&self, chat: &ChatRef, file_id: &str, caption: &str) -> Result<()> {
        self.record(
            chat,
            OutboundAction::Video {
                file_id: file_id.to_string(),
                caption: caption.to_string(),
            },
        )
    }

    async fn send_document(&self, chat: &ChatRef, file_id: &str, caption: &str) -> Result<()> {
        self.record(
            chat,
            OutboundAction::Document {
                file_id: file_id.to_string(),
                caption: caption.to_string(),
            },
        )
    }

    async fn send_audio(&self, chat: &ChatRef, file_id: &str, caption: &str) -> Result<()> {
        self.record(
            chat,
            OutboundAction::Audio {
                file_id: file_id.to_string(),
                caption: caption.to_string(),
            },
        )
    }

    async fn send_voice(&self, chat: &ChatRef, file_id: &str, caption: &str) -> Result<()> {
        self.record(
            chat,
            OutboundAction::Voice {
                file_id: file_id.to_string(),
                caption: caption.to_string(),
            },
        )
    }

    async fn send_video_note(&self, chat: &ChatRef, file_id: &str) -> Result<()> {
        self.record(
            chat,
            OutboundAction::VideoNote {
                file_id: file_id.to_string(),
            },
        )
    }

    async fn send_sticker(&self, chat: &ChatRef, file_id: &str) -> Result<()> {
        self.record(
            chat,
            OutboundAction::Sticker {
                file_id: file_id.to_string(),
            },
        )
    }

    async fn send_animation(&self, chat: &ChatRef, file_id: &str, caption: &str) -> Result<()> {
        self.record(
            chat,
            OutboundAction::Animation {
                file_id: file_id.to_string(),
                caption: caption.to_string(),
            },
        )
    }

    async fn send_location(&self, chat: &ChatRef, latitude: f64, longitude: f64) -> Result<()> {
        self.record(
            chat,
            OutboundAction::Location {
                latitude,
                longitude,
            },
        )
    }

    async fn send_venue(
        &self,
        chat: &ChatRef,
        latitude: f64,
        longitude: f64,
        title: &str,
        address: &str,
    ) -> Result<()> {
        self.record(
            chat,
            OutboundAction::Venue(Venue {
                latitude,
                longitude,
                title: title.to_string(),
                address: address.to_string(),
            }),
        )
    }

    async fn send_contact(
        &self,
        chat: &ChatRef,
        phone_number: &str,
        first_name: &str,
        last_name: Option<&str>,
    ) -> Result<()> {
        self.record(
            chat,
            OutboundAction::Contact(Contact {
                phone_number: phone_number.to_string(),
                first_name: first_name.to_string(),
                last_name: last_name.map(str::to_string),
            }),
        )
    }
}
