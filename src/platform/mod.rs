pub mod telegram;

#[cfg(test)]
pub mod mock;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use async_trait::async_trait;

/// Address of a chat: a numeric id or a public `@username`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChatRef {
    Id(i64),
    Username(String),
}

impl FromStr for ChatRef {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(name) = s.strip_prefix('@') {
            if name.is_empty() {
                anyhow::bail!("Chat username must not be empty");
            }
            return Ok(ChatRef::Username(name.to_string()));
        }
        s.parse::<i64>().map(ChatRef::Id).map_err(|_| {
            anyhow::anyhow!(
                "Invalid chat reference '{}': expected a numeric id or @username",
                s
            )
        })
    }
}

impl fmt::Display for ChatRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatRef::Id(id) => write!(f, "{}", id),
            ChatRef::Username(name) => write!(f, "@{}", name),
        }
    }
}

/// Outbound send operations of a messaging platform.
///
/// Media are re-sent by platform file id. Caption-capable operations always
/// take a caption; callers pass `""` when the source had none.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send_text(&self, chat: &ChatRef, text: &str) -> Result<()>;
    async fn send_photo(&self, chat: &ChatRef, file_id: &str, caption: &str) -> Result<()>;
    async fn send_video(&self, chat: &ChatRef, file_id: &str, caption: &str) -> Result<()>;
    async fn send_document(&self, chat: &ChatRef, file_id: &str, caption: &str) -> Result<()>;
    async fn send_audio(&self, chat: &ChatRef, file_id: &str, caption: &str) -> Result<()>;
    async fn send_voice(&self, chat: &ChatRef, file_id: &str, caption: &str) -> Result<()>;
    async fn send_video_note(&self, chat: &ChatRef, file_id: &str) -> Result<()>;
    async fn send_sticker(&self, chat: &ChatRef, file_id: &str) -> Result<()>;
    async fn send_animation(&self, chat: &ChatRef, file_id: &str, caption: &str) -> Result<()>;
    async fn send_location(&self, chat: &ChatRef, latitude: f64, longitude: f64) -> Result<()>;
    async fn send_venue(
        &self,
        chat: &ChatRef,
        latitude: f64,
        longitude: f64,
        title: &str,
        address: &str,
    ) -> Result<()>;
    async fn send_contact(
        &self,
        chat: &ChatRef,
        phone_number: &str,
        first_name: &str,
        last_name: Option<&str>,
    ) -> Result<()>;
}
