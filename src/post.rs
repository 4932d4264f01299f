//! Inbound channel posts.
//!
//! The Bot API does not guarantee that content fields are mutually exclusive,
//! so a wire message is first captured as [`PostFields`] and then collapsed
//! into a single [`PostContent`] variant by a fixed priority order.

#[derive(Debug, Clone, PartialEq)]
pub struct Venue {
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub phone_number: String,
    pub first_name: String,
    pub last_name: Option<String>,
}

/// Raw content fields of one channel post, each independently optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostFields {
    /// File ids of the photo size variants, smallest first
    pub photo: Option<Vec<String>>,
    pub video: Option<String>,
    pub document: Option<String>,
    pub audio: Option<String>,
    pub voice: Option<String>,
    pub video_note: Option<String>,
    pub sticker: Option<String>,
    pub animation: Option<String>,
    pub location: Option<(f64, f64)>,
    pub venue: Option<Venue>,
    pub contact: Option<Contact>,
    pub poll_question: Option<String>,
    pub text: Option<String>,
    pub caption: Option<String>,
}

/// The single content variant a post is forwarded as
#[derive(Debug, Clone, PartialEq)]
pub enum PostContent {
    /// Size variants, smallest first; never empty
    Photo(Vec<String>),
    Video(String),
    Document(String),
    Audio(String),
    Voice(String),
    VideoNote(String),
    Sticker(String),
    Animation(String),
    Location { latitude: f64, longitude: f64 },
    Venue(Venue),
    Contact(Contact),
    Poll { question: String },
    Text(String),
    Unrecognized,
}

impl PostContent {
    pub fn kind(&self) -> &'static str {
        match self {
            PostContent::Photo(_) => "photo",
            PostContent::Video(_) => "video",
            PostContent::Document(_) => "document",
            PostContent::Audio(_) => "audio",
            PostContent::Voice(_) => "voice",
            PostContent::VideoNote(_) => "video_note",
            PostContent::Sticker(_) => "sticker",
            PostContent::Animation(_) => "animation",
            PostContent::Location { .. } => "location",
            PostContent::Venue(_) => "venue",
            PostContent::Contact(_) => "contact",
            PostContent::Poll { .. } => "poll",
            PostContent::Text(_) => "text",
            PostContent::Unrecognized => "unrecognized",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InboundPost {
    pub content: PostContent,
    pub caption: Option<String>,
}

#[cfg(test)]
impl InboundPost {
    pub fn new(content: PostContent) -> Self {
        Self {
            content,
            caption: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

impl PostFields {
    /// Collapse into one variant.
    ///
    /// Priority: photo > video > document > audio > voice > video_note >
    /// sticker > animation > location > venue > contact > poll > text.
    pub fn into_post(self) -> InboundPost {
        let caption = self.caption;

        let content = if let Some(sizes) = self.photo.filter(|sizes| !sizes.is_empty()) {
            PostContent::Photo(sizes)
        } else if let Some(id) = self.video {
            PostContent::Video(id)
        } else if let Some(id) = self.document {
            PostContent::Document(id)
        } else if let Some(id) = self.audio {
            PostContent::Audio(id)
        } else if let Some(id) = self.voice {
            PostContent::Voice(id)
        } else if let Some(id) = self.video_note {
            PostContent::VideoNote(id)
        } else if let Some(id) = self.sticker {
            PostContent::Sticker(id)
        } else if let Some(id) = self.animation {
            PostContent::Animation(id)
        } else if let Some((latitude, longitude)) = self.location {
            PostContent::Location {
                latitude,
                longitude,
            }
        } else if let Some(venue) = self.venue {
            PostContent::Venue(venue)
        } else if let Some(contact) = self.contact {
            PostContent::Contact(contact)
        } else if let Some(question) = self.poll_question {
            PostContent::Poll { question }
        } else if let Some(text) = self.text {
            PostContent::Text(text)
        } else {
            PostContent::Unrecognized
        };

        InboundPost { content, caption }
    }
}
