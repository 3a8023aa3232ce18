use chrono::{DateTime, Utc};

/// A single message as produced by a message source, before any filtering.
#[derive(Debug, Clone)]
pub struct RawMessage {
    /// Unique within a channel, assigned by the source in increasing order.
    pub id: i64,
    pub date: DateTime<Utc>,
    pub content: MessageContent,
    pub noise: NoiseFlags,
}

#[derive(Debug, Clone, Default)]
pub enum MessageContent {
    #[default]
    Empty,
    Text(String),
    Poll(Poll),
}

#[derive(Debug, Clone)]
pub struct Poll {
    pub question: String,
    pub options: Vec<String>,
}

/// Media and service markers used by the noise classifier.
///
/// Anything a source cannot detect stays `false`, which means "keep".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoiseFlags {
    pub service: bool,
    pub sticker: bool,
    pub voice: bool,
    pub video_note: bool,
    pub animation: bool,
    pub contact: bool,
    pub location: bool,
    pub dice: bool,
}

impl RawMessage {
    pub fn text(id: i64, date: DateTime<Utc>, text: impl Into<String>) -> Self {
        Self {
            id,
            date,
            content: MessageContent::Text(text.into()),
            noise: NoiseFlags::default(),
        }
    }

    pub fn with_noise(mut self, noise: NoiseFlags) -> Self {
        self.noise = noise;
        self
    }
}
