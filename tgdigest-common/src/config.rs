use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct DigestConfig {
    #[serde(default)]
    pub channels: Vec<String>,

    #[serde(default = "default_lookback_hours")]
    pub lookback_hours: u32,
    #[serde(default = "default_max_messages_per_channel")]
    pub max_messages_per_channel: usize,
    #[serde(default = "default_max_total_tokens")]
    pub max_total_tokens: usize,
    #[serde(default = "default_chars_per_token")]
    pub chars_per_token: usize,

    #[serde(default = "default_max_message_length")]
    pub max_message_length: usize,
    #[serde(default = "default_min_message_length")]
    pub min_message_length: usize,

    /// Pause between channel fetches and between page fetches.
    #[serde(default = "default_request_delay_secs")]
    pub request_delay_secs: f64,
    /// Backoff before the single retry of a transient fetch failure.
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: f64,
    #[serde(default = "default_max_pages_per_channel")]
    pub max_pages_per_channel: usize,

    #[serde(default)]
    pub language: Language,
    #[serde(default = "default_title")]
    pub title: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(from = "String")]
pub enum Language {
    #[default]
    English,
    Russian,
}

impl From<String> for Language {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "ru" => Language::Russian,
            _ => Language::English,
        }
    }
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            channels: Vec::new(),
            lookback_hours: default_lookback_hours(),
            max_messages_per_channel: default_max_messages_per_channel(),
            max_total_tokens: default_max_total_tokens(),
            chars_per_token: default_chars_per_token(),
            max_message_length: default_max_message_length(),
            min_message_length: default_min_message_length(),
            request_delay_secs: default_request_delay_secs(),
            retry_delay_secs: default_retry_delay_secs(),
            max_pages_per_channel: default_max_pages_per_channel(),
            language: Language::default(),
            title: default_title(),
        }
    }
}

impl DigestConfig {
    /// Global size ceiling in characters.
    pub fn char_budget(&self) -> usize {
        self.max_total_tokens.saturating_mul(self.chars_per_token)
    }

    pub fn lookback(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.lookback_hours))
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_secs_f64(self.request_delay_secs.max(0.0))
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs_f64(self.retry_delay_secs.max(0.0))
    }

    /// Configured channels with `@` and whitespace stripped, empty and
    /// repeated entries dropped, in configured order.
    pub fn channel_handles(&self) -> Vec<String> {
        let mut handles: Vec<String> = Vec::with_capacity(self.channels.len());

        for raw in &self.channels {
            let handle = raw.trim().trim_start_matches('@').trim();
            if handle.is_empty() || handles.iter().any(|h| h == handle) {
                continue;
            }
            handles.push(handle.to_string());
        }

        handles
    }
}

fn default_lookback_hours() -> u32 {
    24
}

fn default_max_messages_per_channel() -> usize {
    200
}

fn default_max_total_tokens() -> usize {
    80_000
}

fn default_chars_per_token() -> usize {
    4
}

fn default_max_message_length() -> usize {
    500
}

fn default_min_message_length() -> usize {
    20
}

fn default_request_delay_secs() -> f64 {
    2.0
}

fn default_retry_delay_secs() -> f64 {
    30.0
}

fn default_max_pages_per_channel() -> usize {
    5
}

fn default_title() -> String {
    "Channel Digest".to_string()
}
