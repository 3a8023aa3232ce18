use std::time::Duration;

fn default_timeout_secs() -> u64 {
    30
}

/// Destination of the digest.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub token: String,
    pub chat_id: i64,
    /// Forum topic inside `chat_id`, if the chat is a forum.
    #[serde(default)]
    pub topic_id: Option<i32>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Config {
    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
