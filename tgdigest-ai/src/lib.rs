pub mod claude;
mod config;
mod error;
pub mod gemini;
pub mod prompt;

pub use config::{Config, Provider};
pub use error::*;

use crate::claude::ClaudeClient;
use crate::gemini::GeminiClient;

pub trait Summarizer {
    fn summarize(&self, prompt: &str) -> impl Future<Output = TgdigestAiResult<String>>;
}

/// Summarizer selected by configuration.
pub enum AiClient {
    Gemini(GeminiClient),
    Claude(ClaudeClient),
}

impl AiClient {
    pub fn new(config: &Config) -> TgdigestAiResult<Self> {
        Ok(match config.provider {
            Provider::Gemini => AiClient::Gemini(GeminiClient::new(config)?),
            Provider::Claude => AiClient::Claude(ClaudeClient::new(config)?),
        })
    }
}

impl Summarizer for AiClient {
    async fn summarize(&self, prompt: &str) -> TgdigestAiResult<String> {
        match self {
            AiClient::Gemini(client) => client.summarize(prompt).await,
            AiClient::Claude(client) => client.summarize(prompt).await,
        }
    }
}
