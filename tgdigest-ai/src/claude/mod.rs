mod models;

use crate::claude::models::{ClaudeMessage, ClaudeRequest, ClaudeResponse};
use crate::{Config, Summarizer, TgdigestAiError, TgdigestAiResult};

const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";
const API_URL: &str = "https://api.anthropic.com/v1/messages";

pub struct ClaudeClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl ClaudeClient {
    pub fn new(config: &Config) -> TgdigestAiResult<Self> {
        Ok(Self {
            client: reqwest::Client::builder().timeout(config.timeout()).build()?,
            api_key: config.api_key.clone(),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens: config.max_tokens,
        })
    }
}

impl Summarizer for ClaudeClient {
    async fn summarize(&self, prompt: &str) -> TgdigestAiResult<String> {
        let request = ClaudeRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![ClaudeMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        tracing::info!(model = %self.model, chars = prompt.chars().count(), "sending prompt to Claude");

        let response = self
            .client
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        // Check status before parsing
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, %body, "Claude API error");
            return Err(TgdigestAiError::Api(format!("{status}: {body}")));
        }

        summary_text(response.json::<ClaudeResponse>().await?)
    }
}

pub(crate) fn parse_response(body: &str) -> TgdigestAiResult<String> {
    let response = serde_json::from_str::<ClaudeResponse>(body)
        .map_err(|e| TgdigestAiError::Api(format!("malformed response: {e}")))?;
    summary_text(response)
}

fn summary_text(response: ClaudeResponse) -> TgdigestAiResult<String> {
    if let Some(error) = response.error {
        return Err(TgdigestAiError::Api(error.message));
    }

    let text = response
        .content
        .into_iter()
        .filter(|c| c.kind == "text")
        .map(|c| c.text)
        .collect::<Vec<_>>()
        .join("");

    if text.trim().is_empty() {
        return Err(TgdigestAiError::EmptyResponse);
    }

    Ok(text)
}
