mod models;

use crate::gemini::models::{Content, GenerateContentRequest, GenerateContentResponse, Part};
use crate::{Config, Summarizer, TgdigestAiError, TgdigestAiResult};

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> TgdigestAiResult<Self> {
        Ok(Self {
            client: reqwest::Client::builder().timeout(config.timeout()).build()?,
            api_key: config.api_key.clone(),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }
}

impl Summarizer for GeminiClient {
    async fn summarize(&self, prompt: &str) -> TgdigestAiResult<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        tracing::info!(model = %self.model, chars = prompt.chars().count(), "sending prompt to Gemini");

        let response = self
            .client
            .post(format!("{API_BASE}/{}:generateContent", self.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, %body, "Gemini API error");
            return Err(TgdigestAiError::Api(format!("{status}: {body}")));
        }

        summary_text(response.json::<GenerateContentResponse>().await?)
    }
}

pub(crate) fn parse_response(body: &str) -> TgdigestAiResult<String> {
    let response = serde_json::from_str::<GenerateContentResponse>(body)
        .map_err(|e| TgdigestAiError::Api(format!("malformed response: {e}")))?;
    summary_text(response)
}

fn summary_text(response: GenerateContentResponse) -> TgdigestAiResult<String> {
    if let Some(error) = response.error {
        return Err(TgdigestAiError::Api(error.message));
    }

    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(TgdigestAiError::Api(format!("prompt blocked: {reason}")));
    }

    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(TgdigestAiError::EmptyResponse);
    }

    Ok(text)
}
