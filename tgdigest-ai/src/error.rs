#[derive(Debug, thiserror::Error)]
pub enum TgdigestAiError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Empty response from model")]
    EmptyResponse,
}

pub type TgdigestAiResult<T> = Result<T, TgdigestAiError>;
