use tgdigest_ai::TgdigestAiError;
use tgdigest_bot::DeliveryError;
use tgdigest_collector::SourceError;

#[derive(Debug, thiserror::Error)]
pub enum DigestError {
    #[error("missing configuration: {0}")]
    ConfigMissing(String),
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("message source: {0}")]
    Source(#[from] SourceError),
    #[error("summarizer: {0}")]
    Summarizer(#[from] TgdigestAiError),
    #[error("delivery: {0}")]
    Delivery(#[from] DeliveryError),
}

pub type DigestResult<T> = Result<T, DigestError>;
