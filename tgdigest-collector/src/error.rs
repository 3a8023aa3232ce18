#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The channel exists but its history cannot be read, or it cannot be
    /// resolved at all. Distinct from a channel with nothing in range.
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    /// Network failure or rate limit; worth one retry.
    #[error("Transient fetch error: {0}")]
    Transient(String),

    #[error("Source setup error: {0}")]
    Setup(String),
}

impl SourceError {
    pub fn is_transient(&self) -> bool {
        matches!(self, SourceError::Transient(_))
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            SourceError::Setup(err.to_string())
        } else {
            SourceError::Transient(err.to_string())
        }
    }
}

pub type SourceResult<T> = Result<T, SourceError>;
