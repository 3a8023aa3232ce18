#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("telegram request failed: {0}")]
    Request(#[from] teloxide::RequestError),
    #[error("telegram request timed out after {0}s")]
    Timeout(u64),
}

pub type DeliveryResult<T> = Result<T, DeliveryError>;
