mod chunk;
mod config;
mod error;

pub use chunk::{digest_header, split_digest};
pub use config::Config;
pub use error::*;
use teloxide::payloads::SendMessageSetters;
use teloxide::requests::Requester;
use teloxide::types::{ChatId, MessageId, ParseMode, ThreadId};


/// Sends one already formatted chunk to the digest destination.
pub trait Delivery {
    fn send(&self, chunk: &str) -> impl Future<Output = DeliveryResult<()>>;
}

pub struct TelegramDelivery {
    bot: teloxide::Bot,
    chat_id: ChatId,
    topic_id: Option<ThreadId>,
    timeout: std::time::Duration,
}

impl TelegramDelivery {
    pub fn new(config: &Config) -> Self {
        Self {
            bot: teloxide::Bot::new(&config.token),
            chat_id: ChatId(config.chat_id),
            topic_id: config.topic_id.map(|id| ThreadId(MessageId(id))),
            timeout: config.timeout(),
        }
    }
}

impl Delivery for TelegramDelivery {
    async fn send(&self, chunk: &str) -> DeliveryResult<()> {
        let mut request = self
            .bot
            .send_message(self.chat_id, chunk)
            .parse_mode(ParseMode::Html);

        if let Some(topic_id) = self.topic_id {
            request = request.message_thread_id(topic_id);
        }

        tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| DeliveryError::Timeout(self.timeout.as_secs()))??;

        Ok(())
    }
}

/// Escape `summary` for HTML parse mode, split it under `header` and send the
/// chunks in order. The first failing chunk aborts the rest.
pub async fn deliver<D: Delivery>(delivery: &D, header: &str, summary: &str) -> DeliveryResult<()> {
    let escaped = teloxide::utils::html::escape(summary);
    let chunks = split_digest(header, &escaped);
    let total = chunks.len();

    for (i, chunk) in chunks.iter().enumerate() {
        if let Err(error) = delivery.send(chunk).await {
            tracing::error!(%error, chunk = i + 1, total, "failed to send digest chunk");
            return Err(error);
        }

        tracing::info!(chunk = i + 1, total, "sent chunk {}/{}", i + 1, total);
    }

    Ok(())
}
