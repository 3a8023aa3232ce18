mod budget;
mod channel;
mod config;
mod error;
pub mod source;

pub use budget::{Admitted, Budget};
pub use config::{Config, SourceKind};
pub use error::*;
use tgdigest_common::DigestConfig;
use tgdigest_common::digest::CollectionResult;

use crate::source::MessageSource;

#[cfg(test)]
mod tests;

/// Drives a message source across all configured channels, one channel at a
/// time, and bounds the total amount of collected text.
pub struct Collector<S: MessageSource> {
    source: S,
    config: DigestConfig,
}

impl<S: MessageSource> Collector<S> {
    pub fn new(source: S, config: DigestConfig) -> Self {
        Self { source, config }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    pub fn config(&self) -> &DigestConfig {
        &self.config
    }

    /// Collect every configured channel. Per-channel failures are logged and
    /// skipped; they never abort the run.
    pub async fn collect(&self, now: chrono::DateTime<chrono::Utc>) -> CollectionResult {
        let cutoff = now - self.config.lookback();
        let handles = self.config.channel_handles();
        let mut budget = Budget::new(self.config.char_budget());
        let mut result = CollectionResult::new();

        tracing::info!(
            channels = handles.len(),
            %cutoff,
            ceiling = budget.ceiling(),
            "starting collection"
        );

        for (i, handle) in handles.iter().enumerate() {
            if budget.is_exhausted() {
                tracing::warn!(
                    consumed = budget.consumed(),
                    skipped = handles.len() - i,
                    "total token limit reached, stopping collection"
                );
                break;
            }

            if i > 0 {
                tokio::time::sleep(self.config.request_delay()).await;
            }

            let channel = match self.source.resolve(handle).await {
                Ok(channel) => channel,
                Err(error) => {
                    tracing::warn!(%error, channel = %handle, "cannot resolve channel, skipping");
                    continue;
                }
            };

            tracing::info!(channel = %channel.title, "collecting from channel");

            let messages = self.collect_channel(&channel, cutoff).await;

            let Admitted {
                budget: next,
                accepted,
                dropped,
            } = budget.admit(messages);
            budget = next;

            if dropped > 0 {
                tracing::warn!(
                    channel = %channel.title,
                    dropped,
                    consumed = budget.consumed(),
                    "token limit reached at channel"
                );
            }

            if !accepted.is_empty() {
                tracing::info!(
                    channel = %channel.title,
                    count = accepted.len(),
                    "messages retained"
                );
            }

            result.push(channel.title, accepted);
        }

        result
    }
}
