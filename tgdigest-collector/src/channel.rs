use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tgdigest_common::filter::{extract_text, is_noise};
use tgdigest_common::message::RawMessage;
use tgdigest_common::normalize::{clean_text, dedup_key};

use crate::source::{Channel, Cursor, MessageSource, Page, SourceOrdering};
use crate::{Collector, SourceError, SourceResult};

impl<S: MessageSource> Collector<S> {
    /// Cleaned, deduplicated messages of one channel, at most
    /// `max_messages_per_channel` of them, none older than `cutoff`.
    pub(crate) async fn collect_channel(
        &self,
        channel: &Channel<S::Peer>,
        cutoff: DateTime<Utc>,
    ) -> Vec<String> {
        let units = match self.source.ordering() {
            SourceOrdering::Paged => self.gather_paged(channel, cutoff).await,
            SourceOrdering::NewestFirst => self.gather_newest_first(channel, cutoff).await,
        };

        self.refine(&channel.title, units)
    }

    async fn fetch_with_retry(
        &self,
        channel: &Channel<S::Peer>,
        cursor: Cursor,
    ) -> SourceResult<Page> {
        match self.source.fetch(channel, cursor).await {
            Err(error) if error.is_transient() => {
                let delay = self.config.retry_delay();
                tracing::warn!(
                    %error,
                    channel = %channel.title,
                    ?cursor,
                    delay_secs = delay.as_secs_f64(),
                    "fetch failed, retrying once"
                );

                tokio::time::sleep(delay).await;
                self.source.fetch(channel, cursor).await
            }
            result => result,
        }
    }

    async fn gather_paged(
        &self,
        channel: &Channel<S::Peer>,
        cutoff: DateTime<Utc>,
    ) -> Vec<RawMessage> {
        let cap = self.config.max_messages_per_channel;
        let mut units: Vec<RawMessage> = Vec::new();
        let mut seen_ids: HashSet<i64> = HashSet::new();
        let mut cursor = Cursor::Latest;

        for page_no in 0..self.config.max_pages_per_channel {
            if page_no > 0 {
                tokio::time::sleep(self.config.request_delay()).await;
            }

            let page = match self.fetch_with_retry(channel, cursor).await {
                Ok(page) => page,
                Err(SourceError::Unavailable(reason)) if page_no == 0 => {
                    tracing::warn!(
                        channel = %channel.title,
                        %reason,
                        "channel history unavailable, skipping"
                    );
                    break;
                }
                Err(error) => {
                    tracing::warn!(
                        %error,
                        channel = %channel.title,
                        page = page_no,
                        collected = units.len(),
                        "stopping pagination"
                    );
                    break;
                }
            };

            let mut new_count = 0;
            for message in page.messages {
                if message.date < cutoff {
                    continue;
                }
                if seen_ids.insert(message.id) {
                    units.push(message);
                    new_count += 1;
                }
            }

            if new_count == 0 {
                if page_no == 0 {
                    tracing::info!(channel = %channel.title, "no messages in range");
                }
                break;
            }

            if units.len() >= cap {
                break;
            }

            match page.next {
                Some(next) if next != cursor => cursor = next,
                _ => break,
            }
        }

        // pages may interleave, restore newest-first before capping
        units.sort_by(|a, b| b.date.cmp(&a.date));
        units.truncate(cap);
        units
    }

    async fn gather_newest_first(
        &self,
        channel: &Channel<S::Peer>,
        cutoff: DateTime<Utc>,
    ) -> Vec<RawMessage> {
        let cap = self.config.max_messages_per_channel;
        let mut units: Vec<RawMessage> = Vec::new();
        let mut cursor = Cursor::Latest;

        if cap == 0 {
            return units;
        }

        'pages: loop {
            if cursor != Cursor::Latest {
                tokio::time::sleep(self.config.request_delay()).await;
            }

            let page = match self.fetch_with_retry(channel, cursor).await {
                Ok(page) => page,
                Err(error) => {
                    tracing::warn!(
                        %error,
                        channel = %channel.title,
                        collected = units.len(),
                        "stopping iteration"
                    );
                    break;
                }
            };

            if page.messages.is_empty() {
                break;
            }

            for message in page.messages {
                if message.date < cutoff {
                    break 'pages;
                }

                units.push(message);
                if units.len() >= cap {
                    break 'pages;
                }
            }

            match page.next {
                Some(next) if next != cursor => cursor = next,
                _ => break,
            }
        }

        units
    }

    fn refine(&self, channel: &str, units: Vec<RawMessage>) -> Vec<String> {
        let mut seen_keys: HashSet<String> = HashSet::new();
        let mut messages = Vec::new();

        for unit in units {
            if is_noise(&unit.noise) {
                tracing::trace!(channel, id = unit.id, "skipping noise");
                continue;
            }

            let Some(text) = extract_text(&unit.content) else {
                continue;
            };

            if text.chars().count() < self.config.min_message_length {
                continue;
            }

            if !seen_keys.insert(dedup_key(&text)) {
                tracing::trace!(channel, id = unit.id, "skipping duplicate");
                continue;
            }

            let cleaned = clean_text(&text, self.config.max_message_length);
            if !cleaned.is_empty() {
                messages.push(cleaned);
            }
        }

        tracing::debug!(channel, count = messages.len(), "channel refined");

        messages
    }
}
