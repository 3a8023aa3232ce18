pub(crate) mod report;

use chrono::{DateTime, Utc};
use tgdigest_ai::prompt::build_prompt;
use tgdigest_ai::{AiClient, Summarizer};
use tgdigest_bot::{Delivery, TelegramDelivery, deliver, digest_header};
use tgdigest_collector::source::MessageSource;
use tgdigest_collector::source::scrape::ScrapeSource;
use tgdigest_collector::{Collector, SourceKind};
use tgdigest_common::digest::format_for_llm;

use crate::config::Config;
use crate::error::{DigestError, DigestResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Collect, summarize and deliver.
    Full,
    /// Collect and summarize, print instead of delivering.
    DryRun,
    /// Collect and print, no summarizer.
    Preview,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub channels: usize,
    pub messages: usize,
    pub prompt_chars: usize,
    pub summary_chars: usize,
}

/// One digest run over a message source, a summarizer and a destination.
/// The summarizer is only needed outside preview, delivery only in full runs.
pub struct DigestService<S: MessageSource, A, D> {
    pub(crate) collector: Collector<S>,
    pub(crate) summarizer: Option<A>,
    pub(crate) delivery: Option<D>,
    pub(crate) mode: RunMode,
}

impl<S, A, D> DigestService<S, A, D>
where
    S: MessageSource,
    A: Summarizer,
    D: Delivery,
{
    pub fn new(
        collector: Collector<S>,
        summarizer: Option<A>,
        delivery: Option<D>,
        mode: RunMode,
    ) -> Self {
        Self {
            collector,
            summarizer,
            delivery,
            mode,
        }
    }

    pub async fn run(&self, now: DateTime<Utc>) -> DigestResult<RunStats> {
        let digest = self.collector.config();
        let result = self.collector.collect(now).await;

        let mut stats = RunStats {
            channels: result.channel_count(),
            messages: result.message_count(),
            ..Default::default()
        };

        tracing::info!(
            channels = stats.channels,
            messages = stats.messages,
            chars = result.char_count(),
            "collection finished"
        );

        if result.is_empty() {
            let notice = empty_notice(digest.lookback_hours);
            tracing::warn!("{notice}");

            if self.mode == RunMode::Full {
                if let Err(error) = self.delivery()?.send(&notice).await {
                    tracing::error!(%error, "failed to send empty digest notice");
                    return Err(error.into());
                }
            }
            return Ok(stats);
        }

        if self.mode == RunMode::Preview {
            if let Err(error) = report::print_preview(&mut std::io::stdout().lock(), &result) {
                tracing::error!(%error, "failed to print preview");
            }
            return Ok(stats);
        }

        let prompt = build_prompt(digest.language, digest.lookback_hours, &format_for_llm(&result));
        stats.prompt_chars = prompt.chars().count();
        tracing::info!(prompt_chars = stats.prompt_chars, "requesting summary");

        let summary = match self.summarizer()?.summarize(&prompt).await {
            Ok(summary) => summary,
            Err(error) => {
                tracing::error!(%error, "summarization failed, nothing will be delivered");
                return Err(error.into());
            }
        };
        stats.summary_chars = summary.chars().count();
        tracing::info!(summary_chars = stats.summary_chars, "summary received");

        let header = digest_header(&digest.title, now.date_naive());

        match self.mode {
            RunMode::Full => deliver(self.delivery()?, &header, &summary).await?,
            _ => {
                let mut out = std::io::stdout().lock();
                if let Err(error) = report::print_summary(&mut out, &header, &summary, &stats) {
                    tracing::error!(%error, "failed to print summary");
                }
            }
        }

        Ok(stats)
    }

    fn summarizer(&self) -> DigestResult<&A> {
        self.summarizer
            .as_ref()
            .ok_or_else(|| DigestError::ConfigMissing("ai".to_string()))
    }

    fn delivery(&self) -> DigestResult<&D> {
        self.delivery
            .as_ref()
            .ok_or_else(|| DigestError::ConfigMissing("bot".to_string()))
    }
}

pub(crate) fn empty_notice(lookback_hours: u32) -> String {
    format!("No new messages from tracked channels in the last {lookback_hours}h.")
}

/// Build the configured source, summarizer and delivery, then run once.
pub async fn run(config: Config, mode: RunMode) -> DigestResult<RunStats> {
    let summarizer = match (&config.ai, mode) {
        (Some(ai), RunMode::Full | RunMode::DryRun) => Some(AiClient::new(ai)?),
        _ => None,
    };
    let delivery = match (&config.bot, mode) {
        (Some(bot), RunMode::Full) => Some(TelegramDelivery::new(bot)),
        _ => None,
    };

    match config.source.kind {
        SourceKind::Scrape => {
            let source = ScrapeSource::new(&config.source)?;
            let collector = Collector::new(source, config.digest);
            DigestService::new(collector, summarizer, delivery, mode)
                .run(Utc::now())
                .await
        }
        #[cfg(feature = "client")]
        SourceKind::Client => {
            let source =
                tgdigest_collector::source::client::ClientSource::connect(&config.source).await?;
            let collector = Collector::new(source, config.digest);
            let service = DigestService::new(collector, summarizer, delivery, mode);
            let result = service.run(Utc::now()).await;

            let DigestService { collector, .. } = service;
            collector.into_source().disconnect();
            result
        }
        #[cfg(not(feature = "client"))]
        SourceKind::Client => Err(DigestError::ConfigMissing(
            "client source support (build with `--features client`)".to_string(),
        )),
    }
}
