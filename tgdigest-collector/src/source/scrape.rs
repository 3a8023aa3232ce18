use std::sync::OnceLock;
use std::time::Duration;

use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html, Selector};
use tgdigest_common::message::{MessageContent, NoiseFlags, Poll, RawMessage};

use crate::source::{Channel, Cursor, MessageSource, Page, SourceOrdering};
use crate::{Config, SourceError, SourceResult};

/// Reads the public web preview of a channel, one page of roughly twenty
/// posts per request, walking backwards with `?before=<id>`.
pub struct ScrapeSource {
    client: reqwest::Client,
    base_url: String,
}

impl ScrapeSource {
    pub fn new(config: &Config) -> SourceResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn page_url(&self, handle: &str, cursor: Cursor) -> String {
        match cursor {
            Cursor::Latest => format!("{}/s/{handle}", self.base_url),
            Cursor::Before(id) => format!("{}/s/{handle}?before={id}", self.base_url),
        }
    }
}

impl MessageSource for ScrapeSource {
    type Peer = ();

    fn ordering(&self) -> SourceOrdering {
        SourceOrdering::Paged
    }

    async fn resolve(&self, handle: &str) -> SourceResult<Channel<()>> {
        Ok(Channel {
            handle: handle.to_string(),
            title: handle.to_string(),
            peer: (),
        })
    }

    async fn fetch(&self, channel: &Channel<()>, cursor: Cursor) -> SourceResult<Page> {
        let url = self.page_url(&channel.handle, cursor);
        tracing::debug!(%url, "fetching channel page");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            return Err(SourceError::Transient(format!("HTTP {status} for {url}")));
        }

        if !status.is_success() {
            return Err(SourceError::Unavailable(format!("HTTP {status} for {url}")));
        }

        let html = response.text().await?;
        parse_page(&html)
    }
}

struct Selectors {
    history_unavailable: Selector,
    widget: Selector,
    time: Selector,
    text: Selector,
    poll_question: Selector,
    poll_option: Selector,
    sticker: Selector,
    voice: Selector,
    video_note: Selector,
    animation: Selector,
    location: Selector,
    contact: Selector,
}

static SELECTORS: OnceLock<Selectors> = OnceLock::new();

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

fn get_selectors() -> &'static Selectors {
    SELECTORS.get_or_init(|| Selectors {
        history_unavailable: selector(".tgme_channel_history_unavailable"),
        widget: selector(".tgme_widget_message"),
        time: selector("time[datetime]"),
        text: selector(".tgme_widget_message_text"),
        poll_question: selector(".tgme_widget_message_poll_question"),
        poll_option: selector(".tgme_widget_message_poll_option_text"),
        sticker: selector(".tgme_widget_message_sticker_wrap"),
        voice: selector(".tgme_widget_message_voice_player"),
        video_note: selector(".tgme_widget_message_roundvideo_player"),
        animation: selector(".tgme_widget_message_gif"),
        location: selector(".tgme_widget_message_location_wrap"),
        contact: selector(".tgme_widget_message_contact_wrap"),
    })
}

/// Parse one preview page. Widgets without a usable id or timestamp are
/// skipped; the next cursor points below the oldest id on the page.
pub(crate) fn parse_page(html: &str) -> SourceResult<Page> {
    let document = Html::parse_document(html);
    let selectors = get_selectors();

    if document.select(&selectors.history_unavailable).next().is_some() {
        return Err(SourceError::Unavailable(
            "channel history preview is disabled".to_string(),
        ));
    }

    let mut messages = Vec::new();
    let mut oldest_id: Option<i64> = None;

    for widget in document.select(&selectors.widget) {
        let Some(id) = parse_post_id(widget) else {
            continue;
        };

        oldest_id = Some(oldest_id.map_or(id, |oldest| oldest.min(id)));

        let Some(date) = parse_date(widget, selectors) else {
            tracing::trace!(id, "skipping post without a valid timestamp");
            continue;
        };

        messages.push(RawMessage {
            id,
            date,
            content: parse_content(widget, selectors),
            noise: parse_noise(widget, selectors),
        });
    }

    Ok(Page {
        messages,
        next: oldest_id.map(Cursor::Before),
    })
}

// data-post="channel/123"
fn parse_post_id(widget: ElementRef) -> Option<i64> {
    let data_post = widget.value().attr("data-post")?;
    let (_, id) = data_post.rsplit_once('/')?;
    id.parse().ok()
}

fn parse_date(widget: ElementRef, selectors: &Selectors) -> Option<DateTime<Utc>> {
    let time = widget.select(&selectors.time).next()?;
    let datetime = time.value().attr("datetime")?;

    DateTime::parse_from_rfc3339(datetime)
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<Vec<_>>().join("\n")
}

fn parse_content(widget: ElementRef, selectors: &Selectors) -> MessageContent {
    if let Some(question) = widget.select(&selectors.poll_question).next() {
        let options = widget
            .select(&selectors.poll_option)
            .map(|option| element_text(option).trim().to_string())
            .collect();

        return MessageContent::Poll(Poll {
            question: element_text(question).trim().to_string(),
            options,
        });
    }

    match widget.select(&selectors.text).next() {
        Some(text) => MessageContent::Text(element_text(text)),
        None => MessageContent::Empty,
    }
}

fn parse_noise(widget: ElementRef, selectors: &Selectors) -> NoiseFlags {
    let has = |selector: &Selector| widget.select(selector).next().is_some();

    NoiseFlags {
        service: widget.value().classes().any(|c| c == "service_message"),
        sticker: has(&selectors.sticker),
        voice: has(&selectors.voice),
        video_note: has(&selectors.video_note),
        animation: has(&selectors.animation),
        contact: has(&selectors.contact),
        location: has(&selectors.location),
        dice: false,
    }
}
