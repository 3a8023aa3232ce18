#[cfg(feature = "client")]
pub mod client;
pub mod scrape;

use tgdigest_common::message::RawMessage;

use crate::SourceResult;

/// Position in a channel's history. Sources hand back the cursor for the
/// next, older page; the collector threads it through successive fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Latest,
    Before(i64),
}

#[derive(Debug, Default)]
pub struct Page {
    pub messages: Vec<RawMessage>,
    /// `None` when there is nothing older to request.
    pub next: Option<Cursor>,
}

impl Page {
    /// Page whose next cursor points just below the oldest message seen.
    pub fn from_messages(messages: Vec<RawMessage>) -> Self {
        let next = messages.iter().map(|m| m.id).min().map(Cursor::Before);
        Self { messages, next }
    }
}

/// What the source guarantees about message order within and across pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceOrdering {
    /// Pages may overlap or interleave; the collector deduplicates by id,
    /// bounds the page count and sorts afterwards.
    Paged,
    /// Strictly newest-first; iteration can stop at the first message older
    /// than the cutoff.
    NewestFirst,
}

/// A resolved channel. `peer` is whatever the source needs to fetch it.
#[derive(Debug, Clone)]
pub struct Channel<P> {
    pub handle: String,
    pub title: String,
    pub peer: P,
}

/// Display name of a channel: its title, else its username, else the
/// configured handle.
#[cfg_attr(not(feature = "client"), allow(dead_code))]
pub(crate) fn channel_title(title: Option<&str>, username: Option<&str>, handle: &str) -> String {
    [title, username]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|name| !name.is_empty())
        .unwrap_or(handle)
        .to_string()
}

pub trait MessageSource {
    type Peer;

    fn ordering(&self) -> SourceOrdering;

    fn resolve(&self, handle: &str) -> impl Future<Output = SourceResult<Channel<Self::Peer>>>;

    fn fetch(
        &self,
        channel: &Channel<Self::Peer>,
        cursor: Cursor,
    ) -> impl Future<Output = SourceResult<Page>>;
}
