use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};
use tgdigest_common::DigestConfig;
use tgdigest_common::message::RawMessage;

use crate::source::{Channel, Cursor, MessageSource, Page, SourceOrdering};
use crate::{SourceError, SourceResult};

pub(crate) enum Reply {
    Page(Vec<RawMessage>),
    Unavailable,
    Transient,
}

/// Scripted source: each channel answers fetches from a queue of replies,
/// then with empty pages once the queue is drained.
pub(crate) struct FakeSource {
    ordering: SourceOrdering,
    channels: HashMap<String, Mutex<VecDeque<Reply>>>,
    resolved: Mutex<Vec<String>>,
    fetches: Mutex<Vec<(String, Cursor)>>,
}

impl FakeSource {
    pub fn new(ordering: SourceOrdering) -> Self {
        Self {
            ordering,
            channels: HashMap::new(),
            resolved: Mutex::new(Vec::new()),
            fetches: Mutex::new(Vec::new()),
        }
    }

    pub fn channel(mut self, handle: &str, replies: Vec<Reply>) -> Self {
        self.channels
            .insert(handle.to_string(), Mutex::new(replies.into()));
        self
    }

    pub fn resolved(&self) -> Vec<String> {
        self.resolved.lock().unwrap().clone()
    }

    pub fn fetch_count(&self, handle: &str) -> usize {
        self.fetches
            .lock()
            .unwrap()
            .iter()
            .filter(|(h, _)| h == handle)
            .count()
    }

    pub fn cursors(&self, handle: &str) -> Vec<Cursor> {
        self.fetches
            .lock()
            .unwrap()
            .iter()
            .filter(|(h, _)| h == handle)
            .map(|(_, c)| *c)
            .collect()
    }
}

impl MessageSource for FakeSource {
    type Peer = ();

    fn ordering(&self) -> SourceOrdering {
        self.ordering
    }

    async fn resolve(&self, handle: &str) -> SourceResult<Channel<()>> {
        self.resolved.lock().unwrap().push(handle.to_string());

        if !self.channels.contains_key(handle) {
            return Err(SourceError::Unavailable(format!("{handle} not found")));
        }

        Ok(Channel {
            handle: handle.to_string(),
            title: handle.to_string(),
            peer: (),
        })
    }

    async fn fetch(&self, channel: &Channel<()>, cursor: Cursor) -> SourceResult<Page> {
        self.fetches
            .lock()
            .unwrap()
            .push((channel.handle.clone(), cursor));

        let reply = self.channels[&channel.handle].lock().unwrap().pop_front();

        match reply {
            Some(Reply::Page(messages)) => Ok(Page::from_messages(messages)),
            Some(Reply::Unavailable) => Err(SourceError::Unavailable("disabled".to_string())),
            Some(Reply::Transient) => Err(SourceError::Transient("HTTP 429".to_string())),
            None => Ok(Page::default()),
        }
    }
}

pub(crate) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
}

/// Message `minutes_ago` minutes before [`now`].
pub(crate) fn msg(id: i64, minutes_ago: i64, text: &str) -> RawMessage {
    RawMessage::text(id, now() - chrono::Duration::minutes(minutes_ago), text)
}

/// Text of exactly `len` characters starting with a unique `tag`.
pub(crate) fn sized(tag: &str, len: usize) -> String {
    let mut text = format!("{tag} ");
    while text.chars().count() < len {
        text.push('x');
    }
    text
}

pub(crate) fn config(channels: &[&str]) -> DigestConfig {
    DigestConfig {
        channels: channels.iter().map(|c| c.to_string()).collect(),
        ..Default::default()
    }
}
