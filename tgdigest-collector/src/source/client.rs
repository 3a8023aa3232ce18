use std::sync::Arc;

use grammers_client::types::{Media, Message, Peer};
use grammers_mtsender::InvocationError;
use grammers_tl_types as tl;
use tgdigest_common::message::{MessageContent, NoiseFlags, Poll, RawMessage};

use crate::source::{Channel, Cursor, MessageSource, Page, SourceOrdering, channel_title};
use crate::{Config, SourceError, SourceResult};

/// Reads channel history through an already authorized user session.
pub struct ClientSource {
    client: grammers_client::Client,
    // need to store to keep session alive
    handle: grammers_mtsender::SenderPoolHandle,
    batch_size: usize,
}

impl ClientSource {
    pub async fn connect(config: &Config) -> SourceResult<Self> {
        let (Some(api_id), Some(session_file)) = (config.api_id, config.session_file.as_ref())
        else {
            return Err(SourceError::Setup(
                "source.api_id and source.session_file are required".to_string(),
            ));
        };

        let session = Arc::new(
            grammers_session::storages::SqliteSession::open(session_file)
                .map_err(|e| SourceError::Setup(format!("cannot open session: {e}")))?,
        );
        let sender_pool = grammers_mtsender::SenderPool::new(Arc::clone(&session), api_id);
        let client = grammers_client::client::Client::new(&sender_pool);

        let grammers_mtsender::SenderPool {
            runner,
            updates: _updates,
            handle,
        } = sender_pool;

        tokio::spawn(runner.run());

        if !client.is_authorized().await.map_err(SourceError::from)? {
            handle.quit();
            return Err(SourceError::Setup(format!(
                "session {} is not authorized",
                session_file.display()
            )));
        }

        Ok(Self {
            client,
            handle,
            batch_size: config.batch_size.max(1),
        })
    }

    pub fn disconnect(self) {
        self.handle.quit();
    }
}

impl MessageSource for ClientSource {
    type Peer = Peer;

    fn ordering(&self) -> SourceOrdering {
        SourceOrdering::NewestFirst
    }

    async fn resolve(&self, handle: &str) -> SourceResult<Channel<Peer>> {
        let peer = self
            .client
            .resolve_username(handle)
            .await?
            .ok_or_else(|| SourceError::Unavailable(format!("channel @{handle} not found")))?;

        let title = channel_title(peer.name(), peer.username(), handle);

        Ok(Channel {
            handle: handle.to_string(),
            title,
            peer,
        })
    }

    async fn fetch(&self, channel: &Channel<Peer>, cursor: Cursor) -> SourceResult<Page> {
        let mut iter = self
            .client
            .iter_messages(&channel.peer)
            .limit(self.batch_size);

        if let Cursor::Before(id) = cursor {
            iter = iter.offset_id(id as i32);
        }

        let mut messages = Vec::with_capacity(self.batch_size);
        while let Some(message) = iter.next().await? {
            messages.push(convert_message(&message));
        }

        Ok(Page::from_messages(messages))
    }
}

impl From<InvocationError> for SourceError {
    fn from(err: InvocationError) -> Self {
        match &err {
            InvocationError::Rpc(rpc) if rpc.name.starts_with("FLOOD") => {
                SourceError::Transient(err.to_string())
            }
            InvocationError::Rpc(_) => SourceError::Unavailable(err.to_string()),
            _ => SourceError::Transient(err.to_string()),
        }
    }
}

fn convert_message(message: &Message) -> RawMessage {
    let mut noise = NoiseFlags {
        service: message.action().is_some(),
        ..Default::default()
    };

    let mut content = MessageContent::Text(message.text().to_string());

    match message.media() {
        Some(Media::Sticker(_)) => noise.sticker = true,
        Some(Media::Contact(_)) => noise.contact = true,
        Some(Media::Geo(_) | Media::GeoLive(_) | Media::Venue(_)) => noise.location = true,
        Some(Media::Dice(_)) => noise.dice = true,
        Some(Media::Poll(poll)) => content = MessageContent::Poll(convert_poll(&poll.raw)),
        Some(Media::Document(document)) => {
            let raw = &document.raw;
            noise.voice = raw.voice;
            noise.video_note = raw.round;
            noise.animation = match &raw.document {
                Some(tl::enums::Document::Document(doc)) => doc
                    .attributes
                    .iter()
                    .any(|a| matches!(a, tl::enums::DocumentAttribute::Animated)),
                _ => false,
            };
        }
        _ => {}
    }

    RawMessage {
        id: i64::from(message.id()),
        date: message.date(),
        content,
        noise,
    }
}

fn text_with_entities(text: &tl::enums::TextWithEntities) -> String {
    let tl::enums::TextWithEntities::Entities(text) = text;
    text.text.clone()
}

fn convert_poll(poll: &tl::types::Poll) -> Poll {
    Poll {
        question: text_with_entities(&poll.question),
        options: poll
            .answers
            .iter()
            .map(|tl::enums::PollAnswer::Answer(answer)| text_with_entities(&answer.text))
            .collect(),
    }
}
