/// Cleaned messages retained for one channel, in the order they will be
/// presented to the summarizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelDigest {
    pub channel: String,
    pub messages: Vec<String>,
}

/// Per-channel digests in channel processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionResult {
    channels: Vec<ChannelDigest>,
}

impl CollectionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Channels without messages are not recorded.
    pub fn push(&mut self, channel: String, messages: Vec<String>) {
        if messages.is_empty() {
            return;
        }
        self.channels.push(ChannelDigest { channel, messages });
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn message_count(&self) -> usize {
        self.channels.iter().map(|c| c.messages.len()).sum()
    }

    pub fn char_count(&self) -> usize {
        self.channels
            .iter()
            .flat_map(|c| &c.messages)
            .map(|m| m.chars().count())
            .sum()
    }

    pub fn get(&self, channel: &str) -> Option<&ChannelDigest> {
        self.channels.iter().find(|c| c.channel == channel)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChannelDigest> {
        self.channels.iter()
    }
}

/// Render collected messages as the body of the summarizer prompt:
/// a `## channel` heading per channel followed by one bullet per message.
pub fn format_for_llm(result: &CollectionResult) -> String {
    result
        .iter()
        .map(|ChannelDigest { channel, messages }| {
            let mut section = format!("## {channel}\n");
            for message in messages {
                section.push_str(&format!("- {message}\n"));
            }
            section
        })
        .collect::<Vec<_>>()
        .join("\n")
}
