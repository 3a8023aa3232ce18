use std::sync::OnceLock;

use regex::Regex;

pub const ELLIPSIS: &str = "...";

/// Number of leading characters that identify a message for deduplication.
pub const DEDUP_PREFIX_LEN: usize = 100;

pub(crate) const BOT_MENTION_PATTERN_STR: &str = r"(?i)@\w+bot\b";

static BOT_MENTION_PATTERN: OnceLock<Regex> = OnceLock::new();
static NEWLINES_PATTERN: OnceLock<Regex> = OnceLock::new();
static SPACES_PATTERN: OnceLock<Regex> = OnceLock::new();

pub(crate) fn get_bot_mention_pattern() -> &'static Regex {
    BOT_MENTION_PATTERN.get_or_init(|| Regex::new(BOT_MENTION_PATTERN_STR).unwrap())
}

fn get_newlines_pattern() -> &'static Regex {
    NEWLINES_PATTERN.get_or_init(|| Regex::new(r"\n{3,}").unwrap())
}

fn get_spaces_pattern() -> &'static Regex {
    SPACES_PATTERN.get_or_init(|| Regex::new(r" {2,}").unwrap())
}

/// Clean message text for the summarizer prompt.
///
/// Removes `@somethingbot` mentions, squeezes blank lines and repeated
/// spaces, and bounds the result to `max_len` characters (ellipsis
/// included). An empty result means the message should be dropped.
pub fn clean_text(text: &str, max_len: usize) -> String {
    let text = get_bot_mention_pattern().replace_all(text, "");
    let text = get_newlines_pattern().replace_all(&text, "\n\n");
    let text = get_spaces_pattern().replace_all(&text, " ");

    let text = if text.chars().count() > max_len {
        let keep = max_len.saturating_sub(ELLIPSIS.len());
        let mut truncated: String = text.chars().take(keep).collect();
        truncated.push_str(ELLIPSIS);
        truncated
    } else {
        text.into_owned()
    };

    text.trim().to_string()
}

/// Key used to spot near-identical posts within a channel: the first
/// [`DEDUP_PREFIX_LEN`] characters, whitespace-collapsed and lowercased.
pub fn dedup_key(text: &str) -> String {
    let prefix: String = text.chars().take(DEDUP_PREFIX_LEN).collect();
    prefix
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
