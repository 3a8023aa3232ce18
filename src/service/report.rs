use std::io::Write;

use tgdigest_common::digest::CollectionResult;

use crate::service::RunStats;

const PREVIEW_MESSAGES: usize = 10;
const PREVIEW_WIDTH: usize = 120;

fn shorten(text: &str) -> String {
    let line = text.replace('\n', " ");
    if line.chars().count() <= PREVIEW_WIDTH {
        return line;
    }
    let cut: String = line.chars().take(PREVIEW_WIDTH - 3).collect();
    format!("{cut}...")
}

pub(crate) fn print_preview(out: &mut impl Write, result: &CollectionResult) -> std::io::Result<()> {
    for digest in result.iter() {
        writeln!(out, "=== {} ({} messages) ===", digest.channel, digest.messages.len())?;

        for message in digest.messages.iter().take(PREVIEW_MESSAGES) {
            writeln!(out, "  - {}", shorten(message))?;
        }

        if digest.messages.len() > PREVIEW_MESSAGES {
            writeln!(out, "  ... and {} more", digest.messages.len() - PREVIEW_MESSAGES)?;
        }
        writeln!(out)?;
    }

    writeln!(
        out,
        "Total: {} channels, {} messages, {} chars",
        result.channel_count(),
        result.message_count(),
        result.char_count()
    )
}

pub(crate) fn print_summary(
    out: &mut impl Write,
    header: &str,
    summary: &str,
    stats: &RunStats,
) -> std::io::Result<()> {
    writeln!(
        out,
        "{header}{summary}\n\n--- {} channels, {} messages, prompt {} chars, summary {} chars ---",
        stats.channels, stats.messages, stats.prompt_chars, stats.summary_chars
    )
}
