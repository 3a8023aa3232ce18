use tgdigest_common::digest::CollectionResult;

use crate::service::RunStats;
use crate::service::report::{print_preview, print_summary};

fn render_preview(result: &CollectionResult) -> String {
    let mut out = Vec::new();
    print_preview(&mut out, result).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_preview_limits_messages_per_channel() {
    let mut result = CollectionResult::new();
    result.push(
        "busy".to_string(),
        (0..13).map(|i| format!("message number {i}")).collect(),
    );

    let output = render_preview(&result);

    assert!(output.contains("=== busy (13 messages) ==="));
    assert!(output.contains("  - message number 9\n"));
    assert!(!output.contains("message number 10"));
    assert!(output.contains("  ... and 3 more"));
    assert!(output.contains("Total: 1 channels, 13 messages"));
}

#[test]
fn test_preview_shortens_long_messages() {
    let mut result = CollectionResult::new();
    result.push("long".to_string(), vec![format!("{}\nsecond line", "w".repeat(200))]);

    let output = render_preview(&result);
    let line = output
        .lines()
        .find(|l| l.starts_with("  - "))
        .unwrap();

    assert_eq!(line.chars().count(), 4 + 120);
    assert!(line.ends_with("..."));
}

#[test]
fn test_summary_output() {
    let stats = RunStats {
        channels: 2,
        messages: 7,
        prompt_chars: 900,
        summary_chars: 12,
    };
    let mut out = Vec::new();

    print_summary(&mut out, "<b>D</b>\n\n", "short digest", &stats).unwrap();

    let output = String::from_utf8(out).unwrap();
    assert!(output.starts_with("<b>D</b>\n\nshort digest\n"));
    assert!(output.contains("2 channels, 7 messages, prompt 900 chars, summary 12 chars"));
}

struct BrokenPipe;

impl std::io::Write for BrokenPipe {
    fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_write_errors_are_reported() {
    let mut result = CollectionResult::new();
    result.push("busy".to_string(), vec!["message".to_string()]);

    assert!(print_preview(&mut BrokenPipe, &result).is_err());
    assert!(print_summary(&mut BrokenPipe, "", "digest", &RunStats::default()).is_err());
}
