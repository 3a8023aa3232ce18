use config::FileFormat;
use tgdigest_collector::SourceKind;
use tgdigest_common::Language;

use crate::config::Config;
use crate::error::DigestError;
use crate::service::RunMode;

fn parse(toml: &str) -> Config {
    let builder = config::Config::builder().add_source(config::File::from_str(toml, FileFormat::Toml));
    Config::build(builder).unwrap()
}

const FULL: &str = r#"
[digest]
channels = ["@markets", " news ", "markets", ""]
language = "RU"
lookback_hours = 12

[ai]
provider = "claude"
api_key = "secret"

[bot]
token = "123:abc"
chat_id = -1001234
topic_id = 7
"#;

#[test]
fn test_parse_full_settings() {
    let config = parse(FULL);

    assert_eq!(config.digest.channel_handles(), vec!["markets", "news"]);
    assert_eq!(config.digest.language, Language::Russian);
    assert_eq!(config.digest.lookback_hours, 12);
    assert_eq!(config.digest.max_total_tokens, 80_000);
    assert_eq!(config.source.kind, SourceKind::Scrape);
    assert_eq!(config.source.base_url, "https://t.me");

    let bot = config.bot.as_ref().unwrap();
    assert_eq!(bot.chat_id, -1001234);
    assert_eq!(bot.topic_id, Some(7));
    assert_eq!(bot.timeout_secs, 30);

    assert!(config.validate(RunMode::Full).is_ok());
}

#[test]
fn test_validate_requires_channels() {
    let config = parse("[digest]\nchannels = [\"@\", \"  \"]\n");

    match config.validate(RunMode::Preview) {
        Err(DigestError::ConfigMissing(what)) => assert_eq!(what, "digest.channels"),
        other => panic!("Expected ConfigMissing, got {other:?}"),
    }
}

#[test]
fn test_preview_needs_only_channels() {
    let config = parse("[digest]\nchannels = [\"markets\"]\n");

    assert!(config.validate(RunMode::Preview).is_ok());
    assert!(matches!(
        config.validate(RunMode::DryRun),
        Err(DigestError::ConfigMissing(_))
    ));
}

#[test]
fn test_dry_run_does_not_need_bot() {
    let config = parse(
        r#"
[digest]
channels = ["markets"]

[ai]
api_key = "secret"
"#,
    );

    assert!(config.validate(RunMode::DryRun).is_ok());
    assert!(matches!(
        config.validate(RunMode::Full),
        Err(DigestError::ConfigMissing(_))
    ));
}

#[test]
fn test_blank_api_key_is_missing() {
    let config = parse(
        r#"
[digest]
channels = ["markets"]

[ai]
api_key = "  "
"#,
    );

    assert!(matches!(
        config.validate(RunMode::DryRun),
        Err(DigestError::ConfigMissing(_))
    ));
}

#[test]
fn test_client_source_requires_session() {
    let config = parse(
        r#"
[digest]
channels = ["markets"]

[source]
kind = "client"
api_id = 12345
"#,
    );

    match config.validate(RunMode::Preview) {
        Err(DigestError::ConfigMissing(what)) => assert_eq!(what, "source.session_file"),
        other => panic!("Expected ConfigMissing, got {other:?}"),
    }
}
