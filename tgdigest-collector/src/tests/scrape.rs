use tgdigest_common::message::MessageContent;

use crate::SourceError;
use crate::source::Cursor;
use crate::source::scrape::parse_page;

const PAGE: &str = r#"
<html><body>
<section class="tgme_channel_history js-message_history">
  <div class="tgme_widget_message_wrap">
    <div class="tgme_widget_message js-widget_message" data-post="durov/120">
      <div class="tgme_widget_message_text js-message_text">First line<br/>second <b>bold</b> line</div>
      <a class="tgme_widget_message_date"><time datetime="2025-01-15T10:30:00+00:00" class="time">10:30</time></a>
    </div>
  </div>
  <div class="tgme_widget_message_wrap">
    <div class="tgme_widget_message js-widget_message" data-post="durov/118">
      <div class="tgme_widget_message_sticker_wrap"></div>
      <a class="tgme_widget_message_date"><time datetime="2025-01-15T09:00:00+00:00">09:00</time></a>
    </div>
  </div>
  <div class="tgme_widget_message_wrap">
    <div class="tgme_widget_message js-widget_message" data-post="durov/119">
      <div class="tgme_widget_message_poll">
        <div class="tgme_widget_message_poll_question">Pick one</div>
        <div class="tgme_widget_message_poll_option"><div class="tgme_widget_message_poll_option_text">Red</div></div>
        <div class="tgme_widget_message_poll_option"><div class="tgme_widget_message_poll_option_text">Blue</div></div>
      </div>
      <a class="tgme_widget_message_date"><time datetime="2025-01-15T09:30:00+00:00">09:30</time></a>
    </div>
  </div>
  <div class="tgme_widget_message_wrap">
    <div class="tgme_widget_message js-widget_message" data-post="durov/117">
      <div class="tgme_widget_message_text">No timestamp here</div>
    </div>
  </div>
  <div class="tgme_widget_message_wrap">
    <div class="tgme_widget_message js-widget_message" data-post="broken">
      <div class="tgme_widget_message_text">No id here</div>
      <time datetime="2025-01-15T09:30:00+00:00">09:30</time>
    </div>
  </div>
  <div class="tgme_widget_message_wrap">
    <div class="tgme_widget_message service_message js-widget_message" data-post="durov/121">
      <div class="tgme_widget_message_text">Channel photo updated</div>
      <time datetime="2025-01-15T08:00:00+00:00">08:00</time>
    </div>
  </div>
</section>
</body></html>
"#;

#[test]
fn test_parse_page_messages() {
    let page = parse_page(PAGE).unwrap();
    let ids: Vec<i64> = page.messages.iter().map(|m| m.id).collect();

    assert_eq!(ids, vec![120, 118, 119, 121]);
}

#[test]
fn test_parse_page_cursor_uses_oldest_id() {
    let page = parse_page(PAGE).unwrap();

    // the post without a timestamp still moves the cursor
    assert_eq!(page.next, Some(Cursor::Before(117)));
}

#[test]
fn test_parse_page_text_and_date() {
    let page = parse_page(PAGE).unwrap();
    let first = &page.messages[0];

    assert_eq!(first.date.to_rfc3339(), "2025-01-15T10:30:00+00:00");
    match &first.content {
        MessageContent::Text(text) => {
            assert!(text.starts_with("First line"));
            assert!(text.contains("bold"));
        }
        other => panic!("Expected text, got {other:?}"),
    }
}

#[test]
fn test_parse_page_noise_flags() {
    let page = parse_page(PAGE).unwrap();

    assert!(!page.messages[0].noise.sticker);
    assert!(page.messages[1].noise.sticker);
    assert!(page.messages[3].noise.service);
}

#[test]
fn test_parse_page_poll() {
    let page = parse_page(PAGE).unwrap();

    match &page.messages[2].content {
        MessageContent::Poll(poll) => {
            assert_eq!(poll.question, "Pick one");
            assert_eq!(poll.options, vec!["Red", "Blue"]);
        }
        other => panic!("Expected poll, got {other:?}"),
    }
}

#[test]
fn test_parse_page_history_unavailable() {
    let html = r#"<html><body><div class="tgme_channel_history_unavailable">Preview unavailable</div></body></html>"#;

    assert!(matches!(
        parse_page(html),
        Err(SourceError::Unavailable(_))
    ));
}

#[test]
fn test_parse_page_empty() {
    let page = parse_page("<html><body></body></html>").unwrap();

    assert!(page.messages.is_empty());
    assert_eq!(page.next, None);
}
