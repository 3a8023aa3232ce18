use crate::filter::{extract_text, is_noise};
use crate::message::{MessageContent, NoiseFlags, Poll};

#[test]
fn test_default_flags_are_kept() {
    assert!(!is_noise(&NoiseFlags::default()));
}

#[test]
fn test_each_flag_is_noise() {
    let cases = [
        NoiseFlags {
            service: true,
            ..Default::default()
        },
        NoiseFlags {
            sticker: true,
            ..Default::default()
        },
        NoiseFlags {
            voice: true,
            ..Default::default()
        },
        NoiseFlags {
            video_note: true,
            ..Default::default()
        },
        NoiseFlags {
            animation: true,
            ..Default::default()
        },
        NoiseFlags {
            contact: true,
            ..Default::default()
        },
        NoiseFlags {
            location: true,
            ..Default::default()
        },
        NoiseFlags {
            dice: true,
            ..Default::default()
        },
    ];

    for flags in cases {
        assert!(is_noise(&flags), "{flags:?} should be noise");
    }
}

#[test]
fn test_extract_poll() {
    let poll = MessageContent::Poll(Poll {
        question: "Pick one".to_string(),
        options: vec!["Red".to_string(), "Blue".to_string()],
    });

    assert_eq!(
        extract_text(&poll).as_deref(),
        Some("Poll: Pick one | Options: Red, Blue")
    );
}

#[test]
fn test_extract_trims_text() {
    let content = MessageContent::Text("  hello there \n".to_string());
    assert_eq!(extract_text(&content).as_deref(), Some("hello there"));
}

#[test]
fn test_extract_whitespace_is_absent() {
    assert_eq!(extract_text(&MessageContent::Text(" \n\t ".to_string())), None);
    assert_eq!(extract_text(&MessageContent::Empty), None);
}
