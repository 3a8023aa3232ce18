use crate::message::{MessageContent, NoiseFlags, Poll};

/// Returns `true` for messages that carry nothing worth summarizing:
/// service events, stickers, voice and video notes, GIFs, contacts,
/// locations and dice rolls.
pub fn is_noise(flags: &NoiseFlags) -> bool {
    let NoiseFlags {
        service,
        sticker,
        voice,
        video_note,
        animation,
        contact,
        location,
        dice,
    } = *flags;

    service || sticker || voice || video_note || animation || contact || location || dice
}

/// Extract summarizable text. `None` means the message must be dropped.
pub fn extract_text(content: &MessageContent) -> Option<String> {
    match content {
        MessageContent::Empty => None,
        MessageContent::Poll(poll) => Some(format_poll(poll)),
        MessageContent::Text(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
    }
}

fn format_poll(Poll { question, options }: &Poll) -> String {
    format!("Poll: {question} | Options: {}", options.join(", "))
}
