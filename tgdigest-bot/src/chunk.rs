pub(crate) const TELEGRAM_MAX_LENGTH: usize = 4096;

fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// `<b>{title} — {date}</b>` followed by a blank line, title HTML-escaped.
pub fn digest_header(title: &str, date: chrono::NaiveDate) -> String {
    format!(
        "<b>{} — {}</b>\n\n",
        teloxide::utils::html::escape(title),
        date.format("%Y-%m-%d")
    )
}

/// Split `text` into chunks of at most [`TELEGRAM_MAX_LENGTH`] UTF-16 units,
/// with `header` at the start of the first one.
///
/// Lines are kept whole where possible; a line that alone exceeds the limit
/// is cut at character boundaries, never inside an HTML entity. Concatenating the chunks and removing the
/// leading header yields `text` back.
pub fn split_digest(header: &str, text: &str) -> Vec<String> {
    split_with_limit(header, text, TELEGRAM_MAX_LENGTH)
}

pub(crate) fn split_with_limit(header: &str, text: &str, limit: usize) -> Vec<String> {
    if utf16_len(header) + utf16_len(text) <= limit {
        return vec![format!("{header}{text}")];
    }

    let mut chunks = Vec::new();
    let mut current = header.to_string();
    let mut current_len = utf16_len(header);

    // split_inclusive keeps each '\n' attached to its line
    for line in text.split_inclusive('\n') {
        let line_len = utf16_len(line);

        if current_len + line_len <= limit {
            current.push_str(line);
            current_len += line_len;
            continue;
        }

        if line_len <= limit {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            current.push_str(line);
            current_len = line_len;
            continue;
        }

        // too long for any chunk, fill the current one and keep cutting
        for atom in split_atoms(line) {
            let atom_len = utf16_len(atom);
            if current_len + atom_len > limit && !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            current.push_str(atom);
            current_len += atom_len;
        }
    }

    if !current.trim().is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Characters of `line`, except that entities like `&amp;` or `&#39;` stay
/// in one piece.
fn split_atoms(line: &str) -> Vec<&str> {
    let mut atoms = Vec::new();
    let mut rest = line;

    while let Some(ch) = rest.chars().next() {
        let len = match ch {
            '&' => entity_len(rest).unwrap_or(1),
            _ => ch.len_utf8(),
        };
        let (atom, tail) = rest.split_at(len);
        atoms.push(atom);
        rest = tail;
    }

    atoms
}

fn entity_len(text: &str) -> Option<usize> {
    let end = text.bytes().take(MAX_ENTITY_LEN).position(|b| b == b';')?;
    let name = &text.as_bytes()[1..end];

    let valid = !name.is_empty() && name.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'#');
    valid.then_some(end + 1)
}

const MAX_ENTITY_LEN: usize = 10;
