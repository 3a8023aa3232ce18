use tgdigest_common::Language;

const PROMPT_EN: &str = r#"You are an assistant that creates Telegram channel digests.
Below are messages from channels over the last {hours} hours.
Create a brief summary for each channel:
- Main topics and news
- Important announcements
- Key numbers/facts
Format: channel name as heading, then 3-7 bullet points.
Be concise and factual.
If a channel has nothing important — write "no significant updates".
"#;

const PROMPT_RU: &str = r#"Ты — помощник, который делает обзор Telegram-каналов.
Ниже — сообщения из каналов за последние {hours} ч.
Сделай краткую выжимку по каждому каналу:
- Главные темы и новости
- Важные анонсы
- Ключевые цифры/факты
Формат: заголовок канала, потом 3-7 пунктов.
Пиши на русском, кратко и по делу.
Если в канале ничего важного — напиши "без важных обновлений".
"#;

pub fn instructions(language: Language, lookback_hours: u32) -> String {
    let template = match language {
        Language::English => PROMPT_EN,
        Language::Russian => PROMPT_RU,
    };

    template.replace("{hours}", &lookback_hours.to_string())
}

/// Full summarizer prompt: instructions, a blank line, then the formatted
/// channel messages.
pub fn build_prompt(language: Language, lookback_hours: u32, content: &str) -> String {
    format!("{}\n\n{content}", instructions(language, lookback_hours))
}
