//! Helpers for composing Telegram MarkdownV2 text.
//!
//! Everything the bot sends uses MarkdownV2, so user supplied text must pass
//! through [`escape_markdown`] before it is wrapped in any formatting.

/// Escapes markdown special characters for MarkdownV2 parsing mode
///
/// # Example
/// ```
/// use event_registration_bot::utils::markdown::escape_markdown;
///
/// let text = "Hello *world* (test)";
/// let escaped = escape_markdown(text);
/// assert_eq!(escaped, "Hello \\*world\\* \\(test\\)");
/// ```
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(
            c,
            '\\' | '_' | '*' | '[' | ']' | '(' | ')' | '~' | '`' | '>' | '#' | '+' | '-' | '=' | '|'
                | '{' | '}' | '.' | '!'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub fn bold(text: &str) -> String {
    format!("*{}*", escape_markdown(text))
}

pub fn italic(text: &str) -> String {
    format!("_{}_", escape_markdown(text))
}

/// Inline mention that links to the user's profile.
pub fn user_mention(name: &str, user_id: u64) -> String {
    format!("[{}](tg://user?id={user_id})", escape_markdown(name))
}
