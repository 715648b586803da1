//! Announcement fields and their MarkdownV2 rendering.

use std::str::FromStr;

use crate::utils::markdown::{bold, escape_markdown, italic};

pub const CALL_TO_ACTION: &str = "Click the button below to register:";

/// Optional pieces a moderator supplies for an event announcement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnouncementFields {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub location: Option<String>,
    pub info: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

impl AnnouncementFields {
    /// Name used to label registrations for this event.
    pub fn event_name(&self) -> Option<String> {
        present(&self.title).map(str::to_string)
    }

    pub fn is_empty(&self) -> bool {
        [&self.title, &self.subtitle, &self.location, &self.info, &self.link, &self.description]
            .into_iter()
            .all(|field| present(field).is_none())
    }
}

/// One line per present field in a fixed order, then a blank line and the call to action.
pub fn build_announcement(fields: &AnnouncementFields) -> String {
    let labelled = |label: &str, value: &str| format!("{} {}", bold(label), escape_markdown(value));

    let mut lines = Vec::new();
    if let Some(title) = present(&fields.title) {
        lines.push(bold(title));
    }
    if let Some(subtitle) = present(&fields.subtitle) {
        lines.push(italic(subtitle));
    }
    if let Some(location) = present(&fields.location) {
        lines.push(labelled("Location:", location));
    }
    if let Some(info) = present(&fields.info) {
        lines.push(labelled("Info:", info));
    }
    if let Some(link) = present(&fields.link) {
        lines.push(labelled("Link:", link));
    }
    if let Some(description) = present(&fields.description) {
        lines.push(escape_markdown(description));
    }
    lines.push(format!("\n{CALL_TO_ACTION}"));
    lines.join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldParseError {
    #[error("Line {line} is missing a ':' separator")]
    MissingSeparator { line: usize },
    #[error("Unknown field '{0}'")]
    UnknownField(String),
}

impl FromStr for AnnouncementFields {
    type Err = FieldParseError;

    /// Parses `/announce` arguments: one `field: value` per line.
    /// Keys are case-insensitive and a repeated key replaces the earlier value.
    fn from_str(body: &str) -> Result<Self, Self::Err> {
        let mut fields = AnnouncementFields::default();

        for (index, line) in body.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let (key, value) = line
                .split_once(':')
                .ok_or(FieldParseError::MissingSeparator { line: index + 1 })?;
            let value = Some(value.trim().to_string()).filter(|v| !v.is_empty());

            let slot = match key.trim().to_lowercase().as_str() {
                "title" => &mut fields.title,
                "subtitle" => &mut fields.subtitle,
                "location" => &mut fields.location,
                "info" => &mut fields.info,
                "link" => &mut fields.link,
                "description" => &mut fields.description,
                _ => return Err(FieldParseError::UnknownField(key.trim().to_string())),
            };
            *slot = value;
        }

        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn test_title_and_location_only() {
        let fields = AnnouncementFields {
            title: field("Spring Gala"),
            location: field("Hall A"),
            ..Default::default()
        };
        assert_eq!(
            build_announcement(&fields),
            "*Spring Gala*\n*Location:* Hall A\n\nClick the button below to register:"
        );
    }

    #[test]
    fn test_all_fields_in_fixed_order() {
        let fields = AnnouncementFields {
            title: field("Spring Gala"),
            subtitle: field("Annual dinner"),
            location: field("Hall A"),
            info: field("Dress code: smart"),
            link: field("example.com/gala"),
            description: field("Food and music."),
        };
        let expected = [
            "*Spring Gala*",
            "_Annual dinner_",
            "*Location:* Hall A",
            "*Info:* Dress code: smart",
            "*Link:* example\\.com/gala",
            "Food and music\\.",
            "",
            CALL_TO_ACTION,
        ]
        .join("\n");
        assert_eq!(build_announcement(&fields), expected);
    }

    #[test]
    fn test_no_fields_yields_call_to_action() {
        let text = build_announcement(&AnnouncementFields::default());
        assert_eq!(text, "\nClick the button below to register:");
    }

    #[test]
    fn test_blank_fields_are_skipped() {
        let fields = AnnouncementFields {
            title: field("   "),
            subtitle: field("Only subtitle"),
            ..Default::default()
        };
        assert_eq!(
            build_announcement(&fields),
            "_Only subtitle_\n\nClick the button below to register:"
        );
        assert_eq!(fields.event_name(), None);
    }

    #[test]
    fn test_parse_fields() {
        let fields: AnnouncementFields = "Title: Spring Gala\nlocation:  Hall A \nLINK: https://example.com/a"
            .parse()
            .unwrap();
        assert_eq!(fields.title.as_deref(), Some("Spring Gala"));
        assert_eq!(fields.location.as_deref(), Some("Hall A"));
        assert_eq!(fields.link.as_deref(), Some("https://example.com/a"));
        assert_eq!(fields.subtitle, None);
        assert_eq!(fields.event_name().as_deref(), Some("Spring Gala"));
    }

    #[test]
    fn test_parse_rejects_unknown_field_and_bare_line() {
        assert_eq!(
            "title: x\nwhen: friday".parse::<AnnouncementFields>(),
            Err(FieldParseError::UnknownField("when".to_string()))
        );
        assert_eq!(
            "title: x\n\njust words".parse::<AnnouncementFields>(),
            Err(FieldParseError::MissingSeparator { line: 3 })
        );
    }

    #[test]
    fn test_parse_last_value_wins() {
        let fields: AnnouncementFields = "title: First\ntitle: Second".parse().unwrap();
        assert_eq!(fields.title.as_deref(), Some("Second"));
        assert!(!fields.is_empty());
        assert!("".parse::<AnnouncementFields>().unwrap().is_empty());
    }
}
