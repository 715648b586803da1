pub mod announce;

use teloxide::utils::command::{BotCommands, ParseError};

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Event registration bot commands:")]
pub enum Command {
    #[command(description = "Display this help message")]
    Help,
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Announce a registration event (mods only), one `field: value` per line")]
    Announce(String),
}

impl Command {
    /// Like [`BotCommands::parse`], but the command word may end at any
    /// whitespace, so `/announce` followed by a line break still parses.
    pub fn parse_message(text: &str, bot_name: &str) -> Result<Self, ParseError> {
        let text = text.trim_start();
        let Some(end) = text.find(char::is_whitespace) else {
            return Self::parse(text, bot_name);
        };
        let (word, rest) = text.split_at(end);
        let args = rest.trim_start();
        if args.is_empty() {
            Self::parse(word, bot_name)
        } else {
            Self::parse(&format!("{word} {args}"), bot_name)
        }
    }
}
