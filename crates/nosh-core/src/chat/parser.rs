//! Command parsing.
//!
//! `split_command` is a pure split on the first whitespace character;
//! `parse` and `parse_for` add classification into a [`Command`] variant.

use nosh_types::chat::Command;

/// A message split into its classified command and the text after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub command: Command,
    pub remainder: String,
}

/// Split `text` on its first whitespace character.
///
/// Returns `(command, remainder)`. The remainder keeps its internal
/// whitespace exactly as sent. Text without whitespace comes back as
/// `(text, "")`, and empty text as `("", "")`.
pub fn split_command(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((command, remainder)) => (command, remainder),
        None => (text, ""),
    }
}

/// Split and classify message text.
pub fn parse(text: &str) -> ParsedCommand {
    parse_for(text, None)
}

/// Split and classify message text sent to the bot `own_handle`.
pub fn parse_for(text: &str, own_handle: Option<&str>) -> ParsedCommand {
    let (token, remainder) = split_command(text);
    ParsedCommand {
        command: Command::classify_for(token, own_handle),
        remainder: remainder.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_without_delimiter_returns_whole_text() {
        for text in ["/start", "hello", "/search", "🍣"] {
            assert_eq!(split_command(text), (text, ""));
        }
    }

    #[test]
    fn test_split_empty() {
        assert_eq!(split_command(""), ("", ""));
    }

    #[test]
    fn test_split_preserves_internal_whitespace() {
        assert_eq!(
            split_command("/search tacos  in   Phoenix"),
            ("/search", "tacos  in   Phoenix")
        );
    }

    #[test]
    fn test_split_on_newline() {
        assert_eq!(split_command("/search\nramen"), ("/search", "ramen"));
    }

    #[test]
    fn test_split_is_pure() {
        let text = "/search sushi nearby";
        assert_eq!(split_command(text), split_command(text));
        assert_eq!(parse(text), parse(text));
    }

    #[test]
    fn test_parse_classifies() {
        let parsed = parse("/search sushi nearby");
        assert_eq!(parsed.command, Command::Search);
        assert_eq!(parsed.remainder, "sushi nearby");

        let parsed = parse("what's good");
        assert_eq!(parsed.command, Command::Unknown("what's".to_string()));
        assert_eq!(parsed.remainder, "good");
    }

    #[test]
    fn test_parse_for_checks_the_addressed_handle() {
        let parsed = parse_for("/search@nosh_bot pho nearby", Some("nosh_bot"));
        assert_eq!(parsed.command, Command::Search);
        assert_eq!(parsed.remainder, "pho nearby");

        let parsed = parse_for("/search@other_bot pho nearby", Some("nosh_bot"));
        assert_eq!(
            parsed.command,
            Command::Unknown("/search@other_bot".to_string())
        );
    }
}
