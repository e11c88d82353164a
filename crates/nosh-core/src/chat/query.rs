//! Search query extraction.
//!
//! Pulls a search term and an optional location phrase out of the text
//! following `/search`. Delimiters are checked in a fixed precedence
//! (`" nearby"`, then `" near me"`, then `" in "`), each at its last
//! occurrence, so `"tacos in Phoenix nearby"` is a near-me query for
//! `"tacos in Phoenix"`.

const NEARBY: &str = " nearby";
const NEAR_ME: &str = " near me";
const IN: &str = " in ";

/// The parts of a `/search` remainder.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedQuery {
    /// Text before the winning delimiter. `None` when no delimiter occurs.
    pub term: Option<String>,
    /// Text after the last `" in "`.
    pub location: Option<String>,
    /// The query asks for places near the user rather than a named place.
    pub near_me: bool,
}

impl ParsedQuery {
    /// No delimiter at all: the whole remainder is an unqualified term.
    pub fn is_bare(&self) -> bool {
        self.term.is_none() && self.location.is_none() && !self.near_me
    }
}

/// Extract the term, location, and near-me flag from `remainder`.
pub fn extract(remainder: &str) -> ParsedQuery {
    ParsedQuery {
        term: search_term(remainder).map(str::to_string),
        location: search_location(remainder).map(str::to_string),
        near_me: is_near_me(remainder),
    }
}

fn search_term(text: &str) -> Option<&str> {
    [NEARBY, NEAR_ME, IN]
        .into_iter()
        .find_map(|delimiter| text.rfind(delimiter))
        .map(|idx| &text[..idx])
}

fn search_location(text: &str) -> Option<&str> {
    text.rfind(IN).map(|idx| &text[idx + IN.len()..])
}

fn is_near_me(text: &str) -> bool {
    text.contains(NEAR_ME) || text.contains(NEARBY)
}
