//! Search result rendering.
//!
//! Results are rendered as Telegram legacy Markdown: a summary line followed
//! by a numbered list where each business name links to its listing.

use nosh_types::chat::ChatId;
use nosh_types::message::{Keyboard, OutboundMessage, ParseMode};
use nosh_types::search::{Business, SearchResult};

use super::replies;

/// Most businesses shown in one reply.
pub const MAX_SHOWN: usize = 10;

const STAR: &str = "⭐";
const MAX_STARS: f64 = 5.0;

/// Render `result` as a Markdown reply that also dismisses any keyboard.
pub fn results_message(chat_id: ChatId, term: &str, result: &SearchResult) -> OutboundMessage {
    OutboundMessage::new(chat_id, render_results(term, result))
        .with_parse_mode(ParseMode::Markdown)
        .with_keyboard(Keyboard::Remove)
}

/// The fixed reply for a failed search.
pub fn failure_message(chat_id: ChatId) -> OutboundMessage {
    OutboundMessage::new(chat_id, replies::SEARCH_FAILED).with_keyboard(Keyboard::Remove)
}

/// Summary line plus up to [`MAX_SHOWN`] numbered entries.
pub fn render_results(term: &str, result: &SearchResult) -> String {
    let shown = MAX_SHOWN
        .min(result.total as usize)
        .min(result.businesses.len());

    let mut text = format!(
        "Got {} results searching for {}, here are the top {}!\n\n",
        result.total,
        escape_markdown(term),
        shown
    );

    for (i, business) in result.businesses.iter().take(shown).enumerate() {
        text.push_str(&render_business(i + 1, business));
    }

    text
}

fn render_business(position: usize, business: &Business) -> String {
    let mut line = stars(business.rating, business.review_count);
    if let Some(price) = &business.price {
        line.push_str(", ");
        line.push_str(price);
    }

    format!(
        "[{position}: {name}]({url})\n{line}\n{address}\n\n",
        name = link_text(&business.name),
        url = business.url,
        address = escape_markdown(&business.address),
    )
}

/// One star per rating point, rounded half away from zero and capped at
/// five, then the exact rating and review count.
pub fn stars(rating: f64, review_count: u32) -> String {
    let count = rating.round().clamp(0.0, MAX_STARS) as usize;
    format!("{} ({rating:.1}, {review_count} reviews)", STAR.repeat(count))
}

/// Link text is taken verbatim up to the first `]`, so brackets are swapped
/// for parentheses instead of escaped.
fn link_text(text: &str) -> String {
    text.replace('[', "(").replace(']', ")")
}

/// Backslash-escape the characters legacy Markdown treats as entity starts.
fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
