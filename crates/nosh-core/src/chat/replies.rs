//! Fixed reply texts.

use nosh_types::identity::BotIdentity;

pub const BAD_COMMAND: &str = "Valid queries start with \"/\", for example \"/search <term>\" will search for businesses near you.";
pub const UNKNOWN_COMMAND: &str = "Sorry, but I don't know how to answer that query.";
pub const SEARCH_FAILED: &str = "Sorry, I was unable to perform that search.";
pub const SHARE_LOCATION: &str = "Please provide your location so that I can search for businesses near you.";
pub const SEARCH_USAGE: &str = "Tell me what to look for, for example \"/search tacos nearby\" or \"/search ramen in Seattle\".";

/// The `/start` and `/help` reply.
pub fn greeting(identity: &BotIdentity) -> String {
    format!(
        "Hello, my name is {name}. You can contact me by messaging @{handle}.\n\
         Accepted requests are:\n  \
         \"/search <cuisine/business> in <location>\",\n  \
         \"/search <cuisine/business> nearby/near me\", and\n  \
         \"/random\"\n\
         To see these again send \"/start\" or \"/help\".",
        name = identity.name,
        handle = identity.handle,
    )
}
