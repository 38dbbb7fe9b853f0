//! Taking a feed apart and putting it back together.
//!
//! Events are lifted out of the parsed calendar for rewriting; the rewritten
//! ones go back in next to the untouched timezones before rendering.

mod generate;
mod parse;

pub use generate::{PRODID, generate_ics, restore_events};
pub use parse::{event_start, parse_calendar, take_events};
