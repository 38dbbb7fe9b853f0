//! ICS feed generation.

use icalendar::{Calendar, Event};

/// Product identifier stamped on rewritten feeds
pub const PRODID: &str = "-//coursecal//Rewritten schedule//EN";

/// Append `events` to `calendar` after its remaining components.
pub fn restore_events(calendar: &mut Calendar, events: impl IntoIterator<Item = Event>) {
    for event in events {
        calendar.push(event);
    }
}

/// Render the feed, replacing the upstream PRODID with ours.
pub fn generate_ics(calendar: &Calendar) -> String {
    let rendered = calendar.to_string();
    let mut result = String::with_capacity(rendered.len());
    let mut in_prodid = false;

    for line in rendered.lines() {
        // folded continuation of the line before
        if in_prodid && line.starts_with([' ', '\t']) {
            continue;
        }
        in_prodid = line.starts_with("PRODID:");

        if in_prodid {
            result.push_str("PRODID:");
            result.push_str(PRODID);
        } else {
            result.push_str(line);
        }
        result.push_str("\r\n");
    }

    result
}
