//! Chronological ordering of both event sources.
//!
//! The feed and the CSV export list the same events in different orders.
//! Both are sorted by start time, ascending and stable, so that the nth
//! event of one is expected to be the nth event of the other. Events
//! without a readable start sort first.

use chrono_tz::Tz;
use icalendar::Event;

use crate::ics::event_start;
use crate::table::ProjectedRecord;

pub fn sort_events(events: &mut [Event], zone: Option<Tz>) {
    tracing::debug!("Sorting {} calendar events", events.len());
    events.sort_by_cached_key(|event| event_start(event, zone));
}

pub fn sort_records(records: &mut [ProjectedRecord]) {
    tracing::debug!("Sorting {} CSV records", records.len());
    records.sort_by_key(|record| record.start);
}
