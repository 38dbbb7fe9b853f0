//! ICS feed parsing using the icalendar crate's parser.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use icalendar::{
    Calendar, CalendarComponent, CalendarDateTime, Component, DatePerhapsTime, Event,
};

use crate::error::{RewriteError, RewriteResult};
use crate::time::local_to_utc;

/// Parse a whole feed, keeping every component and calendar property.
pub fn parse_calendar(content: &str) -> RewriteResult<Calendar> {
    content
        .parse::<Calendar>()
        .map_err(|e| RewriteError::IcsParse(e.to_string()))
}

/// Remove the VEVENTs from `calendar`, leaving timezones and other
/// components in place.
pub fn take_events(calendar: &mut Calendar) -> Vec<Event> {
    let (events, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut calendar.components)
        .into_iter()
        .partition(|component| matches!(component, CalendarComponent::Event(_)));
    calendar.components = rest;

    events
        .into_iter()
        .filter_map(|component| match component {
            CalendarComponent::Event(event) => Some(event),
            _ => None,
        })
        .collect()
}

/// The instant an event starts, `None` when DTSTART is missing or unreadable.
///
/// Floating times and unknown TZIDs are read in `zone` (system local time
/// when `None`); all-day events start at local midnight.
pub fn event_start(event: &Event, zone: Option<Tz>) -> Option<DateTime<Utc>> {
    match event.get_start()? {
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt)) => Some(dt),
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive)) => local_to_utc(&naive, zone),
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, tzid }) => {
            let tz = tzid.parse::<Tz>().ok().or(zone);
            local_to_utc(&date_time, tz)
        }
        DatePerhapsTime::Date(date) => local_to_utc(&date.and_hms_opt(0, 0, 0)?, zone),
    }
}
