//! Wall-clock to instant conversion.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Interpret a wall-clock time in `zone` (system local time when `None`).
///
/// Times skipped by a DST jump have no instant and yield `None`; ambiguous
/// ones resolve to the earlier instant.
pub fn local_to_utc(naive: &NaiveDateTime, zone: Option<Tz>) -> Option<DateTime<Utc>> {
    match zone {
        Some(tz) => tz
            .from_local_datetime(naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc)),
        None => Local
            .from_local_datetime(naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc)),
    }
}
