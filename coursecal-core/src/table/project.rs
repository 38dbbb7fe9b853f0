//! Turning CSV data rows into typed event records.

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};

use super::{ColumnRoles, Role, Row};
use crate::time::local_to_utc;

/// An event as described by one CSV data row.
///
/// Text fields are `None` when the column is missing or the cell is empty.
/// `start`/`stop` are `None` when the date or time is missing or unreadable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectedRecord {
    pub start: Option<DateTime<Utc>>,
    pub stop: Option<DateTime<Utc>>,
    pub course: Option<String>,
    pub person: Option<String>,
    pub room: Option<String>,
    /// Teaching type, e.g. "Föreläsning"
    pub kind: Option<String>,
    pub text: Option<String>,
    pub info: Option<String>,
}

/// Project every data row, keeping row order.
pub fn project_records(rows: &[Row], roles: &ColumnRoles, zone: Option<Tz>) -> Vec<ProjectedRecord> {
    debug!("Projecting {} CSV rows", rows.len());

    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let record = ProjectedRecord::from_row(row, roles, zone);
            if record.start.is_none() {
                warn!("CSV row {} has no readable start time", index);
            }
            record
        })
        .collect()
}

impl ProjectedRecord {
    pub fn from_row(row: &Row, roles: &ColumnRoles, zone: Option<Tz>) -> Self {
        let field = |role| roles.value(row, role).map(str::to_string);

        ProjectedRecord {
            start: timestamp(
                roles.value(row, Role::StartDate),
                roles.value(row, Role::StartTime),
                zone,
            ),
            stop: timestamp(
                roles.value(row, Role::StopDate),
                roles.value(row, Role::StopTime),
                zone,
            ),
            course: field(Role::Course),
            person: field(Role::Person),
            room: field(Role::Room),
            kind: field(Role::Type),
            text: field(Role::Text),
            info: field(Role::Info),
        }
    }
}

/// `2017-01-16` + `08:15` -> `2017-01-16T08:15:00` in `zone`
fn timestamp(date: Option<&str>, time: Option<&str>, zone: Option<Tz>) -> Option<DateTime<Utc>> {
    let joined = format!("{}T{}:00", date?.trim(), time?.trim());
    let naive = NaiveDateTime::parse_from_str(&joined, "%Y-%m-%dT%H:%M:%S").ok()?;
    local_to_utc(&naive, zone)
}
