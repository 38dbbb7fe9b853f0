//! Mapping CSV header labels to what each column means.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Row;

/// What a CSV column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    StartDate,
    StartTime,
    StopDate,
    StopTime,
    Course,
    Person,
    Room,
    Type,
    Text,
    Info,
}

/// Role -> column position, built from the header row.
///
/// Roles whose label never appears are simply missing; reading them yields `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRoles {
    columns: BTreeMap<Role, usize>,
}

impl ColumnRoles {
    /// Match every header cell exactly against the label table.
    /// Unknown labels are ignored. When two columns carry labels of the
    /// same role, the rightmost one wins.
    pub fn resolve(header: &Row, labels: &BTreeMap<String, Role>) -> Self {
        tracing::debug!("Resolving column roles from {} header cells", header.len());

        let columns = header
            .iter()
            .enumerate()
            .filter_map(|(column, label)| labels.get(label).map(|role| (*role, column)))
            .collect();

        ColumnRoles { columns }
    }

    pub fn column(&self, role: Role) -> Option<usize> {
        self.columns.get(&role).copied()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The cell holding `role` in `row`; empty cells count as absent.
    pub fn value<'a>(&self, row: &'a Row, role: Role) -> Option<&'a str> {
        self.column(role)
            .and_then(|column| row.get(column))
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}
