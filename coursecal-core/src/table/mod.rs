//! The CSV side of a schedule: rows, column roles, the course code legend
//! and the event records projected from the data rows.

mod legend;
mod parse;
mod project;
mod roles;

pub use legend::CourseCodes;
pub use parse::{Row, TableSections, parse_rows};
pub use project::{ProjectedRecord, project_records};
pub use roles::{ColumnRoles, Role};
