//! CSV export parsing.

use crate::config::TableLayout;
use crate::error::{RewriteError, RewriteResult};

/// One CSV record, indexed by column position.
pub type Row = Vec<String>;

/// Parse CSV text into rows. The header is not treated specially.
pub fn parse_rows(content: &str) -> RewriteResult<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(content.as_bytes());

    reader
        .records()
        .map(|result| {
            result
                .map(|record| record.iter().map(str::to_string).collect())
                .map_err(RewriteError::from)
        })
        .collect()
}

/// The export split into its header, legend and data rows.
#[derive(Debug, Clone, Default)]
pub struct TableSections {
    /// Column labels; empty when the export has no header row
    pub header: Row,
    pub legend: Option<Row>,
    pub data: Vec<Row>,
}

impl TableSections {
    /// Pull the header and legend rows out at the positions the layout names.
    /// Rows in front of them are dropped; everything after both is data.
    pub fn split(rows: Vec<Row>, layout: &TableLayout) -> Self {
        let data_start = layout.header_row.max(layout.legend_row) + 1;

        let mut header = None;
        let mut legend = None;
        let mut data = Vec::new();

        for (index, row) in rows.into_iter().enumerate() {
            if index == layout.header_row {
                header = Some(row);
            } else if index == layout.legend_row {
                legend = Some(row);
            } else if index >= data_start {
                data.push(row);
            }
        }

        TableSections {
            header: header.unwrap_or_default(),
            legend,
            data,
        }
    }

    /// The legend's free-text cell, if the export has one.
    pub fn legend_cell(&self, column: usize) -> Option<&str> {
        self.legend
            .as_ref()
            .and_then(|row| row.get(column))
            .map(String::as_str)
    }
}
