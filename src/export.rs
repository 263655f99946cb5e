//! CSV export of the displayed rows.
//!
//! Columns are fixed: `ID,Timestamp,Value,Parameter Set,Status,Performance Index`.
//! Fields containing a comma, a double quote or a line break are quoted with
//! embedded quotes doubled (RFC 4180); everything else is written verbatim.
//! Rows are joined with `\n` and there is no trailing newline.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::timestamp::format_timestamp;
use crate::data::{format_number, SimulationRecord};

/// File name offered for downloads.
pub const EXPORT_FILE_NAME: &str = "simulation_data.csv";

pub const HEADER: [&str; 6] = [
    "ID",
    "Timestamp",
    "Value",
    "Parameter Set",
    "Status",
    "Performance Index",
];

/// Render the cells of one row.
pub fn row_cells(record: &SimulationRecord) -> [String; 6] {
    [
        record.id().to_string(),
        format_timestamp(record.timestamp()),
        record
            .value()
            .as_number()
            .map(format_number)
            .unwrap_or_else(|| "N/A".to_string()),
        record.parameter_set().to_string(),
        record.status().to_string(),
        format_index(record.performance_index().unwrap_or(0.0)),
    ]
}

/// Two fixed decimals, falling back to exponent form from `1e21` upwards.
fn format_index(index: f64) -> String {
    if index.abs() >= 1e21 {
        format_number(index)
    } else {
        format!("{:.2}", index)
    }
}

/// Serialize records, in the given order, to CSV text.
pub fn to_csv(records: &[SimulationRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(join_row(HEADER.iter().copied()));
    for record in records {
        let cells = row_cells(record);
        lines.push(join_row(cells.iter().map(String::as_str)));
    }
    lines.join("\n")
}

/// Write records as CSV to `path`.
pub fn write_csv(records: &[SimulationRecord], path: &Path) -> Result<()> {
    fs::write(path, to_csv(records))
        .with_context(|| format!("failed to write {}", path.display()))
}

fn join_row<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    cells.map(escape).collect::<Vec<_>>().join(",")
}

fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
