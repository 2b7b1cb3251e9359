//! Table-list parsing
//!
//! The table list is the external contract that drives plan construction:
//! delimited UTF-8 text, one header row (discarded), then one
//! `source_table,dest_table` pair per row, in file order.

use std::fs;
use std::path::Path;

use tracing::{error, info};

use crate::error::{Result, ShiftError};

/// Field delimiter for table-list rows
pub const TABLE_LIST_DELIMITER: char = ',';

/// One `(source, destination)` table pair parsed from the table list.
///
/// Immutable once read; discarded after plan construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePair {
    /// Fully-qualified source table, e.g. `project:dataset.table`
    pub source_table: String,
    /// Fully-qualified destination table
    pub dest_table: String,
}

/// Read the table list that drives dynamic plan construction.
///
/// The first row is a header and is discarded. Every subsequent non-empty
/// row must carry at least two delimited fields; extra fields are ignored.
/// Row order is preserved in the returned list.
///
/// An unreadable file is logged with the failing path and returned as
/// [`ShiftError::TableListRead`] so callers cannot proceed with a partial
/// list. No panic crosses this boundary.
pub fn read_table_list(path: &Path) -> Result<Vec<TablePair>> {
    info!(path = %path.display(), "reading table list");

    let text = fs::read_to_string(path).map_err(|e| {
        error!(path = %path.display(), error = %e, "error opening table list");
        ShiftError::TableListRead {
            path: path.display().to_string(),
            source: e,
        }
    })?;

    parse_table_list(&text)
}

/// Parse table-list text. Split out of [`read_table_list`] so the row
/// contract is testable without touching the filesystem.
pub fn parse_table_list(text: &str) -> Result<Vec<TablePair>> {
    let mut pairs = Vec::new();

    // Line numbers are 1-based; line 1 is the header.
    for (idx, line) in text.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split(TABLE_LIST_DELIMITER);
        let source = fields.next().map(str::trim).unwrap_or_default();
        let dest = fields.next().map(str::trim);

        let Some(dest) = dest else {
            return Err(ShiftError::MalformedRow {
                line: idx + 1,
                found: if source.is_empty() { 0 } else { 1 },
            });
        };

        info!(source_table = source, dest_table = dest, "parsed table row");
        pairs.push(TablePair {
            source_table: source.to_string(),
            dest_table: dest.to_string(),
        });
    }

    Ok(pairs)
}
