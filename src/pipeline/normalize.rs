//! Row typing: turn raw cells into validated entries, or say why not.

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::parse::dates;
use crate::parse::ColumnIndex;

/// One data row that survived validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub name: String,
    pub score: f64,
    pub stamp: DateTime<Utc>,
}

/// Outcome of parsing the score cell. Unparsable scores never drop the row;
/// they fold in as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreField {
    Parsed(f64),
    Defaulted,
}

impl ScoreField {
    /// Parse the score cell. Non-finite parses count as failures: a NaN
    /// would poison every running total it touches.
    pub fn from_cell(cell: Option<&str>) -> Self {
        match cell.and_then(|s| s.trim().parse::<f64>().ok()) {
            Some(v) if v.is_finite() => ScoreField::Parsed(v),
            _ => ScoreField::Defaulted,
        }
    }

    pub fn value(self) -> f64 {
        match self {
            ScoreField::Parsed(v) => v,
            ScoreField::Defaulted => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    EmptyName,
    BadTimestamp,
}

/// Per-row verdict. Missing cells (short rows) read as absent and feed the
/// same rules as empty ones.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Keep(Entry),
    Drop(DropReason),
}

pub fn normalize_row(cols: &ColumnIndex, row: &[String]) -> RowOutcome {
    let name = row.get(cols.name).map(|s| s.trim()).unwrap_or("");
    if name.is_empty() {
        return RowOutcome::Drop(DropReason::EmptyName);
    }

    let stamp = match row.get(cols.timestamp).and_then(|s| dates::parse_stamp(s)) {
        Some(t) => t,
        None => return RowOutcome::Drop(DropReason::BadTimestamp),
    };

    let score = ScoreField::from_cell(row.get(cols.score).map(String::as_str));
    if score == ScoreField::Defaulted {
        trace!(name = %name, "unparsable score cell, counting as zero");
    }

    RowOutcome::Keep(Entry {
        name: name.to_string(),
        score: score.value(),
        stamp,
    })
}

/// Normalize every data row, keeping input order for the survivors.
pub fn normalize_rows(cols: &ColumnIndex, rows: &[Vec<String>]) -> Vec<Entry> {
    let mut entries = Vec::with_capacity(rows.len());
    let mut no_name = 0usize;
    let mut bad_stamp = 0usize;

    for row in rows {
        match normalize_row(cols, row) {
            RowOutcome::Keep(entry) => entries.push(entry),
            RowOutcome::Drop(DropReason::EmptyName) => no_name += 1,
            RowOutcome::Drop(DropReason::BadTimestamp) => bad_stamp += 1,
        }
    }

    if no_name + bad_stamp > 0 {
        debug!(kept = entries.len(), no_name, bad_stamp, "dropped invalid rows");
    }

    entries
}
