// src/pipeline/mod.rs
//
// The pure half of a refresh cycle: raw CSV text in, ranked list out.
// Everything here is synchronous and recomputed from scratch per call;
// no state survives between cycles.

pub mod aggregate;
pub mod normalize;
pub mod rank;

use thiserror::Error;
use tracing::debug;

use crate::parse::{self, MissingColumns};

pub use aggregate::AggregatedPlayer;
pub use normalize::Entry;
pub use rank::RankedPlayer;

/// Why a cycle's sheet text could not produce a ranking. Transport failures
/// live upstream in `fetch`; these are the schema-class failures.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error(transparent)]
    MissingColumns(#[from] MissingColumns),
    #[error("sheet is empty (no header row)")]
    EmptySheet,
}

/// Run the full text → ranking pipeline over one fetched snapshot.
///
/// The first row is the header row; every other row flows through
/// normalize → aggregate → rank. Row-level problems are absorbed per the
/// normalizer's rules and never fail the snapshot.
pub fn snapshot(text: &str) -> Result<Vec<RankedPlayer>, SnapshotError> {
    let mut rows = parse::parse_delimited(text);
    if rows.is_empty() {
        return Err(SnapshotError::EmptySheet);
    }

    let headers = rows.remove(0);
    let cols = parse::columns::resolve(&headers)?;
    debug!(?cols, data_rows = rows.len(), "resolved sheet columns");

    let entries = normalize::normalize_rows(&cols, &rows);
    Ok(rank::rank(aggregate::aggregate(entries)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "\
Timestamp,Player Name,Score (pts)\n\
2024-01-01 09:00:00,Alice,10\n\
2024-01-01 10:00:00,Bob,20\n\
2024-01-01 11:00:00,Alice,5\n\
not-a-date,Ghost,99\n\
2024-01-01 12:00:00,,7\n\
2024-01-01 13:00:00,Carol,oops\n";

    #[test]
    fn end_to_end_snapshot() {
        let ranked = snapshot(SHEET).unwrap();
        let view: Vec<_> = ranked
            .iter()
            .map(|p| (p.rank, p.name.as_str(), p.total_score))
            .collect();
        // Ghost's row dropped on timestamp, the blank name dropped, Carol
        // kept at zero.
        assert_eq!(view, vec![(1, "Bob", 20.0), (2, "Alice", 15.0), (3, "Carol", 0.0)]);
    }

    #[test]
    fn snapshot_is_idempotent_over_same_text() {
        assert_eq!(snapshot(SHEET).unwrap(), snapshot(SHEET).unwrap());
    }

    #[test]
    fn missing_columns_abort_with_no_partial_list() {
        let err = snapshot("Timestamp,Player,Points\n2024-01-01 09:00:00,Alice,10\n").unwrap_err();
        match err {
            SnapshotError::MissingColumns(m) => {
                assert_eq!(m.to_string(), "missing required columns (Name, Score)");
            }
            other => panic!("expected missing columns, got {:?}", other),
        }
    }

    #[test]
    fn empty_text_is_a_schema_failure() {
        assert!(matches!(snapshot(""), Err(SnapshotError::EmptySheet)));
    }

    #[test]
    fn header_only_sheet_ranks_nobody() {
        assert!(snapshot("Timestamp,Name,Score\n").unwrap().is_empty());
    }

    #[test]
    fn quoted_names_with_commas_survive_the_whole_pipeline() {
        let sheet = "Timestamp,Name,Score\n2024-01-01 09:00:00,\"Lee, Sam\",3\n";
        let ranked = snapshot(sheet).unwrap();
        assert_eq!(ranked[0].name, "Lee, Sam");
    }
}
