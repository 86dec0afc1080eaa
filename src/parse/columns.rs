//! Header-row resolution: find which column carries which semantic role.

use std::fmt;

/// The three column meanings the pipeline needs out of a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Timestamp,
    Name,
    Score,
}

impl Role {
    /// Substring looked for in a lower-cased header cell.
    fn needle(self) -> &'static str {
        match self {
            Role::Timestamp => "timestamp",
            Role::Name => "name",
            Role::Score => "score",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Timestamp => "Timestamp",
            Role::Name => "Name",
            Role::Score => "Score",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field positions for each role, built once per fetch from the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub timestamp: usize,
    pub name: usize,
    pub score: usize,
}

/// Schema failure: one or more roles had no matching header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingColumns {
    pub missing: Vec<Role>,
}

impl std::error::Error for MissingColumns {}

impl fmt::Display for MissingColumns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "missing required columns (")?;
        for (i, role) in self.missing.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", role)?;
        }
        write!(f, ")")
    }
}

/// Resolve roles against the header row: case-insensitive substring match on
/// the trimmed header text, leftmost match wins, column order irrelevant.
pub fn resolve(headers: &[String]) -> Result<ColumnIndex, MissingColumns> {
    let position = |role: Role| {
        headers
            .iter()
            .position(|h| h.trim().to_lowercase().contains(role.needle()))
    };

    let timestamp = position(Role::Timestamp);
    let name = position(Role::Name);
    let score = position(Role::Score);

    match (timestamp, name, score) {
        (Some(timestamp), Some(name), Some(score)) => Ok(ColumnIndex {
            timestamp,
            name,
            score,
        }),
        _ => {
            let missing = [
                (timestamp, Role::Timestamp),
                (name, Role::Name),
                (score, Role::Score),
            ]
            .into_iter()
            .filter_map(|(found, role)| found.is_none().then_some(role))
            .collect();
            Err(MissingColumns { missing })
        }
    }
}
