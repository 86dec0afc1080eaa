//! Fold entries into one running record per entrant.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::normalize::Entry;

/// Running totals for one entrant. Names are compared exactly, case and all;
/// "alice" and "Alice" are two entrants.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedPlayer {
    pub name: String,
    pub total_score: f64,
    pub last_seen: DateTime<Utc>,
}

/// Single left-to-right fold over input order. First occurrence of a name
/// seeds the record; later ones add to the total and keep the latest stamp.
/// Output order is first-occurrence order, which the ranker's final tie
/// level relies on.
pub fn aggregate(entries: Vec<Entry>) -> Vec<AggregatedPlayer> {
    let mut players: Vec<AggregatedPlayer> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        match index.get(&entry.name) {
            Some(&i) => {
                let player = &mut players[i];
                player.total_score += entry.score;
                if entry.stamp > player.last_seen {
                    player.last_seen = entry.stamp;
                }
            }
            None => {
                index.insert(entry.name.clone(), players.len());
                players.push(AggregatedPlayer {
                    name: entry.name,
                    total_score: entry.score,
                    last_seen: entry.stamp,
                });
            }
        }
    }

    players
}
