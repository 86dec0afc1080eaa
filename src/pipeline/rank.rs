//! Total-order ranking of aggregated entrants.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::aggregate::AggregatedPlayer;

/// One line of the published leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPlayer {
    pub rank: usize,
    pub name: String,
    pub total_score: f64,
    pub last_seen: DateTime<Utc>,
}

/// Sort by total descending, then earliest last-activity first (ties reward
/// earliness, not recency). The sort is stable, so ties beyond both keys
/// keep aggregation order. Ranks are the 1-based positions afterwards.
pub fn rank(mut players: Vec<AggregatedPlayer>) -> Vec<RankedPlayer> {
    players.sort_by(|a, b| {
        b.total_score
            .total_cmp(&a.total_score)
            .then_with(|| a.last_seen.cmp(&b.last_seen))
    });

    players
        .into_iter()
        .enumerate()
        .map(|(i, p)| RankedPlayer {
            rank: i + 1,
            name: p.name,
            total_score: p.total_score,
            last_seen: p.last_seen,
        })
        .collect()
}
