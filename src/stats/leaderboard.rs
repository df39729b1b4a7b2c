//! Leaderboard aggregation: bundles for every eligible player, ranked.
//!
//! A leaderboard is a stateless pipeline: a ledger snapshot goes in, ordered
//! rows come out. Each row carries its fully computed bundle, so re-sorting
//! by another column only reorders rows; recomputing a bundle during a
//! re-sort is a defect, not an accepted cost.

use crate::domain::{DataIntegrityError, Participation, PlayerId, PlayerProfile};
use crate::stats::{MetricKey, MetricsBundle, PlayerStats};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Sort direction for the primary metric. Tie-breaks keep their fixed
/// orientation regardless of this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Descending,
    Ascending,
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "desc" | "descending" => Ok(SortDirection::Descending),
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            _ => Err(()),
        }
    }
}

/// One ranked player: identity plus the full metrics bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardRow {
    pub player_id: PlayerId,
    pub display_name: String,
    pub metrics: MetricsBundle,
}

/// Ranked rows for every player with at least one participation.
#[derive(Debug, Clone)]
pub struct Leaderboard {
    rows: Vec<LeaderboardRow>,
    sort_key: MetricKey,
    direction: SortDirection,
}

impl Leaderboard {
    /// Build a leaderboard from a full ledger snapshot.
    ///
    /// Players with zero participations are omitted entirely; their ratios
    /// would all read as a misleading 0 next to real records.
    ///
    /// # Errors
    /// Returns `DataIntegrityError` if any player's records fail validation.
    pub fn build(
        entries: Vec<(PlayerProfile, Vec<Participation>)>,
        sort_key: MetricKey,
        direction: SortDirection,
    ) -> Result<Self, DataIntegrityError> {
        let mut rows = Vec::with_capacity(entries.len());
        for (player, participations) in entries {
            if participations.is_empty() {
                continue;
            }
            let stats = PlayerStats::new(player, participations)?;
            rows.push(LeaderboardRow {
                player_id: stats.player().id,
                display_name: stats.player().display_name.clone(),
                metrics: stats.into_bundle(),
            });
        }

        let mut board = Leaderboard {
            rows,
            sort_key,
            direction,
        };
        board.apply_sort();
        Ok(board)
    }

    /// Re-sort by another metric, reusing every already-computed bundle.
    pub fn sort_by(&mut self, sort_key: MetricKey, direction: SortDirection) {
        self.sort_key = sort_key;
        self.direction = direction;
        self.apply_sort();
    }

    /// Rows in rank order (best first under the current sort).
    pub fn rows(&self) -> &[LeaderboardRow] {
        &self.rows
    }

    /// The metric the board is currently ordered by.
    pub fn sort_key(&self) -> MetricKey {
        self.sort_key
    }

    /// The current primary sort direction.
    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    fn apply_sort(&mut self) {
        let key = self.sort_key;
        let direction = self.direction;
        // Stable sort plus the fixed tie-break chain gives a deterministic
        // total order even when the whole column is constant.
        self.rows.sort_by(|a, b| {
            let primary = match direction {
                SortDirection::Descending => key.value(&b.metrics).cmp(&key.value(&a.metrics)),
                SortDirection::Ascending => key.value(&a.metrics).cmp(&key.value(&b.metrics)),
            };
            primary.then_with(|| tie_break(a, b))
        });
    }
}

fn tie_break(a: &LeaderboardRow, b: &LeaderboardRow) -> Ordering {
    b.metrics
        .total_winnings
        .cmp(&a.metrics.total_winnings)
        .then_with(|| {
            b.metrics
                .tournaments_played
                .cmp(&a.metrics.tournaments_played)
        })
        .then_with(|| a.display_name.cmp(&b.display_name))
}
