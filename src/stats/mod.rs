//! Statistics engine: pure metric derivation and leaderboard aggregation.
//!
//! This module provides:
//! - MetricsBundle: per-player metrics computed from ledger records
//! - PlayerStats: request-scoped memoizing facade over one player's records
//! - Leaderboard: ranked rows with a stable sort and fixed tie-break chain
//! - MetricKey registry: the closed set of sortable metrics plus metadata
//! - Tournament aggregates: prize pool and ordered results

pub mod facade;
pub mod leaderboard;
pub mod metrics;
pub mod registry;
pub mod tournament;

pub use facade::PlayerStats;
pub use leaderboard::{Leaderboard, LeaderboardRow, SortDirection};
pub use metrics::MetricsBundle;
pub use registry::{MetricInfo, MetricKey, UnitKind, UnknownMetricError};
pub use tournament::{ordered_results, summarize, TournamentEntry, TournamentSummary};
