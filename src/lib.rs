pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod seed;
pub mod stats;

pub use config::Config;
pub use db::{init_db, Repository};
pub use domain::{
    DataIntegrityError, Decimal, Participation, PlayerId, PlayerProfile, Tournament, TournamentId,
};
pub use error::AppError;
pub use stats::{
    Leaderboard, LeaderboardRow, MetricKey, MetricsBundle, PlayerStats, SortDirection,
    UnknownMetricError,
};
