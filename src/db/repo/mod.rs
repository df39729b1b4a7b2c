//! Repository layer for database operations.
//!
//! This module provides the `Repository` struct for all database operations.
//! Methods are organized across submodules by entity:
//! - `players.rs` - player rows
//! - `tournaments.rs` - tournament rows
//! - `participations.rs` - the participation ledger, including the joins
//!   that feed the stats engine
//!
//! The repository materializes records; no metric formula lives in SQL.

mod participations;
mod players;
mod tournaments;

pub use tournaments::NewTournament;

use crate::domain::Decimal;
use sqlx::sqlite::SqlitePool;

/// Repository for database operations.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Parse a decimal column stored as a canonical string.
///
/// A stored value that fails to parse is corrupted data, surfaced as a decode
/// error rather than silently defaulted.
pub(crate) fn parse_decimal(value: &str, column: &'static str) -> Result<Decimal, sqlx::Error> {
    Decimal::from_str_canonical(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

/// Narrow an INTEGER column to the u32 range used by count fields.
pub(crate) fn parse_count(value: i64, column: &'static str) -> Result<u32, sqlx::Error> {
    u32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}
