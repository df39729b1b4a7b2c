//! Player row operations for the repository.

use crate::domain::{PlayerId, PlayerProfile};
use sqlx::Row;

use super::Repository;

impl Repository {
    /// Insert a player, returning the new id.
    ///
    /// # Errors
    /// Returns an error if the insert fails, including a unique violation on
    /// the display name.
    pub async fn insert_player(&self, display_name: &str) -> Result<PlayerId, sqlx::Error> {
        let result = sqlx::query("INSERT INTO players (display_name) VALUES (?)")
            .bind(display_name)
            .execute(self.pool())
            .await?;

        Ok(PlayerId::new(result.last_insert_rowid()))
    }

    /// Fetch one player by id.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_player(&self, id: PlayerId) -> Result<Option<PlayerProfile>, sqlx::Error> {
        let row = sqlx::query("SELECT id, display_name FROM players WHERE id = ?")
            .bind(id.as_i64())
            .fetch_optional(self.pool())
            .await?;

        Ok(row.map(|row| {
            PlayerProfile::new(PlayerId::new(row.get("id")), row.get::<String, _>("display_name"))
        }))
    }

    /// Whether any players are registered at all. Used to decide whether
    /// startup seeding should run.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn has_players(&self) -> Result<bool, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM players")
            .fetch_one(self.pool())
            .await?;
        Ok(row.0 > 0)
    }

    /// List all players ordered by display name.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn list_players(&self) -> Result<Vec<PlayerProfile>, sqlx::Error> {
        let rows = sqlx::query("SELECT id, display_name FROM players ORDER BY display_name ASC")
            .fetch_all(self.pool())
            .await?;

        Ok(rows
            .iter()
            .map(|row| {
                PlayerProfile::new(
                    PlayerId::new(row.get("id")),
                    row.get::<String, _>("display_name"),
                )
            })
            .collect())
    }
}
