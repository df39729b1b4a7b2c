//! Tournament row operations for the repository.

use crate::domain::{Decimal, Tournament, TournamentId};
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{parse_decimal, Repository};

/// Fields of a tournament before it has an id.
#[derive(Debug, Clone)]
pub struct NewTournament {
    pub name: String,
    pub tournament_date: NaiveDate,
    pub buy_in: Decimal,
    pub prize_pool: Option<Decimal>,
    pub location: Option<String>,
}

fn tournament_from_row(row: &SqliteRow) -> Result<Tournament, sqlx::Error> {
    let buy_in: String = row.get("buy_in");
    let prize_pool: Option<String> = row.get("prize_pool");

    Ok(Tournament {
        id: TournamentId::new(row.get("id")),
        name: row.get("name"),
        tournament_date: row.get("tournament_date"),
        buy_in: parse_decimal(&buy_in, "buy_in")?,
        prize_pool: prize_pool
            .as_deref()
            .map(|s| parse_decimal(s, "prize_pool"))
            .transpose()?,
        location: row.get("location"),
    })
}

impl Repository {
    /// Insert a tournament, returning the new id.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub async fn insert_tournament(
        &self,
        tournament: &NewTournament,
    ) -> Result<TournamentId, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO tournaments (name, tournament_date, buy_in, prize_pool, location)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(tournament.name.as_str())
        .bind(tournament.tournament_date)
        .bind(tournament.buy_in.to_canonical_string())
        .bind(tournament.prize_pool.map(|d| d.to_canonical_string()))
        .bind(tournament.location.as_deref())
        .execute(self.pool())
        .await?;

        Ok(TournamentId::new(result.last_insert_rowid()))
    }

    /// Fetch one tournament by id.
    ///
    /// # Errors
    /// Returns an error if the query fails or a stored decimal is corrupted.
    pub async fn get_tournament(
        &self,
        id: TournamentId,
    ) -> Result<Option<Tournament>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT id, name, tournament_date, buy_in, prize_pool, location
            FROM tournaments
            WHERE id = ?
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool())
        .await?;

        row.as_ref().map(tournament_from_row).transpose()
    }

    /// List all tournaments, most recent first.
    ///
    /// # Errors
    /// Returns an error if the query fails or a stored decimal is corrupted.
    pub async fn list_tournaments(&self) -> Result<Vec<Tournament>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, tournament_date, buy_in, prize_pool, location
            FROM tournaments
            ORDER BY tournament_date DESC, id DESC
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(tournament_from_row).collect()
    }
}
