//! Participation ledger operations for the repository.
//!
//! Reads join the tournament's buy-in onto every record so the stats engine
//! receives self-contained inputs; no formula runs in SQL.

use crate::domain::{Decimal, Participation, PlayerId, PlayerProfile, TournamentId};
use crate::stats::TournamentEntry;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{parse_count, parse_decimal, Repository};

fn participation_from_row(row: &SqliteRow) -> Result<Participation, sqlx::Error> {
    let buy_in: String = row.get("buy_in");
    let rebuy_spent: String = row.get("rebuy_spent");
    let prize: String = row.get("prize");
    let position: Option<i64> = row.get("position");

    Ok(Participation {
        tournament_id: TournamentId::new(row.get("tournament_id")),
        player_id: PlayerId::new(row.get("player_id")),
        buy_in: parse_decimal(&buy_in, "buy_in")?,
        rebuy_count: parse_count(row.get("rebuy_count"), "rebuy_count")?,
        rebuy_spent: parse_decimal(&rebuy_spent, "rebuy_spent")?,
        prize: parse_decimal(&prize, "prize")?,
        position: position.map(|p| parse_count(p, "position")).transpose()?,
    })
}

impl Repository {
    /// Record one player's result in a tournament. Re-recording the same
    /// (tournament, player) pair replaces the previous row.
    ///
    /// # Errors
    /// Returns an error if the write fails, including foreign-key violations
    /// for an unknown tournament or player.
    pub async fn upsert_participation(
        &self,
        tournament_id: TournamentId,
        player_id: PlayerId,
        rebuy_count: u32,
        rebuy_spent: Decimal,
        prize: Decimal,
        position: Option<u32>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO participations (
                tournament_id, player_id, rebuy_count, rebuy_spent, prize, position
            ) VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(tournament_id, player_id) DO UPDATE SET
                rebuy_count = excluded.rebuy_count,
                rebuy_spent = excluded.rebuy_spent,
                prize = excluded.prize,
                position = excluded.position
            "#,
        )
        .bind(tournament_id.as_i64())
        .bind(player_id.as_i64())
        .bind(rebuy_count as i64)
        .bind(rebuy_spent.to_canonical_string())
        .bind(prize.to_canonical_string())
        .bind(position.map(|p| p as i64))
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// All of one player's participation records, oldest tournament first,
    /// each carrying its tournament's buy-in.
    ///
    /// # Errors
    /// Returns an error if the query fails or a stored value is corrupted.
    pub async fn participations_for_player(
        &self,
        player_id: PlayerId,
    ) -> Result<Vec<Participation>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT p.tournament_id, p.player_id, t.buy_in,
                   p.rebuy_count, p.rebuy_spent, p.prize, p.position
            FROM participations p
            JOIN tournaments t ON t.id = p.tournament_id
            WHERE p.player_id = ?
            ORDER BY t.tournament_date ASC, p.tournament_id ASC
            "#,
        )
        .bind(player_id.as_i64())
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(participation_from_row).collect()
    }

    /// All entries of one tournament with each entrant's profile.
    ///
    /// # Errors
    /// Returns an error if the query fails or a stored value is corrupted.
    pub async fn participations_for_tournament(
        &self,
        tournament_id: TournamentId,
    ) -> Result<Vec<TournamentEntry>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT p.tournament_id, p.player_id, t.buy_in,
                   p.rebuy_count, p.rebuy_spent, p.prize, p.position,
                   pl.display_name
            FROM participations p
            JOIN tournaments t ON t.id = p.tournament_id
            JOIN players pl ON pl.id = p.player_id
            WHERE p.tournament_id = ?
            ORDER BY pl.display_name ASC
            "#,
        )
        .bind(tournament_id.as_i64())
        .fetch_all(self.pool())
        .await?;

        rows.iter()
            .map(|row| {
                let record = participation_from_row(row)?;
                let player =
                    PlayerProfile::new(record.player_id, row.get::<String, _>("display_name"));
                Ok(TournamentEntry { player, record })
            })
            .collect()
    }

}
