//! Demo-data seeding from a directory of CSV files.
//!
//! Expects `players.csv` (display_name), `tournaments.csv` (name,
//! tournament_date, buy_in, prize_pool, location), and `results.csv`
//! (tournament, player, rebuy_count, rebuy_spent, prize, position), with
//! results referencing tournaments and players by name. Seeding only runs
//! against an empty database; an already-populated ledger is left alone.

use anyhow::{bail, Context};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use crate::db::repo::NewTournament;
use crate::db::Repository;
use crate::domain::{Decimal, PlayerId, TournamentId};

/// Counts of rows loaded by one seeding pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub players: usize,
    pub tournaments: usize,
    pub results: usize,
}

#[derive(Debug, Deserialize)]
struct PlayerRow {
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct TournamentRow {
    name: String,
    tournament_date: NaiveDate,
    buy_in: String,
    prize_pool: Option<String>,
    location: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResultRow {
    tournament: String,
    player: String,
    #[serde(default)]
    rebuy_count: u32,
    rebuy_spent: Option<String>,
    prize: Option<String>,
    position: Option<u32>,
}

fn parse_amount(value: Option<&str>, field: &str, line: usize) -> anyhow::Result<Decimal> {
    let Some(value) = value.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(Decimal::zero());
    };
    let amount = Decimal::from_str_canonical(value)
        .with_context(|| format!("invalid {} in results.csv row {}", field, line))?;
    if amount.is_negative() {
        bail!("negative {} in results.csv row {}", field, line);
    }
    Ok(amount)
}

fn read_rows<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut rows = Vec::new();
    for record in reader.deserialize::<T>() {
        rows.push(record.with_context(|| format!("failed to parse {}", path.display()))?);
    }
    Ok(rows)
}

/// Load the demo dataset, returning None if the database already has data.
///
/// # Errors
/// Fails on unreadable files, malformed rows, negative amounts, or results
/// referencing unknown tournament or player names.
pub async fn seed_from_dir(repo: &Repository, dir: &Path) -> anyhow::Result<Option<SeedReport>> {
    if repo.has_players().await? {
        return Ok(None);
    }

    let player_rows: Vec<PlayerRow> = read_rows(&dir.join("players.csv"))?;
    let tournament_rows: Vec<TournamentRow> = read_rows(&dir.join("tournaments.csv"))?;
    let result_rows: Vec<ResultRow> = read_rows(&dir.join("results.csv"))?;

    let mut player_ids: HashMap<String, PlayerId> = HashMap::new();
    for row in &player_rows {
        let id = repo
            .insert_player(&row.display_name)
            .await
            .with_context(|| format!("failed to insert player {}", row.display_name))?;
        player_ids.insert(row.display_name.clone(), id);
    }

    let mut tournament_ids: HashMap<String, TournamentId> = HashMap::new();
    for row in &tournament_rows {
        let buy_in = Decimal::from_str_canonical(row.buy_in.trim())
            .with_context(|| format!("invalid buy_in for tournament {}", row.name))?;
        let prize_pool = row
            .prize_pool
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Decimal::from_str_canonical)
            .transpose()
            .with_context(|| format!("invalid prize_pool for tournament {}", row.name))?;

        let id = repo
            .insert_tournament(&NewTournament {
                name: row.name.clone(),
                tournament_date: row.tournament_date,
                buy_in,
                prize_pool,
                location: row.location.clone(),
            })
            .await
            .with_context(|| format!("failed to insert tournament {}", row.name))?;
        tournament_ids.insert(row.name.clone(), id);
    }

    for (line, row) in result_rows.iter().enumerate() {
        let Some(&tournament_id) = tournament_ids.get(&row.tournament) else {
            bail!("results.csv row {} references unknown tournament {}", line + 2, row.tournament);
        };
        let Some(&player_id) = player_ids.get(&row.player) else {
            bail!("results.csv row {} references unknown player {}", line + 2, row.player);
        };
        if row.position == Some(0) {
            bail!("results.csv row {} has position 0", line + 2);
        }

        let rebuy_spent = parse_amount(row.rebuy_spent.as_deref(), "rebuy_spent", line + 2)?;
        let prize = parse_amount(row.prize.as_deref(), "prize", line + 2)?;

        repo.upsert_participation(
            tournament_id,
            player_id,
            row.rebuy_count,
            rebuy_spent,
            prize,
            row.position,
        )
        .await
        .with_context(|| format!("failed to record result row {}", line + 2))?;
    }

    let report = SeedReport {
        players: player_rows.len(),
        tournaments: tournament_rows.len(),
        results: result_rows.len(),
    };
    info!(
        "Seeded demo data: {} players, {} tournaments, {} results",
        report.players, report.tournaments, report.results
    );
    Ok(Some(report))
}
