use axum::extract::{Path, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::db::repo::NewTournament;
use crate::domain::{Decimal, PlayerId, Tournament, TournamentId};
use crate::error::AppError;
use crate::stats::{ordered_results, summarize, TournamentEntry, TournamentSummary};

/// Money fields arrive as decimal strings so request bodies stay lossless.
fn parse_amount(value: &str, field: &str) -> Result<Decimal, AppError> {
    let amount = Decimal::from_str_canonical(value.trim())
        .map_err(|_| AppError::BadRequest(format!("Invalid {}", field)))?;
    if amount.is_negative() {
        return Err(AppError::BadRequest(format!("{} must not be negative", field)));
    }
    Ok(amount)
}

#[derive(Debug, Deserialize)]
pub struct CreateTournamentRequest {
    pub name: String,
    pub tournament_date: NaiveDate,
    pub buy_in: String,
    pub prize_pool: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecordResultRequest {
    pub player_id: i64,
    #[serde(default)]
    pub rebuy_count: u32,
    pub rebuy_spent: Option<String>,
    pub prize: Option<String>,
    pub position: Option<u32>,
}

/// One line of a tournament's result table.
#[derive(Debug, Serialize)]
pub struct ResultLine {
    pub player_id: PlayerId,
    pub display_name: String,
    pub position: Option<u32>,
    pub rebuy_count: u32,
    pub rebuy_spent: Decimal,
    pub prize: Decimal,
    pub total_cost: Decimal,
    pub net_result: Decimal,
}

impl From<&TournamentEntry> for ResultLine {
    fn from(entry: &TournamentEntry) -> Self {
        ResultLine {
            player_id: entry.player.id,
            display_name: entry.player.display_name.clone(),
            position: entry.record.position,
            rebuy_count: entry.record.rebuy_count,
            rebuy_spent: entry.record.rebuy_spent,
            prize: entry.record.prize,
            total_cost: entry.record.total_cost(),
            net_result: entry.record.net_result(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TournamentDetail {
    #[serde(flatten)]
    pub tournament: Tournament,
    pub summary: TournamentSummary,
    pub results: Vec<ResultLine>,
}

pub async fn list_tournaments(
    State(state): State<AppState>,
) -> Result<Json<Vec<Tournament>>, AppError> {
    let tournaments = state.repo.list_tournaments().await?;
    Ok(Json(tournaments))
}

pub async fn create_tournament(
    State(state): State<AppState>,
    Json(req): Json<CreateTournamentRequest>,
) -> Result<Json<Tournament>, AppError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name must not be empty".to_string()));
    }

    let buy_in = parse_amount(&req.buy_in, "buy_in")?;
    let prize_pool = req
        .prize_pool
        .as_deref()
        .map(|s| parse_amount(s, "prize_pool"))
        .transpose()?;

    let new_tournament = NewTournament {
        name: name.to_string(),
        tournament_date: req.tournament_date,
        buy_in,
        prize_pool,
        location: req.location.clone(),
    };

    let id = state.repo.insert_tournament(&new_tournament).await?;

    Ok(Json(Tournament {
        id,
        name: new_tournament.name,
        tournament_date: new_tournament.tournament_date,
        buy_in: new_tournament.buy_in,
        prize_pool: new_tournament.prize_pool,
        location: new_tournament.location,
    }))
}

pub async fn get_tournament(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<TournamentDetail>, AppError> {
    let tournament_id = TournamentId::new(id);
    let tournament = state
        .repo
        .get_tournament(tournament_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("tournament {} not found", id)))?;

    let entries = state
        .repo
        .participations_for_tournament(tournament_id)
        .await?;

    let summary = summarize(&tournament, &entries);
    let results = ordered_results(&entries)
        .into_iter()
        .map(ResultLine::from)
        .collect();

    Ok(Json(TournamentDetail {
        tournament,
        summary,
        results,
    }))
}

pub async fn record_result(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(req): Json<RecordResultRequest>,
) -> Result<Json<ResultLine>, AppError> {
    let tournament_id = TournamentId::new(id);
    let tournament = state
        .repo
        .get_tournament(tournament_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("tournament {} not found", id)))?;

    let player_id = PlayerId::new(req.player_id);
    let player = state
        .repo
        .get_player(player_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("player {} not found", req.player_id)))?;

    if req.position == Some(0) {
        return Err(AppError::BadRequest(
            "position must be >= 1 when present".to_string(),
        ));
    }

    let rebuy_spent = req
        .rebuy_spent
        .as_deref()
        .map(|s| parse_amount(s, "rebuy_spent"))
        .transpose()?
        .unwrap_or_else(Decimal::zero);
    let prize = req
        .prize
        .as_deref()
        .map(|s| parse_amount(s, "prize"))
        .transpose()?
        .unwrap_or_else(Decimal::zero);

    state
        .repo
        .upsert_participation(
            tournament_id,
            player_id,
            req.rebuy_count,
            rebuy_spent,
            prize,
            req.position,
        )
        .await?;

    let total_cost = tournament.buy_in + rebuy_spent;

    Ok(Json(ResultLine {
        player_id,
        display_name: player.display_name,
        position: req.position,
        rebuy_count: req.rebuy_count,
        rebuy_spent,
        prize,
        total_cost,
        net_result: prize - total_cost,
    }))
}
