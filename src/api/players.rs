use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::domain::{Decimal, Participation, PlayerId, PlayerProfile, TournamentId};
use crate::error::AppError;
use crate::stats::{MetricsBundle, PlayerStats};

#[derive(Debug, Deserialize)]
pub struct CreatePlayerRequest {
    pub display_name: String,
}

/// One row of a player's tournament history, with its own financials.
#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub tournament_id: TournamentId,
    pub buy_in: Decimal,
    pub rebuy_count: u32,
    pub rebuy_spent: Decimal,
    pub prize: Decimal,
    pub position: Option<u32>,
    pub total_cost: Decimal,
    pub net_result: Decimal,
}

impl From<&Participation> for HistoryEntry {
    fn from(p: &Participation) -> Self {
        HistoryEntry {
            tournament_id: p.tournament_id,
            buy_in: p.buy_in,
            rebuy_count: p.rebuy_count,
            rebuy_spent: p.rebuy_spent,
            prize: p.prize,
            position: p.position,
            total_cost: p.total_cost(),
            net_result: p.net_result(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlayerStatsResponse {
    pub player_id: PlayerId,
    pub display_name: String,
    pub metrics: MetricsBundle,
    pub history: Vec<HistoryEntry>,
}

pub async fn list_players(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlayerProfile>>, AppError> {
    let players = state.repo.list_players().await?;
    Ok(Json(players))
}

pub async fn create_player(
    State(state): State<AppState>,
    Json(req): Json<CreatePlayerRequest>,
) -> Result<Json<PlayerProfile>, AppError> {
    let display_name = req.display_name.trim();
    if display_name.is_empty() {
        return Err(AppError::BadRequest(
            "display_name must not be empty".to_string(),
        ));
    }

    let id = match state.repo.insert_player(display_name).await {
        Ok(id) => id,
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            return Err(AppError::BadRequest(format!(
                "display_name {} is already taken",
                display_name
            )));
        }
        Err(e) => return Err(AppError::from(e)),
    };

    Ok(Json(PlayerProfile::new(id, display_name)))
}

pub async fn get_player_stats(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<PlayerStatsResponse>, AppError> {
    let player_id = PlayerId::new(id);
    let player = state
        .repo
        .get_player(player_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("player {} not found", id)))?;

    let participations = state.repo.participations_for_player(player_id).await?;

    // One facade per request; the bundle is computed once however many
    // fields the response touches.
    let stats = PlayerStats::new(player, participations)?;
    let history = stats.participations().iter().map(HistoryEntry::from).collect();
    let display_name = stats.player().display_name.clone();

    Ok(Json(PlayerStatsResponse {
        player_id,
        display_name,
        metrics: stats.into_bundle(),
        history,
    }))
}
