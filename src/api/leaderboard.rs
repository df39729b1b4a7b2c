use axum::extract::{Query, State};
use axum::Json;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::api::AppState;
use crate::domain::{Participation, PlayerId, PlayerProfile};
use crate::error::AppError;
use crate::stats::{Leaderboard, MetricKey, MetricsBundle, SortDirection};

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub metric: Option<String>,
    pub direction: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub player_id: PlayerId,
    pub display_name: String,
    pub metrics: MetricsBundle,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub metric: MetricKey,
    pub direction: SortDirection,
    pub rows: Vec<LeaderboardEntry>,
}

pub async fn get_leaderboard(
    Query(params): Query<LeaderboardQuery>,
    State(state): State<AppState>,
) -> Result<Json<LeaderboardResponse>, AppError> {
    let metric = match params.metric.as_deref() {
        Some(name) => MetricKey::from_str(name)?,
        None => state.config.default_leaderboard_metric,
    };

    let direction = match params.direction.as_deref() {
        Some(s) => SortDirection::from_str(s)
            .map_err(|_| AppError::BadRequest("direction must be asc or desc".to_string()))?,
        None => SortDirection::default(),
    };

    // One ledger read per player, fanned out; the engine itself is pure and
    // runs after all records are materialized.
    let players = state.repo.list_players().await?;
    let entries: Vec<(PlayerProfile, Vec<Participation>)> =
        try_join_all(players.into_iter().map(|player| {
            let repo = state.repo.clone();
            async move {
                let participations = repo.participations_for_player(player.id).await?;
                Ok::<_, sqlx::Error>((player, participations))
            }
        }))
        .await?;

    let board = Leaderboard::build(entries, metric, direction)?;

    let rows = board
        .rows()
        .iter()
        .enumerate()
        .map(|(idx, row)| LeaderboardEntry {
            rank: (idx + 1) as u32,
            player_id: row.player_id,
            display_name: row.display_name.clone(),
            metrics: row.metrics.clone(),
        })
        .collect();

    Ok(Json(LeaderboardResponse {
        metric,
        direction,
        rows,
    }))
}
