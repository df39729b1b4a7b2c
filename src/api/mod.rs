pub mod health;
pub mod leaderboard;
pub mod metrics;
pub mod players;
pub mod tournaments;

use crate::config::Config;
use crate::db::Repository;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Config,
}

impl AppState {
    pub fn new(repo: Arc<Repository>, config: Config) -> Self {
        Self { repo, config }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route(
            "/v1/players",
            get(players::list_players).post(players::create_player),
        )
        .route("/v1/players/:id/stats", get(players::get_player_stats))
        .route(
            "/v1/tournaments",
            get(tournaments::list_tournaments).post(tournaments::create_tournament),
        )
        .route("/v1/tournaments/:id", get(tournaments::get_tournament))
        .route(
            "/v1/tournaments/:id/results",
            post(tournaments::record_result),
        )
        .route("/v1/leaderboard", get(leaderboard::get_leaderboard))
        .route("/v1/metrics", get(metrics::list_metrics))
        .layer(cors)
        .with_state(state)
}
