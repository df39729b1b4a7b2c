use axum::http::StatusCode;
use chrono::NaiveDate;
use railbird::api::{self, AppState};
use railbird::config::Config;
use railbird::db::init_db;
use railbird::db::repo::NewTournament;
use railbird::stats::MetricKey;
use railbird::{Decimal, PlayerId, Repository, TournamentId};
use std::str::FromStr;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

struct TestApp {
    app: axum::Router,
    state: AppState,
    _temp: TempDir,
}

fn test_config() -> Config {
    Config {
        port: 0,
        database_path: ":memory:".to_string(),
        default_leaderboard_metric: MetricKey::NetProfit,
        seed_dir: None,
    }
}

async fn setup_test_app() -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("test.db")
        .to_string_lossy()
        .to_string();
    let pool = init_db(&db_path).await.expect("init_db failed");

    let repo = Arc::new(Repository::new(pool));
    let state = AppState::new(repo, test_config());
    let app = api::create_router(state.clone());

    TestApp {
        app,
        state,
        _temp: temp_dir,
    }
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = axum::http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn seed_player(test_app: &TestApp, name: &str) -> PlayerId {
    test_app.state.repo.insert_player(name).await.unwrap()
}

async fn seed_tournament(test_app: &TestApp, name: &str, buy_in: &str) -> TournamentId {
    test_app
        .state
        .repo
        .insert_tournament(&NewTournament {
            name: name.to_string(),
            tournament_date: NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
            buy_in: dec(buy_in),
            prize_pool: None,
            location: None,
        })
        .await
        .unwrap()
}

async fn seed_result(
    test_app: &TestApp,
    tournament: TournamentId,
    player: PlayerId,
    prize: &str,
    position: Option<u32>,
) {
    test_app
        .state
        .repo
        .upsert_participation(tournament, player, 0, dec("0"), dec(prize), position)
        .await
        .unwrap();
}

fn row_names(body: &serde_json::Value) -> Vec<String> {
    body["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["display_name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_leaderboard_ranks_by_requested_metric() {
    let test_app = setup_test_app().await;

    let ada = seed_player(&test_app, "Ada").await;
    let bruno = seed_player(&test_app, "Bruno").await;
    let carla = seed_player(&test_app, "Carla").await;

    let t1 = seed_tournament(&test_app, "Friday Night", "20").await;
    seed_result(&test_app, t1, ada, "30", Some(3)).await;
    seed_result(&test_app, t1, bruno, "100", Some(1)).await;
    seed_result(&test_app, t1, carla, "60", Some(2)).await;

    let (status, body) = get(test_app.app.clone(), "/v1/leaderboard?metric=net_profit").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metric"], "net_profit");
    assert_eq!(row_names(&body), vec!["Bruno", "Carla", "Ada"]);

    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows[0]["rank"], 1);
    assert_eq!(rows[0]["metrics"]["net_profit"].as_f64().unwrap(), 80.0);
    assert_eq!(rows[2]["rank"], 3);
}

#[tokio::test]
async fn test_leaderboard_default_metric_from_config() {
    let test_app = setup_test_app().await;

    let ada = seed_player(&test_app, "Ada").await;
    let t1 = seed_tournament(&test_app, "Friday Night", "20").await;
    seed_result(&test_app, t1, ada, "50", Some(1)).await;

    let (status, body) = get(test_app.app.clone(), "/v1/leaderboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metric"], "net_profit");
    assert_eq!(body["direction"], "descending");
}

#[tokio::test]
async fn test_leaderboard_unknown_metric_is_400() {
    let test_app = setup_test_app().await;

    let (status, body) = get(test_app.app.clone(), "/v1/leaderboard?metric=stack_size").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("unknown metric: stack_size"));
}

#[tokio::test]
async fn test_leaderboard_invalid_direction_is_400() {
    let test_app = setup_test_app().await;

    let (status, _) = get(
        test_app.app.clone(),
        "/v1/leaderboard?metric=roi&direction=sideways",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_leaderboard_excludes_players_without_participations() {
    let test_app = setup_test_app().await;

    let ada = seed_player(&test_app, "Ada").await;
    seed_player(&test_app, "Lurker").await;

    let t1 = seed_tournament(&test_app, "Friday Night", "20").await;
    seed_result(&test_app, t1, ada, "0", Some(4)).await;

    for metric in ["net_profit", "roi", "tournaments_played"] {
        let uri = format!("/v1/leaderboard?metric={}", metric);
        let (status, body) = get(test_app.app.clone(), &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(row_names(&body), vec!["Ada"], "metric {}", metric);
    }
}

#[tokio::test]
async fn test_leaderboard_tie_breakers() {
    let test_app = setup_test_app().await;

    // All three tie on ROI at -100 (no cashes). Bruno played two
    // tournaments, Ada and Carla one each with equal winnings, so the
    // expected order is volume first, then name.
    let carla = seed_player(&test_app, "Carla").await;
    let ada = seed_player(&test_app, "Ada").await;
    let bruno = seed_player(&test_app, "Bruno").await;

    let t1 = seed_tournament(&test_app, "Week 1", "20").await;
    let t2 = seed_tournament(&test_app, "Week 2", "20").await;

    seed_result(&test_app, t1, carla, "0", None).await;
    seed_result(&test_app, t1, ada, "0", None).await;
    seed_result(&test_app, t1, bruno, "0", None).await;
    seed_result(&test_app, t2, bruno, "0", None).await;

    let (status, body) = get(test_app.app.clone(), "/v1/leaderboard?metric=roi").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(row_names(&body), vec!["Bruno", "Ada", "Carla"]);

    // Byte-identical order on a second build of the same snapshot.
    let (_, body_again) = get(test_app.app.clone(), "/v1/leaderboard?metric=roi").await;
    assert_eq!(body, body_again);
}

#[tokio::test]
async fn test_leaderboard_ascending_direction() {
    let test_app = setup_test_app().await;

    let ada = seed_player(&test_app, "Ada").await;
    let bruno = seed_player(&test_app, "Bruno").await;

    let t1 = seed_tournament(&test_app, "Friday Night", "20").await;
    seed_result(&test_app, t1, ada, "100", Some(1)).await;
    seed_result(&test_app, t1, bruno, "0", Some(5)).await;

    let (status, body) = get(
        test_app.app.clone(),
        "/v1/leaderboard?metric=net_profit&direction=asc",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["direction"], "ascending");
    assert_eq!(row_names(&body), vec!["Bruno", "Ada"]);
}

#[tokio::test]
async fn test_leaderboard_rows_carry_full_bundles() {
    let test_app = setup_test_app().await;

    let ada = seed_player(&test_app, "Ada").await;
    let t1 = seed_tournament(&test_app, "Friday Night", "20").await;
    seed_result(&test_app, t1, ada, "50", Some(1)).await;

    let (status, body) = get(test_app.app.clone(), "/v1/leaderboard?metric=roi").await;
    assert_eq!(status, StatusCode::OK);

    // Every registered metric is present; no deferred fields.
    let metrics = &body["rows"][0]["metrics"];
    for name in [
        "tournaments_played",
        "total_winnings",
        "total_buyin_spent",
        "total_rebuy_spent",
        "total_spent",
        "net_profit",
        "roi",
        "wins",
        "win_rate",
        "itm_count",
        "itm_rate",
        "avg_profit_per_tournament",
        "total_rebuys",
        "avg_rebuy_per_tournament",
        "rebuy_frequency",
        "win_to_itm_ratio",
        "avg_buy_in",
        "cost_per_cash",
        "tournaments_no_rebuy",
        "avg_prize_itm",
    ] {
        assert!(!metrics[name].is_null(), "missing metric {}", name);
    }

    assert_eq!(metrics["roi"].as_f64().unwrap(), 150.0);
    assert_eq!(metrics["win_rate"].as_f64().unwrap(), 1.0);
}

#[tokio::test]
async fn test_empty_leaderboard_is_ok() {
    let test_app = setup_test_app().await;

    let (status, body) = get(test_app.app.clone(), "/v1/leaderboard?metric=roi").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rows"].as_array().unwrap().len(), 0);
}
