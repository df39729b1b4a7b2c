use axum::http::StatusCode;
use chrono::NaiveDate;
use railbird::api::{self, AppState};
use railbird::config::Config;
use railbird::db::init_db;
use railbird::db::repo::NewTournament;
use railbird::stats::MetricKey;
use railbird::{Decimal, Repository, TournamentId};
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

async fn seed_tournament(test_app: &TestApp, name: &str, date: &str, buy_in: &str) -> TournamentId {
    test_app
        .state
        .repo
        .insert_tournament(&NewTournament {
            name: name.to_string(),
            tournament_date: NaiveDate::from_str(date).unwrap(),
            buy_in: dec(buy_in),
            prize_pool: None,
            location: None,
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_single_win_stats() {
    let test_app = setup_test_app().await;

    let ada = test_app.state.repo.insert_player("Ada").await.unwrap();
    let t1 = seed_tournament(&test_app, "Friday Night", "2024-03-08", "20").await;
    test_app
        .state
        .repo
        .upsert_participation(t1, ada, 0, dec("0"), dec("50"), Some(1))
        .await
        .unwrap();

    let uri = format!("/v1/players/{}/stats", ada.as_i64());
    let (status, body) = get(test_app.app.clone(), &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["display_name"], "Ada");

    let metrics = &body["metrics"];
    assert_eq!(metrics["total_spent"].as_f64().unwrap(), 20.0);
    assert_eq!(metrics["total_winnings"].as_f64().unwrap(), 50.0);
    assert_eq!(metrics["net_profit"].as_f64().unwrap(), 30.0);
    assert_eq!(metrics["roi"].as_f64().unwrap(), 150.0);
    assert_eq!(metrics["win_rate"].as_f64().unwrap(), 1.0);
    assert_eq!(metrics["itm_rate"].as_f64().unwrap(), 1.0);
    assert_eq!(metrics["wins"], 1);
    assert_eq!(metrics["itm_count"], 1);
}

#[tokio::test]
async fn test_losing_record_with_rebuys() {
    let test_app = setup_test_app().await;

    let bruno = test_app.state.repo.insert_player("Bruno").await.unwrap();
    let t1 = seed_tournament(&test_app, "Week 1", "2024-03-01", "10").await;
    let t2 = seed_tournament(&test_app, "Week 2", "2024-03-08", "10").await;

    test_app
        .state
        .repo
        .upsert_participation(t1, bruno, 1, dec("10"), dec("0"), Some(5))
        .await
        .unwrap();
    test_app
        .state
        .repo
        .upsert_participation(t2, bruno, 0, dec("0"), dec("0"), Some(7))
        .await
        .unwrap();

    let uri = format!("/v1/players/{}/stats", bruno.as_i64());
    let (status, body) = get(test_app.app.clone(), &uri).await;
    assert_eq!(status, StatusCode::OK);

    let metrics = &body["metrics"];
    assert_eq!(metrics["total_spent"].as_f64().unwrap(), 30.0);
    assert_eq!(metrics["total_winnings"].as_f64().unwrap(), 0.0);
    assert_eq!(metrics["net_profit"].as_f64().unwrap(), -30.0);
    assert_eq!(metrics["roi"].as_f64().unwrap(), -100.0);
    assert_eq!(metrics["win_rate"].as_f64().unwrap(), 0.0);
    assert_eq!(metrics["itm_rate"].as_f64().unwrap(), 0.0);
    assert_eq!(metrics["rebuy_frequency"].as_f64().unwrap(), 0.5);
    assert_eq!(metrics["win_to_itm_ratio"].as_f64().unwrap(), 0.0);
}

#[tokio::test]
async fn test_player_without_participations_gets_zero_policy_bundle() {
    let test_app = setup_test_app().await;

    let carla = test_app.state.repo.insert_player("Carla").await.unwrap();

    let uri = format!("/v1/players/{}/stats", carla.as_i64());
    let (status, body) = get(test_app.app.clone(), &uri).await;
    assert_eq!(status, StatusCode::OK);

    let metrics = &body["metrics"];
    assert_eq!(metrics["tournaments_played"], 0);
    assert_eq!(metrics["roi"].as_f64().unwrap(), 0.0);
    assert_eq!(metrics["itm_rate"].as_f64().unwrap(), 0.0);
    assert_eq!(metrics["cost_per_cash"].as_f64().unwrap(), 0.0);
    assert_eq!(body["history"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_unknown_player_is_404() {
    let test_app = setup_test_app().await;

    let (status, body) = get(test_app.app.clone(), "/v1/players/999/stats").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("999"));
}

#[tokio::test]
async fn test_history_carries_per_entry_financials() {
    let test_app = setup_test_app().await;

    let ada = test_app.state.repo.insert_player("Ada").await.unwrap();
    let t1 = seed_tournament(&test_app, "Week 1", "2024-03-01", "10").await;
    let t2 = seed_tournament(&test_app, "Week 2", "2024-03-08", "10").await;

    test_app
        .state
        .repo
        .upsert_participation(t1, ada, 1, dec("10"), dec("5"), Some(3))
        .await
        .unwrap();
    test_app
        .state
        .repo
        .upsert_participation(t2, ada, 0, dec("0"), dec("40"), Some(1))
        .await
        .unwrap();

    let uri = format!("/v1/players/{}/stats", ada.as_i64());
    let (status, body) = get(test_app.app.clone(), &uri).await;
    assert_eq!(status, StatusCode::OK);

    let history = body["history"].as_array().unwrap();
    assert_eq!(history.len(), 2);

    // Oldest tournament first.
    assert_eq!(history[0]["tournament_id"], t1.as_i64());
    assert_eq!(history[0]["total_cost"].as_f64().unwrap(), 20.0);
    assert_eq!(history[0]["net_result"].as_f64().unwrap(), -15.0);

    assert_eq!(history[1]["tournament_id"], t2.as_i64());
    assert_eq!(history[1]["total_cost"].as_f64().unwrap(), 10.0);
    assert_eq!(history[1]["net_result"].as_f64().unwrap(), 30.0);
}

#[tokio::test]
async fn test_list_and_create_players() {
    let test_app = setup_test_app().await;

    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/v1/players")
        .header("content-type", "application/json")
        .body(axum::body::Body::from(
            serde_json::json!({"display_name": "Ada"}).to_string(),
        ))
        .unwrap();
    let res = test_app.app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let (status, body) = get(test_app.app.clone(), "/v1/players").await;
    assert_eq!(status, StatusCode::OK);
    let players = body.as_array().unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0]["display_name"], "Ada");
}

#[tokio::test]
async fn test_duplicate_display_name_is_400() {
    let test_app = setup_test_app().await;
    test_app.state.repo.insert_player("Ada").await.unwrap();

    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/v1/players")
        .header("content-type", "application/json")
        .body(axum::body::Body::from(
            serde_json::json!({"display_name": "Ada"}).to_string(),
        ))
        .unwrap();
    let res = test_app.app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_metrics_registry_endpoint() {
    let test_app = setup_test_app().await;

    let (status, body) = get(test_app.app.clone(), "/v1/metrics").await;
    assert_eq!(status, StatusCode::OK);

    let infos = body.as_array().unwrap();
    assert_eq!(infos.len(), 20);

    let roi = infos.iter().find(|i| i["name"] == "roi").unwrap();
    assert_eq!(roi["unit"], "percentage");
    assert!(!roi["label"].as_str().unwrap().is_empty());
    assert!(!roi["description"].as_str().unwrap().is_empty());

    let spent = infos.iter().find(|i| i["name"] == "total_spent").unwrap();
    assert_eq!(spent["unit"], "currency");
}
