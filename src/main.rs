use railbird::seed::seed_from_dir;
use railbird::{api, config::Config, db::init_db, Repository};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let port = config.port;

    // Initialize database
    let pool = match init_db(&config.database_path).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    let repo = Arc::new(Repository::new(pool));

    // Optionally load demo data into an empty database
    if let Some(dir) = config.seed_dir.clone() {
        match seed_from_dir(&repo, Path::new(&dir)).await {
            Ok(Some(report)) => tracing::info!(
                "Loaded seed data from {}: {} players, {} tournaments, {} results",
                dir,
                report.players,
                report.tournaments,
                report.results
            ),
            Ok(None) => tracing::info!("Database already populated, skipping seed from {}", dir),
            Err(e) => {
                eprintln!("Failed to seed database from {}: {}", dir, e);
                std::process::exit(1);
            }
        }
    }

    // Create router
    let app = api::create_router(api::AppState::new(repo, config));

    // Bind to address
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Server listening on {}", addr);

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
