use crate::stats::MetricKey;
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    /// Metric the leaderboard sorts by when the request names none.
    pub default_leaderboard_metric: MetricKey,
    /// Directory of demo-data CSVs loaded into an empty database at startup.
    pub seed_dir: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let database_path = env_map
            .get("DATABASE_PATH")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("DATABASE_PATH".to_string()))?;

        let default_leaderboard_metric = MetricKey::from_str(
            env_map
                .get("DEFAULT_LEADERBOARD_METRIC")
                .map(|s| s.as_str())
                .unwrap_or("net_profit"),
        )
        .map_err(|e| {
            ConfigError::InvalidValue(
                "DEFAULT_LEADERBOARD_METRIC".to_string(),
                format!("must be a registered metric name, got {}", e.0),
            )
        })?;

        let seed_dir = env_map.get("SEED_DIR").cloned().filter(|s| !s.is_empty());

        Ok(Config {
            port,
            database_path,
            default_leaderboard_metric,
            seed_dir,
        })
    }
}
