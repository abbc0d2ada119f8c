use crate::errors::{ServiceError, ServiceResult};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    /// Directory holding one `<championship>.json` calendar per league
    pub data_dir: PathBuf,
    /// Flat JSON user database (read-only here)
    pub user_database: PathBuf,
    pub championships: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> ServiceResult<Self> {
        dotenvy::dotenv().ok();

        let server_port = env_var_or("SERVER_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ServiceError::Config(format!("SERVER_PORT: {e}")))?;

        let championships: Vec<String> =
            env_var_or("CHAMPIONSHIPS", "English Premier League,France Ligue 1")
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        if championships.is_empty() {
            return Err(ServiceError::Config("CHAMPIONSHIPS is empty".into()));
        }

        Ok(Self {
            server_port,
            data_dir: PathBuf::from(env_var_or("DATA_DIR", "data/calendars")),
            user_database: PathBuf::from(env_var_or("USER_DATABASE", "data/users.json")),
            championships,
        })
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
