use std::env;

use crate::errors::{Result, ServiceError};

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    pub metrics_port: u16,
}

impl ServiceConfig {
    pub fn from_env(default_port: u16, default_metrics_port: u16) -> Result<Self> {
        Ok(Self {
            port: env::var("BFF_PORT")
                .unwrap_or_else(|_| default_port.to_string())
                .parse()
                .map_err(|e| ServiceError::Internal(format!("Invalid BFF_PORT: {}", e)))?,
            metrics_port: env::var("METRICS_PORT")
                .unwrap_or_else(|_| default_metrics_port.to_string())
                .parse()
                .map_err(|e| ServiceError::Internal(format!("Invalid METRICS_PORT: {}", e)))?,
        })
    }
}

/// Base URLs and call limits for the three downstream services.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub puzzle_url: String,
    pub user_active_games_url: String,
    pub user_game_statistics_url: String,
    pub timeout_ms: u64,
}

impl BackendConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            puzzle_url: required("PUZZLE_URL")?,
            user_active_games_url: required("USER_ACTIVE_GAMES_URL")?,
            user_game_statistics_url: required("USER_GAME_STATISTICS_URL")?,
            timeout_ms: env::var("BACKEND_TIMEOUT_MS")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .map_err(|e| {
                    ServiceError::Internal(format!("Invalid BACKEND_TIMEOUT_MS: {}", e))
                })?,
        })
    }
}

fn required(name: &str) -> Result<String> {
    let value = env::var(name)
        .map_err(|_| ServiceError::Internal(format!("{} not set", name)))?;

    if value.trim().is_empty() {
        return Err(ServiceError::Internal(format!("{} is empty", name)));
    }

    Ok(value.trim_end_matches('/').to_string())
}
