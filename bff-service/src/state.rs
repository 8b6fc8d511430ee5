use std::sync::Arc;

use shared::errors::Result;
use shared::BackendConfig;

use crate::backend_client::{
    build_http_client, ActiveGameStoreClient, BackendClient, PuzzleCatalogClient,
    StatisticsStoreClient,
};
use crate::clock::{Clock, SystemClock};
use crate::service::{GameSessionService, StatisticsService};

#[derive(Clone)]
pub struct AppState {
    pub sessions: GameSessionService,
}

impl AppState {
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Wires the three backend clients onto one shared connection pool.
    pub fn with_clock(config: &BackendConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let http = build_http_client(config.timeout_ms)?;

        let puzzles = PuzzleCatalogClient::new(BackendClient::new(
            http.clone(),
            "puzzles",
            &config.puzzle_url,
        ));
        let active_games = ActiveGameStoreClient::new(BackendClient::new(
            http.clone(),
            "user_active_games",
            &config.user_active_games_url,
        ));
        let statistics = StatisticsService::new(StatisticsStoreClient::new(BackendClient::new(
            http,
            "user_game_statistics",
            &config.user_game_statistics_url,
        )));

        Ok(Self {
            sessions: GameSessionService::new(puzzles, active_games, statistics, clock),
        })
    }
}
