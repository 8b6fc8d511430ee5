use shared::errors::{ErrorCode, Result, ServiceError};
use shared::{BearerToken, Puzzle};

use super::transport::{BackendClient, BackendRequest};
use crate::domain::DifficultyWindow;

const PUZZLES_PATH: &str = "/api/v1/puzzles";

#[derive(Debug, Clone)]
pub struct PuzzleCatalogClient {
    backend: BackendClient,
}

impl PuzzleCatalogClient {
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }

    /// One random puzzle inside `window` that needs none of `exclude_strategies`.
    pub async fn find_random_puzzle(
        &self,
        window: DifficultyWindow,
        exclude_strategies: &[&str],
        token: &BearerToken,
        code: ErrorCode,
    ) -> Result<Puzzle> {
        let request = BackendRequest::get(PUZZLES_PATH)
            .query("minDifficulty", window.min)
            .query("maxDifficulty", window.max)
            .query_all("excludeStrategies[]", exclude_strategies)
            .query("count", 1)
            .query("random", true);

        let puzzles: Vec<Puzzle> = self.backend.call(request, token, code).await?;

        puzzles.into_iter().next().ok_or_else(|| {
            tracing::warn!(
                min_difficulty = window.min,
                max_difficulty = window.max,
                excluded = exclude_strategies.len(),
                "No puzzle matched the selection criteria"
            );
            ServiceError::upstream(code, 404)
        })
    }

    /// Random puzzles exercising `strategy`, as returned by the catalog (never empty).
    pub async fn find_drill_puzzles(
        &self,
        strategy: &str,
        token: &BearerToken,
        code: ErrorCode,
    ) -> Result<Vec<Puzzle>> {
        let request = BackendRequest::get(PUZZLES_PATH)
            .query("drillStrategies[]", strategy)
            .query("count", 1)
            .query("random", true);

        let puzzles: Vec<Puzzle> = self.backend.call(request, token, code).await?;

        if puzzles.is_empty() {
            tracing::warn!(strategy = strategy, "No drill puzzle found");
            return Err(ServiceError::upstream(code, 404));
        }

        Ok(puzzles)
    }
}
