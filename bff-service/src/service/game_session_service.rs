use std::sync::Arc;
use std::time::Instant;

use shared::errors::{ErrorCode, Result, ServiceError};
use shared::{
    ActiveGame, ActiveGamePatch, BearerToken, CompletedSession, DateRange, GameSummary, Puzzle,
    UserId,
};

use crate::backend_client::{ActiveGameStoreClient, PuzzleCatalogClient};
use crate::clock::Clock;
use crate::domain::difficulty::{MAX_CATALOG_DIFFICULTY, MIN_CATALOG_DIFFICULTY};
use crate::domain::{self, DifficultyWindow};
use crate::service::{StatisticsService, UpsertOutcome};

/// Parameters of a start-game request, as received from the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartGameRequest {
    pub difficulty: Option<i64>,
    pub closest_difficulty: Option<i64>,
    pub learned_strategies: Vec<String>,
}

/// Runs the start / fetch / save / end / drill workflows against the three stores.
///
/// Backend calls within a workflow are strictly sequential and the first
/// failure aborts the rest; nothing already written is rolled back.
#[derive(Clone)]
pub struct GameSessionService {
    puzzles: PuzzleCatalogClient,
    active_games: ActiveGameStoreClient,
    statistics: StatisticsService,
    clock: Arc<dyn Clock>,
}

impl GameSessionService {
    pub fn new(
        puzzles: PuzzleCatalogClient,
        active_games: ActiveGameStoreClient,
        statistics: StatisticsService,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            puzzles,
            active_games,
            statistics,
            clock,
        }
    }

    #[tracing::instrument(skip(self, token, request), fields(user_id = %user_id))]
    pub async fn start_game(
        &self,
        user_id: &UserId,
        token: &BearerToken,
        request: StartGameRequest,
    ) -> Result<serde_json::Value> {
        shared::record_counter("bff.start_game.requests", 1);
        let start = Instant::now();

        let difficulty = request
            .difficulty
            .filter(|d| (MIN_CATALOG_DIFFICULTY..=MAX_CATALOG_DIFFICULTY).contains(d))
            .ok_or_else(|| {
                tracing::warn!(difficulty = ?request.difficulty, "Rejected start-game difficulty");
                ServiceError::invalid_request(ErrorCode::StartGameInvalidDifficulty)
            })?;

        let window = DifficultyWindow::around(request.closest_difficulty.unwrap_or(difficulty));
        let exclude = domain::strategies_to_exclude(request.learned_strategies.as_slice());

        self.active_games
            .delete_all_for_user(user_id, token, ErrorCode::StartGameDeleteOldActiveGamesFailed)
            .await?;

        let puzzle = self
            .puzzles
            .find_random_puzzle(window, &exclude, token, ErrorCode::StartGameGetPuzzleFailed)
            .await?;

        let game = ActiveGame::from_puzzle(user_id, puzzle);
        let created = self
            .active_games
            .create_game(&game, token, ErrorCode::StartGameCreateActiveGameFailed)
            .await?;

        tracing::info!(
            puzzle_difficulty = game.difficulty,
            min_difficulty = window.min,
            max_difficulty = window.max,
            excluded_strategies = exclude.len(),
            "Game started"
        );
        shared::record_timing("bff.start_game.duration", start.elapsed().as_secs_f64());

        Ok(created)
    }

    /// The store's list of the user's games, unchanged.
    pub async fn get_game(&self, user_id: &UserId, token: &BearerToken) -> Result<serde_json::Value> {
        self.active_games
            .find_games_for_user(user_id, token, ErrorCode::GetGameGetActiveGameFailed)
            .await
    }

    #[tracing::instrument(skip(self, token, patch), fields(user_id = %user_id))]
    pub async fn save_game(
        &self,
        user_id: &UserId,
        puzzle: &str,
        patch: &ActiveGamePatch,
        token: &BearerToken,
    ) -> Result<serde_json::Value> {
        let saved = self
            .active_games
            .update_game(
                user_id,
                puzzle,
                patch,
                token,
                ErrorCode::SaveGamePatchActiveGameFailed,
            )
            .await?;

        tracing::debug!("Game progress saved");

        Ok(saved)
    }

    /// Scores the game, folds it into lifetime then daily statistics, then deletes it.
    #[tracing::instrument(skip(self, token), fields(user_id = %user_id))]
    pub async fn end_game(
        &self,
        user_id: &UserId,
        puzzle: &str,
        token: &BearerToken,
    ) -> Result<GameSummary> {
        shared::record_counter("bff.end_game.requests", 1);
        let start = Instant::now();

        if puzzle.trim().is_empty() {
            return Err(ServiceError::invalid_request(ErrorCode::EndGameInvalidPuzzle));
        }

        let game = self
            .active_games
            .find_game(user_id, puzzle, token, ErrorCode::EndGameGetActiveGameFailed)
            .await?;

        let score = domain::score(
            game.difficulty,
            game.num_wrong_cells_played,
            game.num_hints_used,
            game.current_time,
        );

        let session = CompletedSession {
            score,
            solve_time: game.current_time,
            num_hints_used: game.num_hints_used,
            num_wrong_cells_played: game.num_wrong_cells_played,
        };

        let lifetime = self
            .statistics
            .record_session(user_id, DateRange::Lifetime, &session, token)
            .await?;

        let today = DateRange::Day(self.clock.today());
        let daily = self
            .statistics
            .record_session(user_id, today, &session, token)
            .await?;

        if daily == UpsertOutcome::Created {
            shared::record_counter("bff.statistics.first_game_of_day", 1);
        }

        self.active_games
            .delete_game(user_id, puzzle, token, ErrorCode::EndGameDeleteActiveGameFailed)
            .await?;

        tracing::info!(
            score = score,
            solve_time = game.current_time,
            difficulty = game.difficulty,
            lifetime = ?lifetime,
            daily = ?daily,
            "Game ended"
        );
        shared::record_timing("bff.end_game.duration", start.elapsed().as_secs_f64());

        Ok(GameSummary {
            difficulty: game.difficulty,
            score,
            solve_time: game.current_time,
            num_hints_used: game.num_hints_used,
            num_wrong_cells_played: game.num_wrong_cells_played,
        })
    }

    pub async fn get_drill(&self, strategy: &str, token: &BearerToken) -> Result<Vec<Puzzle>> {
        if !domain::is_canonical(strategy) {
            return Err(ServiceError::invalid_request(ErrorCode::GetDrillInvalidStrategy));
        }

        self.puzzles
            .find_drill_puzzles(strategy, token, ErrorCode::GetDrillFailed)
            .await
    }
}
