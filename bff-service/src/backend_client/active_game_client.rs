use shared::errors::{ErrorCode, Result, ServiceError};
use shared::{ActiveGame, ActiveGamePatch, BearerToken, UserId};

use super::transport::{BackendClient, BackendRequest};

const ACTIVE_GAMES_PATH: &str = "/api/v1/user/activeGames";

#[derive(Debug, Clone)]
pub struct ActiveGameStoreClient {
    backend: BackendClient,
}

impl ActiveGameStoreClient {
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }

    pub async fn delete_all_for_user(
        &self,
        user_id: &UserId,
        token: &BearerToken,
        code: ErrorCode,
    ) -> Result<()> {
        let request = BackendRequest::delete(ACTIVE_GAMES_PATH).query("userID", user_id);
        self.backend.call_no_content(request, token, code).await
    }

    pub async fn delete_game(
        &self,
        user_id: &UserId,
        puzzle: &str,
        token: &BearerToken,
        code: ErrorCode,
    ) -> Result<()> {
        let request = BackendRequest::delete(ACTIVE_GAMES_PATH)
            .query("userID", user_id)
            .query("puzzle", puzzle);
        self.backend.call_no_content(request, token, code).await
    }

    /// Inserts `game`; the store takes a batch and echoes the created records.
    pub async fn create_game(
        &self,
        game: &ActiveGame,
        token: &BearerToken,
        code: ErrorCode,
    ) -> Result<serde_json::Value> {
        let request = BackendRequest::post(ACTIVE_GAMES_PATH).json(&[game])?;
        self.backend.call(request, token, code).await
    }

    pub async fn find_games_for_user(
        &self,
        user_id: &UserId,
        token: &BearerToken,
        code: ErrorCode,
    ) -> Result<serde_json::Value> {
        let request = BackendRequest::get(ACTIVE_GAMES_PATH).query("userID", user_id);
        self.backend.call(request, token, code).await
    }

    /// The user's game for `puzzle`; an empty result is reported as a 404 under `code`.
    pub async fn find_game(
        &self,
        user_id: &UserId,
        puzzle: &str,
        token: &BearerToken,
        code: ErrorCode,
    ) -> Result<ActiveGame> {
        let request = BackendRequest::get(ACTIVE_GAMES_PATH)
            .query("userID", user_id)
            .query("puzzle", puzzle);

        let games: Vec<ActiveGame> = self.backend.call(request, token, code).await?;

        games
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::upstream(code, 404))
    }

    pub async fn update_game(
        &self,
        user_id: &UserId,
        puzzle: &str,
        patch: &ActiveGamePatch,
        token: &BearerToken,
        code: ErrorCode,
    ) -> Result<serde_json::Value> {
        let request = BackendRequest::patch(ACTIVE_GAMES_PATH)
            .query("userID", user_id)
            .query("puzzle", puzzle)
            .json(patch)?;
        self.backend.call(request, token, code).await
    }
}
