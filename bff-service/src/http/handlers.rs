use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use shared::errors::{ErrorCode, Result, ServiceError};
use shared::{ActiveGamePatch, GameSummary, Puzzle};

use super::auth::AuthenticatedUser;
use crate::service::StartGameRequest;
use crate::state::AppState;

/// `POST /api/v1/user/newGame?difficulty=&closestDifficulty=&learnedStrategies=`
pub async fn start_game(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    params: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Value>> {
    let Query(params) = params.map_err(|e| reject(e, ErrorCode::StartGameInvalidDifficulty))?;
    let request = parse_start_game_params(&params)?;

    let created = state
        .sessions
        .start_game(&user.user_id, &user.token, request)
        .await?;

    Ok(Json(created))
}

/// `GET /api/v1/user/activeGames`
pub async fn get_game(State(state): State<AppState>, user: AuthenticatedUser) -> Result<Json<Value>> {
    let games = state.sessions.get_game(&user.user_id, &user.token).await?;
    Ok(Json(games))
}

/// `PATCH /api/v1/user/activeGames/{puzzle}`
pub async fn save_game(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(puzzle): Path<String>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(body) = body.map_err(|e| reject(e, ErrorCode::SaveGameInvalidGame))?;
    let patch = ActiveGamePatch::from_json(body)
        .ok_or_else(|| ServiceError::invalid_request(ErrorCode::SaveGameInvalidGame))?;

    let saved = state
        .sessions
        .save_game(&user.user_id, &puzzle, &patch, &user.token)
        .await?;
    Ok(Json(saved))
}

#[derive(Debug, Deserialize)]
pub struct EndGameParams {
    puzzle: Option<String>,
}

/// `PATCH /api/v1/user/endGame?puzzle=`
pub async fn end_game(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    params: std::result::Result<Query<EndGameParams>, QueryRejection>,
) -> Result<Json<GameSummary>> {
    let Query(params) = params.map_err(|e| reject(e, ErrorCode::EndGameInvalidPuzzle))?;
    let puzzle = params
        .puzzle
        .ok_or_else(|| ServiceError::invalid_request(ErrorCode::EndGameInvalidPuzzle))?;

    let summary = state
        .sessions
        .end_game(&user.user_id, &puzzle, &user.token)
        .await?;
    Ok(Json(summary))
}

#[derive(Debug, Deserialize)]
pub struct DrillParams {
    strategy: Option<String>,
}

/// `GET /api/v1/user/drill?strategy=`
pub async fn get_drill(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    params: std::result::Result<Query<DrillParams>, QueryRejection>,
) -> Result<Json<Vec<Puzzle>>> {
    let Query(params) = params.map_err(|e| reject(e, ErrorCode::GetDrillInvalidStrategy))?;
    let strategy = params
        .strategy
        .ok_or_else(|| ServiceError::invalid_request(ErrorCode::GetDrillInvalidStrategy))?;

    let puzzles = state.sessions.get_drill(&strategy, &user.token).await?;
    Ok(Json(puzzles))
}

pub async fn health_check() -> &'static str {
    "OK"
}

/// Extractor failures are client input errors reported in the usual error shape.
fn reject(rejection: impl std::fmt::Display, code: ErrorCode) -> ServiceError {
    tracing::debug!(code = %code, error = %rejection, "Rejected malformed request");
    ServiceError::invalid_request(code)
}

/// Turns raw start-game query pairs into a request.
///
/// `learnedStrategies` may be repeated (with or without a `[]` suffix), comma
/// separated, or a JSON array. A present but non-numeric difficulty is
/// rejected here; range checks belong to the workflow.
fn parse_start_game_params(params: &[(String, String)]) -> Result<StartGameRequest> {
    let mut request = StartGameRequest::default();

    for (key, value) in params {
        match key.as_str() {
            "difficulty" => request.difficulty = Some(parse_difficulty(value)?),
            "closestDifficulty" => request.closest_difficulty = Some(parse_difficulty(value)?),
            "learnedStrategies" | "learnedStrategies[]" => {
                request.learned_strategies.extend(parse_strategy_list(value))
            }
            _ => {}
        }
    }

    Ok(request)
}

fn parse_difficulty(value: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| ServiceError::invalid_request(ErrorCode::StartGameInvalidDifficulty))
}

fn parse_strategy_list(value: &str) -> Vec<String> {
    let value = value.trim();

    if value.starts_with('[') {
        if let Ok(list) = serde_json::from_str::<Vec<String>>(value) {
            return list;
        }
    }

    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
