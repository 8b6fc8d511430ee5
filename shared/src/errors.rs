use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Status reported when a backend call never produced a response.
pub const TRANSPORT_FAILURE_STATUS: u16 = 500;

/// Identifies which step of which workflow failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NoTokenProvided,
    InvalidToken,
    StartGameInvalidDifficulty,
    StartGameDeleteOldActiveGamesFailed,
    StartGameGetPuzzleFailed,
    StartGameCreateActiveGameFailed,
    GetGameGetActiveGameFailed,
    SaveGameInvalidGame,
    SaveGamePatchActiveGameFailed,
    EndGameInvalidPuzzle,
    EndGameGetActiveGameFailed,
    EndGameGetTotalStatisticsFailed,
    EndGameCreateTotalStatisticsFailed,
    EndGameUpdateTotalStatisticsFailed,
    EndGameGetDailyStatisticsFailed,
    EndGameCreateDailyStatisticsFailed,
    EndGameUpdateDailyStatisticsFailed,
    EndGameDeleteActiveGameFailed,
    GetDrillInvalidStrategy,
    GetDrillFailed,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NoTokenProvided => "NO_TOKEN_PROVIDED",
            ErrorCode::InvalidToken => "INVALID_TOKEN",
            ErrorCode::StartGameInvalidDifficulty => "START_GAME_INVALID_DIFFICULTY",
            ErrorCode::StartGameDeleteOldActiveGamesFailed => {
                "START_GAME_DELETE_OLD_ACTIVE_GAMES_FAILED"
            }
            ErrorCode::StartGameGetPuzzleFailed => "START_GAME_GET_PUZZLE_FAILED",
            ErrorCode::StartGameCreateActiveGameFailed => "START_GAME_CREATE_ACTIVE_GAME_FAILED",
            ErrorCode::GetGameGetActiveGameFailed => "GET_GAME_GET_ACTIVE_GAME_FAILED",
            ErrorCode::SaveGameInvalidGame => "SAVE_GAME_INVALID_GAME",
            ErrorCode::SaveGamePatchActiveGameFailed => "SAVE_GAME_PATCH_ACTIVE_GAME_FAILED",
            ErrorCode::EndGameInvalidPuzzle => "END_GAME_INVALID_PUZZLE",
            ErrorCode::EndGameGetActiveGameFailed => "END_GAME_GET_ACTIVE_GAME_FAILED",
            ErrorCode::EndGameGetTotalStatisticsFailed => "END_GAME_GET_TOTAL_STATISTICS_FAILED",
            ErrorCode::EndGameCreateTotalStatisticsFailed => {
                "END_GAME_CREATE_TOTAL_STATISTICS_FAILED"
            }
            ErrorCode::EndGameUpdateTotalStatisticsFailed => {
                "END_GAME_UPDATE_TOTAL_STATISTICS_FAILED"
            }
            ErrorCode::EndGameGetDailyStatisticsFailed => "END_GAME_GET_DAILY_STATISTICS_FAILED",
            ErrorCode::EndGameCreateDailyStatisticsFailed => {
                "END_GAME_CREATE_DAILY_STATISTICS_FAILED"
            }
            ErrorCode::EndGameUpdateDailyStatisticsFailed => {
                "END_GAME_UPDATE_DAILY_STATISTICS_FAILED"
            }
            ErrorCode::EndGameDeleteActiveGameFailed => "END_GAME_DELETE_ACTIVE_GAME_FAILED",
            ErrorCode::GetDrillInvalidStrategy => "GET_DRILL_INVALID_STRATEGY",
            ErrorCode::GetDrillFailed => "GET_DRILL_FAILED",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::NoTokenProvided => "No token provided",
            ErrorCode::InvalidToken => "Invalid token",
            ErrorCode::StartGameInvalidDifficulty => "Invalid difficulty provided",
            ErrorCode::StartGameDeleteOldActiveGamesFailed => {
                "The deletion of old active games failed"
            }
            ErrorCode::StartGameGetPuzzleFailed => "The retrieval of a new puzzle failed",
            ErrorCode::StartGameCreateActiveGameFailed => "The creation of a new active game failed",
            ErrorCode::GetGameGetActiveGameFailed => "The retrieval of the active game failed",
            ErrorCode::SaveGameInvalidGame => "Invalid game progress provided",
            ErrorCode::SaveGamePatchActiveGameFailed => "The update of the active game failed",
            ErrorCode::EndGameInvalidPuzzle => "Invalid puzzle provided",
            ErrorCode::EndGameGetActiveGameFailed => "The retrieval of the active game failed",
            ErrorCode::EndGameGetTotalStatisticsFailed => {
                "The retrieval of lifetime game statistics failed"
            }
            ErrorCode::EndGameCreateTotalStatisticsFailed => {
                "The creation of lifetime game statistics failed"
            }
            ErrorCode::EndGameUpdateTotalStatisticsFailed => {
                "The update of lifetime game statistics failed"
            }
            ErrorCode::EndGameGetDailyStatisticsFailed => {
                "The retrieval of daily game statistics failed"
            }
            ErrorCode::EndGameCreateDailyStatisticsFailed => {
                "The creation of daily game statistics failed"
            }
            ErrorCode::EndGameUpdateDailyStatisticsFailed => {
                "The update of daily game statistics failed"
            }
            ErrorCode::EndGameDeleteActiveGameFailed => "The deletion of the active game failed",
            ErrorCode::GetDrillInvalidStrategy => "Invalid drill strategy provided",
            ErrorCode::GetDrillFailed => "The retrieval of a drill puzzle failed",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{}: upstream status {status}", code.message())]
    Upstream { code: ErrorCode, status: u16 },

    #[error("{}", code.message())]
    InvalidRequest { code: ErrorCode },

    #[error("{}", code.message())]
    Unauthorized { code: ErrorCode },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn upstream(code: ErrorCode, status: u16) -> Self {
        ServiceError::Upstream { code, status }
    }

    pub fn transport(code: ErrorCode) -> Self {
        ServiceError::Upstream {
            code,
            status: TRANSPORT_FAILURE_STATUS,
        }
    }

    pub fn invalid_request(code: ErrorCode) -> Self {
        ServiceError::InvalidRequest { code }
    }

    pub fn unauthorized(code: ErrorCode) -> Self {
        ServiceError::Unauthorized { code }
    }

    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ServiceError::Upstream { code, .. }
            | ServiceError::InvalidRequest { code }
            | ServiceError::Unauthorized { code } => Some(*code),
            ServiceError::Internal(_) => None,
        }
    }

    /// Status reported to the client.
    pub fn status(&self) -> u16 {
        match self {
            ServiceError::Upstream { status, .. } => *status,
            ServiceError::InvalidRequest { .. } => 400,
            ServiceError::Unauthorized { .. } => 401,
            ServiceError::Internal(_) => 500,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
    status: u16,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            code: self.code().map(|c| c.as_str()).unwrap_or("UNKNOWN_ERROR"),
            message: match &self {
                ServiceError::Internal(_) => "Unknown error".to_string(),
                other => other
                    .code()
                    .map(|c| c.message().to_string())
                    .unwrap_or_else(|| other.to_string()),
            },
            status,
        };

        // Upstream statuses outside the valid HTTP range cannot be echoed back.
        let http_status =
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (http_status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
