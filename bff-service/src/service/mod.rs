pub mod game_session_service;
pub mod statistics_service;

pub use game_session_service::{GameSessionService, StartGameRequest};
pub use statistics_service::{StatisticsService, UpsertCodes, UpsertOutcome};
