pub mod config;
pub mod errors;
pub mod telemetry;
pub mod types;

pub use config::{BackendConfig, ServiceConfig};
pub use errors::{ErrorCode, Result, ServiceError, TRANSPORT_FAILURE_STATUS};
pub use telemetry::{
    init_metrics, init_tracing, record_backend_timing, record_counter, record_timing, shutdown,
};
pub use types::{
    ActiveGame, ActiveGamePatch, BearerToken, CompletedSession, DateRange, GameSummary, Puzzle,
    StatisticsRecord, UserId,
};
