pub mod backend_client;
pub mod clock;
pub mod domain;
pub mod http;
pub mod service;
pub mod state;

pub use http::create_router;
pub use service::{GameSessionService, StartGameRequest, StatisticsService};
pub use state::AppState;
