pub mod auth;
pub mod handlers;

use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub use auth::AuthenticatedUser;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/user/newGame", post(handlers::start_game))
        .route("/api/v1/user/activeGames", get(handlers::get_game))
        .route("/api/v1/user/activeGames/{puzzle}", patch(handlers::save_game))
        .route("/api/v1/user/endGame", patch(handlers::end_game))
        .route("/api/v1/user/drill", get(handlers::get_drill))
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
