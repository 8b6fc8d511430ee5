use bff_service::{create_router, AppState};
use shared::{BackendConfig, ServiceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    shared::init_tracing("bff-service")?;

    let service_config = ServiceConfig::from_env(3100, 9094)?;
    let backend_config = BackendConfig::from_env()?;

    shared::init_metrics(service_config.metrics_port)?;

    tracing::info!("BFF Service starting...");
    tracing::info!("Configuration:");
    tracing::info!("  Puzzle catalog URL: {}", backend_config.puzzle_url);
    tracing::info!("  Active game store URL: {}", backend_config.user_active_games_url);
    tracing::info!(
        "  Game statistics store URL: {}",
        backend_config.user_game_statistics_url
    );
    tracing::info!("  Backend timeout: {}ms", backend_config.timeout_ms);

    let state = AppState::from_config(&backend_config)?;
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{}", service_config.port)).await {
        Ok(l) => {
            tracing::info!("BFF Service listening on {}", l.local_addr()?);
            l
        }
        Err(e) => {
            tracing::error!("Failed to bind BFF Service: {}", e);
            return Err(e.into());
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shared::shutdown().await;
    tracing::info!("BFF Service stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
