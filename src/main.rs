use meal_planner::config::{mask_secret, AppConfig};
use meal_planner::orchestrator::RecipeGenerator;
use meal_planner::routes::{router, AppState};
use meal_planner::usage::UsageTracker;
use meal_planner::youtube::YouTubeClient;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Init tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = AppConfig::from_env();
    match &config.gemini_api_key {
        Some(key) => tracing::info!("Using Gemini API key: {}", mask_secret(key)),
        None => tracing::warn!("GEMINI_API_KEY not set, Gemini stages will be skipped"),
    }

    let state = AppState {
        generator: Arc::new(RecipeGenerator::from_config(&config)?),
        videos: Arc::new(YouTubeClient::from_config(&config)?),
        usage: Arc::new(UsageTracker::default()),
    };

    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
