//! sentiscope-dash - Sentiment Analytics Dashboard
//!
//! Serves the browser dashboard and JSON API, forwards analysis requests
//! to the external sentiment service, and holds the ephemeral view state
//! (latest result + current filter).

use anyhow::Result;
use clap::Parser;
use sentiscope_common::config::DashboardConfig;
use sentiscope_common::events::EventBus;
use sentiscope_dash::services::SentimentClient;
use sentiscope_dash::AppState;
use tracing::{info, warn};

/// Command-line options (highest-priority configuration tier)
#[derive(Debug, Parser)]
#[command(name = "sentiscope-dash", version, about = "Sentiment analytics dashboard")]
struct Cli {
    /// Base URL of the sentiment analysis service
    #[arg(long)]
    backend_url: Option<String>,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Build identification logged immediately after tracing init
    info!(
        "Starting SentiScope Dashboard (sentiscope-dash) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    // Resolve configuration: CLI > env > config.toml > defaults
    let config = DashboardConfig::resolve(cli.backend_url.as_deref(), cli.port);
    info!("Sentiment service: {}", config.backend_url);

    let client = SentimentClient::new(config.backend_url.clone())
        .map_err(|e| anyhow::anyhow!("Failed to create sentiment service client: {}", e))?;

    // Connectivity probe is informational; the dashboard starts either way
    if client.probe().await {
        info!("✓ Sentiment service reachable");
    } else {
        warn!(
            "Sentiment service not reachable at {} (analyses will fail until it is up)",
            config.backend_url
        );
    }

    let event_bus = EventBus::new(100);
    let state = AppState::new(client, event_bus);
    let app = sentiscope_dash::build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", config.port)).await?;
    info!("sentiscope-dash listening on http://127.0.0.1:{}", config.port);
    info!("Health check: http://127.0.0.1:{}/health", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
