mod config;
mod dispatch;
mod errors;
mod handlers;
mod models;
mod services;
mod store;
mod webhook_handler;
mod webhook_models;

use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::dispatch::NotificationService;
use crate::handlers::AppState;
use crate::store::LeadStore;

/// Main entry point for the application.
///
/// Initializes tracing, loads configuration from the environment, builds
/// the in-memory lead store and the notification clients, then starts the
/// Axum server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lead_relay_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    // Leads live here until a booking event consumes them
    let store = LeadStore::new();
    tracing::info!("In-memory lead store initialized");

    // Initialize SendGrid and Twilio clients
    let notifier = NotificationService::new(&config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize notification clients: {}", e))?;
    tracing::info!("Notification clients initialized");

    // Build application state
    let app_state = Arc::new(AppState {
        config: config.clone(),
        store,
        notifier,
    });

    let app = handlers::router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
