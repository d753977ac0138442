use crate::config::Config;
use crate::dispatch::NotificationService;
use crate::errors::AppError;
use crate::models::{Lead, RelayResponse, StoreLeadRequest};
use crate::store::LeadStore;
use crate::webhook_handler;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// In-memory lead store, keyed by email.
    pub store: LeadStore,
    /// Outbound confirmation dispatcher (SendGrid + Twilio).
    pub notifier: NotificationService,
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "lead-relay-api",
            "version": "0.1.0"
        })),
    )
}

/// POST /api/store-lead
///
/// Validates that `name` and `email` are present and non-empty, then stores
/// the lead under its email. Repeated submissions for the same email
/// silently overwrite the prior entry.
pub async fn store_lead(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StoreLeadRequest>,
) -> Result<Json<RelayResponse>, AppError> {
    let name = request.name.unwrap_or_default();
    let email = request.email.unwrap_or_default();

    if name.is_empty() || email.is_empty() {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    }

    let lead = Lead {
        name,
        phone: request.phone,
        business: request.business,
        stored_at: Utc::now(),
    };
    tracing::debug!(
        "Lead details: name={}, phone={:?}, business={:?}",
        lead.name,
        lead.phone,
        lead.business
    );
    state.store.put(&email, lead).await;

    tracing::info!("Stored lead: {}", email);
    Ok(Json(RelayResponse::ok()))
}

/// Builds the application router.
///
/// Kept separate from `main` so tests can drive the app in-process.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/store-lead", post(store_lead))
        .route("/webhook/calendly", post(webhook_handler::calendly_webhook))
        // 1MB request body cap
        .layer(ServiceBuilder::new().layer(RequestBodyLimitLayer::new(1024 * 1024)))
        .with_state(state)
}
