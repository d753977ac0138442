use crate::errors::AppError;
use crate::handlers::AppState;
use crate::models::RelayResponse;
use crate::webhook_models::CalendlyEvent;
use axum::{extract::State, Json};
use std::sync::Arc;

/// Calendly Webhook Handler
///
/// Receives booking events from Calendly. Only `invitee.created` events
/// trigger any work: the invitee email is correlated against the lead
/// store and, on a hit, the confirmation message is dispatched over email
/// plus SMS/WhatsApp. The consumed lead is removed only after the whole
/// dispatch succeeded, so a failed send leaves it available for a
/// redelivered event. All other event types are acknowledged untouched.
pub async fn calendly_webhook(
    State(state): State<Arc<AppState>>,
    Json(event): Json<CalendlyEvent>,
) -> Result<Json<RelayResponse>, AppError> {
    tracing::info!("Received Calendly webhook: {:?}", event.event);

    if !event.is_invitee_created() {
        tracing::debug!("Ignoring Calendly event type {:?}", event.event);
        return Ok(Json(RelayResponse::ok()));
    }

    let email = event.invitee_email().unwrap_or_default();

    let Some(lead) = state.store.get(email).await else {
        tracing::warn!("No matching lead found for email: {}", email);
        return Err(AppError::NotFound("Lead not found".to_string()));
    };

    tracing::debug!(
        "Correlated booking for {} with lead stored at {}",
        email,
        lead.stored_at
    );

    let phone = lead.phone.unwrap_or_default();
    state
        .notifier
        .send_booking_confirmation(&lead.name, email, &phone)
        .await?;

    state.store.delete(email).await;
    tracing::info!("Confirmation dispatched for {}, lead removed", email);

    Ok(Json(RelayResponse::ok()))
}
