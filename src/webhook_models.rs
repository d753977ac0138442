use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Webhook event envelope sent by Calendly.
///
/// Calendly delivers `{event, payload: {invitee: {...}}}`. Every level is
/// optional here so that partial or unrelated payloads still deserialize
/// and fall through to the not-found path instead of failing parsing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CalendlyEvent {
    /// Event type (e.g., "invitee.created", "invitee.canceled")
    #[serde(default)]
    pub event: Option<String>,

    /// Event payload
    #[serde(default)]
    pub payload: Option<CalendlyPayload>,

    /// Raw data for any additional fields
    #[serde(flatten)]
    pub raw: Value,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CalendlyPayload {
    /// The person who booked the event
    #[serde(default)]
    pub invitee: Option<CalendlyInvitee>,

    /// Raw payload data
    #[serde(flatten)]
    pub raw: Value,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CalendlyInvitee {
    pub email: Option<String>,
    pub name: Option<String>,

    /// Raw invitee data
    #[serde(flatten)]
    pub raw: Value,
}

impl CalendlyEvent {
    /// Event type that triggers confirmation dispatch.
    pub const INVITEE_CREATED: &'static str = "invitee.created";

    pub fn is_invitee_created(&self) -> bool {
        self.event.as_deref() == Some(Self::INVITEE_CREATED)
    }

    /// Extract the invitee email from the nested payload.
    ///
    /// Returns `None` if any level of the path is absent.
    pub fn invitee_email(&self) -> Option<&str> {
        self.payload.as_ref()?.invitee.as_ref()?.email.as_deref()
    }
}
