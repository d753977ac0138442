use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A captured lead, stored in memory until a booking event consumes it.
///
/// The lead's email is the store key and is not duplicated here.
#[derive(Debug, Clone)]
pub struct Lead {
    pub name: String,
    pub phone: Option<String>,
    pub business: Option<String>,
    /// When the lead was ingested. Diagnostic only, never serialized.
    pub stored_at: DateTime<Utc>,
}

/// Request body for `POST /api/store-lead`.
///
/// All fields are optional at the serde level so that missing values reach
/// the handler's validation instead of failing deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreLeadRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub business: Option<String>,
}

/// Uniform response envelope: every endpoint answers with a `success`
/// boolean, failures additionally carry an `error` string.
#[derive(Debug, Serialize)]
pub struct RelayResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RelayResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }
}
