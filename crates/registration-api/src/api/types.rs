//! API request and response types.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/registrations`.
pub use registration_store::RegistrationDraft as CreateRegistrationRequest;

/// Query string of `GET /api/registrations`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Maximum number of records (default 100, at most 200)
    pub limit: Option<i64>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}
