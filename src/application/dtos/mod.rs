use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ServiceState;

/// Health/readiness report for diagnostics and load balancers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatusResponse {
    pub status: ServiceState,
    pub model_loaded: bool,
    pub detail: Option<String>,
    pub checked_at: DateTime<Utc>,
}

/// Root banner confirming the service is up, mirroring the artifact flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceBannerResponse {
    pub status: String,
    pub model_loaded: bool,
}
