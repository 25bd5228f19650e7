use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Form body posted by the index page to start an analysis run.
#[derive(Debug, Deserialize)]
pub struct RunReportRequest {
    pub wallet: String,
}

/// Standard API success response
#[derive(Debug, Serialize)]
pub struct SuccessResponse<T> {
    pub data: T,
    pub timestamp: DateTime<Utc>,
}

impl<T> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            timestamp: Utc::now(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
