use serde::{Deserialize, Serialize};

use crate::models::domain::{MatchResult, TutorRatingSummary};

/// Response for find matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindMatchesResponse {
    pub matches: Vec<MatchResult>,
    pub total_candidates: usize,
    pub requester_found: bool,
}

/// Filtered collection with the size before filtering
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingsResponse {
    pub tutors: Vec<TutorRatingSummary>,
    /// Feedback count per star, index 0 is one star
    pub distribution: [usize; 5],
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
///
/// Every failure renders this shape so callers can offer a reload instead of
/// dropping the whole view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
    pub recoverable: bool,
    pub action: String,
}

impl ErrorResponse {
    pub fn recoverable(error: impl Into<String>, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code,
            recoverable: true,
            action: "reload".to_string(),
        }
    }
}
