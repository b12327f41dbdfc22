use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{LearningStyle, MatchCriteria};

/// Request to find matching tutors
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "requester_id", rename = "requesterId")]
    pub requester_id: String,
    #[serde(default)]
    #[serde(alias = "subject_preferences", rename = "subjectPreferences")]
    pub subject_preferences: Vec<String>,
    #[serde(alias = "learning_style", rename = "learningStyle")]
    pub learning_style: LearningStyle,
    #[serde(default)]
    pub limit: Option<u16>,
}

impl FindMatchesRequest {
    pub fn criteria(&self) -> MatchCriteria {
        MatchCriteria {
            requester_id: self.requester_id.clone(),
            subject_preferences: self.subject_preferences.clone(),
            learning_style: self.learning_style,
        }
    }
}

/// Mock login: the email selects a seed profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
}

/// Partial update of the logged-in user
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateSessionRequest {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}
