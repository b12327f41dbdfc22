use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Account role. Drives menu composition and role filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Tutor,
    Coordinator,
    Admin,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl Role {
    pub const ALL: [Role; 4] = [Role::Student, Role::Tutor, Role::Coordinator, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Tutor => "tutor",
            Role::Coordinator => "coordinator",
            Role::Admin => "admin",
        }
    }
}

const DASHBOARD: MenuItem = MenuItem { id: "dashboard", label: "Dashboard", path: "/dashboard" };
const FIND_TUTOR: MenuItem = MenuItem { id: "find-tutor", label: "Find a Tutor", path: "/matching" };
const SCHEDULE: MenuItem = MenuItem { id: "schedule", label: "Schedule", path: "/schedule" };
const PROGRESS: MenuItem = MenuItem { id: "progress", label: "Progress", path: "/progress" };
const FEEDBACK: MenuItem = MenuItem { id: "feedback", label: "Feedback", path: "/feedback" };
const FORUM: MenuItem = MenuItem { id: "forum", label: "Community Forum", path: "/forum" };
const STUDENTS: MenuItem = MenuItem { id: "students", label: "My Students", path: "/students" };
const TUTOR_MANAGEMENT: MenuItem = MenuItem { id: "tutor-management", label: "Tutor Management", path: "/tutors" };
const ANALYTICS: MenuItem = MenuItem { id: "analytics", label: "Analytics", path: "/analytics" };
const USER_MANAGEMENT: MenuItem = MenuItem { id: "user-management", label: "User Management", path: "/admin/users" };
const SETTINGS: MenuItem = MenuItem { id: "settings", label: "System Settings", path: "/admin/settings" };

impl Role {
    /// Navigation entries visible to this role
    pub fn menu(&self) -> &'static [MenuItem] {
        match self {
            Role::Student => &[DASHBOARD, FIND_TUTOR, SCHEDULE, PROGRESS, FEEDBACK, FORUM],
            Role::Tutor => &[DASHBOARD, SCHEDULE, STUDENTS, FEEDBACK, FORUM],
            Role::Coordinator => &[DASHBOARD, TUTOR_MANAGEMENT, SCHEDULE, FEEDBACK, ANALYTICS, FORUM],
            Role::Admin => &[
                DASHBOARD,
                USER_MANAGEMENT,
                TUTOR_MANAGEMENT,
                ANALYTICS,
                FEEDBACK,
                FORUM,
                SETTINGS,
            ],
        }
    }

    pub fn can_manage_users(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "tutor" => Ok(Role::Tutor),
            "coordinator" => Ok(Role::Coordinator),
            "admin" => Ok(Role::Admin),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}

/// User profile as held in the seed catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub role: Role,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_rating")]
    pub rating: f64,
    #[serde(default)]
    pub availability: bool,
}

impl Profile {
    pub fn is_tutor(&self) -> bool {
        self.role == Role::Tutor
    }
}

/// Ratings outside [0, 5] in seed data are clamped rather than rejected
fn deserialize_rating<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if raw.is_finite() {
        Ok(raw.clamp(0.0, 5.0))
    } else {
        Ok(0.0)
    }
}

/// Learning style declared by a student; also the set of teaching styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningStyle {
    Visual,
    Auditory,
    Kinesthetic,
    Reading,
}

impl LearningStyle {
    pub const ALL: [LearningStyle; 4] = [
        LearningStyle::Visual,
        LearningStyle::Auditory,
        LearningStyle::Kinesthetic,
        LearningStyle::Reading,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LearningStyle::Visual => "visual",
            LearningStyle::Auditory => "auditory",
            LearningStyle::Kinesthetic => "kinesthetic",
            LearningStyle::Reading => "reading",
        }
    }
}

/// Matching request built per call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCriteria {
    pub requester_id: String,
    #[serde(default)]
    pub subject_preferences: Vec<String>,
    pub learning_style: LearningStyle,
}

/// Scored dimension reported in [`MatchResult::compatibility`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Subject,
    Rating,
    TeachingStyle,
    Availability,
    Diversity,
}

/// Scored tutor candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub profile: Profile,
    pub match_score: u8,
    pub reasoning: Vec<String>,
    pub compatibility: BTreeMap<Dimension, u32>,
}

/// Scoring weights and rating thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub subject: f64,
    pub top_rating: f64,
    pub good_rating: f64,
    pub teaching_style: f64,
    pub availability: f64,
    pub diversity: f64,
    pub top_rating_threshold: f64,
    pub good_rating_threshold: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            subject: 40.0,
            top_rating: 25.0,
            good_rating: 20.0,
            teaching_style: 20.0,
            availability: 15.0,
            diversity: 10.0,
            top_rating_threshold: 4.5,
            good_rating_threshold: 4.0,
        }
    }
}

/// Coarse rating ranges used by filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingBucket {
    Excellent,
    Good,
    Average,
    Poor,
}

impl RatingBucket {
    pub fn of(rating: f64) -> Self {
        if rating >= 4.5 {
            RatingBucket::Excellent
        } else if rating >= 4.0 {
            RatingBucket::Good
        } else if rating >= 3.0 {
            RatingBucket::Average
        } else {
            RatingBucket::Poor
        }
    }

    pub fn contains(&self, rating: f64) -> bool {
        Self::of(rating) == *self
    }
}

/// Look-back window measured from a caller-supplied instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Today,
    Week,
    Month,
    Year,
}

impl TimeWindow {
    pub fn duration(&self) -> chrono::Duration {
        match self {
            TimeWindow::Today => chrono::Duration::hours(24),
            TimeWindow::Week => chrono::Duration::days(7),
            TimeWindow::Month => chrono::Duration::days(30),
            TimeWindow::Year => chrono::Duration::days(365),
        }
    }

    pub fn contains(&self, at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        at <= now && now - at <= self.duration()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Recency,
    Rating,
    Title,
    Engagement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Fields a text search can look at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Title,
    Body,
    Tags,
    Author,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumPost {
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub author: String,
    pub author_role: Role,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub replies: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: String,
    pub tutor_id: String,
    pub student_name: String,
    pub author_role: Role,
    pub rating: f64,
    pub comment: String,
    pub subject: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    pub id: String,
    pub student_name: String,
    pub tutor_id: String,
    pub subject: String,
    pub summary: String,
    #[serde(default)]
    pub rating: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Advisory item returned by the recommendation catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub confidence: f64,
    pub impact: String,
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

/// Inputs that parameterize the advisory catalogs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryContext {
    pub level: Level,
    #[serde(default)]
    pub learning_goals: Vec<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
}

/// Per-tutor aggregate over feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorRatingSummary {
    pub tutor_id: String,
    pub average: f64,
    pub count: usize,
}

/// Entry in a role's navigation menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub id: &'static str,
    pub label: &'static str,
    pub path: &'static str,
}

/// Logged-in user persisted by the session store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub email: String,
    #[serde(default = "uuid::Uuid::new_v4")]
    pub session_id: uuid::Uuid,
    #[serde(default = "Utc::now")]
    pub logged_in_at: DateTime<Utc>,
}

impl SessionUser {
    pub fn from_profile(profile: &Profile, email: &str) -> Self {
        Self {
            id: profile.id.clone(),
            name: profile.name.clone(),
            role: profile.role,
            email: email.to_string(),
            session_id: uuid::Uuid::new_v4(),
            logged_in_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_roundtrip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
        assert_eq!("Tutor".parse::<Role>(), Ok(Role::Tutor));
        assert!("janitor".parse::<Role>().is_err());
    }

    #[test]
    fn test_menus_by_role() {
        for role in Role::ALL {
            assert_eq!(role.menu()[0].id, "dashboard");
            let has_users = role.menu().iter().any(|m| m.id == "user-management");
            assert_eq!(has_users, role.can_manage_users());
        }
        assert!(Role::Coordinator.menu().iter().any(|m| m.id == "analytics"));
        assert!(!Role::Student.menu().iter().any(|m| m.id == "analytics"));
        assert!(!Role::Tutor.menu().iter().any(|m| m.id == "analytics"));
    }

    #[test]
    fn test_rating_buckets_partition() {
        assert_eq!(RatingBucket::of(5.0), RatingBucket::Excellent);
        assert_eq!(RatingBucket::of(4.5), RatingBucket::Excellent);
        assert_eq!(RatingBucket::of(4.49), RatingBucket::Good);
        assert_eq!(RatingBucket::of(4.0), RatingBucket::Good);
        assert_eq!(RatingBucket::of(3.0), RatingBucket::Average);
        assert_eq!(RatingBucket::of(0.0), RatingBucket::Poor);
    }

    #[test]
    fn test_time_window_excludes_future() {
        let now = Utc::now();
        assert!(TimeWindow::Week.contains(now - chrono::Duration::days(3), now));
        assert!(!TimeWindow::Week.contains(now - chrono::Duration::days(8), now));
        assert!(!TimeWindow::Today.contains(now + chrono::Duration::hours(1), now));
    }

    #[test]
    fn test_profile_rating_clamped() {
        let json = r#"{"id":"t1","role":"tutor","name":"Ada","rating":7.2}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.rating, 5.0);
        assert!(!profile.availability);
        assert!(profile.specialties.is_empty());
    }
}
