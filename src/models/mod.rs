// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AdvisoryContext, Dimension, Feedback, ForumPost, LearningStyle, Level, MatchCriteria, MatchResult,
    MenuItem, ParseRoleError, Priority, Profile, ProgressReport, RatingBucket, Recommendation, Role,
    ScoringWeights, SearchField, SessionUser, SortDirection, SortKey, TimeWindow, TutorRatingSummary,
};
pub use requests::{FindMatchesRequest, LoginRequest, UpdateSessionRequest};
pub use responses::{ErrorResponse, FindMatchesResponse, HealthResponse, ListResponse, RatingsResponse};
