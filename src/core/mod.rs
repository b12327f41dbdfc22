// Core algorithm exports
pub mod analytics;
pub mod filters;
pub mod matcher;
pub mod recommendations;
pub mod scoring;

pub use analytics::{aggregate_tutor_ratings, rating_distribution};
pub use filters::{apply, FilterCriteria, Pipeline, Record};
pub use matcher::{MatchOutcome, Matcher};
pub use recommendations::{Advisor, ContentSuggestor, RecommendationSelector, ScheduleOptimizer};
pub use scoring::{calculate_match_score, ScoreBreakdown};
