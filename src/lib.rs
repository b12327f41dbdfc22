//! Tutor Match - matching, filtering and session core for tutoring coordination
//!
//! This library provides the tutor scoring engine, the shared filter/sort
//! pipeline used for forum posts, feedback, progress reports and tutor
//! rankings, static advisory catalogs, and the persisted session user.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{FilterCriteria, Matcher, Pipeline};
pub use models::{MatchCriteria, MatchResult, Profile, Recommendation, Role, ScoringWeights, SessionUser};
pub use services::{Catalog, SessionContext};
