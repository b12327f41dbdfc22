// Route exports
pub mod content;
pub mod error;
pub mod matches;
pub mod session;

use actix_web::web;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex};

use crate::config::MatchingSettings;
use crate::core::Matcher;
use crate::services::{Catalog, SessionContext};

pub use error::ApiError;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    /// Store I/O is blocking; handlers reach it through `web::block`
    pub session: Arc<Mutex<SessionContext>>,
    pub matcher: Matcher,
    pub matching: MatchingSettings,
}

impl AppState {
    pub fn new(catalog: Catalog, session: SessionContext, matcher: Matcher, matching: MatchingSettings) -> Self {
        Self {
            catalog: Arc::new(catalog),
            session: Arc::new(Mutex::new(session)),
            matcher,
            matching,
        }
    }

    /// Random source for one request
    pub fn rng(&self) -> StdRng {
        match self.matching.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(content::configure)
            .configure(session::configure),
    );
}
