use rand::Rng;
use std::collections::BTreeMap;

use crate::core::scoring::{calculate_match_score, ScoreBreakdown};
use crate::models::{Dimension, MatchCriteria, MatchResult, Profile, ScoringWeights};

/// Ranked matches plus the number of candidates considered
#[derive(Debug)]
pub struct MatchOutcome {
    pub matches: Vec<MatchResult>,
    pub total_candidates: usize,
}

/// Tutor matching orchestrator
///
/// # Pipeline Stages
/// 1. Score every candidate (subject, rating, teaching style, availability, diversity)
/// 2. Build reasoning and per-dimension compatibility
/// 3. Stable sort by score, descending
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score and rank candidate tutors
    ///
    /// The result is a permutation of `candidates`. Ties keep input order.
    /// `requester` only personalizes reasoning; scoring uses `criteria` alone.
    ///
    /// # Arguments
    /// * `requester` - The requesting profile, if it was found
    /// * `candidates` - Tutor profiles to rank
    /// * `criteria` - Subject preferences and learning style
    /// * `rng` - Source for the teaching-style draw and diversity term
    pub fn compute_matches<R: Rng + ?Sized>(
        &self,
        requester: Option<&Profile>,
        candidates: &[Profile],
        criteria: &MatchCriteria,
        rng: &mut R,
    ) -> Vec<MatchResult> {
        if requester.is_none() {
            tracing::debug!(
                requester_id = %criteria.requester_id,
                "Requester not found, scoring from criteria only"
            );
        }

        let mut results: Vec<MatchResult> = candidates
            .iter()
            .map(|candidate| {
                let breakdown = calculate_match_score(candidate, criteria, &self.weights, rng);
                self.build_result(candidate, criteria, requester, &breakdown)
            })
            .collect();

        // Vec::sort_by is stable, equal scores keep insertion order
        results.sort_by(|a, b| b.match_score.cmp(&a.match_score));

        tracing::debug!(
            requester_id = %criteria.requester_id,
            candidates = candidates.len(),
            top_score = results.first().map(|r| r.match_score),
            "Computed tutor matches"
        );

        results
    }

    /// [`Matcher::compute_matches`] truncated to `limit`
    pub fn find_matches<R: Rng + ?Sized>(
        &self,
        requester: Option<&Profile>,
        candidates: &[Profile],
        criteria: &MatchCriteria,
        limit: usize,
        rng: &mut R,
    ) -> MatchOutcome {
        let mut matches = self.compute_matches(requester, candidates, criteria, rng);
        matches.truncate(limit);

        MatchOutcome {
            matches,
            total_candidates: candidates.len(),
        }
    }

    fn build_result(
        &self,
        candidate: &Profile,
        criteria: &MatchCriteria,
        requester: Option<&Profile>,
        breakdown: &ScoreBreakdown,
    ) -> MatchResult {
        let mut reasoning = Vec::new();

        if !breakdown.matched_specialties.is_empty() {
            reasoning.push(format!("Expertise in {}", breakdown.matched_specialties.join(", ")));
        }
        if breakdown.rating > 0.0 {
            if candidate.rating >= self.weights.top_rating_threshold {
                reasoning.push(format!("Highly rated tutor ({:.1}/5)", candidate.rating));
            } else {
                reasoning.push(format!("Well rated tutor ({:.1}/5)", candidate.rating));
            }
        }
        if breakdown.teaching_style > 0.0 {
            let whose = match requester {
                Some(profile) => format!("{}'s", profile.name),
                None => "your".to_string(),
            };
            reasoning.push(format!(
                "Teaching style fits {} {} learning preference",
                whose,
                criteria.learning_style.as_str()
            ));
        }
        if breakdown.availability > 0.0 {
            reasoning.push("Available for new sessions".to_string());
        }

        let mut compatibility = BTreeMap::new();
        compatibility.insert(Dimension::Subject, breakdown.subject.round() as u32);
        compatibility.insert(Dimension::Rating, breakdown.rating.round() as u32);
        compatibility.insert(Dimension::TeachingStyle, breakdown.teaching_style.round() as u32);
        compatibility.insert(Dimension::Availability, breakdown.availability.round() as u32);
        compatibility.insert(Dimension::Diversity, breakdown.diversity.round() as u32);

        MatchResult {
            profile: candidate.clone(),
            match_score: breakdown.total(),
            reasoning,
            compatibility,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
