use rand::Rng;

use crate::models::{LearningStyle, MatchCriteria, Profile, ScoringWeights};

/// Per-component points for one candidate
///
/// Scoring formula:
/// score = min(round(
///     subject          # any specialty contains a preference
///   + rating           # top or good rating band
///   + teaching_style   # randomly drawn style equals requested style
///   + availability     # candidate currently available
///   + diversity        # uniform [0, diversity)
/// ), 100)
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub subject: f64,
    pub rating: f64,
    pub teaching_style: f64,
    pub availability: f64,
    pub diversity: f64,
    pub drawn_style: LearningStyle,
    pub matched_specialties: Vec<String>,
}

impl ScoreBreakdown {
    /// Deterministic part of the score, before the random terms
    pub fn fixed(&self) -> f64 {
        self.subject + self.rating + self.availability
    }

    pub fn total(&self) -> u8 {
        let sum = self.fixed() + self.teaching_style + self.diversity;
        sum.round().clamp(0.0, 100.0) as u8
    }
}

/// Score one candidate against the criteria
///
/// Draws exactly two values from `rng`: the teaching style, then the
/// diversity term.
pub fn calculate_match_score<R: Rng + ?Sized>(
    profile: &Profile,
    criteria: &MatchCriteria,
    weights: &ScoringWeights,
    rng: &mut R,
) -> ScoreBreakdown {
    let matched_specialties = matching_specialties(&profile.specialties, &criteria.subject_preferences);
    let subject = if matched_specialties.is_empty() { 0.0 } else { weights.subject };

    let drawn_style = draw_teaching_style(rng);

    ScoreBreakdown {
        subject,
        rating: rating_score(profile.rating, weights),
        teaching_style: teaching_style_score(drawn_style, criteria.learning_style, weights),
        availability: availability_score(profile.availability, weights),
        diversity: diversity_score(rng, weights),
        drawn_style,
        matched_specialties,
    }
}

/// Specialties containing any non-blank preference, case-insensitively
pub fn matching_specialties(specialties: &[String], preferences: &[String]) -> Vec<String> {
    let needles: Vec<String> = preferences
        .iter()
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect();

    if needles.is_empty() {
        return Vec::new();
    }

    specialties
        .iter()
        .filter(|specialty| {
            let haystack = specialty.to_lowercase();
            needles.iter().any(|needle| haystack.contains(needle.as_str()))
        })
        .cloned()
        .collect()
}

#[inline]
pub fn rating_score(rating: f64, weights: &ScoringWeights) -> f64 {
    if rating >= weights.top_rating_threshold {
        weights.top_rating
    } else if rating >= weights.good_rating_threshold {
        weights.good_rating
    } else {
        0.0
    }
}

#[inline]
pub fn teaching_style_score(drawn: LearningStyle, requested: LearningStyle, weights: &ScoringWeights) -> f64 {
    if drawn == requested {
        weights.teaching_style
    } else {
        0.0
    }
}

#[inline]
pub fn availability_score(available: bool, weights: &ScoringWeights) -> f64 {
    if available {
        weights.availability
    } else {
        0.0
    }
}

/// Uniform draw in `[0, weights.diversity)`
pub fn diversity_score<R: Rng + ?Sized>(rng: &mut R, weights: &ScoringWeights) -> f64 {
    if weights.diversity > 0.0 {
        rng.gen_range(0.0..weights.diversity)
    } else {
        0.0
    }
}

pub fn draw_teaching_style<R: Rng + ?Sized>(rng: &mut R) -> LearningStyle {
    LearningStyle::ALL[rng.gen_range(0..LearningStyle::ALL.len())]
}
