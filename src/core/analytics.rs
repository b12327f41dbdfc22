use std::collections::HashMap;

use crate::models::{Feedback, TutorRatingSummary};

/// Average feedback rating per tutor
///
/// Sorted by average (desc), then count (desc), then tutor id.
/// Averages are rounded to one decimal.
pub fn aggregate_tutor_ratings(feedback: &[Feedback]) -> Vec<TutorRatingSummary> {
    let mut totals: HashMap<&str, (f64, usize)> = HashMap::new();
    for entry in feedback {
        let slot = totals.entry(entry.tutor_id.as_str()).or_insert((0.0, 0));
        slot.0 += entry.rating;
        slot.1 += 1;
    }

    let mut summaries: Vec<TutorRatingSummary> = totals
        .into_iter()
        .map(|(tutor_id, (sum, count))| TutorRatingSummary {
            tutor_id: tutor_id.to_string(),
            average: (sum / count as f64 * 10.0).round() / 10.0,
            count,
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.average
            .total_cmp(&a.average)
            .then_with(|| b.count.cmp(&a.count))
            .then_with(|| a.tutor_id.cmp(&b.tutor_id))
    });

    summaries
}

/// Feedback count per star; index 0 holds one-star entries
pub fn rating_distribution(feedback: &[Feedback]) -> [usize; 5] {
    let mut buckets = [0usize; 5];
    for entry in feedback.iter().filter(|f| f.rating.is_finite()) {
        let stars = entry.rating.round().clamp(1.0, 5.0) as usize;
        buckets[stars - 1] += 1;
    }
    buckets
}
