// Unit tests for Tutor Match

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tutor_match::core::{
    filters::{apply, record_comparator, role_predicate, Predicate},
    scoring::{calculate_match_score, rating_score},
    FilterCriteria, Matcher,
};
use tutor_match::models::{
    Dimension, ForumPost, LearningStyle, MatchCriteria, Profile, Role, ScoringWeights, SortDirection, SortKey,
};

fn create_tutor(id: &str, specialties: &[&str], rating: f64, availability: bool) -> Profile {
    Profile {
        id: id.to_string(),
        role: Role::Tutor,
        name: format!("Tutor {}", id),
        email: None,
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
        rating,
        availability,
    }
}

fn create_criteria(preferences: Vec<String>, style: LearningStyle) -> MatchCriteria {
    MatchCriteria {
        requester_id: "student".to_string(),
        subject_preferences: preferences,
        learning_style: style,
    }
}

fn learning_style_strategy() -> impl Strategy<Value = LearningStyle> {
    prop_oneof![
        Just(LearningStyle::Visual),
        Just(LearningStyle::Auditory),
        Just(LearningStyle::Kinesthetic),
        Just(LearningStyle::Reading),
    ]
}

fn role_strategy() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Student), Just(Role::Tutor), Just(Role::Coordinator), Just(Role::Admin)]
}

fn tutor_strategy() -> impl Strategy<Value = Profile> {
    (
        "[a-z]{1,8}",
        prop::collection::vec("[A-Za-z ]{1,12}", 0..4),
        0.0f64..=5.0,
        any::<bool>(),
    )
        .prop_map(|(id, specialties, rating, availability)| Profile {
            id,
            role: Role::Tutor,
            name: "Generated".to_string(),
            email: None,
            specialties,
            rating,
            availability,
        })
}

fn post_strategy() -> impl Strategy<Value = ForumPost> {
    ("[a-z0-9]{1,6}", "[A-Za-z ]{0,20}", role_strategy(), 0i64..400, 0u32..50).prop_map(
        |(id, title, role, age_days, likes)| ForumPost {
            id,
            title: title.clone(),
            body: title,
            tags: vec![],
            author: "someone".to_string(),
            author_role: role,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() - Duration::days(age_days),
            likes,
            replies: 0,
        },
    )
}

proptest! {
    /// Property: output is a permutation of the input with scores in [0, 100]
    #[test]
    fn matches_are_permutation_with_bounded_scores(
        candidates in prop::collection::vec(tutor_strategy(), 0..20),
        preferences in prop::collection::vec("[a-z]{0,6}", 0..3),
        style in learning_style_strategy(),
        seed in any::<u64>(),
    ) {
        let matcher = Matcher::with_default_weights();
        let mut rng = StdRng::seed_from_u64(seed);
        let results = matcher.compute_matches(None, &candidates, &create_criteria(preferences, style), &mut rng);

        prop_assert_eq!(results.len(), candidates.len());
        let mut input_ids: Vec<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
        let mut output_ids: Vec<&str> = results.iter().map(|r| r.profile.id.as_str()).collect();
        input_ids.sort_unstable();
        output_ids.sort_unstable();
        prop_assert_eq!(input_ids, output_ids);

        for pair in results.windows(2) {
            prop_assert!(pair[0].match_score >= pair[1].match_score);
        }
        for r in &results {
            prop_assert!(r.match_score <= 100);
        }
    }

    /// Property: no subject bonus without preferences
    #[test]
    fn empty_preferences_never_get_subject_bonus(
        candidate in tutor_strategy(),
        style in learning_style_strategy(),
        seed in any::<u64>(),
    ) {
        let weights = ScoringWeights::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let breakdown = calculate_match_score(&candidate, &create_criteria(vec![], style), &weights, &mut rng);
        prop_assert_eq!(breakdown.subject, 0.0);
    }

    /// Property: top-rated candidates get exactly the top rating bonus
    #[test]
    fn top_rating_bonus_is_exact(rating in 4.5f64..=5.0) {
        prop_assert_eq!(rating_score(rating, &ScoringWeights::default()), 25.0);
    }

    /// Property: applying the pipeline twice yields the same sequence
    #[test]
    fn pipeline_is_idempotent(
        posts in prop::collection::vec(post_strategy(), 0..25),
        role in role_strategy(),
    ) {
        let predicates: Vec<Predicate<'_, ForumPost>> = vec![role_predicate(role)];
        let cmp = record_comparator::<ForumPost>(SortKey::Engagement, SortDirection::Desc);

        let first = apply(&posts, &predicates, &cmp);
        let second = apply(&posts, &predicates, &cmp);

        prop_assert_eq!(&first, &second);
        prop_assert!(first.iter().all(|p| p.author_role == role));
    }
}

#[test]
fn test_strong_candidate_outranks_weak_for_any_seed() {
    let matcher = Matcher::with_default_weights();
    let candidates = vec![
        create_tutor("1", &["Programming"], 4.6, true),
        create_tutor("2", &["Art"], 3.0, false),
    ];
    let criteria = create_criteria(vec!["Programming".to_string()], LearningStyle::Visual);

    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let results = matcher.compute_matches(None, &candidates, &criteria, &mut rng);

        assert_eq!(results[0].profile.id, "1");
        assert!(results[0].match_score >= 80);
        assert!(results[1].match_score <= 30);
        assert_eq!(results[1].compatibility[&Dimension::Subject], 0);
        assert_eq!(results[1].compatibility[&Dimension::Rating], 0);
        assert_eq!(results[1].compatibility[&Dimension::Availability], 0);
    }
}

#[test]
fn test_filter_does_not_mutate_source() {
    let posts = vec![
        ForumPost {
            id: "b".to_string(),
            title: "Second".to_string(),
            body: String::new(),
            tags: vec![],
            author: "x".to_string(),
            author_role: Role::Student,
            created_at: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
            likes: 0,
            replies: 0,
        },
        ForumPost {
            id: "a".to_string(),
            title: "First".to_string(),
            body: String::new(),
            tags: vec![],
            author: "y".to_string(),
            author_role: Role::Tutor,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            likes: 0,
            replies: 0,
        },
    ];
    let snapshot = posts.clone();
    let criteria = FilterCriteria {
        sort_key: SortKey::Title,
        sort_direction: SortDirection::Asc,
        ..FilterCriteria::default()
    };

    let sorted = criteria.apply(&posts, Utc::now());

    assert_eq!(posts, snapshot);
    assert_eq!(sorted[0].id, "a");
}

#[test]
fn test_unknown_role_in_data_yields_empty() {
    let tutors = vec![create_tutor("1", &["Math"], 4.0, true)];
    let criteria = FilterCriteria {
        role: Some(Role::Coordinator),
        ..FilterCriteria::default()
    };
    assert!(criteria.apply(&tutors, Utc::now()).is_empty());
}
