// Integration tests for Tutor Match

use actix_web::{http::StatusCode, test, web, App};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use tutor_match::config::MatchingSettings;
use tutor_match::core::{
    aggregate_tutor_ratings, Advisor, ContentSuggestor, FilterCriteria, Matcher, RecommendationSelector,
    ScheduleOptimizer,
};
use tutor_match::models::{AdvisoryContext, LearningStyle, Level, MatchCriteria, Role, TimeWindow};
use tutor_match::routes::{self, error as route_errors, AppState};
use tutor_match::services::{Catalog, FileSessionStore, MemorySessionStore, SessionContext, SESSION_STORAGE_KEY};

fn create_state(seed: Option<u64>) -> AppState {
    let settings = MatchingSettings {
        seed,
        ..MatchingSettings::default()
    };
    AppState::new(
        Catalog::sample(),
        SessionContext::init(Box::new(MemorySessionStore::new())),
        Matcher::with_default_weights(),
        settings,
    )
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .app_data(route_errors::json_config())
                .app_data(route_errors::query_config())
                .app_data(route_errors::path_config())
                .configure(routes::configure_routes),
        )
        .await
    };
}

#[core::prelude::v1::test]
fn test_integration_end_to_end_matching() {
    let catalog = Catalog::sample();
    let matcher = Matcher::with_default_weights();
    let criteria = MatchCriteria {
        requester_id: "stu-1".to_string(),
        subject_preferences: vec!["calculus".to_string(), "statistics".to_string()],
        learning_style: LearningStyle::Visual,
    };
    let mut rng = StdRng::seed_from_u64(2024);

    let tutors = catalog.tutors();
    let results = matcher.compute_matches(catalog.find_profile("stu-1"), &tutors, &criteria, &mut rng);

    assert_eq!(results.len(), tutors.len());
    let position = |id: &str| results.iter().position(|r| r.profile.id == id).unwrap();
    // Dr. Johnson: subject + top rating + available = 80 before random terms
    assert!(results[position("tut-1")].match_score >= 80);
    // Art tutor without a subject match can reach at most 15 + 20 + 10
    assert!(position("tut-1") < position("tut-7"));
    for pair in results.windows(2) {
        assert!(pair[0].match_score >= pair[1].match_score, "Matches not sorted by score");
    }
}

#[core::prelude::v1::test]
fn test_unknown_requester_still_scores() {
    let catalog = Catalog::sample();
    let criteria = MatchCriteria {
        requester_id: "ghost".to_string(),
        subject_preferences: vec!["chemistry".to_string()],
        learning_style: LearningStyle::Auditory,
    };
    let mut rng = StdRng::seed_from_u64(1);

    let results = Matcher::default().compute_matches(
        catalog.find_profile("ghost"),
        &catalog.tutors(),
        &criteria,
        &mut rng,
    );

    assert!(!results.is_empty());
    assert!(results.iter().any(|r| r.profile.id == "tut-3" && r.match_score >= 60));
}

#[core::prelude::v1::test]
fn test_filters_across_collections() {
    let catalog = Catalog::sample();
    let now = chrono::Utc::now();

    let weekly_posts = FilterCriteria {
        time_window: Some(TimeWindow::Week),
        ..FilterCriteria::default()
    }
    .apply(&catalog.forum_posts, now);
    assert_eq!(weekly_posts.len(), 3);

    let student_feedback = FilterCriteria {
        role: Some(Role::Student),
        search: Some("james".to_string()),
        ..FilterCriteria::default()
    }
    .apply(&catalog.feedback, now);
    assert_eq!(student_feedback.len(), 3);
    assert_eq!(student_feedback[0].id, "fb-3");

    let admin_reports = FilterCriteria {
        role: Some(Role::Admin),
        ..FilterCriteria::default()
    }
    .apply(&catalog.progress_reports, now);
    assert!(admin_reports.is_empty());
}

#[core::prelude::v1::test]
fn test_ratings_summary_for_sample() {
    let catalog = Catalog::sample();
    let summaries = aggregate_tutor_ratings(&catalog.feedback);

    // tut-1 (5.0, 4.5) and tut-2 (4.8) tie on average; more feedback ranks first
    assert_eq!(summaries[0].tutor_id, "tut-1");
    assert_eq!(summaries[0].average, 4.8);
    assert_eq!(summaries[0].count, 2);
    assert_eq!(summaries[1].tutor_id, "tut-2");
    assert_eq!(summaries.last().map(|s| s.tutor_id.as_str()), Some("tut-7"));
}

#[core::prelude::v1::test]
fn test_advisors_non_empty_for_sample_contexts() {
    let advisors: Vec<Box<dyn Advisor>> = vec![
        Box::new(RecommendationSelector),
        Box::new(ScheduleOptimizer),
        Box::new(ContentSuggestor),
    ];
    let ctx = AdvisoryContext {
        level: Level::Advanced,
        learning_goals: vec![],
        subjects: vec![],
    };
    for advisor in advisors {
        assert!(!advisor.generate(&ctx).is_empty());
    }
}

#[core::prelude::v1::test]
fn test_corrupted_session_storage_starts_logged_out() {
    let store = MemorySessionStore::with_entry(SESSION_STORAGE_KEY, "{\"id\": 42,");
    let session = SessionContext::init(Box::new(store));
    assert!(session.current().is_none());
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app = test_app!(create_state(None));

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_find_matches_endpoint() {
    let app = test_app!(create_state(Some(7)));

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/find")
        .set_json(json!({
            "requesterId": "stu-2",
            "subjectPreferences": ["programming"],
            "learningStyle": "kinesthetic",
            "limit": 3
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["matches"].as_array().map(|m| m.len()), Some(3));
    assert_eq!(body["totalCandidates"], 7);
    assert_eq!(body["requesterFound"], true);
    assert_eq!(body["matches"][0]["profile"]["id"], "tut-2");
    assert_eq!(body["matches"][0]["compatibility"]["subject"], 40);
}

#[actix_web::test]
async fn test_find_matches_with_fixed_seed_is_repeatable() {
    let app = test_app!(create_state(Some(99)));
    let payload = json!({
        "requesterId": "stu-1",
        "subjectPreferences": ["math"],
        "learningStyle": "visual"
    });

    let first: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post().uri("/api/v1/matches/find").set_json(&payload).to_request(),
    )
    .await;
    let second: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post().uri("/api/v1/matches/find").set_json(&payload).to_request(),
    )
    .await;

    assert_eq!(first, second);
}

#[actix_web::test]
async fn test_invalid_json_is_recoverable_error() {
    let app = test_app!(create_state(None));

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/find")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["recoverable"], true);
    assert_eq!(body["action"], "reload");
}

#[actix_web::test]
async fn test_empty_requester_rejected() {
    let app = test_app!(create_state(None));

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/find")
        .set_json(json!({ "requesterId": "", "learningStyle": "visual" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_forum_search_endpoint() {
    let app = test_app!(create_state(None));

    let req = test::TestRequest::post()
        .uri("/api/v1/forum/posts/search")
        .set_json(json!({ "search": "EXAMS", "searchFields": ["tags"], "sortKey": "engagement" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["total"], 5);
    let ids: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["post-4", "post-1"]);
}

#[actix_web::test]
async fn test_tutor_rankings_by_rating() {
    let app = test_app!(create_state(None));

    let req = test::TestRequest::post()
        .uri("/api/v1/tutors/rankings")
        .set_json(json!({ "ratingBucket": "excellent", "sortKey": "rating" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let ids: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["tut-1", "tut-2", "tut-5"]);
}

#[actix_web::test]
async fn test_recommendations_endpoint() {
    let app = test_app!(create_state(None));

    let req = test::TestRequest::post()
        .uri("/api/v1/recommendations/schedule")
        .set_json(json!({ "level": "beginner" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(!body.as_array().unwrap().is_empty());

    let req = test::TestRequest::post()
        .uri("/api/v1/recommendations/horoscope")
        .set_json(json!({ "level": "beginner" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_session_lifecycle() {
    let app = test_app!(create_state(None));

    let req = test::TestRequest::get().uri("/api/v1/session").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body.is_null());

    let req = test::TestRequest::get().uri("/api/v1/session/menu").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/v1/session/login")
        .set_json(json!({ "email": "robert.taylor@university.edu" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["id"], "coo-1");
    assert_eq!(body["role"], "coordinator");

    let req = test::TestRequest::get().uri("/api/v1/session/menu").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let menu_ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert!(menu_ids.contains(&"analytics"));
    assert!(!menu_ids.contains(&"user-management"));

    let req = test::TestRequest::put()
        .uri("/api/v1/session")
        .set_json(json!({ "name": "Rob Taylor" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["name"], "Rob Taylor");

    let req = test::TestRequest::delete().uri("/api/v1/session").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri("/api/v1/session").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body.is_null());
}

#[actix_web::test]
async fn test_login_unknown_email() {
    let app = test_app!(create_state(None));

    let req = test::TestRequest::post()
        .uri("/api/v1/session/login")
        .set_json(json!({ "email": "stranger@elsewhere.org" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/v1/session/login")
        .set_json(json!({ "email": "not-an-email" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_session_routes_write_through_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(
        Catalog::sample(),
        SessionContext::init(Box::new(FileSessionStore::new(dir.path()))),
        Matcher::with_default_weights(),
        MatchingSettings::default(),
    );
    let app = test_app!(state);
    let path = FileSessionStore::new(dir.path()).path_for(SESSION_STORAGE_KEY);

    let req = test::TestRequest::post()
        .uri("/api/v1/session/login")
        .set_json(json!({ "email": "sarah.johnson@university.edu" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["id"], "tut-1");
    assert!(path.exists());

    let restored = SessionContext::init(Box::new(FileSessionStore::new(dir.path())));
    assert_eq!(restored.current().map(|u| u.id.as_str()), Some("tut-1"));

    let req = test::TestRequest::delete().uri("/api/v1/session").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(!path.exists());
}
