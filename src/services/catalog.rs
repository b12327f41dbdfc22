use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::models::{Feedback, ForumPost, Profile, ProgressReport, Role};

/// Errors that can occur when loading seed data
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid seed data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Static in-memory data set the core operates on
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub forum_posts: Vec<ForumPost>,
    #[serde(default)]
    pub feedback: Vec<Feedback>,
    #[serde(default)]
    pub progress_reports: Vec<ProgressReport>,
}

impl Catalog {
    /// Load a catalog from a JSON file with the same shape as [`Catalog`]
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path.as_ref())?;
        let catalog: Catalog = serde_json::from_str(&raw)?;
        tracing::info!(
            path = %path.as_ref().display(),
            profiles = catalog.profiles.len(),
            posts = catalog.forum_posts.len(),
            feedback = catalog.feedback.len(),
            reports = catalog.progress_reports.len(),
            "Loaded seed catalog"
        );
        Ok(catalog)
    }

    /// Every tutor profile, in catalog order
    pub fn tutors(&self) -> Vec<Profile> {
        self.profiles.iter().filter(|p| p.is_tutor()).cloned().collect()
    }

    pub fn find_profile(&self, id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn find_by_email(&self, email: &str) -> Option<&Profile> {
        self.profiles
            .iter()
            .find(|p| p.email.as_deref().is_some_and(|e| e.eq_ignore_ascii_case(email.trim())))
    }

    /// Built-in sample data, timestamps relative to now
    pub fn sample() -> Self {
        Self::sample_at(Utc::now())
    }

    /// Built-in sample data with timestamps relative to `now`
    pub fn sample_at(now: DateTime<Utc>) -> Self {
        Self {
            profiles: sample_profiles(),
            forum_posts: sample_posts(now),
            feedback: sample_feedback(now),
            progress_reports: sample_reports(now),
        }
    }
}

fn profile(id: &str, role: Role, name: &str, email: &str, specialties: &[&str], rating: f64, availability: bool) -> Profile {
    Profile {
        id: id.to_string(),
        role,
        name: name.to_string(),
        email: Some(email.to_string()),
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
        rating,
        availability,
    }
}

fn sample_profiles() -> Vec<Profile> {
    vec![
        profile("stu-1", Role::Student, "Maria Lopez", "maria.lopez@university.edu", &[], 0.0, true),
        profile("stu-2", Role::Student, "James Chen", "james.chen@university.edu", &[], 0.0, true),
        profile("tut-1", Role::Tutor, "Dr. Sarah Johnson", "sarah.johnson@university.edu", &["Mathematics", "Calculus", "Statistics"], 4.9, true),
        profile("tut-2", Role::Tutor, "Alex Rivera", "alex.rivera@university.edu", &["Computer Programming", "Data Structures", "Web Development"], 4.7, true),
        profile("tut-3", Role::Tutor, "Emily Davis", "emily.davis@university.edu", &["Chemistry", "Biology"], 4.3, false),
        profile("tut-4", Role::Tutor, "Michael Brown", "michael.brown@university.edu", &["Physics", "Mathematics"], 4.1, true),
        profile("tut-5", Role::Tutor, "Priya Patel", "priya.patel@university.edu", &["English Literature", "Academic Writing"], 4.6, false),
        profile("tut-6", Role::Tutor, "Daniel Kim", "daniel.kim@university.edu", &["Economics", "Statistics"], 3.8, true),
        profile("tut-7", Role::Tutor, "Laura Wilson", "laura.wilson@university.edu", &["Art History", "Studio Art"], 3.2, true),
        profile("coo-1", Role::Coordinator, "Robert Taylor", "robert.taylor@university.edu", &[], 0.0, true),
        profile("adm-1", Role::Admin, "Admin User", "admin@university.edu", &[], 0.0, true),
    ]
}

#[allow(clippy::too_many_arguments)]
fn post(
    id: &str,
    title: &str,
    body: &str,
    tags: &[&str],
    author: &str,
    author_role: Role,
    created_at: DateTime<Utc>,
    likes: u32,
    replies: u32,
) -> ForumPost {
    ForumPost {
        id: id.to_string(),
        title: title.to_string(),
        body: body.to_string(),
        tags: tags.iter().map(|s| s.to_string()).collect(),
        author: author.to_string(),
        author_role,
        created_at,
        likes,
        replies,
    }
}

fn sample_posts(now: DateTime<Utc>) -> Vec<ForumPost> {
    vec![
        post("post-1", "Tips for calculus midterm", "What helped you most with integration by parts?", &["calculus", "exams"], "Maria Lopez", Role::Student, now - Duration::hours(5), 12, 7),
        post("post-2", "Extra office hours this week", "I am adding two programming sessions on Thursday.", &["programming", "announcement"], "Alex Rivera", Role::Tutor, now - Duration::days(2), 20, 3),
        post("post-3", "Study group for organic chemistry", "Looking for two more people for a weekly group.", &["chemistry", "study-group"], "James Chen", Role::Student, now - Duration::days(6), 8, 11),
        post("post-4", "Tutoring schedule for finals", "The finals schedule is now published.", &["announcement", "exams"], "Robert Taylor", Role::Coordinator, now - Duration::days(12), 35, 4),
        post("post-5", "Essay structure resources", "A short list of guides on argument structure.", &["writing"], "Priya Patel", Role::Tutor, now - Duration::days(45), 17, 2),
    ]
}

fn feedback(
    id: &str,
    tutor_id: &str,
    student_name: &str,
    rating: f64,
    comment: &str,
    subject: &str,
    created_at: DateTime<Utc>,
) -> Feedback {
    Feedback {
        id: id.to_string(),
        tutor_id: tutor_id.to_string(),
        student_name: student_name.to_string(),
        author_role: Role::Student,
        rating,
        comment: comment.to_string(),
        subject: subject.to_string(),
        created_at,
    }
}

fn sample_feedback(now: DateTime<Utc>) -> Vec<Feedback> {
    vec![
        feedback("fb-1", "tut-1", "Maria Lopez", 5.0, "Explained limits clearly.", "Calculus", now - Duration::days(1)),
        feedback("fb-2", "tut-1", "James Chen", 4.5, "Very patient.", "Statistics", now - Duration::days(9)),
        feedback("fb-3", "tut-2", "James Chen", 4.8, "Great code reviews.", "Data Structures", now - Duration::days(3)),
        feedback("fb-4", "tut-3", "Maria Lopez", 4.0, "Helpful but sessions ran short.", "Chemistry", now - Duration::days(20)),
        feedback("fb-5", "tut-6", "James Chen", 3.5, "Good examples, a bit fast.", "Economics", now - Duration::days(60)),
        feedback("fb-6", "tut-7", "Maria Lopez", 2.5, "Session started late.", "Art History", now - Duration::days(100)),
    ]
}

fn sample_reports(now: DateTime<Utc>) -> Vec<ProgressReport> {
    vec![
        ProgressReport {
            id: "rep-1".to_string(),
            student_name: "Maria Lopez".to_string(),
            tutor_id: "tut-1".to_string(),
            subject: "Calculus".to_string(),
            summary: "Solid progress on derivatives; integration needs practice.".to_string(),
            rating: Some(4.5),
            created_at: now - Duration::days(4),
        },
        ProgressReport {
            id: "rep-2".to_string(),
            student_name: "James Chen".to_string(),
            tutor_id: "tut-2".to_string(),
            subject: "Data Structures".to_string(),
            summary: "Comfortable with trees, starting graphs next week.".to_string(),
            rating: Some(4.2),
            created_at: now - Duration::days(10),
        },
        ProgressReport {
            id: "rep-3".to_string(),
            student_name: "James Chen".to_string(),
            tutor_id: "tut-3".to_string(),
            subject: "Chemistry".to_string(),
            summary: "First session, baseline assessment only.".to_string(),
            rating: None,
            created_at: now - Duration::days(1),
        },
    ]
}
