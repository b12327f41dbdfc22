//! Advisory catalogs
//!
//! Learning recommendations, schedule suggestions and content suggestions are
//! hand-authored entries selected by level and keyword. Nothing here adapts
//! or learns; the selection is a lookup.

use std::collections::HashSet;

use crate::models::{AdvisoryContext, Level, Priority, Recommendation};

/// Produces recommendations for a context
///
/// Implementations must return a non-empty list for every context, ordered
/// by priority (high first) and catalog order within a priority.
pub trait Advisor: Send + Sync {
    fn generate(&self, context: &AdvisoryContext) -> Vec<Recommendation>;
}

/// Static catalog row
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub priority: Priority,
    pub confidence: f64,
    pub impact: &'static str,
    pub resources: &'static [&'static str],
    /// Levels the entry applies to; empty means all
    pub levels: &'static [Level],
    /// Matched against goals and subjects; empty marks a general entry
    pub keywords: &'static [&'static str],
}

impl CatalogEntry {
    fn applies_to(&self, level: Level) -> bool {
        self.levels.is_empty() || self.levels.contains(&level)
    }

    fn is_general(&self) -> bool {
        self.keywords.is_empty()
    }

    fn matches_any(&self, terms: &[String]) -> bool {
        self.keywords
            .iter()
            .any(|keyword| terms.iter().any(|term| term.contains(keyword)))
    }

    fn to_recommendation(self) -> Recommendation {
        Recommendation {
            id: self.id.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            priority: self.priority,
            confidence: self.confidence.clamp(0.0, 1.0),
            impact: self.impact.to_string(),
            resources: self.resources.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// Select entries from `catalog` for `context`
///
/// Keyword entries that match come first; general entries for the level are
/// used when no keyword entry matched. If neither applies, every general
/// entry is used so the result is never empty for a catalog with one.
pub fn select(catalog: &[CatalogEntry], context: &AdvisoryContext) -> Vec<Recommendation> {
    let terms: Vec<String> = context
        .learning_goals
        .iter()
        .chain(context.subjects.iter())
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();

    let mut chosen: Vec<&CatalogEntry> = catalog
        .iter()
        .filter(|e| !e.is_general() && e.applies_to(context.level) && e.matches_any(&terms))
        .collect();

    if chosen.is_empty() {
        chosen = catalog
            .iter()
            .filter(|e| e.is_general() && e.applies_to(context.level))
            .collect();
    }
    if chosen.is_empty() {
        chosen = catalog.iter().filter(|e| e.is_general()).collect();
    }

    let mut seen = HashSet::new();
    let mut out: Vec<Recommendation> = chosen
        .into_iter()
        .filter(|e| seen.insert(e.id))
        .map(|e| e.to_recommendation())
        .collect();

    out.sort_by(|a, b| b.priority.cmp(&a.priority));
    out
}

const ALL_LEVELS: &[Level] = &[];
const BEGINNER: &[Level] = &[Level::Beginner];
const INTERMEDIATE_UP: &[Level] = &[Level::Intermediate, Level::Advanced];
const ADVANCED: &[Level] = &[Level::Advanced];

static LEARNING_CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        id: "learn-foundations",
        title: "Strengthen foundations",
        description: "Review core concepts with a tutor before moving to new material.",
        priority: Priority::High,
        confidence: 0.92,
        impact: "Fewer gaps in later topics",
        resources: &["Foundations review sheet", "Weekly tutor check-in"],
        levels: BEGINNER,
        keywords: &[],
    },
    CatalogEntry {
        id: "learn-practice-problems",
        title: "Daily practice problems",
        description: "Work through a short set of problems every day and bring questions to sessions.",
        priority: Priority::Medium,
        confidence: 0.85,
        impact: "Steadier exam performance",
        resources: &["Problem bank", "Solution walkthroughs"],
        levels: ALL_LEVELS,
        keywords: &[],
    },
    CatalogEntry {
        id: "learn-study-group",
        title: "Join a study group",
        description: "Peer groups help keep a regular rhythm between tutoring sessions.",
        priority: Priority::Low,
        confidence: 0.7,
        impact: "Better retention through discussion",
        resources: &["Community forum study groups"],
        levels: ALL_LEVELS,
        keywords: &[],
    },
    CatalogEntry {
        id: "learn-math-visual",
        title: "Visual approach to mathematics",
        description: "Use graphs and geometric intuition to connect formulas to meaning.",
        priority: Priority::High,
        confidence: 0.88,
        impact: "Faster grasp of abstract topics",
        resources: &["Graphing tool tutorial", "Calculus visual notes"],
        levels: ALL_LEVELS,
        keywords: &["math", "calculus", "algebra", "statistic"],
    },
    CatalogEntry {
        id: "learn-programming-projects",
        title: "Project-based programming practice",
        description: "Build a small project each week and review the code with a tutor.",
        priority: Priority::High,
        confidence: 0.9,
        impact: "Practical skills employers look for",
        resources: &["Starter project list", "Code review checklist"],
        levels: ALL_LEVELS,
        keywords: &["programming", "coding", "software", "computer"],
    },
    CatalogEntry {
        id: "learn-writing-drafts",
        title: "Iterative essay drafting",
        description: "Submit outlines and drafts early for structured feedback.",
        priority: Priority::Medium,
        confidence: 0.82,
        impact: "Clearer arguments and structure",
        resources: &["Essay outline template", "Writing center hours"],
        levels: ALL_LEVELS,
        keywords: &["writing", "essay", "english", "literature"],
    },
    CatalogEntry {
        id: "learn-exam-strategy",
        title: "Exam strategy sessions",
        description: "Timed mock exams followed by a review of mistakes.",
        priority: Priority::Medium,
        confidence: 0.8,
        impact: "Better time management under pressure",
        resources: &["Past papers", "Mock exam schedule"],
        levels: INTERMEDIATE_UP,
        keywords: &["exam", "test", "grade"],
    },
    CatalogEntry {
        id: "learn-research-mentoring",
        title: "Research mentoring",
        description: "Pair with a senior tutor for literature review and methodology guidance.",
        priority: Priority::Low,
        confidence: 0.75,
        impact: "Stronger research output",
        resources: &["Research methods guide"],
        levels: ADVANCED,
        keywords: &["research", "thesis", "publication"],
    },
];

static SCHEDULE_CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        id: "schedule-consistent-slots",
        title: "Keep consistent weekly slots",
        description: "Book the same time each week so sessions become routine.",
        priority: Priority::High,
        confidence: 0.87,
        impact: "Fewer missed sessions",
        resources: &["Recurring booking"],
        levels: ALL_LEVELS,
        keywords: &[],
    },
    CatalogEntry {
        id: "schedule-short-sessions",
        title: "Prefer shorter, frequent sessions",
        description: "Two 45-minute sessions usually beat one long session for new material.",
        priority: Priority::Medium,
        confidence: 0.78,
        impact: "Better focus and retention",
        resources: &["Session length guide"],
        levels: BEGINNER,
        keywords: &[],
    },
    CatalogEntry {
        id: "schedule-exam-ramp",
        title: "Ramp up before exams",
        description: "Add an extra session per week in the month before exams.",
        priority: Priority::High,
        confidence: 0.83,
        impact: "Targeted review when it matters",
        resources: &["Exam calendar"],
        levels: ALL_LEVELS,
        keywords: &["exam", "test", "final"],
    },
    CatalogEntry {
        id: "schedule-buffer",
        title: "Leave buffer time",
        description: "Keep 15 minutes free after each session to write down open questions.",
        priority: Priority::Low,
        confidence: 0.65,
        impact: "Sessions build on each other",
        resources: &["Session notes template"],
        levels: ALL_LEVELS,
        keywords: &[],
    },
];

static CONTENT_CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        id: "content-intro-videos",
        title: "Introductory video series",
        description: "Short videos covering the basics before the first session.",
        priority: Priority::Medium,
        confidence: 0.8,
        impact: "Shared vocabulary with your tutor",
        resources: &["Intro playlist"],
        levels: BEGINNER,
        keywords: &[],
    },
    CatalogEntry {
        id: "content-worked-examples",
        title: "Worked examples library",
        description: "Step-by-step solutions grouped by topic.",
        priority: Priority::High,
        confidence: 0.86,
        impact: "Clear models to imitate",
        resources: &["Worked examples"],
        levels: ALL_LEVELS,
        keywords: &[],
    },
    CatalogEntry {
        id: "content-science-labs",
        title: "Virtual lab simulations",
        description: "Interactive simulations for chemistry and physics experiments.",
        priority: Priority::High,
        confidence: 0.84,
        impact: "Hands-on understanding without lab time",
        resources: &["Simulation portal", "Lab report template"],
        levels: ALL_LEVELS,
        keywords: &["chemistry", "physics", "biology", "science"],
    },
    CatalogEntry {
        id: "content-code-katas",
        title: "Coding katas",
        description: "Small, repeatable exercises to practice language features.",
        priority: Priority::Medium,
        confidence: 0.81,
        impact: "Fluency with everyday constructs",
        resources: &["Kata list"],
        levels: ALL_LEVELS,
        keywords: &["programming", "coding", "software"],
    },
    CatalogEntry {
        id: "content-papers",
        title: "Curated reading list",
        description: "Recent papers and review articles selected by senior tutors.",
        priority: Priority::Low,
        confidence: 0.7,
        impact: "Exposure to current work",
        resources: &["Reading list"],
        levels: INTERMEDIATE_UP,
        keywords: &[],
    },
];

/// Learning-path recommendations
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationSelector;

impl Advisor for RecommendationSelector {
    fn generate(&self, context: &AdvisoryContext) -> Vec<Recommendation> {
        let out = select(LEARNING_CATALOG, context);
        tracing::debug!(level = ?context.level, count = out.len(), "Selected learning recommendations");
        out
    }
}

/// Scheduling suggestions
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleOptimizer;

impl Advisor for ScheduleOptimizer {
    fn generate(&self, context: &AdvisoryContext) -> Vec<Recommendation> {
        let out = select(SCHEDULE_CATALOG, context);
        tracing::debug!(level = ?context.level, count = out.len(), "Selected schedule suggestions");
        out
    }
}

/// Study material suggestions
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentSuggestor;

impl Advisor for ContentSuggestor {
    fn generate(&self, context: &AdvisoryContext) -> Vec<Recommendation> {
        let out = select(CONTENT_CATALOG, context);
        tracing::debug!(level = ?context.level, count = out.len(), "Selected content suggestions");
        out
    }
}
