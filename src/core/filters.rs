use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::{
    Feedback, ForumPost, Profile, ProgressReport, RatingBucket, Role, SearchField, SortDirection, SortKey,
    TimeWindow,
};

/// Boxed item predicate
pub type Predicate<'a, T> = Box<dyn Fn(&T) -> bool + 'a>;

/// Boxed item comparator
pub type Comparator<'a, T> = Box<dyn Fn(&T, &T) -> Ordering + 'a>;

/// Filter `items` by every predicate, then stable-sort with `comparator`
///
/// `items` is never modified; the result is a fresh `Vec`.
pub fn apply<T, C>(items: &[T], predicates: &[Predicate<'_, T>], comparator: C) -> Vec<T>
where
    T: Clone,
    C: Fn(&T, &T) -> Ordering,
{
    let mut out: Vec<T> = items
        .iter()
        .filter(|item| predicates.iter().all(|p| p(*item)))
        .cloned()
        .collect();
    out.sort_by(comparator);
    out
}

/// Fluent form of [`apply`]
pub struct Pipeline<'a, T> {
    predicates: Vec<Predicate<'a, T>>,
    comparator: Option<Comparator<'a, T>>,
}

impl<'a, T: Clone> Pipeline<'a, T> {
    pub fn new() -> Self {
        Self {
            predicates: Vec::new(),
            comparator: None,
        }
    }

    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + 'a,
    {
        self.predicates.push(Box::new(predicate));
        self
    }

    /// Add a predicate only when one was built; `None` means "all"
    pub fn filter_opt(mut self, predicate: Option<Predicate<'a, T>>) -> Self {
        if let Some(p) = predicate {
            self.predicates.push(p);
        }
        self
    }

    pub fn sort_by<F>(mut self, comparator: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'a,
    {
        self.comparator = Some(Box::new(comparator));
        self
    }

    pub fn run(&self, items: &[T]) -> Vec<T> {
        match &self.comparator {
            Some(cmp) => apply(items, &self.predicates, |a, b| cmp(a, b)),
            None => apply(items, &self.predicates, |_, _| Ordering::Equal),
        }
    }
}

impl<'a, T: Clone> Default for Pipeline<'a, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Attributes the shared filters and comparators read
pub trait Record {
    fn id(&self) -> &str;
    fn role(&self) -> Option<Role>;
    fn rating(&self) -> Option<f64>;
    fn timestamp(&self) -> Option<DateTime<Utc>>;
    fn title(&self) -> Option<&str>;
    fn engagement(&self) -> Option<u32>;
    fn search_text(&self, field: SearchField) -> Vec<&str>;
}

impl Record for ForumPost {
    fn id(&self) -> &str {
        &self.id
    }
    fn role(&self) -> Option<Role> {
        Some(self.author_role)
    }
    fn rating(&self) -> Option<f64> {
        None
    }
    fn timestamp(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }
    fn engagement(&self) -> Option<u32> {
        Some(self.likes.saturating_add(self.replies))
    }
    fn search_text(&self, field: SearchField) -> Vec<&str> {
        match field {
            SearchField::Title => vec![self.title.as_str()],
            SearchField::Body => vec![self.body.as_str()],
            SearchField::Tags => self.tags.iter().map(String::as_str).collect(),
            SearchField::Author => vec![self.author.as_str()],
        }
    }
}

impl Record for Feedback {
    fn id(&self) -> &str {
        &self.id
    }
    fn role(&self) -> Option<Role> {
        Some(self.author_role)
    }
    fn rating(&self) -> Option<f64> {
        Some(self.rating)
    }
    fn timestamp(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
    fn title(&self) -> Option<&str> {
        Some(&self.subject)
    }
    fn engagement(&self) -> Option<u32> {
        None
    }
    fn search_text(&self, field: SearchField) -> Vec<&str> {
        match field {
            SearchField::Title => vec![self.subject.as_str()],
            SearchField::Body => vec![self.comment.as_str()],
            SearchField::Tags => vec![self.subject.as_str()],
            SearchField::Author => vec![self.student_name.as_str()],
        }
    }
}

impl Record for ProgressReport {
    fn id(&self) -> &str {
        &self.id
    }
    // Reports are written by tutors
    fn role(&self) -> Option<Role> {
        Some(Role::Tutor)
    }
    fn rating(&self) -> Option<f64> {
        self.rating
    }
    fn timestamp(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
    fn title(&self) -> Option<&str> {
        Some(&self.subject)
    }
    fn engagement(&self) -> Option<u32> {
        None
    }
    fn search_text(&self, field: SearchField) -> Vec<&str> {
        match field {
            SearchField::Title => vec![self.subject.as_str()],
            SearchField::Body => vec![self.summary.as_str()],
            SearchField::Tags => vec![self.subject.as_str()],
            SearchField::Author => vec![self.student_name.as_str(), self.tutor_id.as_str()],
        }
    }
}

impl Record for Profile {
    fn id(&self) -> &str {
        &self.id
    }
    fn role(&self) -> Option<Role> {
        Some(self.role)
    }
    fn rating(&self) -> Option<f64> {
        Some(self.rating)
    }
    fn timestamp(&self) -> Option<DateTime<Utc>> {
        None
    }
    fn title(&self) -> Option<&str> {
        Some(&self.name)
    }
    fn engagement(&self) -> Option<u32> {
        None
    }
    fn search_text(&self, field: SearchField) -> Vec<&str> {
        match field {
            SearchField::Title | SearchField::Author => vec![self.name.as_str()],
            SearchField::Body => Vec::new(),
            SearchField::Tags => self.specialties.iter().map(String::as_str).collect(),
        }
    }
}

pub fn role_predicate<'a, T: Record + 'a>(role: Role) -> Predicate<'a, T> {
    Box::new(move |item: &T| item.role() == Some(role))
}

pub fn rating_predicate<'a, T: Record + 'a>(bucket: RatingBucket) -> Predicate<'a, T> {
    Box::new(move |item: &T| item.rating().is_some_and(|r| bucket.contains(r)))
}

pub fn time_window_predicate<'a, T: Record + 'a>(window: TimeWindow, now: DateTime<Utc>) -> Predicate<'a, T> {
    Box::new(move |item: &T| item.timestamp().is_some_and(|at| window.contains(at, now)))
}

/// Case-insensitive substring search over `fields`; `None` for a blank query
pub fn text_search_predicate<'a, T: Record + 'a>(query: &str, fields: &'a [SearchField]) -> Option<Predicate<'a, T>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    Some(Box::new(move |item: &T| {
        fields.iter().any(|field| {
            item.search_text(*field)
                .iter()
                .any(|text| text.to_lowercase().contains(&needle))
        })
    }))
}

/// Compare optional keys with missing values last in either direction
fn compare_present<V, F>(a: Option<V>, b: Option<V>, direction: SortDirection, cmp: F) -> Ordering
where
    F: Fn(&V, &V) -> Ordering,
{
    match (a, b) {
        (Some(a), Some(b)) => match direction {
            SortDirection::Asc => cmp(&a, &b),
            SortDirection::Desc => cmp(&a, &b).reverse(),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Total order: sort key, then newest first, then id
pub fn record_comparator<T: Record>(key: SortKey, direction: SortDirection) -> impl Fn(&T, &T) -> Ordering {
    move |a: &T, b: &T| {
        let primary = match key {
            SortKey::Recency => compare_present(a.timestamp(), b.timestamp(), direction, Ord::cmp),
            SortKey::Rating => compare_present(a.rating(), b.rating(), direction, |x, y| x.total_cmp(y)),
            SortKey::Title => compare_present(
                a.title().map(str::to_lowercase),
                b.title().map(str::to_lowercase),
                direction,
                Ord::cmp,
            ),
            SortKey::Engagement => compare_present(a.engagement(), b.engagement(), direction, Ord::cmp),
        };

        primary
            .then_with(|| compare_present(a.timestamp(), b.timestamp(), SortDirection::Desc, Ord::cmp))
            .then_with(|| a.id().cmp(b.id()))
    }
}

fn default_search_fields() -> Vec<SearchField> {
    vec![SearchField::Title, SearchField::Body, SearchField::Tags, SearchField::Author]
}

fn default_sort_key() -> SortKey {
    SortKey::Recency
}

fn default_sort_direction() -> SortDirection {
    SortDirection::Desc
}

/// User-selected filters; every `None` means "all"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub rating_bucket: Option<RatingBucket>,
    #[serde(default)]
    pub time_window: Option<TimeWindow>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default = "default_search_fields")]
    pub search_fields: Vec<SearchField>,
    #[serde(default = "default_sort_key")]
    pub sort_key: SortKey,
    #[serde(default = "default_sort_direction")]
    pub sort_direction: SortDirection,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            role: None,
            rating_bucket: None,
            time_window: None,
            search: None,
            search_fields: default_search_fields(),
            sort_key: default_sort_key(),
            sort_direction: default_sort_direction(),
        }
    }
}

impl FilterCriteria {
    pub fn predicates<'a, T: Record + 'a>(&'a self, now: DateTime<Utc>) -> Vec<Predicate<'a, T>> {
        let mut predicates: Vec<Predicate<'a, T>> = Vec::new();

        if let Some(role) = self.role {
            predicates.push(role_predicate(role));
        }
        if let Some(bucket) = self.rating_bucket {
            predicates.push(rating_predicate(bucket));
        }
        if let Some(window) = self.time_window {
            predicates.push(time_window_predicate(window, now));
        }
        if let Some(predicate) = self
            .search
            .as_deref()
            .and_then(|q| text_search_predicate(q, &self.search_fields))
        {
            predicates.push(predicate);
        }

        predicates
    }

    /// Filter and sort `items`, with `now` anchoring the time window
    pub fn apply<T: Record + Clone>(&self, items: &[T], now: DateTime<Utc>) -> Vec<T> {
        let predicates = self.predicates(now);
        let filtered = apply(items, &predicates, record_comparator(self.sort_key, self.sort_direction));

        tracing::trace!(
            input = items.len(),
            output = filtered.len(),
            predicates = predicates.len(),
            "Applied filter criteria"
        );

        filtered
    }
}
