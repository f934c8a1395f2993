//! Task domain model.
//!
//! # Responsibility
//! - Define the leaf unit of work and its scheduling/priority/tag metadata.
//! - Apply partial edits through an explicit patch type.
//!
//! # Invariants
//! - `tags` never contains duplicate values.
//! - `created_at` is set once at construction.
//! - `edited_at`, once set, is always >= `created_at`.
//! - A task without a usable due date is never overdue.

use crate::model::id::TaskId;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Task urgency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Urgency rank used for sorting: high sorts first.
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a priority label is not `low|medium|high`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePriorityError(pub String);

impl Display for ParsePriorityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported priority `{}`; expected low|medium|high",
            self.0
        )
    }
}

impl Error for ParsePriorityError {}

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParsePriorityError(value.to_string())),
        }
    }
}

/// A unit of work owned by a [`crate::TaskList`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Serialized as `YYYY-MM-DD`, or `""` when absent.
    #[serde(
        default,
        serialize_with = "serialize_due_date",
        deserialize_with = "deserialize_due_date"
    )]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, deserialize_with = "deserialize_tags")]
    tags: Vec<String>,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
    #[serde(default)]
    edited_at: Option<DateTime<Utc>>,
}

/// Explicit partial update for [`Task::edit`].
///
/// `None` leaves a field unchanged. `due_date: Some(None)` clears the due date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<Option<NaiveDate>>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
    pub tags: Option<Vec<String>>,
}

impl TaskPatch {
    /// Returns whether the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
            && self.completed.is_none()
            && self.tags.is_none()
    }
}

impl Task {
    /// Creates an active medium-priority task with a freshly generated id.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_id(TaskId::generate(), title, description)
    }

    /// Creates a task with a caller-provided id.
    ///
    /// Used by restore paths where identity already exists.
    pub fn with_id(id: TaskId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            due_date: None,
            priority: Priority::default(),
            completed: false,
            tags: Vec::new(),
            created_at: Utc::now(),
            edited_at: None,
        }
    }

    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Replaces the tag set; duplicates are dropped keeping first occurrence.
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = dedup_tags(tags);
        self
    }

    /// Overrides the creation timestamp.
    ///
    /// Restore and test paths only; bumps `edited_at` if it would precede it.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        if self.edited_at.is_some_and(|edited| edited < created_at) {
            self.edited_at = Some(created_at);
        }
        self
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn edited_at(&self) -> Option<DateTime<Utc>> {
        self.edited_at
    }

    /// Re-establishes `edited_at >= created_at` for restored payloads.
    pub(crate) fn normalize_timestamps(&mut self) {
        if let Some(edited) = self.edited_at {
            self.edited_at = Some(edited.max(self.created_at));
        }
    }

    pub fn toggle_complete(&mut self) {
        self.completed = !self.completed;
    }

    /// Applies a partial update and stamps `edited_at` with the current time.
    pub fn edit(&mut self, patch: TaskPatch) {
        self.edit_at(patch, Utc::now());
    }

    /// Applies a partial update using an explicit clock value.
    pub fn edit_at(&mut self, patch: TaskPatch, now: DateTime<Utc>) {
        let TaskPatch {
            title,
            description,
            due_date,
            priority,
            completed,
            tags,
        } = patch;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(due_date) = due_date {
            self.due_date = due_date;
        }
        if let Some(priority) = priority {
            self.priority = priority;
        }
        if let Some(completed) = completed {
            self.completed = completed;
        }
        if let Some(tags) = tags {
            self.tags = dedup_tags(tags);
        }

        self.edited_at = Some(now.max(self.created_at));
    }

    /// Adds a tag unless already present. Returns whether it was inserted.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.has_tag(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Removes a tag by exact match. Returns whether it was present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|current| current != tag);
        self.tags.len() != before
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|current| current == tag)
    }

    /// Returns whether the task is past due and still open.
    pub fn is_overdue(&self) -> bool {
        self.is_overdue_at(Utc::now())
    }

    /// Overdue means: not completed, and the due day began strictly before `now`.
    ///
    /// The due day begins at 00:00 UTC, so a task due today is already overdue.
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        if self.completed {
            return false;
        }
        match self.due_date {
            Some(due) => due.and_time(NaiveTime::MIN).and_utc() < now,
            None => false,
        }
    }

    /// Case-insensitive substring match on title or description.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.description.to_lowercase().contains(needle)
    }
}

/// Parses user-entered due date text.
///
/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp. Blank or unparseable
/// input yields `None`.
pub fn parse_due_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DUE_DATE_FORMAT) {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|timestamp| timestamp.date_naive())
}

fn dedup_tags<I, T>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let mut unique: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.into();
        if !unique.contains(&tag) {
            unique.push(tag);
        }
    }
    unique
}

fn serialize_due_date<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(date) => serializer.collect_str(&date.format(DUE_DATE_FORMAT)),
        None => serializer.serialize_str(""),
    }
}

// Lenient on purpose: legacy blobs may carry `""`, `null` or free text.
fn deserialize_due_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_due_date))
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(dedup_tags(raw))
}
