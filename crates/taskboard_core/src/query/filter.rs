//! Conjunctive task filters.
//!
//! # Invariants
//! - Status, priority and tag criteria are ANDed together.
//! - Tag criteria are ORed: one shared tag is enough.
//! - An unset criterion (or an empty tag list) passes every task.

use crate::model::task::{Priority, Task};
use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Completion-state filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Completed,
    Active,
    Overdue,
}

impl StatusFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Active => "active",
            Self::Overdue => "overdue",
        }
    }

    fn matches(self, task: &Task, now: DateTime<Utc>) -> bool {
        match self {
            Self::Completed => task.completed,
            Self::Active => !task.completed,
            Self::Overdue => task.is_overdue_at(now),
        }
    }
}

/// Returned when a status label is not `completed|active|overdue`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError(pub String);

impl Display for ParseStatusError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported status `{}`; expected completed|active|overdue",
            self.0
        )
    }
}

impl Error for ParseStatusError {}

impl FromStr for StatusFilter {
    type Err = ParseStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "completed" => Ok(Self::Completed),
            "active" => Ok(Self::Active),
            "overdue" => Ok(Self::Overdue),
            _ => Err(ParseStatusError(value.to_string())),
        }
    }
}

/// Filter criteria for [`crate::TaskList::filter_todos`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<StatusFilter>,
    pub priority: Option<Priority>,
    /// Tasks pass when they carry at least one of these tags.
    pub tags: Vec<String>,
}

impl TaskFilter {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.tags.is_empty()
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.matches_at(task, Utc::now())
    }

    /// Clock-injected form of [`TaskFilter::matches`].
    pub fn matches_at(&self, task: &Task, now: DateTime<Utc>) -> bool {
        let status_match = self.status.map_or(true, |status| status.matches(task, now));
        let priority_match = self.priority.map_or(true, |priority| task.priority == priority);
        let tags_match = self.tags.is_empty() || self.tags.iter().any(|tag| task.has_tag(tag));

        status_match && priority_match && tags_match
    }
}
