//! Task query building blocks.
//!
//! # Responsibility
//! - Provide search, filter and sort primitives over borrowed tasks.
//! - Compose them into one view query (search, then filter, then sort).
//!
//! # Invariants
//! - Queries borrow tasks; stored list order is never changed.

pub mod filter;
pub mod sort;

use crate::model::task::Task;
use chrono::{DateTime, Utc};
use filter::TaskFilter;
use sort::SortSpec;

/// Composed view query applied by [`crate::TaskList::query`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    /// Case-insensitive text; blank matches everything.
    pub search: String,
    pub filter: TaskFilter,
    pub sort: SortSpec,
}

impl TaskQuery {
    /// Runs search, then filter, then sort, each stage narrowing the previous one.
    pub fn run<'a, I>(&self, tasks: I) -> Vec<&'a Task>
    where
        I: IntoIterator<Item = &'a Task>,
    {
        self.run_at(tasks, Utc::now())
    }

    /// Clock-injected form of [`TaskQuery::run`].
    pub fn run_at<'a, I>(&self, tasks: I, now: DateTime<Utc>) -> Vec<&'a Task>
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let needle = normalize_search(&self.search);
        let mut matched: Vec<&Task> = tasks
            .into_iter()
            .filter(|task| needle.as_deref().map_or(true, |text| task.matches_text(text)))
            .filter(|task| self.filter.matches_at(task, now))
            .collect();
        self.sort.apply(&mut matched);
        matched
    }
}

/// Lowercases a search string; `None` for blank input.
pub fn normalize_search(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}
