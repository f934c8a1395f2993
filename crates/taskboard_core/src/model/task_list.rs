//! Task list ("project") model and its query operations.
//!
//! # Responsibility
//! - Own an ordered sequence of tasks in creation order.
//! - Expose search/filter/sort computed on demand, never cached.
//!
//! # Invariants
//! - Queries return new borrowed sequences; stored order is never changed.
//! - Task ids are expected to be unique within one list; `add_todo` does
//!   not enforce it.

use crate::model::id::{ListId, TaskId};
use crate::model::task::Task;
use crate::query::filter::TaskFilter;
use crate::query::sort::{SortCriteria, SortSpec};
use crate::query::{normalize_search, TaskQuery};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Named, ordered collection of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskList {
    id: ListId,
    pub name: String,
    #[serde(default, rename = "todos")]
    tasks: Vec<Task>,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
}

impl TaskList {
    /// Creates an empty list with a freshly generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(ListId::generate(), name)
    }

    /// Creates an empty list with a caller-provided id.
    pub fn with_id(id: ListId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tasks: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> ListId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Appends a task at the end.
    pub fn add_todo(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Removes the task with `id`, returning it when present.
    pub fn remove_todo(&mut self, id: TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id() == id)?;
        Some(self.tasks.remove(index))
    }

    pub fn todos(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get_todo_by_id(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    pub fn get_todo_by_id_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id() == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Case-insensitive substring search over title and description.
    ///
    /// Surrounding whitespace is ignored; a blank query matches every task.
    pub fn search_todos(&self, query: &str) -> Vec<&Task> {
        let Some(needle) = normalize_search(query) else {
            return self.tasks.iter().collect();
        };
        self.tasks
            .iter()
            .filter(|task| task.matches_text(&needle))
            .collect()
    }

    /// Returns tasks passing every criterion of `filter`.
    pub fn filter_todos(&self, filter: &TaskFilter) -> Vec<&Task> {
        let now = Utc::now();
        self.tasks
            .iter()
            .filter(|task| filter.matches_at(task, now))
            .collect()
    }

    /// Returns all tasks ordered by `criteria`.
    pub fn sort_todos(&self, criteria: SortCriteria, ascending: bool) -> Vec<&Task> {
        let mut sorted: Vec<&Task> = self.tasks.iter().collect();
        SortSpec::new(criteria, ascending).apply(&mut sorted);
        sorted
    }

    /// Search, then filter, then sort.
    pub fn query(&self, query: &TaskQuery) -> Vec<&Task> {
        query.run(&self.tasks)
    }

    pub(crate) fn normalize_timestamps(&mut self) {
        for task in &mut self.tasks {
            task.normalize_timestamps();
        }
    }
}
