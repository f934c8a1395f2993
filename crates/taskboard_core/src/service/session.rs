//! Interactive session over one owned manager.
//!
//! # Responsibility
//! - Hold the manager, the selected list and the current view query.
//! - Turn UI commands into explicit manager mutations.
//! - Persist after every mutation.
//!
//! # Invariants
//! - The selected list always exists; deleting it reselects the default list.
//! - View changes (search/filter/sort, list selection) are never persisted.
//! - The default list cannot be deleted.

use crate::model::id::{ListId, TaskId};
use crate::model::manager::TaskListManager;
use crate::model::task::{Priority, Task, TaskPatch};
use crate::model::task_list::TaskList;
use crate::query::filter::TaskFilter;
use crate::query::sort::SortCriteria;
use crate::query::TaskQuery;
use crate::repo::kv_repo::KeyValueStore;
use crate::service::storage::{Storage, StorageError};
use chrono::NaiveDate;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for session commands.
#[derive(Debug)]
pub enum SessionError {
    /// List names must contain non-whitespace text.
    EmptyListName,
    ListNotFound(ListId),
    TaskNotFound(TaskId),
    Storage(StorageError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyListName => write!(f, "list name cannot be empty"),
            Self::ListNotFound(id) => write!(f, "list not found: {id}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for SessionError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Input for [`Session::add_task`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub tags: Vec<String>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    fn into_task(self) -> Task {
        Task::new(self.title, self.description)
            .with_due_date(self.due_date)
            .with_priority(self.priority)
            .with_tags(self.tags)
    }
}

/// Owned manager plus UI state, persisted through `Storage<S>`.
pub struct Session<S: KeyValueStore> {
    storage: Storage<S>,
    manager: TaskListManager,
    current_list: ListId,
    view: TaskQuery,
}

impl<S: KeyValueStore> Session<S> {
    /// Restores persisted state (or starts fresh) and selects the default list.
    ///
    /// Fresh state is saved right away so the default list id is stable
    /// across sessions. A failed save is logged and the session stays usable.
    pub fn open(storage: Storage<S>) -> Self {
        let manager = storage.load().unwrap_or_else(|| {
            let fresh = TaskListManager::new();
            if let Err(err) = storage.save(&fresh) {
                warn!("event=session_open module=session status=error stage=initial_save error={err}");
            }
            fresh
        });
        let current_list = manager.default_project().id();
        info!(
            "event=session_open module=session status=ok lists={}",
            manager.get_projects().len()
        );
        Self {
            storage,
            manager,
            current_list,
            view: TaskQuery::default(),
        }
    }

    pub fn manager(&self) -> &TaskListManager {
        &self.manager
    }

    pub fn storage(&self) -> &Storage<S> {
        &self.storage
    }

    pub fn current_list_id(&self) -> ListId {
        self.current_list
    }

    pub fn current_list(&self) -> &TaskList {
        self.manager
            .get_project_by_id(self.current_list)
            .unwrap_or_else(|| self.manager.default_project())
    }

    /// Selects a list for subsequent task commands. Returns `false` if unknown.
    pub fn select_list(&mut self, id: ListId) -> bool {
        if self.manager.get_project_by_id(id).is_none() {
            return false;
        }
        self.current_list = id;
        true
    }

    /// Creates a list from a user-entered name and persists.
    pub fn create_list(&mut self, name: &str) -> SessionResult<ListId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyListName);
        }
        let list = TaskList::new(name);
        let id = list.id();
        self.manager.add_project(list);
        self.persist()?;
        info!("event=list_create module=session status=ok list_id={id}");
        Ok(id)
    }

    /// Deletes a list and its tasks, then persists.
    ///
    /// Returns `false` when `id` is the default list or unknown; nothing is
    /// written in that case.
    pub fn delete_list(&mut self, id: ListId) -> SessionResult<bool> {
        let Some(removed) = self.manager.remove_project(id) else {
            return Ok(false);
        };
        if self.current_list == id {
            self.current_list = self.manager.default_project().id();
        }
        self.persist()?;
        info!(
            "event=list_delete module=session status=ok list_id={} tasks_removed={}",
            id,
            removed.len()
        );
        Ok(true)
    }

    /// Appends a task to the selected list and persists.
    pub fn add_task(&mut self, new_task: NewTask) -> SessionResult<TaskId> {
        let task = new_task.into_task();
        let id = task.id();
        self.current_list_mut()?.add_todo(task);
        self.persist()?;
        info!(
            "event=task_create module=session status=ok list_id={} task_id={}",
            self.current_list, id
        );
        Ok(id)
    }

    /// Flips completion and persists. Returns the new `completed` value.
    pub fn toggle_task(&mut self, id: TaskId) -> SessionResult<bool> {
        let task = self.task_mut(id)?;
        task.toggle_complete();
        let completed = task.completed;
        self.persist()?;
        Ok(completed)
    }

    /// Removes a task from the selected list and persists.
    pub fn delete_task(&mut self, id: TaskId) -> SessionResult<Task> {
        let removed = self
            .current_list_mut()?
            .remove_todo(id)
            .ok_or(SessionError::TaskNotFound(id))?;
        self.persist()?;
        info!(
            "event=task_delete module=session status=ok list_id={} task_id={}",
            self.current_list, id
        );
        Ok(removed)
    }

    /// Applies a partial edit and persists.
    pub fn edit_task(&mut self, id: TaskId, patch: TaskPatch) -> SessionResult<()> {
        self.task_mut(id)?.edit(patch);
        self.persist()
    }

    pub fn view(&self) -> &TaskQuery {
        &self.view
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.view.search = text.into();
    }

    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.view.filter = filter;
    }

    pub fn set_sort_criteria(&mut self, criteria: SortCriteria) {
        self.view.sort.criteria = criteria;
    }

    /// Flips the sort direction. Returns `true` when now ascending.
    pub fn toggle_sort_direction(&mut self) -> bool {
        self.view.sort.ascending = !self.view.sort.ascending;
        self.view.sort.ascending
    }

    /// Tasks of the selected list after search, filter and sort.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.current_list().query(&self.view)
    }

    fn current_list_mut(&mut self) -> SessionResult<&mut TaskList> {
        let id = self.current_list;
        self.manager
            .get_project_by_id_mut(id)
            .ok_or(SessionError::ListNotFound(id))
    }

    fn task_mut(&mut self, id: TaskId) -> SessionResult<&mut Task> {
        self.current_list_mut()?
            .get_todo_by_id_mut(id)
            .ok_or(SessionError::TaskNotFound(id))
    }

    fn persist(&self) -> SessionResult<()> {
        self.storage.save(&self.manager)?;
        Ok(())
    }
}

/// Splits comma-separated tag input into trimmed, non-blank, unique tags.
pub fn parse_tag_input(text: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in text.split(',').map(str::trim).filter(|tag| !tag.is_empty()) {
        if !tags.iter().any(|existing| existing == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}
