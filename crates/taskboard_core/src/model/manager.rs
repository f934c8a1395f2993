//! Session-wide owner of all task lists.
//!
//! # Invariants
//! - The manager always holds at least one list.
//! - `lists[0]` is the default list and can never be removed.

use crate::model::id::ListId;
use crate::model::task_list::TaskList;

pub const DEFAULT_LIST_NAME: &str = "Default";

/// Ordered collection of task lists with a protected default list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListManager {
    lists: Vec<TaskList>,
}

impl Default for TaskListManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskListManager {
    /// Creates a manager holding one empty default list.
    pub fn new() -> Self {
        Self {
            lists: vec![TaskList::new(DEFAULT_LIST_NAME)],
        }
    }

    /// Builds a manager from restored lists; the first becomes the default.
    ///
    /// Returns `None` for an empty vector.
    pub fn from_lists(lists: Vec<TaskList>) -> Option<Self> {
        if lists.is_empty() {
            return None;
        }
        Some(Self { lists })
    }

    pub fn add_project(&mut self, list: TaskList) {
        self.lists.push(list);
    }

    /// Removes a list and all its tasks.
    ///
    /// Returns `None` without changes when `id` is the default list or unknown.
    pub fn remove_project(&mut self, id: ListId) -> Option<TaskList> {
        if self.is_default(id) {
            return None;
        }
        let index = self.lists.iter().position(|list| list.id() == id)?;
        Some(self.lists.remove(index))
    }

    pub fn get_projects(&self) -> &[TaskList] {
        &self.lists
    }

    pub fn get_project_by_id(&self, id: ListId) -> Option<&TaskList> {
        self.lists.iter().find(|list| list.id() == id)
    }

    pub fn get_project_by_id_mut(&mut self, id: ListId) -> Option<&mut TaskList> {
        self.lists.iter_mut().find(|list| list.id() == id)
    }

    pub fn default_project(&self) -> &TaskList {
        &self.lists[0]
    }

    pub fn is_default(&self, id: ListId) -> bool {
        self.default_project().id() == id
    }
}

#[cfg(test)]
mod tests {
    use super::{TaskListManager, DEFAULT_LIST_NAME};
    use crate::model::task_list::TaskList;

    #[test]
    fn new_manager_has_single_default_list() {
        let manager = TaskListManager::new();
        assert_eq!(manager.get_projects().len(), 1);
        assert_eq!(manager.default_project().name, DEFAULT_LIST_NAME);
    }

    #[test]
    fn from_lists_rejects_empty_input() {
        assert!(TaskListManager::from_lists(Vec::new()).is_none());
        let restored = TaskListManager::from_lists(vec![TaskList::new("Inbox")]).unwrap();
        assert_eq!(restored.default_project().name, "Inbox");
    }
}
