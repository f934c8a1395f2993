//! Core domain logic for Taskboard.
//! This crate is the single source of truth for task/list invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use config::AppConfig;
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::id::{ListId, TaskId};
pub use model::manager::{TaskListManager, DEFAULT_LIST_NAME};
pub use model::task::{parse_due_date, ParsePriorityError, Priority, Task, TaskPatch};
pub use model::task_list::TaskList;
pub use query::filter::{ParseStatusError, StatusFilter, TaskFilter};
pub use query::sort::{SortCriteria, SortSpec};
pub use query::TaskQuery;
pub use repo::kv_repo::{
    KeyValueStore, MemoryKeyValueStore, RepoError, RepoResult, SqliteKeyValueStore,
};
pub use service::session::{parse_tag_input, NewTask, Session, SessionError, SessionResult};
pub use service::storage::{Storage, StorageError, StorageResult, STORAGE_KEY};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
