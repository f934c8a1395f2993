//! Manager persistence over a key-value store.
//!
//! # Responsibility
//! - Serialize the whole manager graph into one JSON blob under a fixed key.
//! - Restore it, treating absent or corrupt state as "no prior state".
//!
//! # Invariants
//! - `save` overwrites the previous blob.
//! - `load` never fails: every failure path logs and yields `None`.
//! - Restored ids are observed by the id generator before new ids are issued.

use crate::model::id::observe_id;
use crate::model::manager::TaskListManager;
use crate::model::task_list::TaskList;
use crate::repo::kv_repo::{KeyValueStore, RepoError};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key of the persisted blob, shared with the browser build of the app.
pub const STORAGE_KEY: &str = "todoApp";

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    Repo(RepoError),
    Encode(serde_json::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode state: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<RepoError> for StorageError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    projects: &'a [TaskList],
}

#[derive(Deserialize)]
struct Snapshot {
    projects: Vec<TaskList>,
}

/// Saves and restores a [`TaskListManager`] through a [`KeyValueStore`].
pub struct Storage<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Storage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Writes the full manager graph under [`STORAGE_KEY`].
    pub fn save(&self, manager: &TaskListManager) -> StorageResult<()> {
        let blob = encode_manager(manager)?;
        self.store.put(STORAGE_KEY, &blob)?;
        debug!(
            "event=state_save module=storage status=ok lists={} bytes={}",
            manager.get_projects().len(),
            blob.len()
        );
        Ok(())
    }

    /// Restores the manager graph, or `None` when no usable state exists.
    pub fn load(&self) -> Option<TaskListManager> {
        let blob = match self.store.get(STORAGE_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                info!("event=state_load module=storage status=empty");
                return None;
            }
            Err(err) => {
                warn!(
                    "event=state_load module=storage status=error error_code=store_read_failed error={}",
                    err
                );
                return None;
            }
        };

        match decode_manager(&blob) {
            Ok(manager) => {
                info!(
                    "event=state_load module=storage status=ok lists={}",
                    manager.get_projects().len()
                );
                Some(manager)
            }
            Err(reason) => {
                warn!(
                    "event=state_load module=storage status=error error_code=state_corrupt error={}",
                    reason
                );
                None
            }
        }
    }

    /// Restores persisted state or falls back to a fresh manager.
    pub fn load_or_default(&self) -> TaskListManager {
        self.load().unwrap_or_default()
    }

    /// Drops the persisted blob. Returns whether one existed.
    pub fn clear(&self) -> StorageResult<bool> {
        Ok(self.store.delete(STORAGE_KEY)?)
    }
}

/// Encodes a manager into the persisted JSON shape.
pub fn encode_manager(manager: &TaskListManager) -> StorageResult<String> {
    let snapshot = SnapshotRef {
        projects: manager.get_projects(),
    };
    Ok(serde_json::to_string(&snapshot)?)
}

/// Decodes the persisted JSON shape back into a manager.
///
/// Returns a human-readable reason on malformed input or an empty list set.
pub fn decode_manager(blob: &str) -> Result<TaskListManager, String> {
    let snapshot: Snapshot = serde_json::from_str(blob).map_err(|err| err.to_string())?;
    let mut lists = snapshot.projects;
    for list in &mut lists {
        observe_id(list.id().0);
        for task in list.todos() {
            observe_id(task.id().0);
        }
        list.normalize_timestamps();
    }
    TaskListManager::from_lists(lists).ok_or_else(|| "snapshot contains no lists".to_string())
}
