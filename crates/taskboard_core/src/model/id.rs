//! Identifier types and the process-wide id generator.
//!
//! # Responsibility
//! - Give tasks and lists distinct integer id types.
//! - Hand out unique ids without relying on wall-clock uniqueness.
//!
//! # Invariants
//! - `next_id()` is strictly increasing within one process.
//! - Ids restored from storage are observed so new ids never collide with them.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static LAST_ISSUED_ID: AtomicU64 = AtomicU64::new(0);

/// Identifier of a task, unique within its owning list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

/// Identifier of a task list, unique within the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(pub u64);

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for ListId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TaskId {
    /// Allocates a fresh task id.
    pub fn generate() -> Self {
        Self(next_id())
    }
}

impl ListId {
    /// Allocates a fresh list id.
    pub fn generate() -> Self {
        Self(next_id())
    }
}

/// Returns a new unique id.
///
/// Values start near the current epoch milliseconds (readable and roughly
/// chronological), but two calls in the same millisecond still differ.
pub fn next_id() -> u64 {
    let now = epoch_millis();
    let mut previous = LAST_ISSUED_ID.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(previous.saturating_add(1));
        match LAST_ISSUED_ID.compare_exchange_weak(
            previous,
            candidate,
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(_) => return candidate,
            Err(actual) => previous = actual,
        }
    }
}

/// Records an externally supplied id so later `next_id()` calls exceed it.
pub fn observe_id(id: u64) {
    LAST_ISSUED_ID.fetch_max(id, Ordering::Relaxed);
}

fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
