//! Task domain model.
//!
//! # Responsibility
//! - Define tasks, task lists and the manager that owns them.
//! - Keep mutation explicit: callers hold the manager and call methods on it.
//!
//! # Invariants
//! - Ids are assigned at construction and never reassigned.
//! - The manager's default list always exists.

pub mod id;
pub mod manager;
pub mod task;
pub mod task_list;
