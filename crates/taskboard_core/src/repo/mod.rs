//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage contract the persistence service depends on.
//! - Isolate SQLite query details from service orchestration.

pub mod kv_repo;
