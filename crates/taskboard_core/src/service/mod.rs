//! Core use-case services.
//!
//! # Responsibility
//! - Persist and restore the manager graph.
//! - Orchestrate UI-level commands over an owned manager.

pub mod session;
pub mod storage;
