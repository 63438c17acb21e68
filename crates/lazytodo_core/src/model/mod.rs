//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the canonical task record owned by the store.
//! - Keep text normalization rules next to the data they protect.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Task text is trimmed and never empty once written.

pub mod task;
