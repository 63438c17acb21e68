//! Core use-case services.
//!
//! # Responsibility
//! - Own the task collection and its mutation rules.
//! - Keep callers decoupled from storage details.

pub mod shared;
pub mod task_store;
