//! Persistence layer for the task collection.
//!
//! # Responsibility
//! - Define the whole-payload storage contract used by the store.
//! - Own the wire codec for the persisted task list.
//!
//! # Invariants
//! - The collection is always read and written as one payload.
//! - Decoding never partially recovers records: a payload is valid or rejected.

pub mod codec;
pub mod task_repo;
