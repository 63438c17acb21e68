//! Read-side projections of the task collection.
//!
//! # Responsibility
//! - Derive the displayed sequence from a snapshot plus filter/sort settings.
//! - Produce summary and relative-age labels for display.
//!
//! # Invariants
//! - Everything here is pure; snapshots are never mutated.

pub mod projector;
