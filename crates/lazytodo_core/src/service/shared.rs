//! Thread-safe wrapper for hosts that call the store from several threads.
//!
//! # Invariants
//! - One lock covers both the collection and its persistence write, so
//!   every store operation stays atomic for other threads.

use crate::clock::Clock;
use crate::repo::task_repo::TaskStorage;
use crate::service::task_store::TaskStore;
use std::sync::{Arc, Mutex, PoisonError};

/// Cloneable, mutex-guarded handle to one `TaskStore`.
pub struct SharedTaskStore<S: TaskStorage, C: Clock> {
    inner: Arc<Mutex<TaskStore<S, C>>>,
}

impl<S: TaskStorage, C: Clock> Clone for SharedTaskStore<S, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: TaskStorage, C: Clock> SharedTaskStore<S, C> {
    pub fn new(store: TaskStore<S, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Runs `f` with exclusive access to the store.
    ///
    /// Lock poisoning from an earlier panic is ignored.
    pub fn with<R>(&self, f: impl FnOnce(&mut TaskStore<S, C>) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}
