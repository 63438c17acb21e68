//! Task store: the owned, persisted, ordered task collection.
//!
//! # Responsibility
//! - Apply add/toggle/remove/edit/reorder/clear mutations to the collection.
//! - Persist the whole collection synchronously after every applied mutation.
//! - Normalize unreadable persisted state to an empty collection on load.
//!
//! # Invariants
//! - Task ids are unique across the live collection.
//! - Task text is trimmed and never empty.
//! - Collection order is the manual order; new tasks are appended.
//! - `created` never decreases across successive adds in one session.
//! - Not-found and blank-input cases are results, never errors.

use crate::clock::{Clock, SystemClock};
use crate::model::task::{normalize_text, Task, TaskId};
use crate::repo::codec::{decode_tasks, encode_tasks};
use crate::repo::task_repo::{RepoResult, TaskStorage};
use log::{debug, error, info, warn};

/// Ordered task collection bound to a storage backend.
pub struct TaskStore<S: TaskStorage, C: Clock = SystemClock> {
    storage: S,
    clock: C,
    items: Vec<Task>,
    last_created: i64,
    revision: u64,
    pending_write: bool,
}

impl<S: TaskStorage> TaskStore<S, SystemClock> {
    /// Opens a store on the wall clock and loads persisted state.
    pub fn with_storage(storage: S) -> Self {
        Self::open(storage, SystemClock)
    }
}

impl<S: TaskStorage, C: Clock> TaskStore<S, C> {
    /// Creates the store and performs the initial load.
    pub fn open(storage: S, clock: C) -> Self {
        let mut store = Self {
            storage,
            clock,
            items: Vec::new(),
            last_created: i64::MIN,
            revision: 0,
            pending_write: false,
        };
        store.replace_from_storage();
        store
    }

    /// Re-reads persisted state, replacing the in-memory collection.
    ///
    /// Missing, malformed or non-list payloads yield an empty collection.
    /// Never fails.
    pub fn load(&mut self) -> Vec<Task> {
        self.replace_from_storage();
        self.revision += 1;
        self.items.clone()
    }

    /// Appends a new open task.
    ///
    /// Returns `None` and changes nothing when `text` is blank.
    pub fn add(&mut self, text: &str) -> Option<Task> {
        let Some(text) = normalize_text(text) else {
            debug!("event=task_add module=store status=skipped reason=blank_text");
            return None;
        };

        let created = self.clock.now_ms().max(self.last_created);
        let task = Task {
            id: self.fresh_id(),
            text,
            done: false,
            created,
        };
        self.last_created = created;
        self.items.push(task.clone());
        self.commit("task_add");
        Some(task)
    }

    /// Flips completion of the matching task.
    pub fn toggle(&mut self, id: &TaskId) -> bool {
        let Some(index) = self.position(id) else {
            return self.miss("task_toggle");
        };
        let task = &mut self.items[index];
        task.done = !task.done;
        self.commit("task_toggle");
        true
    }

    /// Deletes the matching task.
    pub fn remove(&mut self, id: &TaskId) -> bool {
        let Some(index) = self.position(id) else {
            return self.miss("task_remove");
        };
        self.items.remove(index);
        self.commit("task_remove");
        true
    }

    /// Replaces the text of the matching task.
    ///
    /// Blank `text` cancels the edit: the old text is kept and nothing is
    /// written. The return value only reports whether `id` exists.
    pub fn update_text(&mut self, id: &TaskId, text: &str) -> bool {
        let Some(index) = self.position(id) else {
            return self.miss("task_update_text");
        };
        match normalize_text(text) {
            Some(text) => {
                self.items[index].text = text;
                self.commit("task_update_text");
            }
            None => {
                debug!("event=task_update_text module=store status=skipped reason=blank_text");
            }
        }
        true
    }

    /// Moves `source` to sit immediately before `target`.
    ///
    /// The insertion index is the target's position after the source has
    /// been taken out, so forward and backward moves both land right in
    /// front of the target.
    pub fn reorder(&mut self, source: &TaskId, target: &TaskId) -> bool {
        if source == target {
            return self.miss("task_reorder");
        }
        let (Some(from), Some(target_index)) = (self.position(source), self.position(target))
        else {
            return self.miss("task_reorder");
        };

        let moved = self.items.remove(from);
        let to = if from < target_index {
            target_index - 1
        } else {
            target_index
        };
        self.items.insert(to, moved);
        self.commit("task_reorder");
        true
    }

    /// Drops every completed task and returns how many were removed.
    ///
    /// Always writes the collection; `revision` moves only when something
    /// was removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(Task::is_open);
        let removed = before - self.items.len();
        if removed > 0 {
            self.revision += 1;
        }
        self.persist("task_clear_completed");
        removed
    }

    /// Copy of the current collection in manual order.
    pub fn items(&self) -> Vec<Task> {
        self.items.clone()
    }

    /// Borrowed view of the current collection, for projection.
    pub fn tasks(&self) -> &[Task] {
        &self.items
    }

    pub fn get(&self, id: &TaskId) -> Option<Task> {
        self.items.iter().find(|task| &task.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Open tasks over the full collection.
    pub fn remaining_count(&self) -> usize {
        crate::view::projector::remaining_count(&self.items)
    }

    /// Bumped on every applied mutation and every reload.
    ///
    /// Callers re-derive their view when this moves.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether the last persistence attempt failed.
    pub fn has_pending_write(&self) -> bool {
        self.pending_write
    }

    /// Writes the current collection now.
    ///
    /// # Errors
    /// - Returns the storage error when the write fails; the flag stays set.
    pub fn flush(&mut self) -> RepoResult<()> {
        write_collection(&self.storage, &self.items)?;
        self.pending_write = false;
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Restricted handle exposing only a snapshot and `add`.
    pub fn debug_surface(&mut self) -> DebugSurface<'_, S, C> {
        DebugSurface { store: self }
    }

    fn replace_from_storage(&mut self) {
        self.items = read_collection(&self.storage);
        self.last_created = i64::MIN;
        self.pending_write = false;
    }

    fn position(&self, id: &TaskId) -> Option<usize> {
        self.items.iter().position(|task| &task.id == id)
    }

    fn fresh_id(&self) -> TaskId {
        loop {
            let id = TaskId::generate();
            if self.position(&id).is_none() {
                return id;
            }
        }
    }

    fn miss(&self, event: &str) -> bool {
        debug!("event={event} module=store status=skipped reason=not_found");
        false
    }

    fn commit(&mut self, event: &str) {
        self.revision += 1;
        self.persist(event);
    }

    fn persist(&mut self, event: &str) {
        match write_collection(&self.storage, &self.items) {
            Ok(()) => {
                self.pending_write = false;
                info!(
                    "event={event} module=store status=ok count={} revision={}",
                    self.items.len(),
                    self.revision
                );
            }
            Err(err) => {
                self.pending_write = true;
                error!(
                    "event={event} module=store status=error error_code=persist_failed count={} error={err}",
                    self.items.len()
                );
            }
        }
    }
}

/// Caller-facing debugging handle.
///
/// Reads hand out copies, so nothing done with them reaches the store.
pub struct DebugSurface<'a, S: TaskStorage, C: Clock> {
    store: &'a mut TaskStore<S, C>,
}

impl<S: TaskStorage, C: Clock> DebugSurface<'_, S, C> {
    pub fn items(&self) -> Vec<Task> {
        self.store.items()
    }

    pub fn add(&mut self, text: &str) -> Option<Task> {
        self.store.add(text)
    }
}

fn read_collection(storage: &impl TaskStorage) -> Vec<Task> {
    let payload = match storage.read_payload() {
        Ok(Some(payload)) => payload,
        Ok(None) => {
            info!("event=store_load module=store status=ok source=empty count=0");
            return Vec::new();
        }
        Err(err) => {
            error!(
                "event=store_load module=store status=degraded error_code=read_failed error={err}"
            );
            return Vec::new();
        }
    };

    match decode_tasks(&payload) {
        Ok(tasks) => {
            info!(
                "event=store_load module=store status=ok source=storage count={}",
                tasks.len()
            );
            tasks
        }
        Err(err) => {
            warn!(
                "event=store_load module=store status=degraded error_code=payload_corrupt payload_len={} error={err}",
                payload.len()
            );
            Vec::new()
        }
    }
}

fn write_collection(storage: &impl TaskStorage, items: &[Task]) -> RepoResult<()> {
    let payload = encode_tasks(items)?;
    storage.write_payload(&payload)
}
