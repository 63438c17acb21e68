//! Task domain model.
//!
//! # Responsibility
//! - Define the single entity persisted by the store.
//! - Provide text normalization and record validation helpers.
//!
//! # Invariants
//! - `id` is stable for the task lifetime and across persistence round-trips.
//! - `text` is trimmed and non-empty.
//! - `created` is Unix epoch milliseconds.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque task identifier.
///
/// Freshly created tasks get a UUID v4 string, but any non-empty string read
/// back from storage is accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generates a new random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Validation failures for task records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyId,
    EmptyText,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "task id must not be empty"),
            Self::EmptyText => write!(f, "task text must not be blank"),
        }
    }
}

impl Error for TaskValidationError {}

/// One to-do entry.
///
/// Field names are the persisted wire names; do not rename without a
/// storage namespace bump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub done: bool,
    /// Unix epoch milliseconds.
    pub created: i64,
}

impl Task {
    /// Creates an open task with a generated ID.
    ///
    /// # Errors
    /// - Returns `EmptyText` when `text` trims to empty.
    pub fn new(text: &str, created: i64) -> Result<Self, TaskValidationError> {
        Self::with_id(TaskId::generate(), text, created)
    }

    /// Creates an open task with a caller-provided ID.
    ///
    /// Used when identity already exists, e.g. fixtures and imports.
    pub fn with_id(id: TaskId, text: &str, created: i64) -> Result<Self, TaskValidationError> {
        let text = normalize_text(text).ok_or(TaskValidationError::EmptyText)?;
        let task = Self {
            id,
            text,
            done: false,
            created,
        };
        task.validate()?;
        Ok(task)
    }

    /// Checks record-level invariants.
    ///
    /// Surrounding whitespace is tolerated here; writers normalize through
    /// [`normalize_text`].
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.as_str().is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        if self.text.trim().is_empty() {
            return Err(TaskValidationError::EmptyText);
        }
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        !self.done
    }
}

/// Trims `raw` and returns it when something visible is left.
pub fn normalize_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_text, Task, TaskId, TaskValidationError};

    #[test]
    fn normalize_text_trims_and_rejects_blank() {
        assert_eq!(normalize_text("  hi  ").as_deref(), Some("hi"));
        assert_eq!(normalize_text("\t\n "), None);
        assert_eq!(normalize_text(""), None);
    }

    #[test]
    fn with_id_rejects_empty_id() {
        let err = Task::with_id(TaskId::from(""), "x", 0).unwrap_err();
        assert_eq!(err, TaskValidationError::EmptyId);
    }

    #[test]
    fn generated_ids_are_not_empty() {
        assert!(!TaskId::generate().as_str().is_empty());
    }
}
