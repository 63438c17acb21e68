//! Wire codec for the persisted task list.
//!
//! Payload shape: a JSON array of `{id, text, done, created}` records.
//! Unknown extra fields are ignored; anything else unexpected rejects the
//! whole payload.

use crate::model::task::Task;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reasons a stored payload could not be turned into a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// Not JSON, not an array, or a record with missing/mistyped fields.
    Malformed(String),
    /// Two records share one id.
    DuplicateId(String),
    /// A record breaks a task invariant.
    InvalidRecord { index: usize, message: String },
}

impl Display for PayloadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(message) => write!(f, "malformed task payload: {message}"),
            Self::DuplicateId(id) => write!(f, "duplicate task id in payload: {id}"),
            Self::InvalidRecord { index, message } => {
                write!(f, "invalid task record at index {index}: {message}")
            }
        }
    }
}

impl Error for PayloadError {}

/// Serializes the collection in order.
pub fn encode_tasks(tasks: &[Task]) -> Result<String, serde_json::Error> {
    serde_json::to_string(tasks)
}

/// Parses a stored payload into a collection.
///
/// # Errors
/// - Returns `PayloadError` on any structural or invariant violation.
pub fn decode_tasks(payload: &str) -> Result<Vec<Task>, PayloadError> {
    let tasks: Vec<Task> = serde_json::from_str(payload)
        .map_err(|err| PayloadError::Malformed(err.to_string()))?;

    ensure_records_valid(&tasks)?;
    Ok(tasks)
}

fn ensure_records_valid(tasks: &[Task]) -> Result<(), PayloadError> {
    let mut seen = HashSet::with_capacity(tasks.len());
    for (index, task) in tasks.iter().enumerate() {
        task.validate().map_err(|err| PayloadError::InvalidRecord {
            index,
            message: err.to_string(),
        })?;
        if !seen.insert(task.id.as_str()) {
            return Err(PayloadError::DuplicateId(task.id.to_string()));
        }
    }
    Ok(())
}
