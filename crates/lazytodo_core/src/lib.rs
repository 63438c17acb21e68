//! Core logic for the lazytodo task list.
//! This crate owns the task collection, its persistence, and view derivation.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AppConfig, ConfigError, ConfigOverrides};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{normalize_text, Task, TaskId, TaskValidationError};
pub use repo::codec::{decode_tasks, encode_tasks, PayloadError};
pub use repo::task_repo::{
    MemoryTaskStorage, RepoError, RepoResult, SqliteTaskStorage, TaskStorage, STORAGE_KEY,
};
pub use service::shared::SharedTaskStore;
pub use service::task_store::{DebugSurface, TaskStore};
pub use view::projector::{
    project, remaining_count, remaining_label, time_ago, time_ago_in, FilterMode, ViewSettings,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
