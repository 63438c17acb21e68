//! Filter/sort projection and display labels.
//!
//! # Invariants
//! - Newest-first ordering is collection position reversed, not `created`.
//! - Reversal happens before filtering; filtering never reorders.
//! - Remaining count always covers the full collection.

use crate::model::task::Task;
use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const EMPTY_VIEW_TITLE: &str = "No tasks yet";
pub const EMPTY_VIEW_HINT: &str = "Add your first task to get started.";

const ABSOLUTE_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Which tasks a view shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    #[default]
    All,
    /// Open tasks only.
    Active,
    /// Done tasks only.
    Completed,
}

impl FilterMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    pub fn keeps(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.done,
            Self::Completed => task.done,
        }
    }
}

impl Display for FilterMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized filter name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFilterMode(pub String);

impl Display for UnknownFilterMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown filter `{}`; expected all|active|completed",
            self.0
        )
    }
}

impl Error for UnknownFilterMode {}

impl FromStr for FilterMode {
    type Err = UnknownFilterMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(UnknownFilterMode(value.to_string())),
        }
    }
}

/// Derives the displayed sequence from `snapshot`.
pub fn project(snapshot: &[Task], filter: FilterMode, sort_newest: bool) -> Vec<Task> {
    let keep = |task: &&Task| filter.keeps(task);
    if sort_newest {
        snapshot.iter().rev().filter(keep).cloned().collect()
    } else {
        snapshot.iter().filter(keep).cloned().collect()
    }
}

/// Number of open tasks in the whole collection.
pub fn remaining_count(snapshot: &[Task]) -> usize {
    snapshot.iter().filter(|task| !task.done).count()
}

/// Footer text such as `1 task left` or `3 tasks left`.
pub fn remaining_label(count: usize) -> String {
    if count == 1 {
        "1 task left".to_string()
    } else {
        format!("{count} tasks left")
    }
}

/// Relative age of `timestamp_ms` as seen at `now_ms`, in the local timezone.
pub fn time_ago(timestamp_ms: i64, now_ms: i64) -> String {
    time_ago_in(&Local, timestamp_ms, now_ms)
}

/// Same as [`time_ago`] with an explicit timezone for the absolute fallback.
///
/// A zero timestamp means "unknown" and renders as an empty label.
pub fn time_ago_in<Tz: TimeZone>(tz: &Tz, timestamp_ms: i64, now_ms: i64) -> String
where
    Tz::Offset: Display,
{
    if timestamp_ms == 0 {
        return String::new();
    }

    let elapsed = now_ms.saturating_sub(timestamp_ms).div_euclid(1000);
    if elapsed < 10 {
        "just now".to_string()
    } else if elapsed < 60 {
        format!("{elapsed}s ago")
    } else if elapsed < 3_600 {
        format!("{}m ago", elapsed / 60)
    } else if elapsed < 86_400 {
        format!("{}h ago", elapsed / 3_600)
    } else {
        format_absolute(tz, timestamp_ms)
    }
}

/// Absolute date/time in `M/D/YYYY, h:mm:ss AM` form.
pub fn format_absolute<Tz: TimeZone>(tz: &Tz, timestamp_ms: i64) -> String
where
    Tz::Offset: Display,
{
    match tz.timestamp_millis_opt(timestamp_ms).single() {
        Some(moment) => moment.format(ABSOLUTE_FORMAT).to_string(),
        None => String::new(),
    }
}

/// Caller-held view preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSettings {
    pub filter: FilterMode,
    pub sort_newest: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            filter: FilterMode::All,
            sort_newest: true,
        }
    }
}

impl ViewSettings {
    pub fn toggle_sort(&mut self) {
        self.sort_newest = !self.sort_newest;
    }

    pub fn sort_label(&self) -> &'static str {
        if self.sort_newest {
            "Sort: New"
        } else {
            "Sort: Old"
        }
    }

    pub fn project(&self, snapshot: &[Task]) -> Vec<Task> {
        project(snapshot, self.filter, self.sort_newest)
    }
}
