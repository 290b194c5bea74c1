//! Habit records and the ledger operations that mutate them.
//!
//! A [`Habit`] is one tracked recurring task. The [`HabitTracker`] owns the
//! full ordered ledger together with the progress log and the rollover
//! marker, persisting through its key-value store on every mutation.

pub mod streak;
mod tracker;

pub use tracker::HabitTracker;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One tracked recurring task.
///
/// `completed`, `streak` and `last_completed_date` move together: when a
/// completion is credited for a day, all three are updated in the same call
/// (see [`streak::on_complete`]). `streak > 0` implies the date is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    /// Display name. Unique by convention, not enforced.
    pub name: String,
    /// True iff marked done for the current calendar day.
    #[serde(default)]
    pub completed: bool,
    /// Consecutive days completed, up to and including the most recent one.
    #[serde(default)]
    pub streak: u32,
    /// Day the streak was last incremented; `None` if never completed.
    #[serde(default)]
    pub last_completed_date: Option<NaiveDate>,
}

impl Habit {
    /// Create a habit with default state: not completed, zero streak.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            completed: false,
            streak: 0,
            last_completed_date: None,
        }
    }
}
