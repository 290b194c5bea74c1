use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::habit::Habit;

/// Every ledger mutation produces an Event.
/// A UI layer invokes the tracker commands and subscribes to these for the
/// resulting state; the core has no dependency on any presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    HabitAdded {
        name: String,
        position: usize,
        at: DateTime<Utc>,
    },
    HabitRemoved {
        name: String,
        position: usize,
        at: DateTime<Utc>,
    },
    HabitToggled {
        name: String,
        position: usize,
        completed: bool,
        streak: u32,
        at: DateTime<Utc>,
    },
    /// The once-daily reset ran for `day`.
    RolloverApplied {
        day: NaiveDate,
        percentage: u8,
        at: DateTime<Utc>,
    },
    /// Full current ledger plus the aggregate percentage -- the rendering
    /// boundary exposed after every mutation.
    StateSnapshot {
        habits: Vec<Habit>,
        percentage: u8,
        at: DateTime<Utc>,
    },
}
