//! Daily completion aggregation.
//!
//! Derives a completion percentage from the ledger and keeps one running
//! percentage-per-day record, keyed by calendar day. Entries are upserted
//! (the last write for a day wins) and never pruned.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::habit::Habit;

/// Percentage of habits completed, rounded to the nearest integer.
///
/// An empty ledger counts as 0% complete rather than undefined.
pub fn completion_percentage(habits: &[Habit]) -> u8 {
    if habits.is_empty() {
        return 0;
    }
    let done = habits.iter().filter(|h| h.completed).count();
    ((done as f64 / habits.len() as f64) * 100.0).round() as u8
}

/// Running percentage-per-day record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressLog {
    entries: BTreeMap<NaiveDate, u8>,
}

impl ProgressLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert the entry for `day`, overwriting any prior value.
    pub fn record(&mut self, day: NaiveDate, percentage: u8) {
        self.entries.insert(day, percentage);
    }

    pub fn percentage_for(&self, day: NaiveDate) -> Option<u8> {
        self.entries.get(&day).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, u8)> + '_ {
        self.entries.iter().map(|(d, p)| (*d, *p))
    }
}
