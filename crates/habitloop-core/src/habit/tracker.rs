//! Habit tracker: the repository owning load/mutate/save as one unit.
//!
//! The tracker holds the ledger, the progress log, and the rollover marker,
//! and writes through to its key-value store on every mutation so a later
//! read always observes the latest in-memory state. Commands return
//! `Option<Event>`: `None` means the command was a deliberate no-op
//! (empty name, out-of-range position, declined confirmation, rollover
//! already done for the day), mirroring forgiving UI semantics rather than
//! masking a failure.

use chrono::{NaiveDate, Utc};

use crate::confirm::ConfirmPrompt;
use crate::error::Result;
use crate::events::Event;
use crate::progress::{completion_percentage, ProgressLog};
use crate::storage::store::{KvStore, KEY_HABITS, KEY_LAST_RESET, KEY_PROGRESS};

use super::{streak, Habit};

/// The habit ledger plus its persisted companions.
pub struct HabitTracker<S: KvStore> {
    store: S,
    habits: Vec<Habit>,
    progress: ProgressLog,
    /// Last day the rollover executed. The rollover state machine is
    /// DONE for a day exactly when this equals that day.
    last_reset: Option<NaiveDate>,
}

impl<S: KvStore> HabitTracker<S> {
    /// Load tracker state from the store.
    ///
    /// Absent or unparseable values degrade to empty defaults; loading
    /// never fails.
    pub fn load(store: S) -> Self {
        let habits = store
            .get(KEY_HABITS)
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();
        let progress = store
            .get(KEY_PROGRESS)
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();
        let last_reset = store
            .get(KEY_LAST_RESET)
            .and_then(|v| serde_json::from_value(v).ok());
        Self {
            store,
            habits,
            progress,
            last_reset,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn progress_log(&self) -> &ProgressLog {
        &self.progress
    }

    pub fn last_reset(&self) -> Option<NaiveDate> {
        self.last_reset
    }

    /// Current aggregate completion percentage.
    pub fn percentage(&self) -> u8 {
        completion_percentage(&self.habits)
    }

    /// Full current ledger and aggregate percentage, for any renderer.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            habits: self.habits.clone(),
            percentage: self.percentage(),
            at: Utc::now(),
        }
    }

    /// Hand back the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Append a habit with default state.
    ///
    /// The name is trimmed; an empty result is a no-op.
    pub fn add_habit(&mut self, name: &str, today: NaiveDate) -> Result<Option<Event>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }
        self.habits.push(Habit::new(name));
        self.persist_ledger()?;
        self.record_progress(today)?;
        Ok(Some(Event::HabitAdded {
            name: name.to_string(),
            position: self.habits.len() - 1,
            at: Utc::now(),
        }))
    }

    /// Remove the habit at `position` after a confirmed prompt.
    ///
    /// A declined prompt or out-of-range position leaves the ledger
    /// unchanged. Removal is by position and irreversible.
    pub fn remove_habit(
        &mut self,
        position: usize,
        today: NaiveDate,
        prompt: &dyn ConfirmPrompt,
    ) -> Result<Option<Event>> {
        let Some(habit) = self.habits.get(position) else {
            return Ok(None);
        };
        if !prompt.confirm(&format!("Delete habit \"{}\"?", habit.name)) {
            return Ok(None);
        }
        let removed = self.habits.remove(position);
        self.persist_ledger()?;
        self.record_progress(today)?;
        Ok(Some(Event::HabitRemoved {
            name: removed.name,
            position,
            at: Utc::now(),
        }))
    }

    /// Toggle today's completion for the habit at `position`.
    ///
    /// Checking runs the streak engine's completion transition; unchecking
    /// clears the flag without touching the streak. Out-of-range positions
    /// are a no-op.
    pub fn toggle_habit(&mut self, position: usize, today: NaiveDate) -> Result<Option<Event>> {
        let Some(habit) = self.habits.get_mut(position) else {
            return Ok(None);
        };
        if habit.completed {
            streak::on_uncomplete(habit);
        } else {
            streak::on_complete(habit, today);
        }
        let (name, completed, streak) = (habit.name.clone(), habit.completed, habit.streak);
        self.persist_ledger()?;
        self.record_progress(today)?;
        Ok(Some(Event::HabitToggled {
            name,
            position,
            completed,
            streak,
            at: Utc::now(),
        }))
    }

    /// Run the once-daily reset if it has not already run for `today`.
    ///
    /// Clears every completion flag (streaks and dates untouched), records
    /// the now-reset percentage for the day, and advances the marker.
    /// Callable any number of times per day and across app loads; only
    /// the first call per day mutates anything.
    pub fn run_rollover(&mut self, today: NaiveDate) -> Result<Option<Event>> {
        if self.last_reset == Some(today) {
            return Ok(None);
        }
        for habit in &mut self.habits {
            habit.completed = false;
        }
        self.persist_ledger()?;
        self.record_progress(today)?;
        self.last_reset = Some(today);
        let marker = serde_json::to_value(today)?;
        self.store.set(KEY_LAST_RESET, &marker)?;
        Ok(Some(Event::RolloverApplied {
            day: today,
            percentage: self.percentage(),
            at: Utc::now(),
        }))
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn persist_ledger(&mut self) -> Result<()> {
        let value = serde_json::to_value(&self.habits)?;
        self.store.set(KEY_HABITS, &value)?;
        Ok(())
    }

    fn record_progress(&mut self, today: NaiveDate) -> Result<()> {
        self.progress.record(today, completion_percentage(&self.habits));
        let value = serde_json::to_value(&self.progress)?;
        self.store.set(KEY_PROGRESS, &value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::{AutoConfirm, AutoDecline};
    use crate::storage::MemoryStore;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn tracker() -> HabitTracker<MemoryStore> {
        HabitTracker::load(MemoryStore::new())
    }

    #[test]
    fn add_habit_appends_with_defaults() {
        let mut t = tracker();
        let event = t.add_habit("Drink water", day("2024-01-01")).unwrap();
        assert!(matches!(event, Some(Event::HabitAdded { position: 0, .. })));
        assert_eq!(t.habits().len(), 1);
        assert_eq!(t.habits()[0].name, "Drink water");
        assert!(!t.habits()[0].completed);
        assert_eq!(t.habits()[0].streak, 0);
        assert_eq!(t.percentage(), 0);
    }

    #[test]
    fn add_trims_and_rejects_empty_names() {
        let mut t = tracker();
        assert!(t.add_habit("   ", day("2024-01-01")).unwrap().is_none());
        assert!(t.add_habit("", day("2024-01-01")).unwrap().is_none());
        t.add_habit("  Read  ", day("2024-01-01")).unwrap();
        assert_eq!(t.habits()[0].name, "Read");
    }

    #[test]
    fn toggle_same_day_scenario() {
        let today = day("2024-01-01");
        let mut t = tracker();
        t.add_habit("Drink water", today).unwrap();

        t.toggle_habit(0, today).unwrap();
        assert!(t.habits()[0].completed);
        assert_eq!(t.habits()[0].streak, 1);
        assert_eq!(t.habits()[0].last_completed_date, Some(today));
        assert_eq!(t.percentage(), 100);

        t.toggle_habit(0, today).unwrap();
        assert!(!t.habits()[0].completed);
        assert_eq!(t.habits()[0].streak, 1);

        t.toggle_habit(0, today).unwrap();
        assert_eq!(t.habits()[0].streak, 1);
    }

    #[test]
    fn toggle_out_of_range_is_noop() {
        let mut t = tracker();
        assert!(t.toggle_habit(5, day("2024-01-01")).unwrap().is_none());
    }

    #[test]
    fn remove_requires_confirmation() {
        let today = day("2024-01-01");
        let mut t = tracker();
        t.add_habit("Exercise", today).unwrap();

        let declined = t.remove_habit(0, today, &AutoDecline).unwrap();
        assert!(declined.is_none());
        assert_eq!(t.habits().len(), 1);

        let confirmed = t.remove_habit(0, today, &AutoConfirm).unwrap();
        assert!(matches!(confirmed, Some(Event::HabitRemoved { .. })));
        assert!(t.habits().is_empty());
    }

    #[test]
    fn remove_out_of_range_never_prompts() {
        let mut t = tracker();
        assert!(t
            .remove_habit(3, day("2024-01-01"), &AutoConfirm)
            .unwrap()
            .is_none());
    }

    #[test]
    fn rollover_clears_flags_and_keeps_streaks() {
        let mut t = tracker();
        t.add_habit("Exercise", day("2024-01-01")).unwrap();
        t.habits[0].streak = 3;
        t.habits[0].completed = true;
        t.habits[0].last_completed_date = Some(day("2024-01-01"));

        let event = t.run_rollover(day("2024-01-02")).unwrap();
        assert!(matches!(event, Some(Event::RolloverApplied { .. })));
        assert!(!t.habits()[0].completed);
        assert_eq!(t.habits()[0].streak, 3);

        t.toggle_habit(0, day("2024-01-02")).unwrap();
        assert_eq!(t.habits()[0].streak, 4);
    }

    #[test]
    fn rollover_is_idempotent_within_a_day() {
        let today = day("2024-01-02");
        let mut t = tracker();
        t.add_habit("Read", day("2024-01-01")).unwrap();
        t.toggle_habit(0, today).unwrap();

        assert!(t.run_rollover(today).unwrap().is_some());
        let after_first = t.habits().to_vec();
        for _ in 0..3 {
            assert!(t.run_rollover(today).unwrap().is_none());
        }
        assert_eq!(t.habits(), &after_first[..]);
        assert_eq!(t.progress_log().percentage_for(today), Some(0));
        assert_eq!(t.progress_log().len(), 2);
        assert_eq!(t.last_reset(), Some(today));
    }

    #[test]
    fn rollover_survives_reload() {
        let today = day("2024-01-02");
        let mut t = tracker();
        t.add_habit("Read", today).unwrap();
        t.run_rollover(today).unwrap();

        // A second app load on the same day must not reset again.
        let mut t = HabitTracker::load(t.into_store());
        t.toggle_habit(0, today).unwrap();
        assert!(t.run_rollover(today).unwrap().is_none());
        assert!(t.habits()[0].completed);
    }

    #[test]
    fn every_mutation_writes_through() {
        let today = day("2024-01-01");
        let mut t = tracker();
        t.add_habit("Drink water", today).unwrap();
        t.add_habit("Exercise", today).unwrap();
        t.toggle_habit(0, today).unwrap();

        let reloaded = HabitTracker::load(t.into_store());
        assert_eq!(reloaded.habits().len(), 2);
        assert!(reloaded.habits()[0].completed);
        assert_eq!(reloaded.habits()[0].streak, 1);
        assert_eq!(reloaded.progress_log().percentage_for(today), Some(50));
    }

    #[test]
    fn snapshot_exposes_ledger_and_percentage() {
        let today = day("2024-01-01");
        let mut t = tracker();
        t.add_habit("Drink water", today).unwrap();
        t.toggle_habit(0, today).unwrap();
        match t.snapshot() {
            Event::StateSnapshot {
                habits, percentage, ..
            } => {
                assert_eq!(habits.len(), 1);
                assert_eq!(percentage, 100);
            }
            _ => panic!("Expected StateSnapshot"),
        }
    }

    #[test]
    fn corrupt_ledger_loads_as_empty() {
        let mut store = MemoryStore::new();
        store
            .set(KEY_HABITS, &serde_json::json!("not a ledger"))
            .unwrap();
        let t = HabitTracker::load(store);
        assert!(t.habits().is_empty());
        assert!(t.last_reset().is_none());
    }
}
