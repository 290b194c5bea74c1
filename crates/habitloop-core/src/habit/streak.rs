//! Streak transition rules.
//!
//! Pure functions computing how a habit's completion flag, streak counter
//! and last-completed date evolve for a given calendar day. The streak
//! counts distinct completed days ending at `last_completed_date` -- it is
//! not a reflection of whether the habit is currently checked.

use chrono::NaiveDate;

use super::Habit;

/// Credit a completion for `today`.
///
/// If the habit was already credited today (`last_completed_date == today`)
/// only the completion flag is re-set; the streak must not be incremented a
/// second time. Complete / uncheck / re-check within one day therefore
/// leaves the streak at its once-credited value.
pub fn on_complete(habit: &mut Habit, today: NaiveDate) {
    habit.completed = true;
    if habit.last_completed_date == Some(today) {
        return; // already credited today
    }
    habit.streak += 1;
    habit.last_completed_date = Some(today);
}

/// Clear the completion flag.
///
/// Unchecking does not retroactively undo a day's credit: the streak and
/// `last_completed_date` are left untouched.
pub fn on_uncomplete(habit: &mut Habit) {
    habit.completed = false;
}
