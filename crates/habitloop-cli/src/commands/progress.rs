//! Progress commands for CLI.

use clap::Subcommand;
use habitloop_core::{HabitTracker, SqliteStore};

#[derive(Subcommand)]
pub enum ProgressAction {
    /// Today's completion percentage
    Today,
    /// Percentage-per-day history
    History {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: ProgressAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open()?;
    let mut tracker = HabitTracker::load(store);
    let today = super::resolve_today();
    tracker.run_rollover(today)?;

    match action {
        ProgressAction::Today => {
            let done = tracker.habits().iter().filter(|h| h.completed).count();
            println!(
                "{}: {}% complete ({done}/{} habits)",
                today,
                tracker.percentage(),
                tracker.habits().len(),
            );
        }
        ProgressAction::History { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(tracker.progress_log())?);
                return Ok(());
            }
            for (day, percentage) in tracker.progress_log().iter() {
                println!("{day}  {percentage:>3}%");
            }
        }
    }
    Ok(())
}
