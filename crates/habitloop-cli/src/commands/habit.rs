//! Habit management commands for CLI.
//!
//! Every command starts a session: open the store, load the tracker, run
//! the daily rollover for the resolved day, then apply the action.
//! Positions shown to the user are 1-based.

use std::io::{self, Write};

use clap::Subcommand;
use habitloop_core::{AutoConfirm, ConfirmPrompt, Habit, HabitTracker, SqliteStore};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Add a new habit
    Add {
        /// Habit name
        name: String,
    },
    /// List habits with completion flags and streaks
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Toggle today's completion for a habit
    Toggle {
        /// Position in the list (1-based)
        position: usize,
    },
    /// Remove a habit (asks for confirmation)
    Remove {
        /// Position in the list (1-based)
        position: usize,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Interactive y/n prompt on stdin.
struct StdinConfirm;

impl ConfirmPrompt for StdinConfirm {
    fn confirm(&self, message: &str) -> bool {
        print!("{message} [y/N] ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        if io::stdin().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim(), "y" | "Y" | "yes")
    }
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open()?;
    let mut tracker = HabitTracker::load(store);
    let today = super::resolve_today();
    tracker.run_rollover(today)?;

    match action {
        HabitAction::Add { name } => {
            match tracker.add_habit(&name, today)? {
                Some(_) => print_list(&tracker, false)?,
                None => println!("Habit name cannot be empty."),
            }
        }
        HabitAction::List { json } => print_list(&tracker, json)?,
        HabitAction::Toggle { position } => {
            let toggled = position
                .checked_sub(1)
                .map(|i| tracker.toggle_habit(i, today))
                .transpose()?
                .flatten();
            match toggled {
                Some(_) => print_list(&tracker, false)?,
                None => println!("No habit at position {position}."),
            }
        }
        HabitAction::Remove { position, yes } => {
            let removed = match position.checked_sub(1) {
                Some(i) if yes => tracker.remove_habit(i, today, &AutoConfirm)?,
                Some(i) => tracker.remove_habit(i, today, &StdinConfirm)?,
                None => None,
            };
            match removed {
                Some(_) => print_list(&tracker, false)?,
                None => println!("Nothing removed."),
            }
        }
    }
    Ok(())
}

fn print_list(
    tracker: &HabitTracker<SqliteStore>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(tracker.habits())?);
        return Ok(());
    }
    if tracker.habits().is_empty() {
        println!("No habits yet. Add one with `habit add <name>`.");
        return Ok(());
    }
    for (i, habit) in tracker.habits().iter().enumerate() {
        println!("{}. {}", i + 1, format_habit(habit));
    }
    println!("Today: {}% complete", tracker.percentage());
    Ok(())
}

fn format_habit(habit: &Habit) -> String {
    let mark = if habit.completed { "[x]" } else { "[ ]" };
    if habit.streak > 0 {
        format!("{mark} {} (streak: {})", habit.name, habit.streak)
    } else {
        format!("{mark} {}", habit.name)
    }
}
