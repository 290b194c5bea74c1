//! # Habitloop Core Library
//!
//! This library provides the core business logic for the Habitloop habit
//! tracker. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary, with any GUI being a thin layer
//! over the same core library.
//!
//! ## Architecture
//!
//! - **Habit Tracker**: the ledger of habits plus the commands that mutate
//!   it, persisting wholesale through a key-value store on every mutation
//! - **Streak Engine**: pure transition rules for completion flags, streak
//!   counters and last-completed dates
//! - **Daily Rollover**: idempotent once-per-day reset of completion flags
//! - **Progress Aggregator**: completion percentage plus a per-day log
//! - **External seams**: network time and quote sources with local
//!   fallbacks, a confirmation prompt, TOML preferences
//!
//! ## Key Components
//!
//! - [`HabitTracker`]: repository owning load/mutate/save as one unit
//! - [`SqliteStore`]: key-value persistence
//! - [`Preferences`]: user preferences management
//! - [`Event`]: state change notifications for any renderer

pub mod confirm;
pub mod error;
pub mod events;
pub mod habit;
pub mod progress;
pub mod quote;
pub mod storage;
pub mod time_source;

pub use confirm::{AutoConfirm, AutoDecline, ConfirmPrompt};
pub use error::{ConfigError, CoreError, StorageError};
pub use events::Event;
pub use habit::{Habit, HabitTracker};
pub use progress::{completion_percentage, ProgressLog};
pub use quote::Notice;
pub use storage::{KvStore, MemoryStore, Preferences, SqliteStore};
