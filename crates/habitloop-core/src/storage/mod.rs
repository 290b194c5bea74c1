mod config;
pub mod store;

pub use config::Preferences;
pub use store::{KvStore, MemoryStore, SqliteStore};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/habitloop[-dev]/` based on HABITLOOP_ENV.
///
/// Set HABITLOOP_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("HABITLOOP_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("habitloop-dev")
    } else {
        base_dir.join("habitloop")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
