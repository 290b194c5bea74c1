//! Preferences commands for CLI.

use clap::Subcommand;
use habitloop_core::Preferences;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a preference value
    Get {
        /// Key (theme_color, font_size, show_daily_quote)
        key: String,
    },
    /// Set a preference value
    Set {
        key: String,
        value: String,
    },
    /// List all preferences
    List,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let prefs = Preferences::load_or_default();
            match prefs.get(&key) {
                Some(value) => println!("{value}"),
                None => println!("Unknown key: {key}"),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut prefs = Preferences::load_or_default();
            prefs.set(&key, &value)?;
            println!("{key} = {value}");
        }
        ConfigAction::List => {
            let prefs = Preferences::load_or_default();
            println!("theme_color = {}", prefs.theme_color);
            println!("font_size = {}", prefs.font_size);
            println!("show_daily_quote = {}", prefs.show_daily_quote);
        }
    }
    Ok(())
}
