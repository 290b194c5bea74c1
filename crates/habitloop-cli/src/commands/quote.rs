//! Daily quote command for CLI.

use habitloop_core::{quote, Preferences};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let prefs = Preferences::load_or_default();
    if !prefs.show_daily_quote {
        println!("Daily quote is disabled (config set show_daily_quote true).");
        return Ok(());
    }

    let rt = tokio::runtime::Runtime::new()?;
    let (text, notice) = rt.block_on(async {
        let client = reqwest::Client::new();
        quote::fetch_quote(&client).await
    });

    println!("{text}");
    if let Some(notice) = notice {
        eprintln!("{}", notice.message);
    }
    Ok(())
}
