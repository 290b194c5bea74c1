pub mod config;
pub mod habit;
pub mod progress;
pub mod quote;

use chrono::NaiveDate;
use habitloop_core::time_source;

/// Resolve today's calendar day, preferring the network clock and falling
/// back to the local clock when the network or the runtime is unavailable.
pub(crate) fn resolve_today() -> NaiveDate {
    match tokio::runtime::Runtime::new() {
        Ok(rt) => rt.block_on(async {
            let client = reqwest::Client::new();
            time_source::current_day(&client).await
        }),
        Err(_) => time_source::local_today(),
    }
}
