//! Calendar day resolution.
//!
//! "Today" is preferably taken from a network-synchronized clock and falls
//! back to the local device clock on any transport, parse, or timeout
//! failure. Failures never propagate: rollover and ledger operations must
//! proceed even with the network gone. Day identifiers are UTC-normalized
//! (`DateTime<Utc>::date_naive()`) everywhere a day is compared, so the
//! rollover check and the streak guard can never drift apart.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

/// World time endpoint returning a JSON body with a `utc_datetime` field.
pub const DEFAULT_ENDPOINT: &str = "https://worldtimeapi.org/api/timezone/Etc/UTC";

/// Bound on each network attempt. Startup never blocks on a slow clock.
const FETCH_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Deserialize)]
struct WorldTimeResponse {
    utc_datetime: DateTime<Utc>,
}

/// Fetch the current instant from a specific endpoint.
///
/// Returns `None` on any failure; callers own the local-clock fallback.
pub async fn network_now_from(client: &reqwest::Client, endpoint: &str) -> Option<DateTime<Utc>> {
    let response = tokio::time::timeout(FETCH_TIMEOUT, client.get(endpoint).send())
        .await
        .ok()?
        .ok()?
        .error_for_status()
        .ok()?;
    let body: WorldTimeResponse = tokio::time::timeout(FETCH_TIMEOUT, response.json())
        .await
        .ok()?
        .ok()?;
    Some(body.utc_datetime)
}

/// Fetch the current instant from the default world time endpoint.
pub async fn network_now(client: &reqwest::Client) -> Option<DateTime<Utc>> {
    network_now_from(client, DEFAULT_ENDPOINT).await
}

/// Today's calendar day from a specific endpoint, local clock on failure.
pub async fn current_day_from(client: &reqwest::Client, endpoint: &str) -> NaiveDate {
    network_now_from(client, endpoint)
        .await
        .unwrap_or_else(Utc::now)
        .date_naive()
}

/// Today's calendar day, preferring the network clock.
pub async fn current_day(client: &reqwest::Client) -> NaiveDate {
    current_day_from(client, DEFAULT_ENDPOINT).await
}

/// Today's calendar day from the local clock alone.
pub fn local_today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn parses_world_time_response() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/time")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"utc_datetime":"2024-01-02T10:30:00+00:00"}"#)
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let url = format!("{}/time", server.url());
        let now = network_now_from(&client, &url).await.unwrap();
        assert_eq!(now.date_naive(), "2024-01-02".parse().unwrap());

        let day = current_day_from(&client, &url).await;
        assert_eq!(day, "2024-01-02".parse().unwrap());
    }

    #[tokio::test]
    async fn server_error_yields_none() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/time")
            .with_status(500)
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let url = format!("{}/time", server.url());
        assert!(network_now_from(&client, &url).await.is_none());
    }

    #[tokio::test]
    async fn garbage_body_yields_none() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/time")
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let url = format!("{}/time", server.url());
        assert!(network_now_from(&client, &url).await.is_none());
    }

    #[tokio::test]
    async fn current_day_falls_back_to_local_clock() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/time")
            .with_status(503)
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let url = format!("{}/time", server.url());
        let day = current_day_from(&client, &url).await;
        assert_eq!(day, local_today());
    }
}
