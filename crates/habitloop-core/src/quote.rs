//! Daily quote fetching with a never-failing fallback.
//!
//! The quote service is decorative: any failure yields a fixed fallback
//! string plus a transient [`Notice`] the UI may show and auto-dismiss.
//! Nothing here blocks startup or surfaces as an error.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Quotes endpoint returning `{"content": ..., "author": ...}`.
pub const DEFAULT_ENDPOINT: &str = "https://api.quotable.io/random";

/// Shown whenever the quote service is unreachable.
pub const FALLBACK_QUOTE: &str = "Small steps every day add up to big results.";

const FETCH_TIMEOUT: Duration = Duration::from_secs(3);

/// How long a transient notice stays visible before auto-dismissing.
pub const NOTICE_TTL_SECS: i64 = 4;

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    content: String,
    #[serde(default)]
    author: Option<String>,
}

/// A transient, auto-dismissing user-visible message.
///
/// The core records when the notice appeared; a renderer polls
/// [`Notice::is_expired`] to clear it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub shown_at: DateTime<Utc>,
}

impl Notice {
    pub fn transient(message: impl Into<String>, shown_at: DateTime<Utc>) -> Self {
        Self {
            message: message.into(),
            shown_at,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.shown_at >= chrono::Duration::seconds(NOTICE_TTL_SECS)
    }
}

/// Fetch a quote from a specific endpoint.
///
/// On any failure returns the fallback text and a notice explaining the
/// degradation; the returned string is always printable.
pub async fn fetch_quote_from(
    client: &reqwest::Client,
    endpoint: &str,
) -> (String, Option<Notice>) {
    let fetched = async {
        let response = tokio::time::timeout(FETCH_TIMEOUT, client.get(endpoint).send())
            .await
            .ok()?
            .ok()?
            .error_for_status()
            .ok()?;
        let body: QuoteResponse = tokio::time::timeout(FETCH_TIMEOUT, response.json())
            .await
            .ok()?
            .ok()?;
        Some(body)
    }
    .await;

    match fetched {
        Some(quote) => {
            let text = match quote.author {
                Some(author) if !author.is_empty() => {
                    format!("\"{}\" - {}", quote.content, author)
                }
                _ => quote.content,
            };
            (text, None)
        }
        None => (
            FALLBACK_QUOTE.to_string(),
            Some(Notice::transient(
                "Quote service unavailable, showing a default quote.",
                Utc::now(),
            )),
        ),
    }
}

/// Fetch a quote from the default endpoint.
pub async fn fetch_quote(client: &reqwest::Client) -> (String, Option<Notice>) {
    fetch_quote_from(client, DEFAULT_ENDPOINT).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn formats_quote_with_author() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/random")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"content":"Do the thing.","author":"Someone"}"#)
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let url = format!("{}/random", server.url());
        let (text, notice) = fetch_quote_from(&client, &url).await;
        assert_eq!(text, "\"Do the thing.\" - Someone");
        assert!(notice.is_none());
    }

    #[tokio::test]
    async fn failure_returns_fallback_and_notice() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/random")
            .with_status(502)
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let url = format!("{}/random", server.url());
        let (text, notice) = fetch_quote_from(&client, &url).await;
        assert_eq!(text, FALLBACK_QUOTE);
        let notice = notice.unwrap();
        assert!(notice.message.contains("unavailable"));
    }

    #[test]
    fn notice_expires_after_ttl() {
        let shown = Utc::now();
        let notice = Notice::transient("msg", shown);
        assert!(!notice.is_expired(shown + chrono::Duration::seconds(3)));
        assert!(notice.is_expired(shown + chrono::Duration::seconds(4)));
    }
}
