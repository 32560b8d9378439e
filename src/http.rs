use std::thread;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info_span, warn};
use ureq::{Agent, ResponseExt};

use crate::error::{BotError, Result};

pub const USER_AGENT: &str = "nhl-recap-bot/0.1 (nhl results digest)";

const API_ATTEMPTS: u32 = 3;
const SCRAPE_ATTEMPTS: u32 = 5;
const RETRYABLE: [u16; 5] = [429, 500, 502, 503, 504];

/// A successfully scraped page, with the URL after redirects.
#[derive(Debug, Clone)]
pub struct Page {
    pub final_url: String,
    pub body: String,
}

/// Shared blocking client. Statuses are not mapped to errors by the agent so
/// the retry loop can inspect codes and `Retry-After` itself.
#[derive(Debug, Clone)]
pub struct HttpClient {
    agent: Agent,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    pub fn new() -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(20)))
            .user_agent(USER_AGENT)
            .http_status_as_error(false)
            .save_redirect_history(true)
            .build();
        Self {
            agent: Agent::new_with_config(config),
        }
    }

    /// GET a JSON document, retrying transient failures with a linear backoff.
    pub fn get_json(&self, url: &str) -> Result<Value> {
        let body = self.get_with_retries(url, "application/json")?;
        serde_json::from_str(&body).map_err(BotError::from)
    }

    /// GET a text document with the same retry policy as `get_json`.
    pub fn get_text(&self, url: &str) -> Result<String> {
        self.get_with_retries(url, "text/html,application/xhtml+xml")
    }

    fn get_with_retries(&self, url: &str, accept: &str) -> Result<String> {
        let _span = info_span!("http_get", url = %url).entered();
        let mut last_reason = String::new();
        for attempt in 1..=API_ATTEMPTS {
            match self.agent.get(url).header("Accept", accept).call() {
                Ok(resp) => {
                    let code = resp.status().as_u16();
                    if (200..300).contains(&code) {
                        return resp
                            .into_body()
                            .read_to_string()
                            .map_err(|e| BotError::Network {
                                url: url.to_string(),
                                attempts: attempt,
                                reason: format!("body read failed: {}", e),
                            });
                    }
                    last_reason = format!("http status {}", code);
                    if !RETRYABLE.contains(&code) {
                        break;
                    }
                }
                Err(e) => {
                    last_reason = e.to_string();
                }
            }
            if attempt < API_ATTEMPTS {
                let delay = Duration::from_millis(750 * attempt as u64);
                debug!(url, attempt, reason = %last_reason, ?delay, "retrying request");
                thread::sleep(delay);
            }
        }
        Err(BotError::Network {
            url: url.to_string(),
            attempts: API_ATTEMPTS,
            reason: last_reason,
        })
    }

    /// GET an HTML page from the Russian site. Misses (404, empty body,
    /// persistent failure) are normal and return `Ok(None)`; only the retry
    /// loop's pacing differs from the API path: exponential backoff honoring
    /// `Retry-After` on 429/503.
    pub fn get_page(&self, url: &str) -> Result<Option<Page>> {
        self.get_page_query(url, &[])
    }

    /// `get_page` with URL-encoded query parameters (the site's search
    /// endpoint takes `?q=`).
    pub fn get_page_query(&self, url: &str, query: &[(&str, &str)]) -> Result<Option<Page>> {
        for attempt in 1..=SCRAPE_ATTEMPTS {
            let mut req = self
                .agent
                .get(url)
                .header("Accept", "text/html,application/xhtml+xml");
            for (k, v) in query {
                req = req.query(*k, *v);
            }
            match req.call() {
                Ok(resp) => {
                    let code = resp.status().as_u16();
                    if (200..300).contains(&code) {
                        let final_url = resp.get_uri().to_string();
                        let body = match resp.into_body().read_to_string() {
                            Ok(b) => b,
                            Err(e) => {
                                warn!(url, error = %e, "scrape body read failed");
                                return Ok(None);
                            }
                        };
                        if body.trim().is_empty() {
                            return Ok(None);
                        }
                        return Ok(Some(Page { final_url, body }));
                    }
                    if !RETRYABLE.contains(&code) {
                        debug!(url, code, "scrape miss");
                        return Ok(None);
                    }
                    if attempt < SCRAPE_ATTEMPTS {
                        let retry_after = resp
                            .headers()
                            .get("Retry-After")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.trim().parse::<u64>().ok());
                        thread::sleep(scrape_delay(attempt, retry_after));
                    }
                }
                Err(e) => {
                    warn!(url, attempt, error = %e, "scrape request failed");
                    if attempt < SCRAPE_ATTEMPTS {
                        thread::sleep(scrape_delay(attempt, None));
                    }
                }
            }
        }
        Ok(None)
    }
}

/// Exponential backoff from a 500 ms base, capped at 10 s, or whatever the
/// server asked for via `Retry-After` capped at 20 s.
fn scrape_delay(attempt: u32, retry_after_secs: Option<u64>) -> Duration {
    if let Some(secs) = retry_after_secs {
        return Duration::from_secs(secs.min(20));
    }
    let millis = 500u64.saturating_mul(1 << (attempt - 1).min(6));
    Duration::from_millis(millis.min(10_000))
}
