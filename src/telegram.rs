//! Telegram delivery. Pre-rendered HTML parts go out via `sendMessage`;
//! a non-`ok` response surfaces the upstream `description` and is not
//! retried.

use std::time::Duration;

use serde_json::Value;
use tracing::{error, info};
use ureq::Agent;

use crate::error::{BotError, Result};
use crate::render::continuation_prefix;

#[derive(Debug, Clone)]
pub struct Telegram {
    agent: Agent,
    token: String,
    chat_id: String,
}

impl Telegram {
    pub fn new(token: String, chat_id: String) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .http_status_as_error(false)
            .build();
        Self {
            agent: Agent::new_with_config(config),
            token,
            chat_id,
        }
    }

    /// Send one message. Telegram reports failures in the JSON body even on
    /// HTTP errors, so the body is always inspected.
    pub fn send(&self, text: &str) -> Result<()> {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.token);
        let payload = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
            "parse_mode": "HTML",
            "disable_web_page_preview": true,
        });
        let resp = self
            .agent
            .post(&url)
            .send_json(payload)
            .map_err(|e| BotError::Messenger(e.to_string()))?;
        let status = resp.status().as_u16();
        let body: Value = resp
            .into_body()
            .read_json()
            .map_err(|e| BotError::Messenger(format!("unreadable response: {}", e)))?;
        if body.get("ok").and_then(Value::as_bool) == Some(true) {
            info!(status, chars = text.chars().count(), "posted message to telegram");
            return Ok(());
        }
        let description = body
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("no description")
            .to_string();
        error!(status, description = %description, "telegram rejected message");
        Err(BotError::Messenger(description))
    }

    /// Send a day report: the first part as-is, later parts behind the
    /// continuation prefix.
    pub fn send_parts(&self, parts: &[String]) -> Result<()> {
        let total = parts.len();
        for (i, part) in parts.iter().enumerate() {
            if i == 0 {
                self.send(part)?;
            } else {
                self.send(&format!("{}{}", continuation_prefix(i + 1, total), part))?;
            }
        }
        Ok(())
    }
}
