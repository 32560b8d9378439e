//! Environment-variable configuration. Everything is validated here, before
//! any network activity.

use std::env;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::{BotError, Result};

pub const DEFAULT_TZ: &str = "Europe/Amsterdam";

#[derive(Debug, Clone)]
pub struct Config {
    /// `REPORT_DATE_LOCAL`; empty means today in `tz`.
    pub date: Option<NaiveDate>,
    pub tz: Tz,
    pub dry_run: bool,
    pub verbose: bool,
    pub telegram_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub game_pk: Option<i64>,
    pub game_query: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let date = match non_empty(env::var("REPORT_DATE_LOCAL").ok()) {
            Some(raw) => Some(
                NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
                    BotError::Config(format!("REPORT_DATE_LOCAL is not YYYY-MM-DD: {:?}", raw))
                })?,
            ),
            None => None,
        };
        let tz_name = non_empty(env::var("REPORT_TZ").ok()).unwrap_or_else(|| DEFAULT_TZ.to_string());
        let tz: Tz = tz_name
            .parse()
            .map_err(|_| BotError::Config(format!("REPORT_TZ is not an IANA timezone: {:?}", tz_name)))?;
        let game_pk = match non_empty(env::var("GAME_PK").ok()) {
            Some(raw) => Some(raw.parse::<i64>().map_err(|_| {
                BotError::Config(format!("GAME_PK is not a numeric game id: {:?}", raw))
            })?),
            None => None,
        };
        Ok(Self {
            date,
            tz,
            dry_run: flag("DRY_RUN"),
            verbose: flag("DEBUG_VERBOSE"),
            telegram_token: non_empty(env::var("TELEGRAM_BOT_TOKEN").ok()),
            telegram_chat_id: non_empty(env::var("TELEGRAM_CHAT_ID").ok()),
            game_pk,
            game_query: non_empty(env::var("GAME_QUERY").ok()),
        })
    }

    /// The local day to report on.
    pub fn report_date(&self) -> NaiveDate {
        self.date
            .unwrap_or_else(|| Utc::now().with_timezone(&self.tz).date_naive())
    }

    /// Credentials, required unless running dry.
    pub fn telegram(&self) -> Result<(String, String)> {
        match (&self.telegram_token, &self.telegram_chat_id) {
            (Some(token), Some(chat)) => Ok((token.clone(), chat.clone())),
            _ => Err(BotError::Config(
                "TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID must be set (or use DRY_RUN=1)".to_string(),
            )),
        }
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn flag(name: &str) -> bool {
    env::var(name).map(|v| v.trim() == "1").unwrap_or(false)
}
