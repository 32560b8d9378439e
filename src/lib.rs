//! Russian-language NHL results digest. Fetches the day's finished games
//! from the public NHL web API, normalizes their play-by-play into canonical
//! goal and shootout records, opportunistically translates surnames via
//! sports.ru, and renders spoiler-wrapped summaries for Telegram.

pub mod cache;
pub mod config;
pub mod error;
pub mod http;
mod json;
pub mod model;
pub mod names;
pub mod nhl;
pub mod pbp;
pub mod render;
pub mod report;
pub mod telegram;
pub mod text;
