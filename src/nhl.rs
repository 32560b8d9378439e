//! NHL web API access: schedule, standings, play-by-play, single-game
//! lookup. Network methods are thin wrappers over the retrying client; the
//! `parse_*` functions are pure so tests can feed fixture documents.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::http::HttpClient;
use crate::json::{first_i64, first_str, first_u32};
use crate::model::game::{Game, GameState, GoalEvent, ShootoutAttempt, StandingsSnapshot};
use crate::model::team::TeamRef;
use crate::pbp;

const API_BASE: &str = "https://api-web.nhle.com";

#[derive(Debug, Clone)]
pub struct NhlApi {
    http: HttpClient,
    base: String,
}

impl NhlApi {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            base: API_BASE.to_string(),
        }
    }

    /// Games scheduled on one calendar date. An empty day is valid.
    pub fn fetch_schedule_day(&self, date: NaiveDate) -> Result<Vec<Game>> {
        let url = format!("{}/v1/schedule/{}", self.base, date.format("%Y-%m-%d"));
        let doc = self.http.get_json(&url)?;
        let games = parse_schedule(&doc);
        debug!(%date, count = games.len(), "fetched schedule day");
        Ok(games)
    }

    /// Union of the schedules for `date - 1`, `date`, `date + 1`, deduplicated
    /// by game id, so games crossing the local midnight are not lost.
    pub fn fetch_schedule_window(&self, date: NaiveDate) -> Result<Vec<Game>> {
        let mut games: Vec<Game> = Vec::new();
        for offset in [-1i64, 0, 1] {
            let day = date + Duration::days(offset);
            for game in self.fetch_schedule_day(day)? {
                if !games.iter().any(|g| g.id == game.id) {
                    games.push(game);
                }
            }
        }
        Ok(games)
    }

    /// Current standings. Failure is non-fatal: the second element is false
    /// and the snapshot is empty, which renders every record as `—`.
    pub fn fetch_standings(&self) -> (StandingsSnapshot, bool) {
        let url = format!("{}/v1/standings/now", self.base);
        match self.http.get_json(&url) {
            Ok(doc) => {
                let snap = parse_standings(&doc);
                (snap, true)
            }
            Err(e) => {
                warn!(error = %e, "standings fetch failed, records will render as dashes");
                (StandingsSnapshot::default(), false)
            }
        }
    }

    /// Normalized goals and shootout attempts for one game.
    pub fn load_pbp(&self, game_id: i64) -> Result<(Vec<GoalEvent>, Vec<ShootoutAttempt>)> {
        let url = format!("{}/v1/gamecenter/{}/play-by-play", self.base, game_id);
        let doc = self.http.get_json(&url)?;
        let (goals, shootout) = pbp::normalize(&doc);
        info!(game_id, goals = goals.len(), shootout = shootout.len(), "normalized play-by-play");
        Ok((goals, shootout))
    }

    /// One game by id: the game summary is authoritative for scores, with
    /// the boxscore as the alternative source when the summary is absent.
    pub fn fetch_game(&self, game_id: i64) -> Result<Option<Game>> {
        for endpoint in ["game-summary", "boxscore"] {
            let url = format!("{}/v1/gamecenter/{}/{}", self.base, game_id, endpoint);
            match self.http.get_json(&url) {
                Ok(doc) => {
                    if let Some(game) = parse_game_record(&doc) {
                        return Ok(Some(game));
                    }
                    debug!(game_id, endpoint, "document did not yield a game record");
                }
                Err(e) => {
                    debug!(game_id, endpoint, error = %e, "game document fetch failed");
                }
            }
        }
        Ok(None)
    }
}

/// Flattens both upstream schedule shapes: a top-level `games` array, or a
/// `gameWeek` whose entries each carry a `games` array.
pub fn parse_schedule(doc: &Value) -> Vec<Game> {
    let mut out = Vec::new();
    if let Some(games) = doc.get("games").and_then(Value::as_array) {
        out.extend(games.iter().filter_map(parse_game_record));
        return out;
    }
    if let Some(week) = doc.get("gameWeek").and_then(Value::as_array) {
        for day in week {
            if let Some(games) = day.get("games").and_then(Value::as_array) {
                out.extend(games.iter().filter_map(parse_game_record));
            }
        }
    }
    out
}

/// One raw schedule/summary/boxscore record into a `Game`. Records without
/// an id, a parseable start time, or both team abbreviations are dropped.
pub fn parse_game_record(raw: &Value) -> Option<Game> {
    let id = first_i64(raw, &["id", "gamePk"])?;
    let start_utc = first_str(raw, &["startTimeUTC", "gameDate"])
        .and_then(|s| parse_instant(&s))?;
    let home = parse_team(raw.get("homeTeam")?)?;
    let away = parse_team(raw.get("awayTeam")?)?;
    let home_score = first_u32(raw, &["homeTeam.score"]).unwrap_or(0);
    let away_score = first_u32(raw, &["awayTeam.score"]).unwrap_or(0);
    let state = first_str(raw, &["gameState", "status.abstractGameState"])
        .map(|s| GameState::from_upstream(&s))
        .unwrap_or(GameState::Scheduled);
    Some(Game {
        id,
        start_utc,
        home,
        away,
        home_score,
        away_score,
        state,
    })
}

fn parse_team(raw: &Value) -> Option<TeamRef> {
    let abbrev = first_str(raw, &["abbrev", "triCode"])?;
    let mut team = TeamRef::new(abbrev);
    team.place = first_str(raw, &["placeName"]);
    team.nick = first_str(raw, &["commonName", "teamName", "name"]);
    Some(team)
}

fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

/// Walks `standings[].divisions[].teams[]`. Missing record fields count as 0.
pub fn parse_standings(doc: &Value) -> StandingsSnapshot {
    let mut records: HashMap<String, (u32, u32, u32)> = HashMap::new();
    let conferences = doc.get("standings").and_then(Value::as_array);
    for conference in conferences.into_iter().flatten() {
        let divisions = conference.get("divisions").and_then(Value::as_array);
        for division in divisions.into_iter().flatten() {
            let teams = division.get("teams").and_then(Value::as_array);
            for team in teams.into_iter().flatten() {
                let Some(abbrev) = first_str(team, &["teamAbbrev"]) else {
                    continue;
                };
                let wins = first_u32(team, &["record.wins"]).unwrap_or(0);
                let losses = first_u32(team, &["record.losses"]).unwrap_or(0);
                let ot = first_u32(team, &["record.ot"]).unwrap_or(0);
                records.insert(abbrev.to_uppercase(), (wins, losses, ot));
            }
        }
    }
    StandingsSnapshot::new(records)
}
