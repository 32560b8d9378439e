use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::model::team::TeamRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Scheduled,
    Live,
    Final,
}

impl GameState {
    /// Upstream state strings vary; "OFF" and "FINAL" both mean the game is
    /// over and safe to report.
    pub fn from_upstream(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "FINAL" | "OFF" => GameState::Final,
            "LIVE" | "CRIT" => GameState::Live,
            _ => GameState::Scheduled,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    pub id: i64,
    pub start_utc: DateTime<Utc>,
    pub home: TeamRef,
    pub away: TeamRef,
    pub home_score: u32,
    pub away_score: u32,
    pub state: GameState,
}

/// One canonical scoring event as produced by the play-by-play normalizer.
/// `clock` is elapsed time within the period, `MM:SS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalEvent {
    pub period: u32,
    pub clock: String,
    pub team: String,
    pub scorer: Option<String>,
    pub assists: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShootoutAttempt {
    pub round: u32,
    pub team: String,
    pub shooter: Option<String>,
    pub is_goal: bool,
}

/// Per-team (wins, losses, ot) records, fetched once per day assembly.
/// An absent snapshot renders every record as `—`.
#[derive(Debug, Clone, Default)]
pub struct StandingsSnapshot {
    records: HashMap<String, (u32, u32, u32)>,
}

impl StandingsSnapshot {
    pub fn new(records: HashMap<String, (u32, u32, u32)>) -> Self {
        Self { records }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record(&self, abbrev: &str) -> Option<(u32, u32, u32)> {
        self.records.get(&abbrev.to_uppercase()).copied()
    }

    /// `"W-L-OT"`, or `"—"` when the team is missing from the snapshot.
    pub fn line(&self, abbrev: &str) -> String {
        match self.record(abbrev) {
            Some((w, l, ot)) => format!("{}-{}-{}", w, l, ot),
            None => "—".to_string(),
        }
    }
}
