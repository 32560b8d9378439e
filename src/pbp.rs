//! Play-by-play normalizer. The upstream document is polymorphic: several
//! generations of the API disagree on where the play list lives and what the
//! per-event fields are called. Everything here is tolerant extraction over
//! `serde_json::Value`; downstream code only ever sees the canonical
//! `GoalEvent` / `ShootoutAttempt` records.

use serde_json::Value;

use crate::json::{PointerPath, as_text, first_str, first_u32};
use crate::model::game::{GoalEvent, ShootoutAttempt};
use crate::text::{clock_seconds, last_name_token};

/// Normalize one play-by-play document into goals and shootout attempts,
/// both in chronological order.
pub fn normalize(doc: &Value) -> (Vec<GoalEvent>, Vec<ShootoutAttempt>) {
    let lists = play_lists(doc);

    let (mut goals, scanned) = match lists.scoring {
        Some(scoring) if !scoring.is_empty() => {
            let goals = scoring
                .iter()
                .filter(|ev| !is_shootout(ev))
                .map(extract_goal)
                .collect::<Vec<_>>();
            (goals, false)
        }
        _ => {
            let all = lists.all.map(|v| v.as_slice()).unwrap_or(&[]);
            let goals = all
                .iter()
                .filter(|ev| is_goal(ev) && !is_shootout(ev))
                .map(extract_goal)
                .collect::<Vec<_>>();
            (goals, true)
        }
    };
    if scanned {
        dedup_goals(&mut goals);
    }
    goals.sort_by_key(|g| (g.period, clock_seconds(&g.clock)));

    let mut shootout: Vec<ShootoutAttempt> = Vec::new();
    let so_events: Vec<&Value> = match lists.shootout {
        Some(list) if !list.is_empty() => list.iter().collect(),
        _ => lists
            .all
            .map(|v| v.iter().filter(|ev| is_shootout(ev)).collect())
            .unwrap_or_default(),
    };
    let mut prev_round = 0u32;
    for ev in so_events {
        let attempt = extract_attempt(ev, prev_round);
        prev_round = attempt.round;
        shootout.push(attempt);
    }

    (goals, shootout)
}

struct PlayLists<'a> {
    scoring: Option<&'a Vec<Value>>,
    all: Option<&'a Vec<Value>>,
    shootout: Option<&'a Vec<Value>>,
}

/// Accepts all known document shapes: `plays` object with named lists,
/// `plays` as a bare array, top-level `allPlays`, or a top-level array.
fn play_lists(doc: &Value) -> PlayLists<'_> {
    if let Some(arr) = doc.as_array() {
        return PlayLists { scoring: None, all: Some(arr), shootout: None };
    }
    if let Some(plays) = doc.get("plays") {
        if let Some(arr) = plays.as_array() {
            return PlayLists { scoring: None, all: Some(arr), shootout: None };
        }
        if plays.is_object() {
            return PlayLists {
                scoring: plays.get("scoringPlays").and_then(Value::as_array),
                all: plays.get("allPlays").and_then(Value::as_array),
                shootout: plays.get("shootoutPlays").and_then(Value::as_array),
            };
        }
    }
    PlayLists {
        scoring: None,
        all: doc.get("allPlays").and_then(Value::as_array),
        shootout: None,
    }
}

fn extract_goal(ev: &Value) -> GoalEvent {
    GoalEvent {
        period: period_of(ev),
        clock: clock_of(ev),
        team: team_of(ev),
        scorer: scorer_of(ev),
        assists: assists_of(ev),
    }
}

fn extract_attempt(ev: &Value, prev_round: u32) -> ShootoutAttempt {
    let round = first_u32(ev, &["details.shootoutRound", "details.round"])
        .unwrap_or(prev_round + 1)
        .max(1);

    let mut is_goal_flag = ev
        .pointer_path("details.isGoal")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if let Some(kind) = first_str(ev, &["typeDescKey"]) {
        let kind = kind.to_lowercase();
        if kind.contains("miss") || kind.contains("no_goal") {
            is_goal_flag = false;
        } else if kind.contains("goal") {
            is_goal_flag = true;
        }
    }

    ShootoutAttempt {
        round,
        team: team_of(ev),
        shooter: scorer_of(ev),
        is_goal: is_goal_flag,
    }
}

/// Goal classification is conservative: when no type text mentions a goal,
/// the event is not one.
fn is_goal(ev: &Value) -> bool {
    let text = type_text(ev);
    text.contains("goal") && !text.contains("no_goal")
}

fn is_shootout(ev: &Value) -> bool {
    let text = type_text(ev);
    period_of(ev) >= 5 || text.contains("shootout") || text == "so"
}

fn type_text(ev: &Value) -> String {
    let mut parts: Vec<String> = Vec::new();
    for path in ["typeDescKey", "type", "result.eventTypeId", "result.event"] {
        if let Some(s) = ev.pointer_path(path).and_then(as_text) {
            parts.push(s.to_lowercase());
        }
    }
    parts.join(" ")
}

fn period_of(ev: &Value) -> u32 {
    first_u32(
        ev,
        &[
            "periodDescriptor.number",
            "period.number",
            "about.periodNumber",
            "about.period",
        ],
    )
    .unwrap_or(0)
}

fn clock_of(ev: &Value) -> String {
    first_str(ev, &["timeInPeriod", "about.periodTime", "clock.timeRemaining"])
        .unwrap_or_else(|| "00:00".to_string())
}

fn team_of(ev: &Value) -> String {
    first_str(
        ev,
        &[
            "details.eventOwnerTeamAbbrev",
            "details.scoringTeamAbbrev",
            "teamAbbrev",
            "team.abbrev",
            "about.team.abbrev",
        ],
    )
    .map(|s| s.to_uppercase())
    .unwrap_or_default()
}

fn scorer_of(ev: &Value) -> Option<String> {
    let direct = first_str(
        ev,
        &[
            "details.scorerName",
            "details.scoringPlayerName",
            "details.shootoutShooterName",
            "details.secondaryEventName",
            "scorer.lastName",
            "scorer.name",
            "scorer.fullName",
        ],
    );
    let raw = direct.or_else(|| {
        players_of(ev).into_iter().find_map(|p| {
            let role = player_role(p);
            if role == "scorer" || role == "shooter" {
                player_name(p)
            } else {
                None
            }
        })
    })?;
    last_name_token(&raw)
}

fn assists_of(ev: &Value) -> Vec<String> {
    let mut raw: Vec<String> = Vec::new();
    for path in ["details.assist1Name", "details.assist2Name"] {
        if let Some(name) = first_str(ev, &[path]) {
            raw.push(name);
        }
    }
    if raw.is_empty() {
        if let Some(list) = ev.get("assists").and_then(Value::as_array) {
            for a in list {
                if let Some(name) = first_str(a, &["lastName", "name", "fullName"]) {
                    raw.push(name);
                }
            }
        }
    }
    if raw.is_empty() {
        for p in players_of(ev) {
            if player_role(p).starts_with("assist") {
                if let Some(name) = player_name(p) {
                    raw.push(name);
                }
            }
        }
    }
    raw.iter().filter_map(|n| last_name_token(n)).collect()
}

fn players_of(ev: &Value) -> Vec<&Value> {
    ev.get("players")
        .and_then(Value::as_array)
        .map(|a| a.iter().collect())
        .unwrap_or_default()
}

fn player_role(p: &Value) -> String {
    first_str(p, &["type", "playerType"])
        .map(|s| s.to_lowercase())
        .unwrap_or_default()
}

fn player_name(p: &Value) -> Option<String> {
    first_str(p, &["lastName", "name", "fullName", "player.fullName", "player.name"])
}

/// Fallback-scanned documents have historically never carried the same goal
/// twice, but drop exact duplicates anyway.
fn dedup_goals(goals: &mut Vec<GoalEvent>) {
    let mut seen: Vec<(u32, String, String, Option<String>)> = Vec::new();
    goals.retain(|g| {
        let key = (g.period, g.clock.clone(), g.team.clone(), g.scorer.clone());
        if seen.contains(&key) {
            false
        } else {
            seen.push(key);
            true
        }
    });
}
