//! Report rendering. One spoiler-wrapped block per game, grouped by period
//! with running scores, plus the day-level header and the packing of blocks
//! into size-bounded messenger parts. A spoiler block is never split across
//! parts.

use chrono::{Datelike, NaiveDate};

use crate::model::game::{Game, GoalEvent, ShootoutAttempt};
use crate::model::game::StandingsSnapshot;
use crate::names::NameMap;
use crate::text::display_clock;

/// Character budget per messenger part, leaving headroom under Telegram's
/// 4096 limit for the continuation prefix.
pub const PART_LIMIT: usize = 3500;

/// Whether the shootout section shows the daily one-line summary or the
/// per-round detail used by the single-game path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShootoutStyle {
    Summary,
    PerRound,
}

/// One game as a spoiler block.
pub fn render_game(
    game: &Game,
    goals: &[GoalEvent],
    shootout: &[ShootoutAttempt],
    standings: &StandingsSnapshot,
    names: &NameMap,
    style: ShootoutStyle,
) -> String {
    let mut out = String::new();
    out.push_str("<tg-spoiler>\n");
    out.push_str(&format!(
        "{} «{}» — {} ({})\n",
        game.home.emoji(),
        game.home.name_ru(),
        game.home_score,
        standings.line(&game.home.abbrev),
    ));
    out.push_str(&format!(
        "{} «{}» — {} ({})\n",
        game.away.emoji(),
        game.away.name_ru(),
        game.away_score,
        standings.line(&game.away.abbrev),
    ));

    let mut home_running = 0u32;
    let mut away_running = 0u32;
    let mut lines_by_period: [Vec<String>; 4] = Default::default();
    for goal in goals {
        if goal.team == game.home.abbrev {
            home_running += 1;
        } else if goal.team == game.away.abbrev {
            away_running += 1;
        }
        let line = goal_line(goal, home_running, away_running, names);
        // Period 0 means the feed never said; show it with the opener.
        let bucket = (goal.period.max(1).min(4) - 1) as usize;
        lines_by_period[bucket].push(line);
    }

    for period in 1..=3usize {
        out.push('\n');
        out.push_str(&format!("<i>{}-й период</i>\n", period));
        let lines = &lines_by_period[period - 1];
        if lines.is_empty() {
            out.push_str("Голов не было\n");
        } else {
            for line in lines {
                out.push_str(line);
                out.push('\n');
            }
        }
    }

    if !lines_by_period[3].is_empty() {
        out.push('\n');
        out.push_str("<i>Овертайм</i>\n");
        for line in &lines_by_period[3] {
            out.push_str(line);
            out.push('\n');
        }
    }

    if !shootout.is_empty() {
        out.push('\n');
        out.push_str("<i>Буллиты</i>\n");
        match style {
            ShootoutStyle::Summary => {
                out.push_str(&format!("буллит — {}:{}\n", game.home_score, game.away_score));
            }
            ShootoutStyle::PerRound => {
                let mut so_home = 0u32;
                let mut so_away = 0u32;
                for attempt in shootout {
                    if attempt.is_goal {
                        if attempt.team == game.home.abbrev {
                            so_home += 1;
                        } else if attempt.team == game.away.abbrev {
                            so_away += 1;
                        }
                    }
                    let shooter = attempt
                        .shooter
                        .as_deref()
                        .map(|s| localized(s, names))
                        .unwrap_or_else(|| "—".to_string());
                    let verdict = if attempt.is_goal { "гол" } else { "мимо" };
                    out.push_str(&format!(
                        "Раунд {} — {} — {} (SO {}:{})\n",
                        attempt.round, shooter, verdict, so_home, so_away,
                    ));
                }
            }
        }
    }

    out.push_str("</tg-spoiler>");
    out
}

fn goal_line(goal: &GoalEvent, home: u32, away: u32, names: &NameMap) -> String {
    let scorer = goal
        .scorer
        .as_deref()
        .map(|s| localized(s, names))
        .unwrap_or_else(|| "—".to_string());
    let mut line = format!("{}:{} – {} {}", home, away, display_clock(&goal.clock), scorer);
    if !goal.assists.is_empty() {
        let assists: Vec<String> = goal.assists.iter().map(|a| localized(a, names)).collect();
        line.push_str(&format!(" ({})", assists.join(", ")));
    }
    line
}

/// Russian surname when known, English otherwise.
fn localized(name: &str, names: &NameMap) -> String {
    names.get(name).cloned().unwrap_or_else(|| name.to_string())
}

pub fn month_ru(month: u32) -> &'static str {
    match month {
        1 => "января",
        2 => "февраля",
        3 => "марта",
        4 => "апреля",
        5 => "мая",
        6 => "июня",
        7 => "июля",
        8 => "августа",
        9 => "сентября",
        10 => "октября",
        11 => "ноября",
        _ => "декабря",
    }
}

pub fn day_header(date: NaiveDate, games: usize) -> String {
    format!(
        "🗓 Регулярный чемпионат НХЛ • {} {} • {} матчей\n\nРезультаты надёжно спрятаны 👇\n",
        date.day(),
        month_ru(date.month()),
        games,
    )
}

pub fn no_games_line(date: NaiveDate) -> String {
    format!(
        "🗓 Регулярный чемпионат НХЛ • {} {} • матчей нет",
        date.day(),
        month_ru(date.month()),
    )
}

/// Separator line placed before each game block in the daily report.
pub fn separator() -> String {
    "—".repeat(66)
}

/// Prefix added at send time to every part after the first.
pub fn continuation_prefix(part: usize, total: usize) -> String {
    format!("…продолжение (часть {}/{})\n\n", part, total)
}

/// Pack blocks into parts of at most `PART_LIMIT` characters. The header
/// opens the first part only; a block that would overflow starts a fresh
/// part as its sole content. Blocks are atomic.
pub fn paginate(header: &str, blocks: &[String]) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    let mut current = header.to_string();
    for block in blocks {
        let current_len = current.chars().count();
        if current_len > 0 && current_len + block.chars().count() > PART_LIMIT {
            parts.push(current);
            current = block.clone();
        } else {
            current.push_str(block);
        }
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}
