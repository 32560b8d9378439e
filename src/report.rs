//! Orchestration: collect the finals of one local day and assemble the
//! messenger parts, or resolve a single game by id / textual query.

use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::{info, warn};

use crate::error::{BotError, Result};
use crate::model::game::{Game, GameState};
use crate::names::NameResolver;
use crate::nhl::NhlApi;
use crate::render::{
    ShootoutStyle, day_header, no_games_line, paginate, render_game, separator,
};

#[derive(Debug)]
pub struct DayReport {
    pub date: NaiveDate,
    pub games: usize,
    pub parts: Vec<String>,
}

/// Build the day's report. Schedules for D−1, D and D+1 are merged so a game
/// that starts just before local midnight is not lost; only finals whose
/// start instant falls on the local day survive the filter. The play-by-play
/// of an individual game may fail without sinking the report.
pub fn build_day(
    api: &NhlApi,
    resolver: &dyn NameResolver,
    date: NaiveDate,
    tz: Tz,
) -> Result<DayReport> {
    let window = api.fetch_schedule_window(date)?;
    let finals = finals_in_window(window, date, tz);

    if finals.is_empty() {
        info!(%date, "no finished games for the local day");
        return Ok(DayReport {
            date,
            games: 0,
            parts: vec![no_games_line(date)],
        });
    }

    let (standings, standings_ok) = api.fetch_standings();
    if !standings_ok {
        warn!("reporting without team records");
    }

    let mut blocks: Vec<String> = Vec::new();
    for game in &finals {
        let (goals, shootout) = match api.load_pbp(game.id) {
            Ok(events) => events,
            Err(e) => {
                warn!(game_id = game.id, error = %e, "play-by-play unavailable, rendering bare score");
                (Vec::new(), Vec::new())
            }
        };
        let names = resolver.resolve(&game.home, &game.away);
        let block = render_game(game, &goals, &shootout, &standings, &names, ShootoutStyle::Summary);
        blocks.push(format!("\n{}\n{}\n", separator(), block));
    }

    let header = day_header(date, finals.len());
    let parts = paginate(&header, &blocks);
    info!(%date, games = finals.len(), parts = parts.len(), "assembled day report");
    Ok(DayReport {
        date,
        games: finals.len(),
        parts,
    })
}

/// Finished games whose start instant falls on the given local day.
pub fn finals_in_window(games: Vec<Game>, date: NaiveDate, tz: Tz) -> Vec<Game> {
    games
        .into_iter()
        .filter(|g| g.state == GameState::Final)
        .filter(|g| g.start_utc.with_timezone(&tz).date_naive() == date)
        .collect()
}

/// How the single-game entry picks its game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameSelector {
    Id(i64),
    Matchup {
        date: NaiveDate,
        away: String,
        home: String,
    },
}

impl GameSelector {
    /// `GAME_PK` takes priority over `GAME_QUERY`; neither set is a usage
    /// error.
    pub fn from_options(game_pk: Option<i64>, game_query: Option<&str>) -> Result<Self> {
        if let Some(id) = game_pk {
            return Ok(GameSelector::Id(id));
        }
        if let Some(query) = game_query {
            return parse_query(query);
        }
        Err(BotError::Usage(
            "set GAME_PK=<id> or GAME_QUERY=\"YYYY-MM-DD AWAY@HOME\"".to_string(),
        ))
    }
}

/// `"YYYY-MM-DD AWAY@HOME"` or `"YYYY-MM-DD HOME-AWAY"`.
pub fn parse_query(query: &str) -> Result<GameSelector> {
    let mut words = query.split_whitespace();
    let (Some(date_raw), Some(teams_raw), None) = (words.next(), words.next(), words.next()) else {
        return Err(BotError::Usage(format!("bad game query: {:?}", query)));
    };
    let date = NaiveDate::parse_from_str(date_raw, "%Y-%m-%d")
        .map_err(|_| BotError::Usage(format!("bad date in game query: {:?}", date_raw)))?;
    let (away, home) = if let Some((away, home)) = teams_raw.split_once('@') {
        (away, home)
    } else if let Some((home, away)) = teams_raw.split_once('-') {
        (away, home)
    } else {
        return Err(BotError::Usage(format!(
            "bad matchup in game query (want AWAY@HOME or HOME-AWAY): {:?}",
            teams_raw
        )));
    };
    Ok(GameSelector::Matchup {
        date,
        away: away.trim().to_uppercase(),
        home: home.trim().to_uppercase(),
    })
}

/// Find the selected game. Matchup queries scan the D−1/D/D+1 schedules and
/// match on the uppercased three-letter abbreviations.
pub fn select_game(api: &NhlApi, selector: &GameSelector) -> Result<Option<Game>> {
    match selector {
        GameSelector::Id(id) => api.fetch_game(*id),
        GameSelector::Matchup { date, away, home } => {
            let window = api.fetch_schedule_window(*date)?;
            Ok(window
                .into_iter()
                .find(|g| g.home.abbrev == *home && g.away.abbrev == *away))
        }
    }
}

/// Render one game with per-round shootout detail.
pub fn build_single(api: &NhlApi, resolver: &dyn NameResolver, game: &Game) -> Result<String> {
    let (goals, shootout) = match api.load_pbp(game.id) {
        Ok(events) => events,
        Err(e) => {
            warn!(game_id = game.id, error = %e, "play-by-play unavailable, rendering bare score");
            (Vec::new(), Vec::new())
        }
    };
    let (standings, _) = api.fetch_standings();
    let names = resolver.resolve(&game.home, &game.away);
    Ok(render_game(game, &goals, &shootout, &standings, &names, ShootoutStyle::PerRound))
}

/// Finals render normally; anything else is refused by the single-game path.
pub fn ensure_final(game: &Game) -> Result<()> {
    if game.state == GameState::Final {
        Ok(())
    } else {
        Err(BotError::Usage(format!(
            "game {} has not finished yet",
            game.id
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_accepts_away_at_home() {
        let sel = parse_query("2026-01-05 BOS@MTL").expect("valid query");
        assert_eq!(
            sel,
            GameSelector::Matchup {
                date: NaiveDate::from_ymd_opt(2026, 1, 5).expect("date"),
                away: "BOS".to_string(),
                home: "MTL".to_string(),
            }
        );
    }

    #[test]
    fn query_accepts_home_dash_away() {
        let sel = parse_query("2026-01-05 mtl-bos").expect("valid query");
        assert_eq!(
            sel,
            GameSelector::Matchup {
                date: NaiveDate::from_ymd_opt(2026, 1, 5).expect("date"),
                away: "BOS".to_string(),
                home: "MTL".to_string(),
            }
        );
    }

    #[test]
    fn missing_selectors_are_a_usage_error() {
        let err = GameSelector::from_options(None, None).expect_err("must fail");
        assert!(matches!(err, BotError::Usage(_)));
    }

    #[test]
    fn malformed_queries_are_rejected() {
        assert!(parse_query("2026-01-05").is_err());
        assert!(parse_query("not-a-date BOS@MTL").is_err());
        assert!(parse_query("2026-01-05 BOSMTL").is_err());
    }
}
