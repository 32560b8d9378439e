use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use nhl_recap_bot::model::game::{Game, GameState, StandingsSnapshot};
use nhl_recap_bot::model::team::TeamRef;
use nhl_recap_bot::names::{NameMap, NameResolver};
use nhl_recap_bot::render::{ShootoutStyle, render_game};
use nhl_recap_bot::report::finals_in_window;

fn game_at(id: i64, utc: (i32, u32, u32, u32, u32), state: GameState) -> Game {
    let (y, mo, d, h, mi) = utc;
    Game {
        id,
        start_utc: Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap(),
        home: TeamRef::new("MTL"),
        away: TeamRef::new("BOS"),
        home_score: 3,
        away_score: 2,
        state,
    }
}

#[test]
fn late_local_game_with_next_day_utc_timestamp_is_included() {
    // 23:45 on Jan 5 in New York is 04:45 UTC on Jan 6; the D-1/D/D+1
    // schedule union exists exactly for this case.
    let tz: Tz = "America/New_York".parse().expect("tz");
    let date = NaiveDate::from_ymd_opt(2026, 1, 5).expect("date");
    let games = vec![
        game_at(1, (2026, 1, 6, 4, 45), GameState::Final),
        game_at(2, (2026, 1, 5, 0, 30), GameState::Final), // Jan 4 locally
        game_at(3, (2026, 1, 6, 0, 10), GameState::Final), // Jan 5 19:10 locally
    ];
    let finals = finals_in_window(games, date, tz);
    let ids: Vec<i64> = finals.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn unfinished_games_are_filtered_out() {
    let tz: Tz = "Europe/Amsterdam".parse().expect("tz");
    let date = NaiveDate::from_ymd_opt(2026, 1, 5).expect("date");
    let games = vec![
        game_at(1, (2026, 1, 5, 18, 0), GameState::Final),
        game_at(2, (2026, 1, 5, 18, 0), GameState::Live),
        game_at(3, (2026, 1, 5, 18, 0), GameState::Scheduled),
    ];
    let finals = finals_in_window(games, date, tz);
    assert_eq!(finals.len(), 1);
    assert_eq!(finals[0].id, 1);
}

/// Deterministic resolver standing in for the sports.ru scraper.
struct FixedResolver(NameMap);

impl NameResolver for FixedResolver {
    fn resolve(&self, _home: &TeamRef, _away: &TeamRef) -> NameMap {
        self.0.clone()
    }
}

#[test]
fn injected_resolver_feeds_the_renderer() {
    let mut map = NameMap::new();
    map.insert("Suzuki".to_string(), "Судзуки".to_string());
    let resolver = FixedResolver(map);

    let game = game_at(1, (2026, 1, 5, 18, 0), GameState::Final);
    let names = resolver.resolve(&game.home, &game.away);
    let goals = vec![nhl_recap_bot::model::game::GoalEvent {
        period: 1,
        clock: "05:12".to_string(),
        team: "MTL".to_string(),
        scorer: Some("Suzuki".to_string()),
        assists: vec![],
    }];
    let block = render_game(
        &game,
        &goals,
        &[],
        &StandingsSnapshot::default(),
        &names,
        ShootoutStyle::Summary,
    );
    assert!(block.contains("1:0 – 05.12 Судзуки"), "block was: {}", block);
}
