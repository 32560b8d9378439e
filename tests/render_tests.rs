use chrono::{TimeZone, Utc};

use nhl_recap_bot::model::game::{Game, GameState, GoalEvent, ShootoutAttempt, StandingsSnapshot};
use nhl_recap_bot::model::team::TeamRef;
use nhl_recap_bot::names::NameMap;
use nhl_recap_bot::render::{ShootoutStyle, paginate, render_game};

fn game(home: &str, away: &str, home_score: u32, away_score: u32) -> Game {
    Game {
        id: 2026020500,
        start_utc: Utc.with_ymd_and_hms(2026, 1, 5, 0, 10, 0).unwrap(),
        home: TeamRef::new(home),
        away: TeamRef::new(away),
        home_score,
        away_score,
        state: GameState::Final,
    }
}

fn goal(period: u32, clock: &str, team: &str, scorer: &str, assists: &[&str]) -> GoalEvent {
    GoalEvent {
        period,
        clock: clock.to_string(),
        team: team.to_string(),
        scorer: Some(scorer.to_string()),
        assists: assists.iter().map(|a| a.to_string()).collect(),
    }
}

#[test]
fn regulation_win_renders_running_scores_per_period() {
    // S1: MTL 3-2 BOS in regulation.
    let g = game("MTL", "BOS", 3, 2);
    let goals = vec![
        goal(1, "05:12", "MTL", "Suzuki", &["Caufield"]),
        goal(1, "12:40", "BOS", "Pastrnak", &[]),
        goal(2, "03:01", "MTL", "Caufield", &["Suzuki", "Hutson"]),
        goal(3, "07:55", "BOS", "Marchand", &[]),
        goal(3, "18:02", "MTL", "Slafkovsky", &["Matheson"]),
    ];
    let block = render_game(
        &g,
        &goals,
        &[],
        &StandingsSnapshot::default(),
        &NameMap::new(),
        ShootoutStyle::Summary,
    );

    let expected = "<tg-spoiler>\n\
                    ⚜️ «Монреаль» — 3 (—)\n\
                    🐻 «Бостон» — 2 (—)\n\
                    \n\
                    <i>1-й период</i>\n\
                    1:0 – 05.12 Suzuki (Caufield)\n\
                    1:1 – 12.40 Pastrnak\n\
                    \n\
                    <i>2-й период</i>\n\
                    2:1 – 03.01 Caufield (Suzuki, Hutson)\n\
                    \n\
                    <i>3-й период</i>\n\
                    2:2 – 07.55 Marchand\n\
                    3:2 – 18.02 Slafkovsky (Matheson)\n\
                    </tg-spoiler>";
    assert_eq!(block, expected);
}

#[test]
fn empty_period_says_no_goals() {
    // S2: nothing happened in the second period.
    let g = game("MTL", "BOS", 1, 0);
    let goals = vec![goal(1, "05:12", "MTL", "Suzuki", &[])];
    let block = render_game(
        &g,
        &goals,
        &[],
        &StandingsSnapshot::default(),
        &NameMap::new(),
        ShootoutStyle::Summary,
    );
    assert!(block.contains("<i>2-й период</i>\nГолов не было"), "block was: {}", block);
    assert!(block.contains("<i>3-й период</i>\nГолов не было"), "block was: {}", block);
    assert!(!block.contains("Овертайм"), "block was: {}", block);
    assert!(!block.contains("Буллиты"), "block was: {}", block);
}

#[test]
fn overtime_goal_gets_its_own_section() {
    // S3: EDM wins 4-3 on a period-4 goal.
    let g = game("EDM", "VAN", 4, 3);
    let goals = vec![
        goal(1, "02:00", "EDM", "Hyman", &[]),
        goal(1, "10:00", "VAN", "Boeser", &[]),
        goal(2, "05:00", "EDM", "Nugent-Hopkins", &[]),
        goal(2, "15:00", "VAN", "Pettersson", &[]),
        goal(3, "08:00", "EDM", "Bouchard", &[]),
        goal(3, "19:00", "VAN", "Hughes", &[]),
        goal(4, "01:13", "EDM", "McDavid", &["Draisaitl"]),
    ];
    let block = render_game(
        &g,
        &goals,
        &[],
        &StandingsSnapshot::default(),
        &NameMap::new(),
        ShootoutStyle::Summary,
    );
    assert!(
        block.contains("<i>Овертайм</i>\n4:3 – 01.13 McDavid (Draisaitl)\n"),
        "block was: {}",
        block
    );
}

#[test]
fn shootout_summary_vs_per_round_detail() {
    // S4: 2-2 after OT, shootout decides it 3-2 for the home side.
    let g = game("TBL", "NYR", 3, 2);
    let goals = vec![
        goal(1, "04:00", "TBL", "Point", &[]),
        goal(2, "06:00", "NYR", "Panarin", &[]),
        goal(2, "11:00", "TBL", "Hagel", &[]),
        goal(3, "14:00", "NYR", "Zibanejad", &[]),
    ];
    let attempt = |round: u32, team: &str, shooter: &str, is_goal: bool| ShootoutAttempt {
        round,
        team: team.to_string(),
        shooter: Some(shooter.to_string()),
        is_goal,
    };
    let shootout = vec![
        attempt(1, "TBL", "Kucherov", true),
        attempt(2, "NYR", "Panarin", false),
        attempt(3, "TBL", "Point", false),
        attempt(4, "NYR", "Zibanejad", true),
        attempt(5, "TBL", "Guentzel", true),
    ];

    let daily = render_game(
        &g,
        &goals,
        &shootout,
        &StandingsSnapshot::default(),
        &NameMap::new(),
        ShootoutStyle::Summary,
    );
    assert!(daily.contains("<i>Буллиты</i>\nбуллит — 3:2\n"), "block was: {}", daily);
    assert!(!daily.contains("Раунд"), "block was: {}", daily);

    let detailed = render_game(
        &g,
        &goals,
        &shootout,
        &StandingsSnapshot::default(),
        &NameMap::new(),
        ShootoutStyle::PerRound,
    );
    assert!(detailed.contains("Раунд 1 — Kucherov — гол (SO 1:0)"), "block was: {}", detailed);
    assert!(detailed.contains("Раунд 2 — Panarin — мимо (SO 1:0)"), "block was: {}", detailed);
    assert!(detailed.contains("Раунд 4 — Zibanejad — гол (SO 1:1)"), "block was: {}", detailed);
    assert!(detailed.contains("Раунд 5 — Guentzel — гол (SO 2:1)"), "block was: {}", detailed);
    assert!(!detailed.contains("буллит —"), "block was: {}", detailed);
}

#[test]
fn russian_surnames_substitute_scorer_and_assists() {
    let g = game("MTL", "BOS", 1, 0);
    let goals = vec![goal(1, "05:12", "MTL", "Suzuki", &["Caufield", "Hutson"])];
    let mut names = NameMap::new();
    names.insert("Suzuki".to_string(), "Судзуки".to_string());
    names.insert("Caufield".to_string(), "Кофилд".to_string());
    let block = render_game(
        &g,
        &goals,
        &[],
        &StandingsSnapshot::default(),
        &names,
        ShootoutStyle::Summary,
    );
    // Unmapped assist keeps its English surname.
    assert!(
        block.contains("1:0 – 05.12 Судзуки (Кофилд, Hutson)"),
        "block was: {}",
        block
    );
}

#[test]
fn missing_scorer_renders_a_dash() {
    let g = game("MTL", "BOS", 1, 0);
    let goals = vec![GoalEvent {
        period: 1,
        clock: "05:12".to_string(),
        team: "MTL".to_string(),
        scorer: None,
        assists: vec![],
    }];
    let block = render_game(
        &g,
        &goals,
        &[],
        &StandingsSnapshot::default(),
        &NameMap::new(),
        ShootoutStyle::Summary,
    );
    assert!(block.contains("1:0 – 05.12 —"), "block was: {}", block);
}

#[test]
fn unknown_goal_owner_freezes_the_running_score() {
    let g = game("MTL", "BOS", 1, 0);
    let goals = vec![
        goal(1, "03:00", "???", "Nobody", &[]),
        goal(1, "05:12", "MTL", "Suzuki", &[]),
    ];
    let block = render_game(
        &g,
        &goals,
        &[],
        &StandingsSnapshot::default(),
        &NameMap::new(),
        ShootoutStyle::Summary,
    );
    // The misattributed goal still emits a line, at the unchanged score.
    assert!(block.contains("0:0 – 03.00 Nobody"), "block was: {}", block);
    assert!(block.contains("1:0 – 05.12 Suzuki"), "block was: {}", block);
}

#[test]
fn standings_records_appear_next_to_scores() {
    let mut records = std::collections::HashMap::new();
    records.insert("MTL".to_string(), (20u32, 10u32, 4u32));
    let standings = StandingsSnapshot::new(records);
    let g = game("MTL", "BOS", 2, 1);
    let block = render_game(&g, &[], &[], &standings, &NameMap::new(), ShootoutStyle::Summary);
    assert!(block.contains("«Монреаль» — 2 (20-10-4)"), "block was: {}", block);
    assert!(block.contains("«Бостон» — 1 (—)"), "block was: {}", block);
}

#[test]
fn every_part_balances_spoiler_tags_and_owns_whole_blocks() {
    // Invariant 5: pagination never fractures a spoiler block.
    let g = game("MTL", "BOS", 3, 2);
    let goals: Vec<GoalEvent> = (0..30)
        .map(|i| goal(1 + i % 3, "05:12", "MTL", "Somebodyveryverylongname", &["Helper"]))
        .collect();
    let block = render_game(
        &g,
        &goals,
        &[],
        &StandingsSnapshot::default(),
        &NameMap::new(),
        ShootoutStyle::Summary,
    );
    let blocks: Vec<String> = (0..8).map(|_| format!("\n{}\n", block)).collect();
    let parts = paginate("header\n", &blocks);
    assert!(parts.len() > 1, "expected a split, got {} part(s)", parts.len());
    let mut seen = 0;
    for part in &parts {
        let opens = part.matches("<tg-spoiler>").count();
        let closes = part.matches("</tg-spoiler>").count();
        assert_eq!(opens, closes, "unbalanced spoiler tags in part: {}", part);
        seen += opens;
    }
    assert_eq!(seen, blocks.len(), "every block lands in exactly one part");
}
