use serde_json::{Value, json};

use nhl_recap_bot::pbp::normalize;
use nhl_recap_bot::text::clock_seconds;

fn load_fixture(name: &str) -> Value {
    let raw = std::fs::read_to_string(format!("tests/fixtures/{}", name))
        .expect("failed to read fixture");
    serde_json::from_str(&raw).expect("fixture is not valid json")
}

#[test]
fn modern_document_uses_scoring_plays_verbatim() {
    let doc = load_fixture("play_by_play_modern.json");
    let (goals, shootout) = normalize(&doc);

    assert_eq!(goals.len(), 3);
    assert_eq!(goals[0].scorer.as_deref(), Some("Suzuki"));
    assert_eq!(goals[0].assists, vec!["Caufield".to_string()]);
    assert_eq!(goals[1].assists, vec!["Suzuki".to_string(), "Hutson".to_string()]);
    // Diacritics are folded before the last token is taken.
    assert_eq!(goals[2].scorer.as_deref(), Some("Pastrnak"));
    assert_eq!(goals[2].team, "BOS");

    assert_eq!(shootout.len(), 2);
    assert_eq!(shootout[0].round, 1);
    assert!(shootout[0].is_goal);
    assert_eq!(shootout[0].shooter.as_deref(), Some("Demidov"));
    assert!(!shootout[1].is_goal);
}

#[test]
fn legacy_document_scans_all_plays_and_sorts_chronologically() {
    let doc = load_fixture("play_by_play_legacy.json");
    let (goals, shootout) = normalize(&doc);

    assert_eq!(goals.len(), 2, "only the two GOAL events qualify");
    // Source order was 12:40 then 05:12; output is chronological.
    assert_eq!(goals[0].clock, "05:12");
    assert_eq!(goals[0].scorer.as_deref(), Some("Suzuki"));
    assert_eq!(goals[0].team, "MTL");
    assert_eq!(goals[1].clock, "12:40");
    assert_eq!(goals[1].assists, vec!["Marchand".to_string()]);
    assert!(shootout.is_empty());
}

#[test]
fn goal_ordering_is_non_decreasing() {
    for fixture in ["play_by_play_modern.json", "play_by_play_legacy.json"] {
        let (goals, shootout) = normalize(&load_fixture(fixture));
        let keys: Vec<(u32, u32)> = goals
            .iter()
            .map(|g| (g.period, clock_seconds(&g.clock)))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted, "goals out of order in {}", fixture);

        let rounds: Vec<u32> = shootout.iter().map(|a| a.round).collect();
        let mut sorted_rounds = rounds.clone();
        sorted_rounds.sort();
        assert_eq!(rounds, sorted_rounds, "rounds out of order in {}", fixture);
    }
}

#[test]
fn plays_as_bare_array_is_treated_as_all_plays() {
    let doc = json!({"plays": [
        {"typeDescKey": "goal", "periodDescriptor": {"number": 1}, "timeInPeriod": "10:00",
         "details": {"eventOwnerTeamAbbrev": "TOR", "scorerName": "Auston Matthews"}},
        {"typeDescKey": "penalty", "periodDescriptor": {"number": 1}, "timeInPeriod": "11:00",
         "details": {"eventOwnerTeamAbbrev": "TOR"}}
    ]});
    let (goals, _) = normalize(&doc);
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].scorer.as_deref(), Some("Matthews"));
}

#[test]
fn empty_scoring_plays_falls_back_to_all_plays_scan() {
    let doc = json!({"plays": {
        "scoringPlays": [],
        "allPlays": [
            {"typeDescKey": "goal", "periodDescriptor": {"number": 2}, "timeInPeriod": "08:15",
             "details": {"eventOwnerTeamAbbrev": "COL", "scorerName": "Nathan MacKinnon"}}
        ]
    }});
    let (goals, _) = normalize(&doc);
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].scorer.as_deref(), Some("Mackinnon"));
    assert_eq!(goals[0].period, 2);
}

#[test]
fn malformed_events_degrade_instead_of_failing() {
    let doc = json!({"plays": {"scoringPlays": [
        {"typeDescKey": "goal"},
        {"weird": true}
    ]}});
    let (goals, _) = normalize(&doc);
    assert_eq!(goals.len(), 2);
    assert_eq!(goals[0].period, 0);
    assert_eq!(goals[0].clock, "00:00");
    assert_eq!(goals[0].team, "");
    assert_eq!(goals[0].scorer, None);
    assert!(goals[0].assists.is_empty());
}

#[test]
fn shootout_results_prefer_type_text_over_is_goal_flag() {
    let doc = json!({"plays": {"shootoutPlays": [
        {"typeDescKey": "shootout_no_goal",
         "details": {"eventOwnerTeamAbbrev": "CAR", "shootoutShooterName": "Sebastian Aho",
                     "isGoal": true}}
    ]}});
    let (_, shootout) = normalize(&doc);
    assert_eq!(shootout.len(), 1);
    assert!(!shootout[0].is_goal, "no_goal must override the stale flag");
}
