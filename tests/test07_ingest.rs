mod common;

use std::collections::BTreeSet;

use common::{catalog, event_fixture, g, standard_tee};
use golf_settle::CoreError;
use golf_settle::model::ingest::{normalize_game, normalize_snapshot, parse_snapshot_json};
use golf_settle::model::{
    CourseCatalog, GameCategory, GameConfig, GamePreference, HoleFilter, Money, PressRule,
    ScoringMode, SegmentModes, SideBetKind, TeamStake,
};
use serde_json::json;

fn normalize(value: serde_json::Value) -> Result<golf_settle::model::EventSnapshot, CoreError> {
    let raw = parse_snapshot_json(&value.to_string())?;
    let catalog = catalog();
    normalize_snapshot(raw, Some(&catalog as &dyn CourseCatalog))
}

fn minimal(games: serde_json::Value) -> serde_json::Value {
    json!({
        "event_id": "e1",
        "roster": [{"id": "ann"}, {"id": "ben"}],
        "games": games,
    })
}

fn game(value: serde_json::Value) -> Result<GameConfig, CoreError> {
    normalize_game(serde_json::from_value(value).map_err(CoreError::from)?)
}

#[test]
fn test07_roster_shapes() {
    let snapshot = event_fixture(true);
    assert_eq!(snapshot.tee, Some(standard_tee()));

    let ann = snapshot.roster_entry(&g("ann")).unwrap();
    assert_eq!(ann.handicap_index, Some(10.0));
    assert_eq!(ann.preference, GamePreference::All);

    let ben = snapshot.roster_entry(&g("ben")).unwrap();
    assert_eq!(ben.name, "ben");
    assert_eq!(ben.handicap_index, Some(18.4));

    let cat = snapshot.roster_entry(&g("cat")).unwrap();
    assert_eq!(
        cat.preference,
        GamePreference::Only(BTreeSet::from([GameCategory::Skins, GameCategory::SideBets]))
    );
    assert_eq!(
        snapshot.roster_entry(&g("dev")).unwrap().preference,
        GamePreference::None
    );
    assert!(!snapshot.scorecard.has_card(&g("dev")));
    assert_eq!(snapshot.scorecard.missing_for(&g("cat"), &standard_tee()), 1);
}

#[test]
fn test07_game_shapes() {
    let snapshot = event_fixture(true);
    let GameConfig::Nassau(main) = &snapshot.games[0] else {
        panic!("main should be a nassau");
    };
    assert_eq!(main.fees.stake(), Money::from_cents(1500));
    assert_eq!(main.scoring, SegmentModes::uniform(ScoringMode::Match));
    assert_eq!(main.press, Some(PressRule { down_by: 2 }));
    assert!(main.teams.is_none());

    let GameConfig::Nassau(split) = &snapshot.games[1] else {
        panic!("split should be a nassau");
    };
    assert_eq!(split.fees.total, Money::from_cents(400));
    assert_eq!(split.scoring.front, ScoringMode::Match);
    assert_eq!(split.scoring.back, ScoringMode::Stroke);
    assert!(split.carry_ties);
    let teams = split.teams.as_ref().unwrap();
    assert_eq!(teams.stake, TeamStake::FlatPerTeam);
    assert_eq!(teams.best_n, 1);
    let names: Vec<&str> = teams.teams.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["blue", "red"]);

    let GameConfig::Skins(skins) = &snapshot.games[2] else {
        panic!("skins should be skins");
    };
    assert_eq!(skins.fee, Money::from_cents(1000));
    assert!(skins.carryover);
    assert_eq!(skins.participants, vec![g("ann"), g("ben"), g("cat")]);

    let GameConfig::SideBet(ctp) = &snapshot.games[3] else {
        panic!("ctp should be a side bet");
    };
    assert_eq!(ctp.kind, SideBetKind::Proximity);
    assert_eq!(ctp.holes, HoleFilter::Par3);

    let GameConfig::SideBet(water) = &snapshot.games[4] else {
        panic!("water should be a side bet");
    };
    assert_eq!(water.kind, SideBetKind::PenaltyAvoidance);
    assert_eq!(water.holes, HoleFilter::Holes(vec![1, 2, 3]));
    assert_eq!(snapshot.winners_for(&ctp.id).len(), 1);
}

#[test]
fn test07_press_shapes() {
    let by_count = game(json!({"type": "nassau", "id": "n", "fee": 1, "scoring": "match", "press": 3}));
    let GameConfig::Nassau(n) = by_count.unwrap() else {
        panic!("nassau expected");
    };
    assert_eq!(n.press, Some(PressRule { down_by: 3 }));

    let as_rule = game(json!({"type": "nassau", "id": "n", "fee": 1, "scoring": "match", "press": {"down_by": 1}}));
    assert!(as_rule.is_ok());

    let off = game(json!({"type": "nassau", "id": "n", "fee": 1, "press": false}));
    let GameConfig::Nassau(n) = off.unwrap() else {
        panic!("nassau expected");
    };
    assert_eq!(n.press, None);
}

#[test]
fn test07_team_list_gets_default_names() {
    let parsed = game(json!({
        "type": "nassau", "id": "n", "fee": 1, "best_n": 2,
        "teams": [["a", "b"], {"members": ["c", "d"]}, {"name": "Aces", "members": ["e", "f"]}]
    }));
    let GameConfig::Nassau(n) = parsed.unwrap() else {
        panic!("nassau expected");
    };
    let teams = n.teams.unwrap();
    let names: Vec<&str> = teams.teams.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Team 1", "Team 2", "Aces"]);
    assert_eq!(teams.best_n, 2);
}

#[test]
fn test07_rejects_bad_configs() {
    let cases = [
        json!({"type": "skins", "id": "s", "fee": -1}),
        json!({"type": "nassau", "id": "n", "fee": 1, "press": true}),
        json!({"type": "nassau", "id": "n", "fee": 1, "scoring": "match", "press": 0}),
        json!({"type": "nassau", "id": "n", "fee": 1, "teams": [["a"], ["a", "b"]]}),
        json!({"type": "nassau", "id": "n", "fee": 1, "teams": {"x": ["a"]}}),
        json!({"type": "nassau", "id": "n", "fee": 1, "teams": [["a"], ["b"]], "best_n": 0}),
        json!({"type": "nassau", "id": "n", "fee": 1,
               "teams": [["a"], ["b"], ["c"], ["d"], ["e"]]}),
    ];
    for case in cases {
        let result = game(case.clone());
        assert!(
            matches!(result, Err(CoreError::InvalidConfig(_))),
            "{case} should be rejected, got {result:?}"
        );
    }
}

#[test]
fn test07_rejects_duplicate_game_ids() {
    let result = normalize(minimal(json!([
        {"type": "skins", "id": "dup", "fee": 1},
        {"type": "ctp", "id": "dup", "fee": 1}
    ])));
    // "ctp" is not a game type; the parse fails before the id check.
    assert!(matches!(result, Err(CoreError::Parse(_))));

    let result = normalize(minimal(json!([
        {"type": "skins", "id": "dup", "fee": 1},
        {"type": "closest_to_pin", "id": "dup", "fee": 1}
    ])));
    assert!(matches!(result, Err(CoreError::InvalidConfig(_))));
}

#[test]
fn test07_rejects_bad_scorecards() {
    let mut base = minimal(json!([]));
    base["course"] = json!("Pine Hills");
    base["tee_name"] = json!("blue");

    let mut zero = base.clone();
    zero["scores"] = json!({"ann": [{"hole": 1, "strokes": 0}]});
    assert!(matches!(normalize(zero), Err(CoreError::InvalidScorecard(_))));

    let mut twice = base.clone();
    twice["scores"] = json!({"ann": [{"hole": 2, "strokes": 4}, {"hole": 2, "strokes": 5}]});
    assert!(matches!(normalize(twice), Err(CoreError::InvalidScorecard(_))));

    let mut off_course = base.clone();
    off_course["scores"] = json!({"ann": [{"hole": 19, "strokes": 4}]});
    assert!(matches!(normalize(off_course), Err(CoreError::InvalidScorecard(_))));

    let mut unset = base;
    unset["scores"] = json!({"ann": [{"hole": 1, "strokes": null}]});
    assert!(normalize(unset).is_ok());
}

#[test]
fn test07_rejects_bad_tees() {
    let mut tee = serde_json::to_value(standard_tee()).unwrap();
    tee["holes"][1]["stroke_index"] = json!(7);
    let mut snapshot = minimal(json!([]));
    snapshot["tee"] = tee;
    assert!(matches!(normalize(snapshot), Err(CoreError::InvalidCourse(_))));
}

#[test]
fn test07_rejects_hole_numbers_off_the_card() {
    for number in [0, 25] {
        let mut tee = serde_json::to_value(standard_tee()).unwrap();
        tee["holes"][17]["number"] = json!(number);
        let mut snapshot = minimal(json!([]));
        snapshot["tee"] = tee;
        assert!(matches!(normalize(snapshot), Err(CoreError::InvalidCourse(_))));
    }
}

#[test]
fn test07_unknown_tee_still_bounds_hole_numbers() {
    let mut snapshot = minimal(json!([]));
    snapshot["scores"] = json!({"ann": [{"hole": 19, "strokes": 4}]});
    assert!(matches!(normalize(snapshot), Err(CoreError::InvalidScorecard(_))));
}

#[test]
fn test07_catalog_miss_leaves_the_tee_unset() {
    let mut snapshot = minimal(json!([]));
    snapshot["course"] = json!("Pine Hills");
    snapshot["tee_name"] = json!("gold");
    let normalized = normalize(snapshot).unwrap();
    assert!(normalized.tee.is_none());
}

#[test]
fn test07_unknown_preference_is_an_error() {
    let snapshot = json!({
        "event_id": "e1",
        "roster": [{"id": "ann", "games": ["bingo_bango_bongo"]}],
    });
    assert!(matches!(normalize(snapshot), Err(CoreError::InvalidConfig(_))));
}

#[test]
fn test07_malformed_json_is_a_parse_error() {
    assert!(matches!(
        parse_snapshot_json("{\"event_id\": 3"),
        Err(CoreError::Parse(_))
    ));
}
