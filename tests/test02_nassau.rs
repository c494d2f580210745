mod common;

use common::{Fixture, flat_card, g, player_only, roster, scorecard, split_card};
use golf_settle::game::nassau;
use golf_settle::handicap::stroke_allocation;
use golf_settle::model::{
    GameCategory, GameId, GameOutcome, GameResult, Money, NassauConfig, NassauFees,
    NassauResult, PressRule, ScoringMode, Segment, SegmentModes, Team, TeamSetup, TeamStake,
};

fn dollars(d: i64) -> Money {
    Money::from_cents(d * 100)
}

fn config(fee: Money) -> NassauConfig {
    NassauConfig {
        id: GameId::new("nassau"),
        fees: NassauFees::per_segment(fee),
        net: false,
        teams: None,
        scoring: SegmentModes::default(),
        carry_ties: false,
        press: None,
        participants: vec![],
    }
}

fn scored(outcome: GameOutcome) -> NassauResult {
    match outcome {
        GameOutcome::Scored {
            result: GameResult::Nassau(result),
        } => result,
        other => panic!("expected a scored nassau, got {other:?}"),
    }
}

fn won(result: &NassauResult, golfer: &str) -> Money {
    result.winnings.get(&g(golfer)).copied().unwrap_or_default()
}

/// Front 40/40, back 42/38, total 82/78.
fn scenario_a() -> Fixture {
    Fixture::new(
        roster(&["ann", "ben"]),
        scorecard(vec![
            (
                "ann",
                split_card([5, 4, 4, 5, 4, 5, 4, 4, 5], [5, 5, 4, 5, 5, 4, 5, 4, 5]),
            ),
            (
                "ben",
                split_card([4, 5, 5, 4, 5, 4, 5, 4, 4], [4, 4, 4, 5, 4, 4, 4, 5, 4]),
            ),
        ]),
    )
}

#[test]
fn test02_gross_two_golfers_scenario() {
    let fixture = scenario_a();
    let result = scored(nassau::calculate(&config(dollars(5)), &fixture.ctx()));

    let front = &result.segments[0];
    assert_eq!(front.segment, Segment::Front);
    assert_eq!(front.winners.len(), 2);
    assert_eq!(front.pot, dollars(10));
    assert_eq!(front.winnings.get(&g("ann")), Some(&dollars(5)));
    assert_eq!(front.winnings.get(&g("ben")), Some(&dollars(5)));

    let back = &result.segments[1];
    assert_eq!(back.winners, vec!["ben".to_string()]);
    assert_eq!(back.scores[0].score, 42);
    assert_eq!(back.scores[1].score, 38);

    let total = &result.segments[2];
    assert_eq!(total.winners, vec!["ben".to_string()]);
    assert_eq!(total.scores[1].score, 78);

    assert_eq!(result.pot, dollars(30));
    assert_eq!(won(&result, "ann"), dollars(5));
    assert_eq!(won(&result, "ben"), dollars(25));
    assert_eq!(result.buy_in.get(&g("ann")), Some(&dollars(15)));
    assert_eq!(result.buy_in.get(&g("ben")), Some(&dollars(15)));
}

#[test]
fn test02_segment_winnings_sum_to_segment_pot() {
    let fixture = Fixture::new(
        roster(&["a", "b", "c"]),
        scorecard(vec![("a", flat_card(4)), ("b", flat_card(4)), ("c", flat_card(5))]),
    );
    let result = scored(nassau::calculate(
        &config(Money::from_cents(5)),
        &fixture.ctx(),
    ));
    for segment in &result.segments {
        let paid: Money = segment.winnings.values().sum();
        assert_eq!(paid, segment.pot);
        assert_eq!(segment.pot, Money::from_cents(15));
    }
    // 15 cents over two winners: a cent apart, never more.
    assert_eq!(result.segments[0].winnings.get(&g("a")), Some(&Money::from_cents(8)));
    assert_eq!(result.segments[0].winnings.get(&g("b")), Some(&Money::from_cents(7)));
    let total_paid: Money = result.winnings.values().sum();
    assert_eq!(total_paid, result.pot);
}

#[test]
fn test02_k_way_tie_splits_evenly() {
    let fixture = Fixture::new(
        roster(&["a", "b", "c"]),
        scorecard(vec![("a", flat_card(4)), ("b", flat_card(4)), ("c", flat_card(4))]),
    );
    let result = scored(nassau::calculate(&config(dollars(10)), &fixture.ctx()));
    for golfer in ["a", "b", "c"] {
        assert_eq!(won(&result, golfer), dollars(30));
    }
}

#[test]
fn test02_needs_two_eligible_entrants() {
    let mut players = roster(&["a"]);
    players.push(player_only("b", &[GameCategory::Skins]));
    let fixture = Fixture::new(
        players,
        scorecard(vec![("a", flat_card(4)), ("b", flat_card(5))]),
    );
    let outcome = nassau::calculate(&config(dollars(5)), &fixture.ctx());
    assert_eq!(
        outcome,
        GameOutcome::NotEnoughPlayers {
            game_id: GameId::new("nassau"),
            eligible: 1
        }
    );
}

#[test]
fn test02_participant_subset_restricts_entrants() {
    let fixture = Fixture::new(
        roster(&["a", "b", "c"]),
        scorecard(vec![("a", flat_card(5)), ("b", flat_card(4)), ("c", flat_card(3))]),
    );
    let mut cfg = config(dollars(1));
    cfg.participants = vec![g("a"), g("b")];
    let result = scored(nassau::calculate(&cfg, &fixture.ctx()));
    assert_eq!(won(&result, "b"), dollars(6));
    assert!(!result.buy_in.contains_key(&g("c")));
}

#[test]
fn test02_incomplete_round_is_in_progress() {
    let mut fixture = scenario_a();
    fixture.scorecard.record(&g("ben"), 17, None);
    fixture.scorecard.record(&g("ann"), 18, None);
    let outcome = nassau::calculate(&config(dollars(5)), &fixture.ctx());
    assert_eq!(
        outcome,
        GameOutcome::InProgress {
            game_id: GameId::new("nassau"),
            missing_scores: 2
        }
    );
}

fn team(name: &str, members: &[&str]) -> Team {
    Team {
        name: name.to_string(),
        members: members.iter().map(|m| g(m)).collect(),
    }
}

#[test]
fn test02_team_best_two_per_member_stake() {
    let fixture = Fixture::new(
        roster(&["r1", "r2", "r3", "b1", "b2", "b3"]),
        scorecard(vec![
            ("r1", flat_card(4)),
            ("r2", flat_card(5)),
            ("r3", flat_card(6)),
            ("b1", flat_card(4)),
            ("b2", flat_card(4)),
            ("b3", flat_card(7)),
        ]),
    );
    let mut cfg = config(dollars(1));
    cfg.teams = Some(TeamSetup {
        teams: vec![team("red", &["r1", "r2", "r3"]), team("blue", &["b1", "b2", "b3"])],
        best_n: 2,
        stake: TeamStake::PerMember,
    });
    let result = scored(nassau::calculate(&cfg, &fixture.ctx()));

    let front = &result.segments[0];
    assert_eq!(front.scores[0].score, 81);
    assert_eq!(front.scores[1].score, 72);
    assert_eq!(front.winners, vec!["blue".to_string()]);
    assert_eq!(front.pot, dollars(6));

    for member in ["b1", "b2", "b3"] {
        assert_eq!(won(&result, member), dollars(6));
        assert_eq!(result.buy_in.get(&g(member)), Some(&dollars(3)));
    }
    for member in ["r1", "r2", "r3"] {
        assert_eq!(won(&result, member), Money::ZERO);
    }
}

#[test]
fn test02_team_short_of_best_n_is_dropped() {
    let mut players = roster(&["r1", "b1", "b2", "y1", "y2"]);
    players.push(player_only("r2", &[GameCategory::Skins]));
    let fixture = Fixture::new(
        players,
        scorecard(vec![
            ("r1", flat_card(3)),
            ("r2", flat_card(3)),
            ("b1", flat_card(4)),
            ("b2", flat_card(5)),
            ("y1", flat_card(5)),
            ("y2", flat_card(5)),
        ]),
    );
    let mut cfg = config(dollars(1));
    cfg.teams = Some(TeamSetup {
        teams: vec![
            team("red", &["r1", "r2"]),
            team("blue", &["b1", "b2"]),
            team("yellow", &["y1", "y2"]),
        ],
        best_n: 2,
        stake: TeamStake::PerMember,
    });
    let result = scored(nassau::calculate(&cfg, &fixture.ctx()));
    assert_eq!(result.sides.len(), 2);
    assert!(!result.buy_in.contains_key(&g("r1")));
    assert_eq!(won(&result, "b1"), dollars(6));
}

#[test]
fn test02_flat_team_stake_spreads_buy_in() {
    let fixture = Fixture::new(
        roster(&["a1", "a2", "b1", "b2", "b3"]),
        scorecard(vec![
            ("a1", flat_card(4)),
            ("a2", flat_card(5)),
            ("b1", flat_card(5)),
            ("b2", flat_card(5)),
            ("b3", flat_card(6)),
        ]),
    );
    let mut cfg = config(dollars(3));
    cfg.teams = Some(TeamSetup {
        teams: vec![team("a", &["a1", "a2"]), team("b", &["b1", "b2", "b3"])],
        best_n: 1,
        stake: TeamStake::FlatPerTeam,
    });
    let result = scored(nassau::calculate(&cfg, &fixture.ctx()));
    assert_eq!(result.pot, dollars(18));
    assert_eq!(result.buy_in.get(&g("b1")), Some(&dollars(3)));
    assert_eq!(result.buy_in.get(&g("a1")), Some(&Money::from_cents(450)));
    assert_eq!(won(&result, "a1"), dollars(9));
    assert_eq!(won(&result, "a2"), dollars(9));
}

#[test]
fn test02_net_mode_uses_allocated_strokes() {
    let mut fixture = Fixture::new(
        roster(&["hack", "pro"]),
        scorecard(vec![("hack", flat_card(5)), ("pro", flat_card(4))]),
    );
    fixture
        .allocations
        .insert(g("hack"), stroke_allocation(36, &fixture.tee));

    let gross = scored(nassau::calculate(&config(dollars(1)), &fixture.ctx()));
    assert_eq!(won(&gross, "pro"), dollars(6));

    let mut cfg = config(dollars(1));
    cfg.net = true;
    let net = scored(nassau::calculate(&cfg, &fixture.ctx()));
    assert_eq!(won(&net, "hack"), dollars(6));
    assert_eq!(net.segments[2].scores[0].score, 54);
}

#[test]
fn test02_match_play_counts_holes_not_strokes() {
    let fixture = Fixture::new(
        roster(&["ann", "ben"]),
        scorecard(vec![
            ("ann", split_card([3, 3, 3, 3, 3, 9, 9, 4, 4], [4; 9])),
            ("ben", split_card([4; 9], [4; 9])),
        ]),
    );
    let stroke = scored(nassau::calculate(&config(dollars(1)), &fixture.ctx()));
    assert_eq!(stroke.segments[0].winners, vec!["ben".to_string()]);

    let mut cfg = config(dollars(1));
    cfg.scoring = SegmentModes {
        front: ScoringMode::Match,
        ..SegmentModes::default()
    };
    let matched = scored(nassau::calculate(&cfg, &fixture.ctx()));
    let front = &matched.segments[0];
    assert_eq!(front.mode, ScoringMode::Match);
    assert_eq!(front.scores[0].score, 5);
    assert_eq!(front.scores[1].score, 2);
    assert_eq!(front.winners, vec!["ann".to_string()]);
}

#[test]
fn test02_carried_tie_rolls_into_total() {
    let fixture = Fixture::new(
        roster(&["ann", "ben"]),
        scorecard(vec![
            ("ann", split_card([4; 9], [4; 9])),
            ("ben", split_card([4; 9], [5; 9])),
        ]),
    );
    let mut cfg = config(dollars(2));
    cfg.carry_ties = true;
    let result = scored(nassau::calculate(&cfg, &fixture.ctx()));

    let front = &result.segments[0];
    assert!(front.carried_forward);
    assert!(front.winnings.is_empty());

    let total = &result.segments[2];
    assert_eq!(total.carried_in, dollars(4));
    assert_eq!(total.pot, dollars(8));
    assert_eq!(won(&result, "ann"), dollars(12));
    assert_eq!(won(&result, "ben"), Money::ZERO);
}

#[test]
fn test02_auto_press_opens_new_bets() {
    // ann wins 1-2, ben wins 3-5, the rest halved.
    let fixture = Fixture::new(
        roster(&["ann", "ben"]),
        scorecard(vec![
            ("ann", split_card([3, 3, 5, 5, 5, 4, 4, 4, 4], [4; 9])),
            ("ben", split_card([4, 4, 4, 4, 4, 4, 4, 4, 4], [4; 9])),
        ]),
    );
    let mut cfg = config(dollars(1));
    cfg.scoring = SegmentModes::uniform(ScoringMode::Match);
    cfg.press = Some(PressRule { down_by: 2 });
    let result = scored(nassau::calculate(&cfg, &fixture.ctx()));

    let starts: Vec<(Segment, u8)> = result
        .presses
        .iter()
        .map(|p| (p.segment, p.start_hole))
        .collect();
    assert_eq!(
        starts,
        vec![
            (Segment::Front, 3),
            (Segment::Front, 5),
            (Segment::Total, 3),
            (Segment::Total, 5)
        ]
    );
    assert!(result.presses.iter().all(|p| p.winners == vec!["ben".to_string()]));

    assert_eq!(result.buy_in.get(&g("ann")), Some(&dollars(7)));
    assert_eq!(won(&result, "ben"), dollars(13));
    assert_eq!(won(&result, "ann"), dollars(1));
    let paid: Money = result.winnings.values().sum();
    assert_eq!(paid, result.pot);
}

#[test]
fn test02_halved_press_refunds() {
    // ann goes 2 up after two holes, everything after is halved.
    let fixture = Fixture::new(
        roster(&["ann", "ben"]),
        scorecard(vec![
            ("ann", split_card([3, 3, 4, 4, 4, 4, 4, 4, 4], [4; 9])),
            ("ben", split_card([4; 9], [4; 9])),
        ]),
    );
    let mut cfg = config(dollars(1));
    cfg.scoring = SegmentModes {
        front: ScoringMode::Match,
        ..SegmentModes::default()
    };
    cfg.press = Some(PressRule { down_by: 2 });
    let result = scored(nassau::calculate(&cfg, &fixture.ctx()));
    assert_eq!(result.presses.len(), 1);
    let press = &result.presses[0];
    assert_eq!(press.winners.len(), 2);
    assert_eq!(press.winnings.get(&g("ann")), Some(&dollars(1)));
    assert_eq!(press.winnings.get(&g("ben")), Some(&dollars(1)));
}

#[test]
fn test02_recomputing_is_deterministic() {
    let fixture = scenario_a();
    let cfg = config(dollars(5));
    let first = nassau::calculate(&cfg, &fixture.ctx());
    let second = nassau::calculate(&cfg, &fixture.ctx());
    assert_eq!(first, second);
    let first_json = serde_json::to_string(&first).unwrap_or_default();
    let second_json = serde_json::to_string(&second).unwrap_or_default();
    assert_eq!(first_json, second_json);
}
