//! Nassau: three bets (front nine, back nine, full eighteen) between
//! individuals or teams, each settled by stroke total or holes won.

use super::RoundContext;
use crate::model::{
    GameCategory, GameOutcome, GameResult, GolferId, Ledger, Money, NassauConfig, NassauResult,
    PressResult, PressRule, ScoringMode, Segment, SegmentResult, Side, SideScore, TeamStake,
    credit,
};

struct PlayingSide {
    side: Side,
    best_n: usize,
}

/// Settles a Nassau. Fewer than two sides is "not enough players"; any
/// unset hole among the sides' members is "in progress".
#[must_use]
pub fn calculate(config: &NassauConfig, ctx: &RoundContext<'_>) -> GameOutcome {
    let entrants = ctx.entrants(&config.participants, GameCategory::Nassau);
    let sides = build_sides(config, &entrants);
    if sides.len() < 2 {
        return GameOutcome::NotEnoughPlayers {
            game_id: config.id.clone(),
            eligible: sides.len(),
        };
    }

    let playing: Vec<GolferId> = sides
        .iter()
        .flat_map(|s| s.side.members.iter().cloned())
        .collect();
    let missing = ctx.scorecard.missing_for_all(&playing, ctx.tee);
    if missing > 0 {
        return GameOutcome::InProgress {
            game_id: config.id.clone(),
            missing_scores: missing,
        };
    }

    let stake = config.teams.as_ref().map_or(TeamStake::PerMember, |t| t.stake);
    let all_holes = ctx.hole_numbers();
    let mut buy_in = Ledger::new();
    let mut winnings = Ledger::new();
    let mut segments = Vec::with_capacity(3);
    let mut presses = Vec::new();
    let mut pot = Money::ZERO;
    let mut carry = Money::ZERO;

    for segment in Segment::ALL {
        let fee = match segment {
            Segment::Front => config.fees.front,
            Segment::Back => config.fees.back,
            Segment::Total => config.fees.total,
        };
        let mode = match segment {
            Segment::Front => config.scoring.front,
            Segment::Back => config.scoring.back,
            Segment::Total => config.scoring.total,
        };
        let holes = segment.holes(&all_holes);

        let stakes = contributions(&sides, stake, fee);
        merge(&mut buy_in, &stakes);
        let base_pot: Money = stakes.values().sum();
        pot += base_pot;

        let carried_in = if segment == Segment::Total {
            std::mem::take(&mut carry)
        } else {
            Money::ZERO
        };
        let segment_pot = base_pot + carried_in;

        let (scores, winners) = match mode {
            ScoringMode::Stroke => stroke_play(ctx, &sides, &holes, config.net),
            ScoringMode::Match => {
                let results = hole_winners(ctx, &sides, &holes, config.net);
                let won = tally(&results, sides.len(), 0);
                let best = won.iter().copied().max().unwrap_or(0);
                let winners = (0..sides.len()).filter(|i| won[*i] == best).collect();
                (won, winners)
            }
        };

        let carried_forward =
            config.carry_ties && segment != Segment::Total && winners.len() > 1;
        let segment_winnings = if carried_forward {
            carry += segment_pot;
            Ledger::new()
        } else {
            pay_sides(&sides, &winners, segment_pot)
        };
        merge(&mut winnings, &segment_winnings);

        if let (ScoringMode::Match, Some(rule)) = (mode, config.press) {
            if sides.len() == 2 {
                let results = hole_winners(ctx, &sides, &holes, config.net);
                for press in settle_presses(&sides, stake, fee, segment, &holes, &results, rule) {
                    let press_in = contributions(&sides, stake, fee);
                    merge(&mut buy_in, &press_in);
                    pot += press.pot;
                    merge(&mut winnings, &press.winnings);
                    presses.push(press);
                }
            } else {
                log::debug!("{}: presses only apply head to head; skipping", config.id);
            }
        }

        segments.push(SegmentResult {
            segment,
            mode,
            scores: side_scores(&sides, &scores),
            winners: winners.iter().map(|i| sides[*i].side.name.clone()).collect(),
            pot: segment_pot,
            carried_in,
            carried_forward,
            winnings: segment_winnings,
        });
    }

    GameOutcome::Scored {
        result: GameResult::Nassau(NassauResult {
            game_id: config.id.clone(),
            net: config.net,
            sides: sides.into_iter().map(|s| s.side).collect(),
            segments,
            presses,
            pot,
            buy_in,
            winnings,
        }),
    }
}

fn build_sides(config: &NassauConfig, entrants: &[GolferId]) -> Vec<PlayingSide> {
    let Some(setup) = &config.teams else {
        return entrants
            .iter()
            .map(|g| PlayingSide {
                side: Side {
                    name: g.to_string(),
                    members: vec![g.clone()],
                },
                best_n: 1,
            })
            .collect();
    };

    setup
        .teams
        .iter()
        .filter_map(|team| {
            let mut members: Vec<GolferId> = team
                .members
                .iter()
                .filter(|m| entrants.contains(m))
                .cloned()
                .collect();
            members.sort();
            if members.len() < setup.best_n {
                log::warn!(
                    "{}: team '{}' has {} eligible golfers, needs {}; dropped",
                    config.id,
                    team.name,
                    members.len(),
                    setup.best_n
                );
                return None;
            }
            Some(PlayingSide {
                side: Side {
                    name: team.name.clone(),
                    members,
                },
                best_n: setup.best_n,
            })
        })
        .collect()
}

/// Sum of the `n` lowest values.
fn best_n_sum(mut values: Vec<i32>, n: usize) -> i32 {
    values.sort_unstable();
    values.into_iter().take(n).sum()
}

fn stroke_play(
    ctx: &RoundContext<'_>,
    sides: &[PlayingSide],
    holes: &[u8],
    net: bool,
) -> (Vec<i32>, Vec<usize>) {
    let scores: Vec<i32> = sides
        .iter()
        .map(|s| {
            let totals = s
                .side
                .members
                .iter()
                .map(|m| ctx.total_over(m, holes, net).unwrap_or_default())
                .collect();
            best_n_sum(totals, s.best_n)
        })
        .collect();
    let low = scores.iter().copied().min().unwrap_or(0);
    let winners = (0..sides.len()).filter(|i| scores[*i] == low).collect();
    (scores, winners)
}

/// Per hole, the index of the side with the unique low score (halved holes are `None`).
fn hole_winners(
    ctx: &RoundContext<'_>,
    sides: &[PlayingSide],
    holes: &[u8],
    net: bool,
) -> Vec<Option<usize>> {
    holes
        .iter()
        .map(|hole| {
            let scores: Vec<i32> = sides
                .iter()
                .map(|s| {
                    let values = s
                        .side
                        .members
                        .iter()
                        .map(|m| ctx.hole_score(m, *hole, net).unwrap_or_default())
                        .collect();
                    best_n_sum(values, s.best_n)
                })
                .collect();
            let low = scores.iter().copied().min()?;
            let mut at_low = (0..scores.len()).filter(|i| scores[*i] == low);
            match (at_low.next(), at_low.next()) {
                (Some(only), None) => Some(only),
                _ => None,
            }
        })
        .collect()
}

/// Holes won per side from position `from` to the end.
fn tally(results: &[Option<usize>], sides: usize, from: usize) -> Vec<i32> {
    let mut won = vec![0; sides];
    for winner in results.iter().skip(from).flatten() {
        won[*winner] += 1;
    }
    won
}

/// Each bet (the segment itself, then every press) may start one press
/// on the hole after it first reaches `down_by`, provided holes remain.
fn press_starts(results: &[Option<usize>], rule: PressRule) -> Vec<usize> {
    let mut bets = vec![0usize];
    let mut starts = Vec::new();
    let mut next = 0;
    while next < bets.len() {
        let start = bets[next];
        next += 1;
        let mut margin: i32 = 0;
        for (position, winner) in results.iter().enumerate().skip(start) {
            match winner {
                Some(0) => margin += 1,
                Some(_) => margin -= 1,
                None => {}
            }
            if margin.unsigned_abs() == u32::from(rule.down_by) {
                if position + 1 < results.len() {
                    bets.push(position + 1);
                    starts.push(position + 1);
                }
                break;
            }
        }
    }
    starts
}

fn settle_presses(
    sides: &[PlayingSide],
    stake: TeamStake,
    fee: Money,
    segment: Segment,
    holes: &[u8],
    results: &[Option<usize>],
    rule: PressRule,
) -> Vec<PressResult> {
    press_starts(results, rule)
        .into_iter()
        .map(|start| {
            let won = tally(results, sides.len(), start);
            let stakes = contributions(sides, stake, fee);
            let pot: Money = stakes.values().sum();
            let (winners, winnings) = if won[0] == won[1] {
                (vec![0, 1], stakes)
            } else {
                let winner = usize::from(won[1] > won[0]);
                (vec![winner], pay_sides(sides, &[winner], pot))
            };
            PressResult {
                segment,
                start_hole: holes[start],
                scores: side_scores(sides, &won),
                winners: winners.iter().map(|i| sides[*i].side.name.clone()).collect(),
                pot,
                winnings,
            }
        })
        .collect()
}

/// What every member puts in for one bet at `fee`.
fn contributions(sides: &[PlayingSide], stake: TeamStake, fee: Money) -> Ledger {
    let mut ledger = Ledger::new();
    for s in sides {
        match stake {
            TeamStake::PerMember => {
                for member in &s.side.members {
                    credit(&mut ledger, member, fee);
                }
            }
            TeamStake::FlatPerTeam => {
                for (member, share) in s.side.members.iter().zip(fee.split_even(s.side.members.len())) {
                    credit(&mut ledger, member, share);
                }
            }
        }
    }
    ledger
}

/// Splits `pot` evenly across the winning sides, then across each side's members.
fn pay_sides(sides: &[PlayingSide], winners: &[usize], pot: Money) -> Ledger {
    let mut ledger = Ledger::new();
    for (index, share) in winners.iter().zip(pot.split_even(winners.len())) {
        let members = &sides[*index].side.members;
        for (member, part) in members.iter().zip(share.split_even(members.len())) {
            credit(&mut ledger, member, part);
        }
    }
    ledger
}

fn side_scores(sides: &[PlayingSide], scores: &[i32]) -> Vec<SideScore> {
    sides
        .iter()
        .zip(scores)
        .map(|(s, score)| SideScore {
            side: s.side.name.clone(),
            score: *score,
        })
        .collect()
}

fn merge(into: &mut Ledger, from: &Ledger) {
    for (golfer, amount) in from {
        credit(into, golfer, *amount);
    }
}
