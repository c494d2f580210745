pub mod nassau;
pub mod side_bet;
pub mod skins;

use std::collections::BTreeMap;

use crate::handicap::StrokeAllocation;
use crate::model::{
    EventSnapshot, GameCategory, GameConfig, GameOutcome, GolferId, RosterEntry, Scorecard,
    SideBetWinner, Tee, eligible_golfers,
};

/// Everything a calculator reads. Borrowed, never mutated.
#[derive(Debug, Clone, Copy)]
pub struct RoundContext<'a> {
    pub tee: &'a Tee,
    pub roster: &'a [RosterEntry],
    pub scorecard: &'a Scorecard,
    pub allocations: &'a BTreeMap<GolferId, StrokeAllocation>,
}

impl RoundContext<'_> {
    /// Opted-in golfers (within the participant list, if any) who have a card.
    #[must_use]
    pub fn entrants(&self, participants: &[GolferId], category: GameCategory) -> Vec<GolferId> {
        eligible_golfers(self.roster, participants, category)
            .into_iter()
            .filter(|g| self.scorecard.has_card(g))
            .collect()
    }

    /// Entered strokes, less handicap strokes on the hole when `net`.
    #[must_use]
    pub fn hole_score(&self, golfer: &GolferId, hole: u8, net: bool) -> Option<i32> {
        let gross = i32::from(self.scorecard.strokes(golfer, hole)?);
        if !net {
            return Some(gross);
        }
        let strokes = self
            .allocations
            .get(golfer)
            .map_or(0, |a| a.on_hole(hole));
        Some(gross - strokes)
    }

    #[must_use]
    pub fn total_over(&self, golfer: &GolferId, holes: &[u8], net: bool) -> Option<i32> {
        holes.iter().map(|h| self.hole_score(golfer, *h, net)).sum()
    }

    #[must_use]
    pub fn hole_numbers(&self) -> Vec<u8> {
        self.tee.hole_numbers()
    }
}

/// Runs the calculator matching the config's variant.
#[must_use]
pub fn calculate(
    config: &GameConfig,
    ctx: &RoundContext<'_>,
    side_bet_winners: &[SideBetWinner],
) -> GameOutcome {
    let outcome = match config {
        GameConfig::Nassau(c) => nassau::calculate(c, ctx),
        GameConfig::Skins(c) => skins::calculate(c, ctx),
        GameConfig::SideBet(c) => side_bet::calculate(c, ctx, side_bet_winners),
    };
    match &outcome {
        GameOutcome::Scored { result } => log::debug!(
            "{}",
            serde_json::json!({"game": result.game_id().as_str(), "paid_out": result.paid_out().cents()})
        ),
        GameOutcome::NotEnoughPlayers { game_id, eligible } => {
            log::debug!("game {game_id}: not enough players ({eligible})");
        }
        GameOutcome::InProgress {
            game_id,
            missing_scores,
        } => log::debug!("game {game_id}: {missing_scores} scores outstanding"),
    }
    outcome
}

/// Calculates every configured game in a snapshot, in config order.
#[must_use]
pub fn calculate_all(
    snapshot: &EventSnapshot,
    tee: &Tee,
    allocations: &BTreeMap<GolferId, StrokeAllocation>,
) -> Vec<GameOutcome> {
    let ctx = RoundContext {
        tee,
        roster: &snapshot.roster,
        scorecard: &snapshot.scorecard,
        allocations,
    };
    snapshot
        .games
        .iter()
        .map(|config| calculate(config, &ctx, snapshot.winners_for(config.id())))
        .collect()
}
