use std::collections::BTreeMap;

use super::RoundContext;
use crate::model::{
    GameCategory, GameOutcome, GameResult, GolferId, Ledger, Money, SideBetConfig, SideBetHole,
    SideBetResult, SideBetWinner, credit,
};

/// Converts recorded winners into owings: on every qualifying hole with a
/// winner, each other entrant owes the winner one fee. Winners come from
/// outside (who was closest, who stayed dry) and are never derived here.
#[must_use]
pub fn calculate(
    config: &SideBetConfig,
    ctx: &RoundContext<'_>,
    recorded: &[SideBetWinner],
) -> GameOutcome {
    let entrants = ctx.entrants(&config.participants, GameCategory::SideBets);
    if entrants.len() < 2 {
        return GameOutcome::NotEnoughPlayers {
            game_id: config.id.clone(),
            eligible: entrants.len(),
        };
    }

    let qualifying = config.holes.qualifying_holes(ctx.tee);
    let mut by_hole: BTreeMap<u8, &GolferId> = BTreeMap::new();
    for fact in recorded {
        if !qualifying.contains(&fact.hole) {
            log::warn!("{}: hole {} does not qualify; ignored", config.id, fact.hole);
            continue;
        }
        if !entrants.contains(&fact.winner) {
            log::warn!(
                "{}: {} is not in this game; hole {} ignored",
                config.id,
                fact.winner,
                fact.hole
            );
            continue;
        }
        by_hole.insert(fact.hole, &fact.winner);
    }

    let mut buy_in = Ledger::new();
    let mut winnings = Ledger::new();
    let mut holes = Vec::with_capacity(by_hole.len());
    for (hole, winner) in by_hole {
        let payers: Vec<GolferId> = entrants.iter().filter(|g| *g != winner).cloned().collect();
        for payer in &payers {
            credit(&mut buy_in, payer, config.fee);
        }
        let owed = config.fee * payers.len() as i64;
        credit(&mut winnings, winner, owed);
        holes.push(SideBetHole {
            hole,
            winner: winner.clone(),
            payers,
            owed,
        });
    }
    let pot: Money = holes.iter().map(|h| h.owed).sum();

    GameOutcome::Scored {
        result: GameResult::SideBet(SideBetResult {
            game_id: config.id.clone(),
            kind: config.kind,
            fee: config.fee,
            entrants,
            holes,
            pot,
            buy_in,
            winnings,
        }),
    }
}
