use super::RoundContext;
use crate::model::{
    GameCategory, GameOutcome, GameResult, GolferId, Ledger, Money, SkinHole, SkinValuation,
    SkinsConfig, SkinsResult, credit,
};

/// Settles a skins game. Each hole goes to a unique low score; ties carry
/// or forfeit per the config. Payouts never exceed fees collected.
#[must_use]
pub fn calculate(config: &SkinsConfig, ctx: &RoundContext<'_>) -> GameOutcome {
    let entrants = ctx.entrants(&config.participants, GameCategory::Skins);
    if entrants.len() < 2 {
        return GameOutcome::NotEnoughPlayers {
            game_id: config.id.clone(),
            eligible: entrants.len(),
        };
    }
    let missing = ctx.scorecard.missing_for_all(&entrants, ctx.tee);
    if missing > 0 {
        return GameOutcome::InProgress {
            game_id: config.id.clone(),
            missing_scores: missing,
        };
    }

    let holes = ctx.hole_numbers();
    let pot = config.fee * entrants.len() as i64;
    let mut buy_in = Ledger::new();
    for golfer in &entrants {
        credit(&mut buy_in, golfer, config.fee);
    }

    let lows: Vec<(i32, Option<GolferId>)> = holes
        .iter()
        .map(|hole| low_score(ctx, &entrants, *hole, config.net))
        .collect();

    let skin_holes = match config.valuation {
        SkinValuation::PerHole => per_hole(&holes, &lows, pot, config.carryover),
        SkinValuation::PotShare => pot_share(&holes, &lows, pot),
    };

    let mut winnings = Ledger::new();
    for hole in &skin_holes {
        if let Some(winner) = &hole.winner {
            credit(&mut winnings, winner, hole.pot);
        }
    }
    let paid_out: Money = winnings.values().sum();

    GameOutcome::Scored {
        result: GameResult::Skins(SkinsResult {
            game_id: config.id.clone(),
            net: config.net,
            entrants,
            holes: skin_holes,
            pot,
            paid_out,
            buy_in,
            winnings,
        }),
    }
}

/// Low score on a hole, with the golfer who shot it if nobody matched it.
fn low_score(
    ctx: &RoundContext<'_>,
    entrants: &[GolferId],
    hole: u8,
    net: bool,
) -> (i32, Option<GolferId>) {
    let scores: Vec<(i32, &GolferId)> = entrants
        .iter()
        .map(|g| (ctx.hole_score(g, hole, net).unwrap_or_default(), g))
        .collect();
    let low = scores.iter().map(|(s, _)| *s).min().unwrap_or_default();
    let mut at_low = scores.iter().filter(|(s, _)| *s == low);
    match (at_low.next(), at_low.next()) {
        (Some((_, golfer)), None) => (low, Some((*golfer).clone())),
        _ => (low, None),
    }
}

fn per_hole(
    holes: &[u8],
    lows: &[(i32, Option<GolferId>)],
    pot: Money,
    carryover: bool,
) -> Vec<SkinHole> {
    let values = pot.split_even(holes.len());
    let mut carried_in = Money::ZERO;
    let mut out = Vec::with_capacity(holes.len());
    for (position, ((hole, (low, winner)), value)) in
        holes.iter().zip(lows).zip(values).enumerate()
    {
        let hole_pot = value + carried_in;
        let last = position + 1 == holes.len();
        let (carried_into_next, forfeited) = match winner {
            Some(_) => (false, Money::ZERO),
            None if carryover && !last => (true, Money::ZERO),
            None => (false, hole_pot),
        };
        out.push(SkinHole {
            hole: *hole,
            value,
            carried_in,
            pot: hole_pot,
            low_score: *low,
            winner: winner.clone(),
            carried_into_next,
            forfeited,
        });
        carried_in = if carried_into_next {
            hole_pot
        } else {
            Money::ZERO
        };
    }
    out
}

/// The pot is divided over skins won; tied holes are worth nothing.
fn pot_share(holes: &[u8], lows: &[(i32, Option<GolferId>)], pot: Money) -> Vec<SkinHole> {
    let skins = lows.iter().filter(|(_, w)| w.is_some()).count();
    let mut shares = pot.split_even(skins).into_iter();
    holes
        .iter()
        .zip(lows)
        .map(|(hole, (low, winner))| {
            let value = if winner.is_some() {
                shares.next().unwrap_or_default()
            } else {
                Money::ZERO
            };
            SkinHole {
                hole: *hole,
                value,
                carried_in: Money::ZERO,
                pot: value,
                low_score: *low,
                winner: winner.clone(),
                carried_into_next: false,
                forfeited: Money::ZERO,
            }
        })
        .collect()
}
