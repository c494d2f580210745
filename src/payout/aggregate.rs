use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{GameResult, GolferId, Ledger, Money, RosterEntry};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct GolferTotals {
    pub golfer: GolferId,
    pub name: String,
    pub winnings: Money,
    pub buy_in: Money,
    pub net: Money,
}

/// One row per golfer, sorted by golfer id.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PayoutTable {
    pub golfers: Vec<GolferTotals>,
}

impl PayoutTable {
    #[must_use]
    pub fn net(&self) -> Ledger {
        self.golfers.iter().map(|g| (g.golfer.clone(), g.net)).collect()
    }

    #[must_use]
    pub fn winnings(&self) -> Ledger {
        self.golfers
            .iter()
            .map(|g| (g.golfer.clone(), g.winnings))
            .collect()
    }

    #[must_use]
    pub fn buy_in(&self) -> Ledger {
        self.golfers
            .iter()
            .map(|g| (g.golfer.clone(), g.buy_in))
            .collect()
    }

    #[must_use]
    pub fn get(&self, golfer: &GolferId) -> Option<&GolferTotals> {
        self.golfers.iter().find(|g| &g.golfer == golfer)
    }
}

/// Sums winnings and buy-ins across every scored game. Every rostered golfer
/// gets a row, even at zero. Not necessarily zero-sum: forfeited skins are
/// collected but never paid.
#[must_use]
pub fn aggregate(results: &[GameResult], roster: &[RosterEntry]) -> PayoutTable {
    let mut rows: BTreeMap<GolferId, (Money, Money)> = roster
        .iter()
        .map(|entry| (entry.golfer.clone(), (Money::ZERO, Money::ZERO)))
        .collect();

    for result in results {
        for (golfer, amount) in result.winnings() {
            rows.entry(golfer.clone()).or_default().0 += *amount;
        }
        for (golfer, amount) in result.buy_in() {
            rows.entry(golfer.clone()).or_default().1 += *amount;
        }
    }

    let golfers = rows
        .into_iter()
        .map(|(golfer, (winnings, buy_in))| {
            let name = roster
                .iter()
                .find(|entry| entry.golfer == golfer)
                .map_or_else(|| golfer.to_string(), |entry| entry.name.clone());
            GolferTotals {
                golfer,
                name,
                winnings,
                buy_in,
                net: winnings - buy_in,
            }
        })
        .collect();
    PayoutTable { golfers }
}
