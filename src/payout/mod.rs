pub mod aggregate;

pub use aggregate::*;

use serde::{Deserialize, Serialize};

use crate::game::calculate_all;
use crate::handicap::allocations_for;
use crate::model::{EventSnapshot, GameOutcome, GameResult, TeeRating};

/// Everything the host renders for an event: each game's outcome and the net table.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EventPayouts {
    pub event_id: String,
    /// True when the tee or its ratings came from the nominal fallback.
    pub degraded_tee: bool,
    pub outcomes: Vec<GameOutcome>,
    pub table: PayoutTable,
}

impl EventPayouts {
    pub fn results(&self) -> impl Iterator<Item = &GameResult> {
        self.outcomes.iter().filter_map(GameOutcome::result)
    }
}

/// Runs handicaps, every game, and the aggregate for one snapshot.
/// Pure: the same snapshot always yields the same payouts.
#[must_use]
pub fn compute_event_payouts(snapshot: &EventSnapshot) -> EventPayouts {
    let tee = snapshot.tee_or_nominal();
    let rating = TeeRating::resolve(snapshot.tee.as_ref());
    let allocations = allocations_for(&snapshot.roster, &tee, &rating);
    let outcomes = calculate_all(snapshot, &tee, &allocations);
    let results: Vec<GameResult> = outcomes
        .iter()
        .filter_map(GameOutcome::result)
        .cloned()
        .collect();
    let table = aggregate(&results, &snapshot.roster);
    EventPayouts {
        event_id: snapshot.event_id.clone(),
        degraded_tee: rating.degraded,
        outcomes,
        table,
    }
}
