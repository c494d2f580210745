use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::config::{GameConfig, GameId};
use super::course::Tee;
use super::roster::{GolferId, RosterEntry};
use super::scorecard::Scorecard;

/// Manually recorded winner of a qualifying side-bet hole.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SideBetWinner {
    pub hole: u8,
    pub winner: GolferId,
}

/// Read-only input to every engine for one event.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct EventSnapshot {
    pub event_id: String,
    /// `None` when the catalog had no tee; engines fall back to the nominal layout.
    #[serde(default)]
    pub tee: Option<Tee>,
    pub roster: Vec<RosterEntry>,
    pub scorecard: Scorecard,
    pub games: Vec<GameConfig>,
    #[serde(default)]
    pub side_bet_winners: BTreeMap<GameId, Vec<SideBetWinner>>,
}

impl EventSnapshot {
    /// The tee to score against, nominal if unknown.
    #[must_use]
    pub fn tee_or_nominal(&self) -> Tee {
        self.tee.clone().unwrap_or_else(Tee::nominal)
    }

    #[must_use]
    pub fn roster_entry(&self, golfer: &GolferId) -> Option<&RosterEntry> {
        self.roster.iter().find(|r| &r.golfer == golfer)
    }

    #[must_use]
    pub fn winners_for(&self, game: &GameId) -> &[SideBetWinner] {
        self.side_bet_winners
            .get(game)
            .map_or(&[], Vec::as_slice)
    }
}
