use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::config::{GameId, ScoringMode, SideBetKind};
use super::money::Money;
use super::roster::GolferId;

pub type Ledger = BTreeMap<GolferId, Money>;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    Front,
    Back,
    Total,
}

impl Segment {
    pub const ALL: [Segment; 3] = [Segment::Front, Segment::Back, Segment::Total];

    /// Hole numbers in play for the segment.
    #[must_use]
    pub fn holes(self, all: &[u8]) -> Vec<u8> {
        all.iter()
            .copied()
            .filter(|h| match self {
                Segment::Front => *h <= 9,
                Segment::Back => *h >= 10,
                Segment::Total => true,
            })
            .collect()
    }
}

/// A Nassau side: a team, or a single golfer in free-for-all play.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Side {
    pub name: String,
    pub members: Vec<GolferId>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SideScore {
    pub side: String,
    /// Stroke total in stroke play, holes won in match play.
    pub score: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SegmentResult {
    pub segment: Segment,
    pub mode: ScoringMode,
    pub scores: Vec<SideScore>,
    pub winners: Vec<String>,
    /// Segment pot including anything carried in.
    pub pot: Money,
    pub carried_in: Money,
    /// The pot moved on to the total instead of being paid here.
    pub carried_forward: bool,
    pub winnings: Ledger,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PressResult {
    pub segment: Segment,
    pub start_hole: u8,
    /// Holes won per side over the press, in side order.
    pub scores: Vec<SideScore>,
    pub winners: Vec<String>,
    pub pot: Money,
    pub winnings: Ledger,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NassauResult {
    pub game_id: GameId,
    pub net: bool,
    pub sides: Vec<Side>,
    pub segments: Vec<SegmentResult>,
    pub presses: Vec<PressResult>,
    pub pot: Money,
    pub buy_in: Ledger,
    pub winnings: Ledger,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SkinHole {
    pub hole: u8,
    /// This hole's own share of the pot.
    pub value: Money,
    pub carried_in: Money,
    /// What a unique low score on this hole would collect.
    pub pot: Money,
    pub low_score: i32,
    pub winner: Option<GolferId>,
    pub carried_into_next: bool,
    pub forfeited: Money,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SkinsResult {
    pub game_id: GameId,
    pub net: bool,
    pub entrants: Vec<GolferId>,
    pub holes: Vec<SkinHole>,
    /// Fees collected.
    pub pot: Money,
    pub paid_out: Money,
    pub buy_in: Ledger,
    pub winnings: Ledger,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SideBetHole {
    pub hole: u8,
    pub winner: GolferId,
    pub payers: Vec<GolferId>,
    pub owed: Money,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SideBetResult {
    pub game_id: GameId,
    pub kind: SideBetKind,
    pub fee: Money,
    pub entrants: Vec<GolferId>,
    pub holes: Vec<SideBetHole>,
    pub pot: Money,
    pub buy_in: Ledger,
    pub winnings: Ledger,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "game", rename_all = "snake_case")]
pub enum GameResult {
    Nassau(NassauResult),
    Skins(SkinsResult),
    SideBet(SideBetResult),
}

impl GameResult {
    #[must_use]
    pub fn game_id(&self) -> &GameId {
        match self {
            Self::Nassau(r) => &r.game_id,
            Self::Skins(r) => &r.game_id,
            Self::SideBet(r) => &r.game_id,
        }
    }

    /// Amount actually paid out to winners.
    #[must_use]
    pub fn paid_out(&self) -> Money {
        self.winnings().values().sum()
    }

    #[must_use]
    pub fn buy_in(&self) -> &Ledger {
        match self {
            Self::Nassau(r) => &r.buy_in,
            Self::Skins(r) => &r.buy_in,
            Self::SideBet(r) => &r.buy_in,
        }
    }

    #[must_use]
    pub fn winnings(&self) -> &Ledger {
        match self {
            Self::Nassau(r) => &r.winnings,
            Self::Skins(r) => &r.winnings,
            Self::SideBet(r) => &r.winnings,
        }
    }
}

/// What a calculator produced. Only `Scored` carries money; the other two
/// tell the caller to show "not enough players" or "in progress".
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GameOutcome {
    Scored { result: GameResult },
    NotEnoughPlayers { game_id: GameId, eligible: usize },
    InProgress { game_id: GameId, missing_scores: usize },
}

impl GameOutcome {
    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        match self {
            Self::Scored { result } => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub fn game_id(&self) -> &GameId {
        match self {
            Self::Scored { result } => result.game_id(),
            Self::NotEnoughPlayers { game_id, .. } | Self::InProgress { game_id, .. } => game_id,
        }
    }
}

/// Adds `amount` to `golfer` in `ledger`, skipping zero entries.
pub fn credit(ledger: &mut Ledger, golfer: &GolferId, amount: Money) {
    if amount.is_zero() {
        return;
    }
    *ledger.entry(golfer.clone()).or_default() += amount;
}
