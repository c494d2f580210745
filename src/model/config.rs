use serde::{Deserialize, Serialize};
use std::fmt;

use super::course::{Hole, Tee};
use super::money::Money;
use super::roster::{GameCategory, GolferId};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    #[default]
    Stroke,
    Match,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SegmentModes {
    pub front: ScoringMode,
    pub back: ScoringMode,
    pub total: ScoringMode,
}

impl SegmentModes {
    #[must_use]
    pub fn uniform(mode: ScoringMode) -> Self {
        Self {
            front: mode,
            back: mode,
            total: mode,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NassauFees {
    pub front: Money,
    pub back: Money,
    pub total: Money,
}

impl NassauFees {
    #[must_use]
    pub fn per_segment(fee: Money) -> Self {
        Self {
            front: fee,
            back: fee,
            total: fee,
        }
    }

    /// What one staked entrant puts in across all three segments.
    #[must_use]
    pub fn stake(&self) -> Money {
        self.front + self.back + self.total
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TeamStake {
    #[default]
    PerMember,
    FlatPerTeam,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Team {
    pub name: String,
    pub members: Vec<GolferId>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TeamSetup {
    pub teams: Vec<Team>,
    /// A team's score is the sum of its `best_n` lowest member scores.
    pub best_n: usize,
    #[serde(default)]
    pub stake: TeamStake,
}

/// Automatic press: once a bet is `down_by` holes, a new bet starts on the next hole.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PressRule {
    pub down_by: u8,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NassauConfig {
    pub id: GameId,
    pub fees: NassauFees,
    #[serde(default)]
    pub net: bool,
    #[serde(default)]
    pub teams: Option<TeamSetup>,
    #[serde(default)]
    pub scoring: SegmentModes,
    /// A tied front or back pot rolls into the total instead of splitting.
    #[serde(default)]
    pub carry_ties: bool,
    #[serde(default)]
    pub press: Option<PressRule>,
    #[serde(default)]
    pub participants: Vec<GolferId>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkinValuation {
    /// Each hole carries 1/18th of the pot, plus whatever carried in.
    #[default]
    PerHole,
    /// The whole pot is divided evenly over however many skins were won.
    PotShare,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SkinsConfig {
    pub id: GameId,
    /// Per-entrant fee for the full round.
    pub fee: Money,
    #[serde(default)]
    pub net: bool,
    #[serde(default)]
    pub carryover: bool,
    #[serde(default)]
    pub valuation: SkinValuation,
    #[serde(default)]
    pub participants: Vec<GolferId>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SideBetKind {
    /// Closest to the pin.
    Proximity,
    /// Avoiding a named hazard.
    PenaltyAvoidance,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HoleFilter {
    #[serde(rename = "par3")]
    Par3,
    #[serde(rename = "par4_and_5")]
    Par4And5,
    Holes(Vec<u8>),
}

impl HoleFilter {
    #[must_use]
    pub fn default_for(kind: SideBetKind) -> Self {
        match kind {
            SideBetKind::Proximity => Self::Par3,
            SideBetKind::PenaltyAvoidance => Self::Par4And5,
        }
    }

    #[must_use]
    pub fn qualifies(&self, hole: &Hole) -> bool {
        match self {
            Self::Par3 => hole.par == 3,
            Self::Par4And5 => hole.par >= 4,
            Self::Holes(holes) => holes.contains(&hole.number),
        }
    }

    #[must_use]
    pub fn qualifying_holes(&self, tee: &Tee) -> Vec<u8> {
        tee.holes
            .iter()
            .filter(|h| self.qualifies(h))
            .map(|h| h.number)
            .collect()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SideBetConfig {
    pub id: GameId,
    pub kind: SideBetKind,
    /// Owed by each other participant per occurrence.
    pub fee: Money,
    pub holes: HoleFilter,
    #[serde(default)]
    pub participants: Vec<GolferId>,
}

/// One configured game instance, already normalized.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "game", rename_all = "snake_case")]
pub enum GameConfig {
    Nassau(NassauConfig),
    Skins(SkinsConfig),
    SideBet(SideBetConfig),
}

impl GameConfig {
    #[must_use]
    pub fn id(&self) -> &GameId {
        match self {
            Self::Nassau(c) => &c.id,
            Self::Skins(c) => &c.id,
            Self::SideBet(c) => &c.id,
        }
    }

    #[must_use]
    pub fn category(&self) -> GameCategory {
        match self {
            Self::Nassau(_) => GameCategory::Nassau,
            Self::Skins(_) => GameCategory::Skins,
            Self::SideBet(_) => GameCategory::SideBets,
        }
    }

    #[must_use]
    pub fn participants(&self) -> &[GolferId] {
        match self {
            Self::Nassau(c) => &c.participants,
            Self::Skins(c) => &c.participants,
            Self::SideBet(c) => &c.participants,
        }
    }
}
