use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct GolferId(String);

impl GolferId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GolferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GolferId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Opt-in categories a golfer can declare on the roster.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GameCategory {
    Nassau,
    Skins,
    SideBets,
}

impl GameCategory {
    /// Accepts the names the roster has historically stored.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "nassau" => Some(Self::Nassau),
            "skins" => Some(Self::Skins),
            "side_bets" | "sidebets" | "side-bets" | "ctp" | "greenies" | "proximity" => {
                Some(Self::SideBets)
            }
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GamePreference {
    #[default]
    All,
    Only(BTreeSet<GameCategory>),
    None,
}

impl GamePreference {
    #[must_use]
    pub fn admits(&self, category: GameCategory) -> bool {
        match self {
            Self::All => true,
            Self::Only(categories) => categories.contains(&category),
            Self::None => false,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RosterEntry {
    pub golfer: GolferId,
    pub name: String,
    #[serde(default)]
    pub handicap_index: Option<f64>,
    #[serde(default)]
    pub preference: GamePreference,
}

/// Golfers who opted into `category`, restricted to `participants` when that
/// list is non-empty. Sorted by id so every caller sees the same order.
#[must_use]
pub fn eligible_golfers(
    roster: &[RosterEntry],
    participants: &[GolferId],
    category: GameCategory,
) -> Vec<GolferId> {
    let mut golfers: Vec<GolferId> = roster
        .iter()
        .filter(|entry| entry.preference.admits(category))
        .filter(|entry| participants.is_empty() || participants.contains(&entry.golfer))
        .map(|entry| entry.golfer.clone())
        .collect();
    golfers.sort();
    golfers.dedup();
    golfers
}
