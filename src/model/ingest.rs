//! Raw, loosely shaped inputs as the host application has stored them over
//! time, and the one-time normalization into typed snapshots.

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

use super::config::{
    GameConfig, GameId, HoleFilter, NassauConfig, NassauFees, PressRule, ScoringMode,
    SegmentModes, SideBetConfig, SideBetKind, SkinValuation, SkinsConfig, Team, TeamSetup,
    TeamStake,
};
use super::course::{CourseCatalog, HOLES_PER_ROUND, Tee};
use super::money::Money;
use super::roster::{GameCategory, GamePreference, GolferId, RosterEntry};
use super::scorecard::{HoleScore, Scorecard};
use super::snapshot::{EventSnapshot, SideBetWinner};
use crate::error::CoreError;

const DEFAULT_PRESS_DOWN_BY: u8 = 2;

#[derive(Deserialize, Debug, Clone)]
pub struct RawEventSnapshot {
    pub event_id: String,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub tee_name: Option<String>,
    #[serde(default)]
    pub tee: Option<Tee>,
    pub roster: Vec<RawRosterEntry>,
    #[serde(default)]
    pub scores: BTreeMap<GolferId, Vec<HoleScore>>,
    #[serde(default)]
    pub games: Vec<RawGameConfig>,
    #[serde(default)]
    pub side_bet_winners: BTreeMap<GameId, Vec<SideBetWinner>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RawRosterEntry {
    #[serde(alias = "id")]
    pub golfer: GolferId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "handicap")]
    pub handicap_index: Option<f64>,
    #[serde(default, alias = "games")]
    pub preference: Option<RawPreference>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum RawPreference {
    One(String),
    Many(Vec<String>),
}

#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawGameConfig {
    Nassau(RawNassau),
    Skins(RawSkins),
    #[serde(alias = "closest_to_pin")]
    Proximity(RawSideBet),
    #[serde(alias = "hazard")]
    PenaltyAvoidance(RawSideBet),
}

#[derive(Deserialize, Debug, Clone)]
pub struct RawNassau {
    pub id: GameId,
    #[serde(default)]
    pub fee: Option<RawNassauFee>,
    #[serde(default)]
    pub net: Option<bool>,
    #[serde(default)]
    pub teams: Option<RawTeams>,
    #[serde(default)]
    pub best_n: Option<usize>,
    #[serde(default)]
    pub team_stake: Option<TeamStake>,
    #[serde(default)]
    pub scoring: Option<RawScoring>,
    #[serde(default)]
    pub carry_ties: Option<bool>,
    #[serde(default)]
    pub press: Option<RawPress>,
    #[serde(default)]
    pub participants: Option<RawParticipants>,
}

/// Dollars. Either one number for every segment or a split.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum RawNassauFee {
    PerSegment(f64),
    Split {
        #[serde(default)]
        front: Option<f64>,
        #[serde(default)]
        back: Option<f64>,
        #[serde(default)]
        total: Option<f64>,
    },
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum RawTeams {
    Named(BTreeMap<String, Vec<GolferId>>),
    List(Vec<RawTeam>),
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum RawTeam {
    Members(Vec<GolferId>),
    Named {
        #[serde(default)]
        name: Option<String>,
        members: Vec<GolferId>,
    },
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum RawScoring {
    Uniform(ScoringMode),
    PerSegment {
        #[serde(default)]
        front: Option<ScoringMode>,
        #[serde(default)]
        back: Option<ScoringMode>,
        #[serde(default)]
        total: Option<ScoringMode>,
    },
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum RawPress {
    Enabled(bool),
    DownBy(u8),
    Rule { down_by: u8 },
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum RawParticipants {
    List(Vec<GolferId>),
    Csv(String),
}

#[derive(Deserialize, Debug, Clone)]
pub struct RawSkins {
    pub id: GameId,
    #[serde(alias = "buy_in")]
    pub fee: f64,
    #[serde(default)]
    pub net: Option<bool>,
    #[serde(default)]
    pub carryover: Option<bool>,
    #[serde(default)]
    pub valuation: Option<SkinValuation>,
    #[serde(default)]
    pub participants: Option<RawParticipants>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RawSideBet {
    pub id: GameId,
    pub fee: f64,
    #[serde(default)]
    pub holes: Option<RawHoles>,
    #[serde(default)]
    pub participants: Option<RawParticipants>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum RawHoles {
    Filter(HoleFilter),
    List(Vec<u8>),
}

/// Parses a raw snapshot from JSON text.
///
/// # Errors
/// Returns `CoreError::Parse` if the JSON does not match any accepted shape.
pub fn parse_snapshot_json(json: &str) -> Result<RawEventSnapshot, CoreError> {
    Ok(serde_json::from_str(json)?)
}

/// Normalizes a raw snapshot once, so the engines never re-check shapes.
/// When the snapshot carries no tee, it is looked up in `catalog`; a miss
/// leaves `tee` unset and the engines use the nominal layout.
///
/// # Errors
/// Returns an error if the tee, scorecard, or any game config is invalid.
pub fn normalize_snapshot(
    raw: RawEventSnapshot,
    catalog: Option<&dyn CourseCatalog>,
) -> Result<EventSnapshot, CoreError> {
    let tee = match raw.tee {
        Some(tee) => Some(tee),
        None => match (catalog, raw.course.as_deref(), raw.tee_name.as_deref()) {
            (Some(catalog), Some(course), Some(tee_name)) => {
                let found = catalog.tee(course, tee_name).cloned();
                if found.is_none() {
                    log::warn!("tee '{tee_name}' at '{course}' not in catalog");
                }
                found
            }
            _ => None,
        },
    };
    if let Some(tee) = &tee {
        validate_tee(tee)?;
    }

    let roster = raw
        .roster
        .into_iter()
        .map(normalize_roster_entry)
        .collect::<Result<Vec<_>, _>>()?;

    let scorecard = normalize_scorecard(raw.scores, tee.as_ref())?;

    let mut seen = BTreeSet::new();
    let mut games = Vec::with_capacity(raw.games.len());
    for raw_game in raw.games {
        let game = normalize_game(raw_game)?;
        if !seen.insert(game.id().clone()) {
            return Err(CoreError::InvalidConfig(format!(
                "duplicate game id '{}'",
                game.id()
            )));
        }
        games.push(game);
    }

    Ok(EventSnapshot {
        event_id: raw.event_id,
        tee,
        roster,
        scorecard,
        games,
        side_bet_winners: raw.side_bet_winners,
    })
}

/// Checks hole numbering and that stroke indexes are a permutation of 1..=n.
///
/// # Errors
/// Returns `CoreError::InvalidCourse` describing the first problem found.
pub fn validate_tee(tee: &Tee) -> Result<(), CoreError> {
    if tee.holes.is_empty() {
        return Err(CoreError::InvalidCourse(format!("tee '{}' has no holes", tee.name)));
    }
    let count = tee.holes.len();
    let mut numbers = BTreeSet::new();
    let mut indexes = BTreeSet::new();
    for hole in &tee.holes {
        if !(1..=HOLES_PER_ROUND).contains(&hole.number) {
            return Err(CoreError::InvalidCourse(format!(
                "tee '{}' has hole number {} outside 1..={HOLES_PER_ROUND}",
                tee.name, hole.number
            )));
        }
        if !numbers.insert(hole.number) {
            return Err(CoreError::InvalidCourse(format!(
                "tee '{}' lists hole {} twice",
                tee.name, hole.number
            )));
        }
        if hole.stroke_index == 0 || usize::from(hole.stroke_index) > count {
            return Err(CoreError::InvalidCourse(format!(
                "hole {} has stroke index {} outside 1..={count}",
                hole.number, hole.stroke_index
            )));
        }
        if !indexes.insert(hole.stroke_index) {
            return Err(CoreError::InvalidCourse(format!(
                "stroke index {} used twice on tee '{}'",
                hole.stroke_index, tee.name
            )));
        }
        if hole.par == 0 {
            return Err(CoreError::InvalidCourse(format!("hole {} has par 0", hole.number)));
        }
    }
    Ok(())
}

fn normalize_roster_entry(raw: RawRosterEntry) -> Result<RosterEntry, CoreError> {
    let preference = match raw.preference {
        None => GamePreference::All,
        Some(RawPreference::One(value)) => match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => GamePreference::All,
            "none" => GamePreference::None,
            other => GamePreference::Only(BTreeSet::from([parse_category(other)?])),
        },
        Some(RawPreference::Many(values)) => {
            let categories = values
                .iter()
                .map(|v| parse_category(v))
                .collect::<Result<BTreeSet<_>, _>>()?;
            if categories.is_empty() {
                GamePreference::None
            } else {
                GamePreference::Only(categories)
            }
        }
    };
    Ok(RosterEntry {
        name: raw.name.unwrap_or_else(|| raw.golfer.to_string()),
        golfer: raw.golfer,
        handicap_index: raw.handicap_index,
        preference,
    })
}

fn parse_category(name: &str) -> Result<GameCategory, CoreError> {
    GameCategory::parse(name)
        .ok_or_else(|| CoreError::InvalidConfig(format!("unknown game preference '{name}'")))
}

fn normalize_scorecard(
    scores: BTreeMap<GolferId, Vec<HoleScore>>,
    tee: Option<&Tee>,
) -> Result<Scorecard, CoreError> {
    let mut cards = BTreeMap::new();
    for (golfer, mut holes) in scores {
        holes.sort_by_key(|s| s.hole);
        for pair in holes.windows(2) {
            if pair[0].hole == pair[1].hole {
                return Err(CoreError::InvalidScorecard(format!(
                    "{golfer} has hole {} entered twice",
                    pair[0].hole
                )));
            }
        }
        for score in &holes {
            check_hole_score(&golfer, score.hole, score.strokes, tee)?;
        }
        cards.insert(golfer, holes);
    }
    Ok(Scorecard { cards })
}

/// Checks one hole entry, at ingestion or as it is keyed in live. Zero
/// strokes are rejected (unset is `None`), and the hole must be on the tee,
/// or within 1..=18 when the tee is unknown.
///
/// # Errors
/// Returns `CoreError::InvalidScorecard` describing the problem.
pub fn check_hole_score(
    golfer: &GolferId,
    hole: u8,
    strokes: Option<u8>,
    tee: Option<&Tee>,
) -> Result<(), CoreError> {
    if strokes == Some(0) {
        return Err(CoreError::InvalidScorecard(format!(
            "{golfer} has zero strokes on hole {hole}; leave it unset instead"
        )));
    }
    let on_course = match tee {
        Some(tee) => tee.hole(hole).is_some(),
        None => (1..=HOLES_PER_ROUND).contains(&hole),
    };
    if !on_course {
        let tee_name = tee.map_or("nominal", |t| t.name.as_str());
        return Err(CoreError::InvalidScorecard(format!(
            "{golfer} has a score for hole {hole} which is not on tee '{tee_name}'"
        )));
    }
    Ok(())
}

fn normalize_participants(raw: Option<RawParticipants>) -> Vec<GolferId> {
    let mut participants: Vec<GolferId> = match raw {
        None => Vec::new(),
        Some(RawParticipants::List(list)) => list,
        Some(RawParticipants::Csv(csv)) => csv
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(GolferId::new)
            .collect(),
    };
    participants.sort();
    participants.dedup();
    participants
}

fn non_negative(amount: f64, what: &str, id: &GameId) -> Result<Money, CoreError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(CoreError::InvalidConfig(format!("{id}: {what} must be a non-negative amount")));
    }
    Ok(Money::from_dollars(amount))
}

/// Normalizes one raw game config.
///
/// # Errors
/// Returns `CoreError::InvalidConfig` for negative fees, bad team rosters,
/// or a press rule without any match-play segment.
pub fn normalize_game(raw: RawGameConfig) -> Result<GameConfig, CoreError> {
    match raw {
        RawGameConfig::Nassau(raw) => normalize_nassau(raw).map(GameConfig::Nassau),
        RawGameConfig::Skins(raw) => Ok(GameConfig::Skins(SkinsConfig {
            fee: non_negative(raw.fee, "fee", &raw.id)?,
            net: raw.net.unwrap_or(false),
            carryover: raw.carryover.unwrap_or(false),
            valuation: raw.valuation.unwrap_or_default(),
            participants: normalize_participants(raw.participants),
            id: raw.id,
        })),
        RawGameConfig::Proximity(raw) => {
            normalize_side_bet(raw, SideBetKind::Proximity).map(GameConfig::SideBet)
        }
        RawGameConfig::PenaltyAvoidance(raw) => {
            normalize_side_bet(raw, SideBetKind::PenaltyAvoidance).map(GameConfig::SideBet)
        }
    }
}

fn normalize_side_bet(raw: RawSideBet, kind: SideBetKind) -> Result<SideBetConfig, CoreError> {
    let holes = match raw.holes {
        None => HoleFilter::default_for(kind),
        Some(RawHoles::Filter(filter)) => filter,
        Some(RawHoles::List(list)) => HoleFilter::Holes(list),
    };
    Ok(SideBetConfig {
        fee: non_negative(raw.fee, "fee", &raw.id)?,
        kind,
        holes,
        participants: normalize_participants(raw.participants),
        id: raw.id,
    })
}

fn normalize_nassau(raw: RawNassau) -> Result<NassauConfig, CoreError> {
    let id = raw.id;
    let fees = match raw.fee {
        None => NassauFees::default(),
        Some(RawNassauFee::PerSegment(fee)) => {
            NassauFees::per_segment(non_negative(fee, "fee", &id)?)
        }
        Some(RawNassauFee::Split { front, back, total }) => NassauFees {
            front: non_negative(front.unwrap_or(0.0), "front fee", &id)?,
            back: non_negative(back.unwrap_or(0.0), "back fee", &id)?,
            total: non_negative(total.unwrap_or(0.0), "total fee", &id)?,
        },
    };

    let scoring = match raw.scoring {
        None => SegmentModes::default(),
        Some(RawScoring::Uniform(mode)) => SegmentModes::uniform(mode),
        Some(RawScoring::PerSegment { front, back, total }) => SegmentModes {
            front: front.unwrap_or_default(),
            back: back.unwrap_or_default(),
            total: total.unwrap_or_default(),
        },
    };

    let press = match raw.press {
        None | Some(RawPress::Enabled(false)) => None,
        Some(RawPress::Enabled(true)) => Some(PressRule {
            down_by: DEFAULT_PRESS_DOWN_BY,
        }),
        Some(RawPress::DownBy(down_by) | RawPress::Rule { down_by }) => {
            if down_by == 0 {
                return Err(CoreError::InvalidConfig(format!("{id}: press must trigger at 1 down or more")));
            }
            Some(PressRule { down_by })
        }
    };
    let any_match = [scoring.front, scoring.back, scoring.total].contains(&ScoringMode::Match);
    if press.is_some() && !any_match {
        return Err(CoreError::InvalidConfig(format!(
            "{id}: presses need at least one match-play segment"
        )));
    }

    let teams = normalize_teams(raw.teams, &id)?;
    let teams = match teams {
        None => None,
        Some(teams) => {
            let best_n = raw.best_n.unwrap_or(1);
            if best_n == 0 {
                return Err(CoreError::InvalidConfig(format!("{id}: best_n must be at least 1")));
            }
            Some(TeamSetup {
                teams,
                best_n,
                stake: raw.team_stake.unwrap_or_default(),
            })
        }
    };

    Ok(NassauConfig {
        id,
        fees,
        net: raw.net.unwrap_or(false),
        teams,
        scoring,
        carry_ties: raw.carry_ties.unwrap_or(false),
        press,
        participants: normalize_participants(raw.participants),
    })
}

fn normalize_teams(raw: Option<RawTeams>, id: &GameId) -> Result<Option<Vec<Team>>, CoreError> {
    let teams: Vec<Team> = match raw {
        None => return Ok(None),
        Some(RawTeams::Named(map)) => map
            .into_iter()
            .map(|(name, members)| Team { name, members })
            .collect(),
        Some(RawTeams::List(list)) => list
            .into_iter()
            .enumerate()
            .map(|(i, team)| match team {
                RawTeam::Members(members) => Team {
                    name: format!("Team {}", i + 1),
                    members,
                },
                RawTeam::Named { name, members } => Team {
                    name: name.unwrap_or_else(|| format!("Team {}", i + 1)),
                    members,
                },
            })
            .collect(),
    };
    if teams.is_empty() {
        return Ok(None);
    }
    if !(2..=4).contains(&teams.len()) {
        return Err(CoreError::InvalidConfig(format!(
            "{id}: team play needs 2 to 4 teams, got {}",
            teams.len()
        )));
    }
    let mut seen_names = BTreeSet::new();
    let mut seen_members = BTreeSet::new();
    for team in &teams {
        if !seen_names.insert(team.name.clone()) {
            return Err(CoreError::InvalidConfig(format!("{id}: team '{}' listed twice", team.name)));
        }
        for member in &team.members {
            if !seen_members.insert(member.clone()) {
                return Err(CoreError::InvalidConfig(format!(
                    "{id}: {member} is on more than one team"
                )));
            }
        }
    }
    Ok(Some(teams))
}
