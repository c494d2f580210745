#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use golf_settle::game::RoundContext;
use golf_settle::handicap::StrokeAllocation;
use golf_settle::model::ingest::{normalize_snapshot, parse_snapshot_json};
use golf_settle::model::{
    CourseCatalog, EventSnapshot, GameCategory, GamePreference, GolferId, Hole, HoleScore,
    InMemoryCatalog, RosterEntry, Scorecard, Tee,
};

pub const EVENT_FIXTURE: &str = "tests/test07/event_snapshot.json";

pub const FRONT_PARS: [u8; 9] = [4, 4, 3, 5, 4, 4, 3, 4, 5];
pub const BACK_PARS: [u8; 9] = [4, 3, 4, 5, 4, 4, 3, 5, 4];
pub const FRONT_INDEXES: [u8; 9] = [7, 3, 15, 1, 11, 5, 17, 9, 13];
pub const BACK_INDEXES: [u8; 9] = [8, 16, 2, 10, 6, 12, 18, 4, 14];

pub fn g(id: &str) -> GolferId {
    GolferId::new(id)
}

/// Par 72, rated 71.5 / 130.
pub fn standard_tee() -> Tee {
    let pars = FRONT_PARS.iter().chain(BACK_PARS.iter());
    let indexes = FRONT_INDEXES.iter().chain(BACK_INDEXES.iter());
    let holes = pars
        .zip(indexes)
        .enumerate()
        .map(|(i, (par, stroke_index))| Hole {
            number: i as u8 + 1,
            par: *par,
            stroke_index: *stroke_index,
        })
        .collect();
    Tee {
        name: "blue".to_string(),
        holes,
        course_rating: Some(71.5),
        slope_rating: Some(130.0),
    }
}

pub fn player(id: &str) -> RosterEntry {
    RosterEntry {
        golfer: g(id),
        name: id.to_uppercase(),
        handicap_index: None,
        preference: GamePreference::All,
    }
}

pub fn player_only(id: &str, categories: &[GameCategory]) -> RosterEntry {
    RosterEntry {
        preference: GamePreference::Only(categories.iter().copied().collect::<BTreeSet<_>>()),
        ..player(id)
    }
}

pub fn roster(ids: &[&str]) -> Vec<RosterEntry> {
    ids.iter().map(|id| player(id)).collect()
}

/// A full card from 18 stroke counts.
pub fn card(strokes: &[u8]) -> Vec<HoleScore> {
    strokes
        .iter()
        .enumerate()
        .map(|(i, s)| HoleScore {
            hole: i as u8 + 1,
            strokes: Some(*s),
        })
        .collect()
}

pub fn flat_card(strokes: u8) -> Vec<HoleScore> {
    card(&[strokes; 18])
}

/// Front nine and back nine halves joined into one card.
pub fn split_card(front: [u8; 9], back: [u8; 9]) -> Vec<HoleScore> {
    let all: Vec<u8> = front.iter().chain(back.iter()).copied().collect();
    card(&all)
}

pub fn scorecard(cards: Vec<(&str, Vec<HoleScore>)>) -> Scorecard {
    Scorecard {
        cards: cards.into_iter().map(|(id, c)| (g(id), c)).collect(),
    }
}

/// Owned inputs that a `RoundContext` can borrow from.
pub struct Fixture {
    pub tee: Tee,
    pub roster: Vec<RosterEntry>,
    pub scorecard: Scorecard,
    pub allocations: BTreeMap<GolferId, StrokeAllocation>,
}

impl Fixture {
    pub fn new(roster: Vec<RosterEntry>, scorecard: Scorecard) -> Self {
        Self {
            tee: standard_tee(),
            roster,
            scorecard,
            allocations: BTreeMap::new(),
        }
    }

    pub fn ctx(&self) -> RoundContext<'_> {
        RoundContext {
            tee: &self.tee,
            roster: &self.roster,
            scorecard: &self.scorecard,
            allocations: &self.allocations,
        }
    }
}

pub fn catalog() -> InMemoryCatalog {
    let mut catalog = InMemoryCatalog::default();
    catalog.insert("Pine Hills", standard_tee());
    catalog
}

/// The stored event fixture, normalized with or without the course catalog.
pub fn event_fixture(with_catalog: bool) -> EventSnapshot {
    let json = std::fs::read_to_string(EVENT_FIXTURE).unwrap();
    let raw = parse_snapshot_json(&json).unwrap();
    let catalog = catalog();
    let lookup = with_catalog.then_some(&catalog as &dyn CourseCatalog);
    normalize_snapshot(raw, lookup).unwrap()
}
