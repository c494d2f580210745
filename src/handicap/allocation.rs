use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{GolferId, NOMINAL_SLOPE, Scorecard, Tee, TeeRating};

/// `round(index * slope / 113 + (course rating - par))`. An unset index plays as 0.
#[must_use]
pub fn course_handicap(index: Option<f64>, rating: &TeeRating) -> i32 {
    let index = index.unwrap_or(0.0);
    let raw = index * rating.slope_rating / NOMINAL_SLOPE
        + (rating.course_rating - f64::from(rating.par));
    raw.round() as i32
}

/// Handicap strokes received on each hole of a tee. Plus handicaps give
/// strokes back, which shows up as negative counts.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct StrokeAllocation(BTreeMap<u8, i32>);

impl StrokeAllocation {
    #[must_use]
    pub fn on_hole(&self, hole: u8) -> i32 {
        self.0.get(&hole).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn over(&self, holes: &[u8]) -> i32 {
        holes.iter().map(|h| self.on_hole(*h)).sum()
    }

    #[must_use]
    pub fn total(&self) -> i32 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, i32)> + '_ {
        self.0.iter().map(|(h, s)| (*h, *s))
    }
}

/// Spreads a course handicap over the tee: every hole gets
/// `floor(ch / holes)` strokes, then the remainder goes one apiece to the
/// hardest holes by stroke index. A negative handicap works the same way
/// from the easiest holes, taking strokes away.
#[must_use]
pub fn stroke_allocation(course_handicap: i32, tee: &Tee) -> StrokeAllocation {
    let mut by_index: Vec<_> = tee.holes.iter().collect();
    by_index.sort_by_key(|h| (h.stroke_index, h.number));
    if course_handicap < 0 {
        by_index.reverse();
    }

    let count = by_index.len() as i32;
    let mut strokes: BTreeMap<u8, i32> = tee.holes.iter().map(|h| (h.number, 0)).collect();
    if count == 0 {
        return StrokeAllocation(strokes);
    }

    let sign = course_handicap.signum();
    let magnitude = course_handicap.abs();
    let layers = magnitude / count;
    let remainder = (magnitude % count) as usize;
    for (position, hole) in by_index.iter().enumerate() {
        let extra = layers + i32::from(position < remainder);
        strokes.insert(hole.number, sign * extra);
    }
    StrokeAllocation(strokes)
}

/// Net double bogey cap, used for handicap purposes only.
#[must_use]
pub fn adjusted_hole_score(raw_strokes: u8, par: u8, extra_strokes: i32) -> u32 {
    let cap = (i32::from(par) + 2 + extra_strokes).max(1);
    i32::from(raw_strokes).min(cap) as u32
}

/// Adjusted gross for a golfer's full round, or `None` while any hole is unset.
#[must_use]
pub fn adjusted_gross(
    scorecard: &Scorecard,
    golfer: &GolferId,
    tee: &Tee,
    allocation: &StrokeAllocation,
) -> Option<u32> {
    tee.holes
        .iter()
        .map(|hole| {
            scorecard.strokes(golfer, hole.number).map(|raw| {
                adjusted_hole_score(raw, hole.par, allocation.on_hole(hole.number))
            })
        })
        .sum()
}
