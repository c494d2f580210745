use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::allocation::{adjusted_gross, course_handicap, stroke_allocation};
use crate::model::{GolferId, NOMINAL_SLOPE, Scorecard, Tee, TeeRating};

pub const MAX_HANDICAP_INDEX: f64 = 54.0;
pub const DIFFERENTIAL_WINDOW: usize = 20;

/// (rounds available, differentials used, adjustment).
const SELECTION_TABLE: [(usize, usize, f64); 20] = [
    (1, 1, 0.0),
    (2, 1, 0.0),
    (3, 1, -2.0),
    (4, 1, -1.0),
    (5, 1, 0.0),
    (6, 2, -1.0),
    (7, 2, 0.0),
    (8, 2, 0.0),
    (9, 3, 0.0),
    (10, 3, 0.0),
    (11, 3, 0.0),
    (12, 4, 0.0),
    (13, 4, 0.0),
    (14, 4, 0.0),
    (15, 5, 0.0),
    (16, 5, 0.0),
    (17, 6, 0.0),
    (18, 6, 0.0),
    (19, 7, 0.0),
    (20, 8, 0.0),
];

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Differential {
    pub round_id: String,
    pub played_on: NaiveDate,
    pub value: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct HandicapIndex {
    /// `None` until the golfer has at least one differential.
    pub index: Option<f64>,
    /// Rounds that counted, best first.
    pub used_round_ids: Vec<String>,
}

/// Published whenever a golfer's index changes.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HandicapUpdate {
    pub golfer: GolferId,
    pub previous: Option<f64>,
    pub current: HandicapIndex,
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `(113 / slope) * (adjusted gross - course rating)`, to one decimal.
#[must_use]
pub fn score_differential(adjusted_gross: u32, course_rating: f64, slope_rating: f64) -> f64 {
    let slope = if slope_rating > 0.0 {
        slope_rating
    } else {
        NOMINAL_SLOPE
    };
    round_tenth(NOMINAL_SLOPE / slope * (f64::from(adjusted_gross) - course_rating))
}

/// Turns a golfer's finished round into a differential. Returns `None`
/// while any hole is unset.
#[must_use]
pub fn round_differential(
    round_id: &str,
    played_on: NaiveDate,
    scorecard: &Scorecard,
    golfer: &GolferId,
    tee: Option<&Tee>,
    declared_index: Option<f64>,
) -> Option<Differential> {
    let rating = TeeRating::resolve(tee);
    let layout = tee.cloned().unwrap_or_else(Tee::nominal);
    let allocation = stroke_allocation(course_handicap(declared_index, &rating), &layout);
    let gross = adjusted_gross(scorecard, golfer, &layout, &allocation)?;
    Some(Differential {
        round_id: round_id.to_string(),
        played_on,
        value: score_differential(gross, rating.course_rating, rating.slope_rating),
    })
}

/// Most recent first; same-day rounds by descending round id.
pub fn sort_most_recent_first(differentials: &mut [Differential]) {
    differentials.sort_by(|a, b| {
        b.played_on
            .cmp(&a.played_on)
            .then_with(|| b.round_id.cmp(&a.round_id))
    });
}

/// Index from differentials ordered most recent first. Only the latest 20
/// count; how many of the best are averaged, and any adjustment, come from
/// the rounds-available table.
#[must_use]
pub fn handicap_index(differentials: &[Differential]) -> HandicapIndex {
    let window = &differentials[..differentials.len().min(DIFFERENTIAL_WINDOW)];
    let Some(&(_, used, adjustment)) = SELECTION_TABLE
        .iter()
        .find(|(available, _, _)| *available == window.len())
    else {
        return HandicapIndex::default();
    };

    let mut ranked: Vec<(usize, &Differential)> = window.iter().enumerate().collect();
    ranked.sort_by(|(ia, a), (ib, b)| a.value.total_cmp(&b.value).then(ia.cmp(ib)));
    let best = &ranked[..used];

    let average = best.iter().map(|(_, d)| d.value).sum::<f64>() / used as f64;
    let index = round_tenth(average + adjustment).min(MAX_HANDICAP_INDEX);
    HandicapIndex {
        index: Some(index),
        used_round_ids: best.iter().map(|(_, d)| d.round_id.clone()).collect(),
    }
}

/// Recomputes and reports an update only when the index actually moved.
#[must_use]
pub fn recalculate(
    golfer: &GolferId,
    previous: Option<f64>,
    differentials: &[Differential],
) -> Option<HandicapUpdate> {
    let current = handicap_index(differentials);
    if current.index == previous {
        return None;
    }
    log::debug!(
        "{}",
        serde_json::json!({"handicap": golfer.as_str(), "previous": previous, "current": current.index})
    );
    Some(HandicapUpdate {
        golfer: golfer.clone(),
        previous,
        current,
    })
}
