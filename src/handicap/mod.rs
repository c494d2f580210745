pub mod allocation;
pub mod index;

pub use allocation::*;
pub use index::*;

use std::collections::BTreeMap;

use crate::model::{GolferId, RosterEntry, Tee, TeeRating};

/// Stroke allocations for every rostered golfer, from their declared index.
#[must_use]
pub fn allocations_for(
    roster: &[RosterEntry],
    tee: &Tee,
    rating: &TeeRating,
) -> BTreeMap<GolferId, StrokeAllocation> {
    roster
        .iter()
        .map(|entry| {
            let ch = course_handicap(entry.handicap_index, rating);
            (entry.golfer.clone(), stroke_allocation(ch, tee))
        })
        .collect()
}
