use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::course::Tee;
use super::roster::GolferId;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoleScore {
    pub hole: u8,
    /// `None` until the golfer's strokes are entered.
    pub strokes: Option<u8>,
}

/// Per-golfer hole-by-hole strokes as supplied by the scorecard provider.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Scorecard {
    pub cards: BTreeMap<GolferId, Vec<HoleScore>>,
}

impl Scorecard {
    #[must_use]
    pub fn strokes(&self, golfer: &GolferId, hole: u8) -> Option<u8> {
        self.cards
            .get(golfer)?
            .iter()
            .find(|s| s.hole == hole)
            .and_then(|s| s.strokes)
    }

    #[must_use]
    pub fn has_card(&self, golfer: &GolferId) -> bool {
        self.cards.contains_key(golfer)
    }

    /// Sets (or clears) one hole, creating the card entry if needed.
    pub fn record(&mut self, golfer: &GolferId, hole: u8, strokes: Option<u8>) {
        let card = self.cards.entry(golfer.clone()).or_default();
        match card.iter_mut().find(|s| s.hole == hole) {
            Some(entry) => entry.strokes = strokes,
            None => {
                card.push(HoleScore { hole, strokes });
                card.sort_by_key(|s| s.hole);
            }
        }
    }

    /// Number of tee holes still unset for the golfer.
    #[must_use]
    pub fn missing_for(&self, golfer: &GolferId, tee: &Tee) -> usize {
        tee.holes
            .iter()
            .filter(|h| self.strokes(golfer, h.number).is_none())
            .count()
    }

    /// Unset holes summed across `golfers`; zero means the round is complete for all of them.
    #[must_use]
    pub fn missing_for_all(&self, golfers: &[GolferId], tee: &Tee) -> usize {
        golfers.iter().map(|g| self.missing_for(g, tee)).sum()
    }

    /// Gross strokes over `holes`, or `None` if any of them is unset.
    #[must_use]
    pub fn gross_over(&self, golfer: &GolferId, holes: &[u8]) -> Option<u32> {
        holes
            .iter()
            .map(|h| self.strokes(golfer, *h).map(u32::from))
            .sum()
    }
}
