use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const NOMINAL_SLOPE: f64 = 113.0;
pub const HOLES_PER_ROUND: u8 = 18;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Hole {
    pub number: u8,
    pub par: u8,
    /// 1 is the hardest hole and receives strokes first.
    pub stroke_index: u8,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Tee {
    pub name: String,
    pub holes: Vec<Hole>,
    #[serde(default)]
    pub course_rating: Option<f64>,
    #[serde(default)]
    pub slope_rating: Option<f64>,
}

impl Tee {
    /// Par-72 layout used when the catalog has no tee for the round: every
    /// hole is a par 4, odd stroke indexes on the front nine, even on the back.
    #[must_use]
    pub fn nominal() -> Self {
        let holes = (1..=HOLES_PER_ROUND)
            .map(|number| Hole {
                number,
                par: 4,
                stroke_index: if number <= 9 {
                    number * 2 - 1
                } else {
                    (number - 9) * 2
                },
            })
            .collect();
        Self {
            name: "nominal".to_string(),
            holes,
            course_rating: None,
            slope_rating: None,
        }
    }

    #[must_use]
    pub fn par(&self) -> u32 {
        self.holes.iter().map(|h| u32::from(h.par)).sum()
    }

    #[must_use]
    pub fn hole(&self, number: u8) -> Option<&Hole> {
        self.holes.iter().find(|h| h.number == number)
    }

    #[must_use]
    pub fn hole_numbers(&self) -> Vec<u8> {
        self.holes.iter().map(|h| h.number).collect()
    }
}

/// Rating inputs for course handicap and differential math.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct TeeRating {
    pub course_rating: f64,
    pub slope_rating: f64,
    pub par: u32,
    /// Set when any value came from the nominal fallback rather than the catalog.
    pub degraded: bool,
}

impl TeeRating {
    /// Resolves the rating for a tee, falling back to slope 113 and
    /// rating = par when the tee or either rating is unknown. The fallback
    /// is a reduced-accuracy mode, not a failure.
    #[must_use]
    pub fn resolve(tee: Option<&Tee>) -> Self {
        let Some(tee) = tee else {
            log::warn!("unknown tee; using nominal slope {NOMINAL_SLOPE} and rating = par");
            let par = Tee::nominal().par();
            return Self {
                course_rating: f64::from(par),
                slope_rating: NOMINAL_SLOPE,
                par,
                degraded: true,
            };
        };
        let par = tee.par();
        let slope = tee.slope_rating.filter(|s| *s > 0.0);
        let rating = tee.course_rating.filter(|r| *r > 0.0);
        let degraded = slope.is_none() || rating.is_none();
        if degraded {
            log::warn!("tee '{}' is missing rating data; falling back to nominal values", tee.name);
        }
        Self {
            course_rating: rating.unwrap_or(f64::from(par)),
            slope_rating: slope.unwrap_or(NOMINAL_SLOPE),
            par,
            degraded,
        }
    }
}

/// Source of tee layouts and ratings. Lookups may miss.
pub trait CourseCatalog {
    fn tee(&self, course: &str, tee: &str) -> Option<&Tee>;
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct InMemoryCatalog {
    courses: BTreeMap<String, BTreeMap<String, Tee>>,
}

impl InMemoryCatalog {
    pub fn insert(&mut self, course: impl Into<String>, tee: Tee) {
        self.courses
            .entry(course.into())
            .or_default()
            .insert(tee.name.clone(), tee);
    }
}

impl CourseCatalog for InMemoryCatalog {
    fn tee(&self, course: &str, tee: &str) -> Option<&Tee> {
        self.courses.get(course).and_then(|tees| tees.get(tee))
    }
}
