use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the integer map plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i64,
    pub y: i64,
}

impl Coordinate {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        // widen before subtracting; far-apart extremes overflow i64
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned rectangle, bounds inclusive on every side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
}

impl Region {
    pub const fn new(min_x: i64, max_x: i64, min_y: i64, max_y: i64) -> Self {
        Self { min_x, max_x, min_y, max_y }
    }

    pub fn contains_point(&self, point: &Coordinate) -> bool {
        point.x >= self.min_x &&
        point.x <= self.max_x &&
        point.y >= self.min_y &&
        point.y <= self.max_y
    }

    /// The same rectangle grown by `by` on every side.
    pub fn expanded(&self, by: i64) -> Region {
        Region::new(
            self.min_x.saturating_sub(by),
            self.max_x.saturating_add(by),
            self.min_y.saturating_sub(by),
            self.max_y.saturating_add(by),
        )
    }
}

pub trait POI {
    fn get_coordinate(&self) -> &Coordinate;
    fn get_id(&self) -> &str;
}
