use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// The point a fraction `t` of the way from `self` to `other`.
    ///
    /// `t = 0.0` is `self`, `t = 1.0` is `other`. Good enough for the short
    /// hops a delivery route covers; no great-circle correction.
    pub fn interpolate(&self, other: &Coordinates, t: f64) -> Coordinates {
        Coordinates {
            latitude: self.latitude + (other.latitude - self.latitude) * t,
            longitude: self.longitude + (other.longitude - self.longitude) * t,
        }
    }
}

impl Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}
