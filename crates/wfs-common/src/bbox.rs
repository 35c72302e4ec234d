//! Envelope (bounding box) type used by spatial filters.

use serde::{Deserialize, Serialize};

/// An axis-aligned envelope with an optional CRS identifier.
///
/// Coordinates are taken in the axis order of `srs_name`; when no CRS is
/// given the service default (EPSG:4326) applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub srs_name: Option<String>,
}

impl Envelope {
    /// Create a new envelope from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
            srs_name: None,
        }
    }

    /// Lower corner must not exceed the upper corner on either axis.
    pub fn is_valid(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    /// Check if a point is contained within this envelope.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Smallest envelope covering both.
    pub fn union(&self, other: &Envelope) -> Envelope {
        Envelope {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
            srs_name: self.srs_name.clone(),
        }
    }
}
