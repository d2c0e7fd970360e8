//! Plain spatial value types carried by pipes and structures.
//!
//! The engine never projects or reprojects coordinates; geometry arrives in the
//! same planar unit system as lengths and elevations (feet) and is only used
//! for presence checks and length measurement.

use serde::{Deserialize, Serialize};

/// A 2D planar point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An ordered run of vertices tracing a pipe in plan view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub vertices: Vec<Point>,
}

impl Polyline {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Sum of segment lengths. A polyline with fewer than two vertices has
    /// zero length rather than being an error; the geometry rule decides
    /// whether that is worth flagging.
    pub fn length(&self) -> f64 {
        self.vertices
            .windows(2)
            .map(|pair| pair[0].distance_to(&pair[1]))
            .sum()
    }
}
