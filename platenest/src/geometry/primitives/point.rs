use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::geometry::PlacementTransform;
use crate::geometry::geo_traits::{DistanceTo, Transformable};

/// Geometric primitive representing a point in the plane of a plate
#[derive(Debug, Clone, PartialEq, Copy, Serialize, Deserialize)]
pub struct Point(pub f64, pub f64);

impl Point {
    pub fn scale(self, factor: f64) -> Self {
        Point(self.0 * factor, self.1 * factor)
    }
}

impl Transformable for Point {
    fn transform(&mut self, t: &PlacementTransform) -> &mut Self {
        *self = t.apply(*self);
        self
    }
}

impl DistanceTo<Point> for Point {
    fn distance_to(&self, other: &Point) -> f64 {
        self.sq_distance_to(other).sqrt()
    }

    fn sq_distance_to(&self, other: &Point) -> f64 {
        (self.0 - other.0).powi(2) + (self.1 - other.1).powi(2)
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let x = self.0.to_bits();
        let y = self.1.to_bits();
        x.hash(state);
        y.hash(state);
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.0, p.1)
    }
}
