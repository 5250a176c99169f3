use serde::{Deserialize, Serialize};

use crate::geometry::PlacementTransform;
use crate::geometry::geo_enums::Winding;
use crate::geometry::geo_traits::{CollidesWith, Transformable};
use crate::geometry::primitives::Edge;
use crate::geometry::primitives::Point;
use crate::geometry::primitives::Rect;
use crate::util::FPA;

/// Closed sequence of points describing one boundary of a plate (exterior outline or hole).
/// The closing edge from the last to the first point is implicit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring {
    pub points: Vec<Point>,
}

impl Ring {
    pub fn new(points: Vec<Point>) -> Self {
        Ring { points }
    }

    pub fn n_points(&self) -> usize {
        self.points.len()
    }

    pub fn edge_iter(&self) -> impl Iterator<Item = Edge> + '_ {
        let n = self.n_points();
        (0..n).filter_map(move |i| Edge::new(self.points[i], self.points[(i + 1) % n]))
    }

    //https://en.wikipedia.org/wiki/Shoelace_formula
    //counterclockwise = positive area, clockwise = negative area
    pub fn signed_area(&self) -> f64 {
        calculate_signed_area(&self.points)
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn winding(&self) -> Winding {
        match self.signed_area() >= 0.0 {
            true => Winding::CounterClockwise,
            false => Winding::Clockwise,
        }
    }

    /// Reorders the points (if needed) so that the ring has the requested winding.
    pub fn with_winding(mut self, winding: Winding) -> Self {
        if self.n_points() >= 3 && self.winding() != winding {
            self.points.reverse();
        }
        self
    }

    pub fn bbox(&self) -> Option<Rect> {
        Rect::from_points(&self.points)
    }

    pub fn centroid(&self) -> Point {
        //based on: https://en.wikipedia.org/wiki/Centroid#Of_a_polygon
        let n = self.n_points();
        let area = self.signed_area();
        if n == 0 {
            return Point(0.0, 0.0);
        }
        if FPA(area) == FPA(0.0) {
            //degenerate ring: average of its points
            let (sx, sy) = self
                .points
                .iter()
                .fold((0.0, 0.0), |(sx, sy), p| (sx + p.0, sy + p.1));
            return Point(sx / n as f64, sy / n as f64);
        }

        let mut c_x = 0.0;
        let mut c_y = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            let Point(x_i, y_i) = self.points[i];
            let Point(x_j, y_j) = self.points[j];
            c_x += (x_i + x_j) * (x_i * y_j - x_j * y_i);
            c_y += (y_i + y_j) * (x_i * y_j - x_j * y_i);
        }

        Point(c_x / (6.0 * area), c_y / (6.0 * area))
    }

    pub fn scale(&self, factor: f64) -> Ring {
        Ring::new(self.points.iter().map(|p| p.scale(factor)).collect())
    }
}

/// Signed shoelace area of a closed sequence of points
pub fn calculate_signed_area(points: &[Point]) -> f64 {
    let mut sigma: f64 = 0.0;
    for i in 0..points.len() {
        //next point
        let j = (i + 1) % points.len();

        let (x_i, y_i) = points[i].into();
        let (x_j, y_j) = points[j].into();

        sigma += (y_i + y_j) * (x_i - x_j)
    }

    0.5 * sigma
}

impl Transformable for Ring {
    fn transform(&mut self, t: &PlacementTransform) -> &mut Self {
        self.points.iter_mut().for_each(|p| {
            p.transform(t);
        });
        self
    }
}

impl CollidesWith<Point> for Ring {
    fn collides_with(&self, point: &Point) -> bool {
        //based on the ray casting algorithm: https://en.wikipedia.org/wiki/Point_in_polygon#Ray_casting_algorithm
        let Some(bbox) = self.bbox() else {
            return false;
        };
        match bbox.collides_with(point) {
            false => false,
            true => {
                //horizontal ray shot to the right.
                //Starting from the point to another point that is certainly outside the shape
                let point_outside = Point(bbox.x_max + bbox.width() + 1.0, point.1);
                let Some(ray) = Edge::new(*point, point_outside) else {
                    return false;
                };

                let mut n_intersections = 0;
                for edge in self.edge_iter() {
                    //Check if the ray does not go through (or almost through) a vertex
                    let (s_x, s_y) = (FPA(edge.start.0), FPA(edge.start.1));
                    let (e_x, e_y) = (FPA(edge.end.0), FPA(edge.end.1));
                    let (p_x, p_y) = (FPA(point.0), FPA(point.1));

                    if (s_y == p_y && s_x > p_x) || (e_y == p_y && e_x > p_x) {
                        //the ray passes through (or dangerously close to) a vertex,
                        //only count an intersection if the edge is below the ray
                        if s_y < p_y || e_y < p_y {
                            n_intersections += 1;
                        }
                    } else if ray.collides_with(&edge) {
                        n_intersections += 1;
                    }
                }
                n_intersections % 2 == 1
            }
        }
    }
}
