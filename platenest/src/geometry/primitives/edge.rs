use crate::geometry::geo_traits::CollidesWith;
use crate::geometry::primitives::Point;

/// Line segment between two [`Point`]s
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Edge {
    pub start: Point,
    pub end: Point,
}

impl Edge {
    /// Creates a new edge, `None` if both end points coincide.
    pub fn new(start: Point, end: Point) -> Option<Self> {
        match start != end {
            true => Some(Edge { start, end }),
            false => None,
        }
    }

    pub fn x_min(&self) -> f64 {
        f64::min(self.start.0, self.end.0)
    }

    pub fn y_min(&self) -> f64 {
        f64::min(self.start.1, self.end.1)
    }

    pub fn x_max(&self) -> f64 {
        f64::max(self.start.0, self.end.0)
    }

    pub fn y_max(&self) -> f64 {
        f64::max(self.start.1, self.end.1)
    }
}

impl CollidesWith<Edge> for Edge {
    #[inline(always)]
    fn collides_with(&self, other: &Edge) -> bool {
        let (e1, e2) = (self, other);
        if f64::max(e1.x_min(), e2.x_min()) > f64::min(e1.x_max(), e2.x_max())
            || f64::max(e1.y_min(), e2.y_min()) > f64::min(e1.y_max(), e2.y_max())
        {
            //bounding boxes do not overlap
            return false;
        }

        //based on: https://en.wikipedia.org/wiki/Line%E2%80%93line_intersection#Given_two_points_on_each_line_segment
        let Point(x1, y1) = e1.start;
        let Point(x2, y2) = e1.end;
        let Point(x3, y3) = e2.start;
        let Point(x4, y4) = e2.end;

        let t_nom = (x2 - x4) * (y4 - y3) - (y2 - y4) * (x4 - x3);
        let u_nom = (x2 - x4) * (y2 - y1) - (y2 - y4) * (x2 - x1);
        let denom = (x2 - x1) * (y4 - y3) - (y2 - y1) * (x4 - x3);

        if denom == 0.0 {
            //parallel edges
            false
        } else {
            let t = t_nom / denom;
            let u = u_nom / denom;
            (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
        }
    }
}
