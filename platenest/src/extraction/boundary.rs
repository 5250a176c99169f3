use std::collections::{HashMap, HashSet};
use std::f64::consts::TAU;

use itertools::Itertools;
use log::{debug, warn};
use ordered_float::OrderedFloat;

use crate::geometry::convex_hull::convex_hull_from_points;
use crate::geometry::geo_enums::Winding;
use crate::geometry::geo_traits::{CollidesWith, DistanceTo};
use crate::geometry::primitives::{Point, Rect, Ring};
use crate::util::ExtractionConfig;

/// Closed boundary rings recovered from a projected triangle soup.
#[derive(Clone, Debug)]
pub struct BoundaryRings {
    /// Ring with the largest enclosed area, counterclockwise
    pub exterior: Ring,
    /// Rings enclosed by the exterior, clockwise
    pub holes: Vec<Ring>,
    /// Significant rings outside the exterior, counterclockwise
    pub islands: Vec<Ring>,
    /// True if no closed ring could be traced and the convex hull of all points was used instead
    pub used_fallback: bool,
}

/// Recovers the exterior outline, holes and disjoint fragments of a flattened plate.
///
/// Only edges used by exactly one (non-degenerate, deduplicated) triangle form the boundary.
/// If no closed ring can be traced, the convex hull of all points is returned as the exterior.
pub fn extract_rings(
    points: &[Point],
    triangles: &[[usize; 3]],
    config: &ExtractionConfig,
) -> BoundaryRings {
    let Some(bbox) = Rect::from_points(points) else {
        return hull_fallback(points);
    };
    let diagonal = bbox.width().hypot(bbox.height());
    if diagonal <= 0.0 {
        return hull_fallback(points);
    }

    let welded = WeldedPoints::new(points, config.weld_tolerance * diagonal);
    let triangles = surface_triangles(&welded, triangles, config, diagonal);
    let triangles = remove_gap_triangles(&welded.points, triangles, config);

    let rings = trace_rings(&welded.points, &boundary_edges(&triangles))
        .into_iter()
        .map(remove_collinear_points)
        .filter(|r| r.n_points() >= 3 && r.area() > 0.0)
        .collect_vec();
    let rings = cancel_seams(rings);

    debug!(
        "[BOUNDARY] {} welded points, {} surface triangles, {} closed rings",
        welded.points.len(),
        triangles.len(),
        rings.len()
    );

    match classify(rings, config) {
        Some(boundary) => boundary,
        None => hull_fallback(points),
    }
}

fn hull_fallback(points: &[Point]) -> BoundaryRings {
    warn!("[BOUNDARY] no closed boundary found, using the convex hull of all points");
    let hull = Ring::new(convex_hull_from_points(points.to_vec()));
    BoundaryRings {
        exterior: hull.with_winding(Winding::CounterClockwise),
        holes: vec![],
        islands: vec![],
        used_fallback: true,
    }
}

/// Points merged with an earlier point within the weld tolerance, so that nearly coincident vertices share one index.
struct WeldedPoints {
    points: Vec<Point>,
    /// Maps an original point index to its welded index
    index_map: Vec<usize>,
}

impl WeldedPoints {
    /// Welded points are bucketed in grid cells of `tolerance` wide.
    /// A match can lie in a neighbouring cell, so all 3x3 surrounding cells are searched.
    fn new(points: &[Point], tolerance: f64) -> Self {
        let mut cells: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
        let mut welded: Vec<Point> = vec![];
        let index_map = points
            .iter()
            .map(|p| {
                if tolerance <= 0.0 {
                    let key = (p.0.to_bits() as i64, p.1.to_bits() as i64);
                    let cell = cells.entry(key).or_default();
                    if let Some(&w) = cell.first() {
                        return w;
                    }
                    welded.push(*p);
                    cell.push(welded.len() - 1);
                    return welded.len() - 1;
                }

                let (cx, cy) = (
                    (p.0 / tolerance).floor() as i64,
                    (p.1 / tolerance).floor() as i64,
                );
                let nearest = (cx - 1..=cx + 1)
                    .cartesian_product(cy - 1..=cy + 1)
                    .filter_map(|key| cells.get(&key))
                    .flatten()
                    .map(|&w| (w, welded[w].distance_to(p)))
                    .filter(|&(_, d)| d <= tolerance)
                    .min_by_key(|&(w, d)| (OrderedFloat(d), w));

                match nearest {
                    Some((w, _)) => w,
                    None => {
                        welded.push(*p);
                        cells.entry((cx, cy)).or_default().push(welded.len() - 1);
                        welded.len() - 1
                    }
                }
            })
            .collect();
        Self {
            points: welded,
            index_map,
        }
    }
}

/// Triangles of one side of the plate, all counterclockwise and each occurring once.
///
/// Side walls project onto (near) zero area and are dropped. The top and bottom faces of a closed solid
/// project with opposite orientations, only the orientation covering the most area is kept.
fn surface_triangles(
    welded: &WeldedPoints,
    triangles: &[[usize; 3]],
    config: &ExtractionConfig,
    diagonal: f64,
) -> Vec<[usize; 3]> {
    let min_area = config.min_triangle_area_ratio * diagonal * diagonal;

    let mut ccw = vec![];
    let mut cw = vec![];
    let (mut ccw_area, mut cw_area) = (0.0, 0.0);

    for t in triangles {
        let [a, b, c] = t.map(|i| welded.index_map[i]);
        if a == b || b == c || a == c {
            continue;
        }
        let area = triangle_signed_area(&welded.points, [a, b, c]);
        if area > min_area {
            ccw.push([a, b, c]);
            ccw_area += area;
        } else if area < -min_area {
            cw.push([a, c, b]);
            cw_area -= area;
        }
    }

    let kept = match ccw_area >= cw_area {
        true => ccw,
        false => cw,
    };

    let mut seen = HashSet::new();
    kept.into_iter()
        .filter(|t| {
            let mut key = *t;
            key.sort_unstable();
            seen.insert(key)
        })
        .collect()
}

/// Drops triangles that bridge over openings in the plate.
///
/// A triangle is a gap if its circumradius exceeds `alpha` times the median edge length.
/// Nothing is dropped if the gaps would make up most of the surface.
fn remove_gap_triangles(
    points: &[Point],
    triangles: Vec<[usize; 3]>,
    config: &ExtractionConfig,
) -> Vec<[usize; 3]> {
    let Some(alpha) = config.alpha else {
        return triangles;
    };

    let edge_lengths = triangles
        .iter()
        .flat_map(|&[a, b, c]| [(a, b), (b, c), (c, a)])
        .map(|(i, j)| (i.min(j), i.max(j)))
        .unique()
        .map(|(i, j)| points[i].distance_to(&points[j]))
        .sorted_by_key(|l| OrderedFloat(*l))
        .collect_vec();

    let Some(median) = median(&edge_lengths) else {
        return triangles;
    };
    let max_radius = alpha * median;

    let (gaps, solid): (Vec<[usize; 3]>, Vec<[usize; 3]>) = triangles
        .iter()
        .copied()
        .partition(|t| circumradius(points, *t) > max_radius);

    if gaps.is_empty() {
        return triangles;
    }

    let total_area: f64 = triangles
        .iter()
        .map(|t| triangle_signed_area(points, *t))
        .sum();
    let gap_area: f64 = gaps.iter().map(|t| triangle_signed_area(points, *t)).sum();

    if gap_area > config.max_gap_area_ratio * total_area {
        warn!(
            "[BOUNDARY] {} of {} triangles exceed the gap threshold ({max_radius:.3}), keeping all of them",
            gaps.len(),
            triangles.len()
        );
        return triangles;
    }

    debug!(
        "[BOUNDARY] removed {} gap triangles (circumradius > {max_radius:.3})",
        gaps.len()
    );
    solid
}

fn median(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(sorted[n / 2]),
        _ => Some(0.5 * (sorted[n / 2 - 1] + sorted[n / 2])),
    }
}

fn triangle_signed_area(points: &[Point], [a, b, c]: [usize; 3]) -> f64 {
    let (pa, pb, pc) = (points[a], points[b], points[c]);
    0.5 * ((pb.0 - pa.0) * (pc.1 - pa.1) - (pc.0 - pa.0) * (pb.1 - pa.1))
}

fn circumradius(points: &[Point], [a, b, c]: [usize; 3]) -> f64 {
    let area = triangle_signed_area(points, [a, b, c]).abs();
    if area == 0.0 {
        return f64::INFINITY;
    }
    let (pa, pb, pc) = (points[a], points[b], points[c]);
    pa.distance_to(&pb) * pb.distance_to(&pc) * pc.distance_to(&pa) / (4.0 * area)
}

/// Directed edges of the counterclockwise triangles whose undirected edge belongs to exactly one triangle.
/// Sorted, so tracing does not depend on hashing order.
fn boundary_edges(triangles: &[[usize; 3]]) -> Vec<(usize, usize)> {
    let directed = triangles
        .iter()
        .flat_map(|&[a, b, c]| [(a, b), (b, c), (c, a)])
        .collect_vec();

    let counts = directed
        .iter()
        .map(|&(i, j)| (i.min(j), i.max(j)))
        .counts();

    directed
        .into_iter()
        .filter(|&(i, j)| counts.get(&(i.min(j), i.max(j))) == Some(&1))
        .sorted()
        .collect()
}

/// Walks the boundary edges into closed rings.
///
/// At a vertex with several outgoing edges, the edge making the smallest clockwise turn
/// from the reversed incoming edge is followed. This keeps regions touching in a single vertex apart.
/// Chains that do not close are discarded.
fn trace_rings(points: &[Point], edges: &[(usize, usize)]) -> Vec<Ring> {
    let mut outgoing: HashMap<usize, Vec<usize>> = HashMap::new();
    for (e_idx, &(from, _)) in edges.iter().enumerate() {
        outgoing.entry(from).or_default().push(e_idx);
    }

    let mut used = vec![false; edges.len()];
    let mut rings = vec![];
    let mut n_open = 0;

    for start_idx in 0..edges.len() {
        if used[start_idx] {
            continue;
        }
        used[start_idx] = true;
        let (start, first) = edges[start_idx];
        let mut vertices = vec![start];
        let (mut prev, mut cur) = (start, first);
        let mut closed = false;

        for _ in 0..edges.len() {
            let candidates = outgoing
                .get(&cur)
                .map(|out| {
                    out.iter()
                        .copied()
                        .filter(|&e| !used[e] || (e == start_idx && cur == start))
                        .collect_vec()
                })
                .unwrap_or_default();

            let incoming_angle = angle(points[cur], points[prev]);
            let next = candidates.into_iter().min_by_key(|&e| {
                let out_angle = angle(points[cur], points[edges[e].1]);
                (OrderedFloat(clockwise_turn(incoming_angle, out_angle)), e)
            });

            match next {
                None => break,
                Some(e) if e == start_idx => {
                    closed = true;
                    break;
                }
                Some(e) => {
                    used[e] = true;
                    vertices.push(cur);
                    prev = cur;
                    cur = edges[e].1;
                }
            }
        }

        match closed {
            true => rings.push(Ring::new(vertices.into_iter().map(|v| points[v]).collect())),
            false => n_open += 1,
        }
    }

    if n_open > 0 {
        debug!("[BOUNDARY] discarded {n_open} open boundary chains");
    }
    rings
}

fn angle(from: Point, to: Point) -> f64 {
    (to.1 - from.1).atan2(to.0 - from.0)
}

/// Clockwise rotation from `from` to `to`, in `(0, 2π]`
fn clockwise_turn(from: f64, to: f64) -> f64 {
    let turn = (from - to).rem_euclid(TAU);
    match turn > 0.0 {
        true => turn,
        false => TAU,
    }
}

/// Removes vertices lying on the straight line between their neighbours
fn remove_collinear_points(ring: Ring) -> Ring {
    let mut points = ring.points;
    loop {
        let n = points.len();
        if n < 3 {
            break;
        }
        let collinear = (0..n).find(|&i| {
            let (a, b, c) = (points[(i + n - 1) % n], points[i], points[(i + 1) % n]);
            let (ab, bc) = (a.distance_to(&b), b.distance_to(&c));
            let cross = (b.0 - a.0) * (c.1 - b.1) - (b.1 - a.1) * (c.0 - b.0);
            let dot = (b.0 - a.0) * (c.0 - b.0) + (b.1 - a.1) * (c.1 - b.1);
            ab == 0.0 || bc == 0.0 || (cross.abs() <= 1e-9 * ab * bc && dot > 0.0)
        });
        match collinear {
            Some(i) => {
                points.remove(i);
            }
            None => break,
        }
    }
    Ring::new(points)
}

/// Drops pairs of identical rings with opposite windings.
/// These trace a seam between triangles that do not share their edges (T-junctions), not an actual boundary.
fn cancel_seams(rings: Vec<Ring>) -> Vec<Ring> {
    let keys = rings
        .iter()
        .map(|r| {
            r.points
                .iter()
                .map(|p| (p.0.to_bits(), p.1.to_bits()))
                .sorted()
                .collect_vec()
        })
        .collect_vec();

    let mut cancelled = vec![false; rings.len()];
    for i in 0..rings.len() {
        if cancelled[i] {
            continue;
        }
        let twin = (i + 1..rings.len()).find(|&j| {
            !cancelled[j] && keys[i] == keys[j] && rings[i].winding() != rings[j].winding()
        });
        if let Some(j) = twin {
            cancelled[i] = true;
            cancelled[j] = true;
        }
    }

    let n_cancelled = cancelled.iter().filter(|&&c| c).count();
    if n_cancelled > 0 {
        debug!("[BOUNDARY] cancelled {} seam rings", n_cancelled);
    }
    rings
        .into_iter()
        .zip(cancelled)
        .filter_map(|(r, c)| (!c).then_some(r))
        .collect()
}

/// Largest ring becomes the exterior, rings whose centroid lies inside it are holes.
/// The remaining rings are islands, unless they are small enough to be mesh noise.
fn classify(rings: Vec<Ring>, config: &ExtractionConfig) -> Option<BoundaryRings> {
    let exterior_idx = rings
        .iter()
        .enumerate()
        .rev()
        .max_by_key(|(_, r)| OrderedFloat(r.area()))
        .map(|(i, _)| i)?;

    let mut rings = rings;
    let exterior = rings.remove(exterior_idx);
    let exterior_area = exterior.area();

    let mut holes = vec![];
    let mut islands = vec![];
    for ring in rings {
        if exterior.collides_with(&ring.centroid()) {
            holes.push(ring.with_winding(Winding::Clockwise));
        } else if ring.area() < config.noise_area_ratio * exterior_area {
            debug!(
                "[BOUNDARY] discarded ring of area {:.3} as noise",
                ring.area()
            );
        } else {
            islands.push(ring.with_winding(Winding::CounterClockwise));
        }
    }

    Some(BoundaryRings {
        exterior: exterior.with_winding(Winding::CounterClockwise),
        holes,
        islands,
        used_fallback: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clockwise_turn_range() {
        assert_eq!(clockwise_turn(0.0, 0.0), TAU);
        assert!((clockwise_turn(0.0, -std::f64::consts::FRAC_PI_2) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((clockwise_turn(-std::f64::consts::FRAC_PI_2, std::f64::consts::PI) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn collinear_points_are_removed() {
        let ring = Ring::new(vec![
            Point(0.0, 0.0),
            Point(5.0, 0.0),
            Point(10.0, 0.0),
            Point(10.0, 10.0),
            Point(0.0, 10.0),
            Point(0.0, 5.0),
        ]);
        assert_eq!(remove_collinear_points(ring).n_points(), 4);
    }

    #[test]
    fn points_across_a_cell_border_are_welded() {
        let points = [Point(0.99, 0.0), Point(1.01, 0.0), Point(5.0, 0.0), Point(1.01, 1.5)];
        let welded = WeldedPoints::new(&points, 0.1);
        assert_eq!(welded.points.len(), 3);
        assert_eq!(welded.index_map, vec![0, 0, 1, 2]);
    }

    #[test]
    fn opposite_twin_rings_cancel() {
        let square = Ring::new(vec![
            Point(0.0, 0.0),
            Point(10.0, 0.0),
            Point(10.0, 10.0),
            Point(0.0, 10.0),
        ]);
        //same points, starting elsewhere and running clockwise
        let seam = Ring::new(vec![
            Point(10.0, 10.0),
            Point(10.0, 0.0),
            Point(0.0, 0.0),
            Point(0.0, 10.0),
        ]);
        let other = Ring::new(vec![Point(20.0, 0.0), Point(30.0, 0.0), Point(30.0, 10.0)]);

        let rings = cancel_seams(vec![square.clone(), other.clone(), seam]);
        assert_eq!(rings, vec![other]);

        //equal windings are not a seam
        assert_eq!(cancel_seams(vec![square.clone(), square.clone()]).len(), 2);
    }

    #[test]
    fn median_of_even_and_odd() {
        assert_eq!(median(&[]), None);
        assert_eq!(median(&[1.0, 2.0, 9.0]), Some(2.0));
        assert_eq!(median(&[1.0, 2.0, 4.0, 9.0]), Some(3.0));
    }
}
