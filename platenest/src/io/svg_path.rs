use svg::node::Value;
use svg::node::element::path::Data;

use crate::entities::PlateShape;
use crate::geometry::PlacementTransform;
use crate::geometry::primitives::{Point, Ring};

/// Appends a closed subpath for `ring` to `data`, mapping each point through `map`.
pub fn ring_data(mut data: Data, ring: &Ring, map: impl Fn(Point) -> Point) -> Data {
    let mut points = ring.points.iter().map(|p| map(*p));
    if let Some(first) = points.next() {
        data = data.move_to::<(f32, f32)>((first.0 as f32, first.1 as f32));
        for p in points {
            data = data.line_to::<(f32, f32)>((p.0 as f32, p.1 as f32));
        }
        data = data.close();
    }
    data
}

/// Path data of all rings of a shape (exteriors first, then holes).
/// When a placement is given, the rings are drawn in sheet coordinates.
pub fn shape_path_data(shape: &PlateShape, placement: Option<&PlacementTransform>) -> Data {
    let map = |p: Point| match placement {
        Some(t) => t.apply(p),
        None => p,
    };
    shape
        .exteriors()
        .chain(shape.holes().iter())
        .fold(Data::new(), |data, ring| ring_data(data, ring, &map))
}

/// Path description usable as the `d` attribute of an SVG path, or by any other renderer
pub fn shape_path_string(shape: &PlateShape, placement: Option<&PlacementTransform>) -> String {
    Value::from(shape_path_data(shape, placement)).to_string()
}
