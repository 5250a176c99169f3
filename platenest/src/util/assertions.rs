use itertools::Itertools;
use log::error;

use crate::entities::{PlateShape, Sheet};
use crate::geometry::geo_enums::Winding;
use crate::geometry::primitives::Rect;
use crate::nesting::NestingResult;
use crate::util::FPA;

//Various checks to verify correctness of shapes and nesting results
//Used in debug_assert!() blocks and tests

pub fn shape_areas_consistent(shape: &PlateShape) -> bool {
    let outer_ok = shape.outer().n_points() < 3 || shape.outer().winding() == Winding::CounterClockwise;
    let holes_ok = shape.holes().iter().all(|h| h.winding() == Winding::Clockwise);
    let area_ok = FPA(shape.outer_area()) >= FPA(shape.holes().iter().map(|h| h.area()).fold(0.0, f64::max))
        && FPA(shape.net_area()) >= FPA(0.0);
    outer_ok && holes_ok && area_ok
}

/// Every placed bounding box lies on its sheet, at least `kerf` away from the edges
pub fn placements_within_sheet(sheet: &Sheet, kerf: f64) -> bool {
    sheet.placements.iter().all(|p| {
        let b = p.bbox();
        let inside = FPA(b.x_min) >= FPA(kerf)
            && FPA(b.y_min) >= FPA(kerf)
            && FPA(b.x_max + kerf) <= FPA(sheet.stock.width)
            && FPA(b.y_max + kerf) <= FPA(sheet.stock.height);
        if !inside {
            error!("plate {} exceeds sheet {} ({})", p.element_id, sheet.index, sheet.stock);
        }
        inside
    })
}

/// Separation between two rectangles, negative if they overlap
pub fn rect_gap(a: &Rect, b: &Rect) -> f64 {
    let gap_x = f64::max(a.x_min - b.x_max, b.x_min - a.x_max);
    let gap_y = f64::max(a.y_min - b.y_max, b.y_min - a.y_max);
    f64::max(gap_x, gap_y)
}

/// No two placed bounding boxes on the sheet are closer than `kerf`
pub fn placements_respect_kerf(sheet: &Sheet, kerf: f64) -> bool {
    sheet
        .placements
        .iter()
        .tuple_combinations()
        .all(|(a, b)| {
            let ok = FPA(rect_gap(&a.bbox(), &b.bbox())) >= FPA(kerf);
            if !ok {
                error!(
                    "plates {} and {} on sheet {} are closer than {kerf}",
                    a.element_id, b.element_id, sheet.index
                );
            }
            ok
        })
}

pub fn result_is_consistent(result: &NestingResult) -> bool {
    let sheets_ok = result.sheets().iter().enumerate().all(|(i, s)| {
        s.index == i
            && s.placements.iter().all(|p| p.sheet_index == i)
            && placements_within_sheet(s, result.kerf())
            && placements_respect_kerf(s, result.kerf())
            && (0.0..=100.0 + 1e-6).contains(&s.utilization())
    });

    let unplaceable_absent = result.unplaceable().iter().all(|u| {
        result
            .sheets()
            .iter()
            .flat_map(|s| s.placements.iter())
            .all(|p| (p.element_id, p.instance) != (u.element_id, u.instance))
    });

    sheets_ok && unplaceable_absent
}
