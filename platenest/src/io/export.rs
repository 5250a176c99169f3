use itertools::Itertools;

use crate::entities::{PlacedPlate, PlateShape, Sheet};
use crate::geometry::primitives::Ring;
use crate::io::ext_repr::{
    ExtNestingResult, ExtPlacedPlate, ExtPlateShape, ExtRing, ExtSheet, ExtStatistics,
    ExtStockUsage, ExtUnplaceable,
};
use crate::nesting::{NestingResult, NestingStatistics, Unplaceable};

pub fn export_ring(ring: &Ring) -> ExtRing {
    ExtRing(ring.points.iter().map(|&p| p.into()).collect())
}

pub fn export_plate_shape(shape: &PlateShape) -> ExtPlateShape {
    ExtPlateShape {
        id: shape.element_id().0,
        name: shape.name(),
        element_type: shape.element_type().to_string(),
        thickness: shape.thickness(),
        width: shape.width(),
        height: shape.height(),
        outer: export_ring(shape.outer()),
        holes: shape.holes().iter().map(export_ring).collect(),
        islands: shape.islands().iter().map(export_ring).collect(),
        net_area: shape.net_area(),
        path: shape.path_description(),
        projection: *shape.projection(),
        origin: shape.origin().clone(),
    }
}

pub fn export_placed_plate(placed: &PlacedPlate) -> ExtPlacedPlate {
    let bbox = placed.bbox();
    ExtPlacedPlate {
        id: placed.element_id.0,
        instance: placed.instance,
        name: placed.shape.name(),
        x: placed.position().0,
        y: placed.position().1,
        rotation: placed.rotation().degrees(),
        width: bbox.width(),
        height: bbox.height(),
        net_area: placed.net_area(),
        path: placed.path_description(),
    }
}

pub fn export_sheet(sheet: &Sheet) -> ExtSheet {
    ExtSheet {
        index: sheet.index,
        stock_index: sheet.stock_index,
        width: sheet.stock.width,
        height: sheet.stock.height,
        placed_area: sheet.placed_area(),
        utilization: sheet.utilization(),
        placements: sheet.placements.iter().map(export_placed_plate).collect(),
    }
}

pub fn export_unplaceable(unplaceable: &Unplaceable) -> ExtUnplaceable {
    ExtUnplaceable {
        id: unplaceable.element_id.0,
        instance: unplaceable.instance,
        name: unplaceable.name.clone(),
        width: unplaceable.width,
        height: unplaceable.height,
        reason: unplaceable.reason.clone(),
    }
}

pub fn export_statistics(stats: &NestingStatistics) -> ExtStatistics {
    ExtStatistics {
        sheets_used: stats.n_sheets,
        nested_plates: stats.n_placed,
        unnested_plates: stats.n_unplaceable,
        total_stock_area_m2: stats.total_stock_area_m2,
        total_used_area_m2: stats.total_used_area_m2,
        waste_area_m2: stats.total_waste_area_m2,
        utilization: stats.utilization,
        waste_percentage: stats.waste_percentage,
        plates_tonnage: stats.plate_tonnage,
        waste_tonnage: stats.waste_tonnage,
        sheets_per_stock: stats
            .sheets_per_stock
            .iter()
            .map(|u| ExtStockUsage {
                width: u.stock.width,
                height: u.stock.height,
                count: u.count,
            })
            .collect(),
    }
}

/// Exports a [`NestingResult`], optionally tagged with the thickness its plates share.
pub fn export_nesting_result(result: &NestingResult, thickness: Option<f64>) -> ExtNestingResult {
    ExtNestingResult {
        thickness,
        kerf: result.kerf(),
        sheets: result.sheets().iter().map(export_sheet).collect_vec(),
        unplaceable: result.unplaceable().iter().map(export_unplaceable).collect_vec(),
        statistics: export_statistics(result.statistics()),
    }
}
