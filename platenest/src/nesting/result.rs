use serde::{Deserialize, Serialize};

use crate::entities::{ElementId, Sheet, StockSize};

/// Density of structural steel, kg/m³
pub const STEEL_DENSITY: f64 = 7850.0;

/// Thickness assumed for the offcuts of a run without placed plates, mm
pub const DEFAULT_WASTE_THICKNESS: f64 = 10.0;

const MM2_PER_M2: f64 = 1e6;
const MM3_PER_M3: f64 = 1e9;

/// A plate copy that could not be placed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Unplaceable {
    pub element_id: ElementId,
    pub instance: usize,
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub reason: String,
}

/// Number of sheets used of one candidate stock size
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StockUsage {
    pub stock: StockSize,
    pub count: usize,
}

/// Aggregated figures of a nesting result. Areas in mm² unless suffixed with `_m2`, masses in tonnes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NestingStatistics {
    pub n_sheets: usize,
    pub n_placed: usize,
    pub n_unplaceable: usize,
    pub total_stock_area: f64,
    /// Net area of all placed plates
    pub total_used_area: f64,
    pub total_waste_area: f64,
    /// Used area as a percentage of the stock area
    pub utilization: f64,
    pub waste_percentage: f64,
    pub sheets_per_stock: Vec<StockUsage>,
    pub total_stock_area_m2: f64,
    pub total_used_area_m2: f64,
    pub total_waste_area_m2: f64,
    pub plate_tonnage: f64,
    pub waste_tonnage: f64,
}

impl NestingStatistics {
    pub fn new(sheets: &[Sheet], unplaceable: &[Unplaceable], stocks: &[StockSize]) -> Self {
        let total_stock_area: f64 = sheets.iter().map(Sheet::area).sum();
        let total_used_area: f64 = sheets.iter().map(Sheet::placed_area).sum();
        let total_waste_area: f64 = sheets.iter().map(Sheet::waste_area).sum();
        let utilization = match total_stock_area > 0.0 {
            true => total_used_area / total_stock_area * 100.0,
            false => 0.0,
        };

        let placed = || sheets.iter().flat_map(|s| s.placements.iter());
        let n_placed = placed().count();

        let plate_volume: f64 = placed()
            .map(|p| p.net_area() * p.shape.thickness())
            .sum();
        let mean_thickness = match n_placed {
            0 => DEFAULT_WASTE_THICKNESS,
            n => placed().map(|p| p.shape.thickness()).sum::<f64>() / n as f64,
        };
        let tonnes = |volume_mm3: f64| volume_mm3 / MM3_PER_M3 * STEEL_DENSITY / 1000.0;

        let sheets_per_stock = stocks
            .iter()
            .enumerate()
            .map(|(idx, stock)| StockUsage {
                stock: *stock,
                count: sheets.iter().filter(|s| s.stock_index == idx).count(),
            })
            .collect();

        Self {
            n_sheets: sheets.len(),
            n_placed,
            n_unplaceable: unplaceable.len(),
            total_stock_area,
            total_used_area,
            total_waste_area,
            utilization,
            waste_percentage: 100.0 - utilization,
            sheets_per_stock,
            total_stock_area_m2: total_stock_area / MM2_PER_M2,
            total_used_area_m2: total_used_area / MM2_PER_M2,
            total_waste_area_m2: total_waste_area / MM2_PER_M2,
            plate_tonnage: tonnes(plate_volume),
            waste_tonnage: tonnes(total_waste_area * mean_thickness),
        }
    }
}

/// Outcome of one nesting run. Built once, never modified afterwards.
#[derive(Clone, Debug)]
pub struct NestingResult {
    sheets: Vec<Sheet>,
    unplaceable: Vec<Unplaceable>,
    statistics: NestingStatistics,
    kerf: f64,
}

impl NestingResult {
    pub(crate) fn new(
        sheets: Vec<Sheet>,
        unplaceable: Vec<Unplaceable>,
        stocks: &[StockSize],
        kerf: f64,
    ) -> Self {
        let statistics = NestingStatistics::new(&sheets, &unplaceable, stocks);
        Self {
            sheets,
            unplaceable,
            statistics,
            kerf,
        }
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn unplaceable(&self) -> &[Unplaceable] {
        &self.unplaceable
    }

    pub fn statistics(&self) -> &NestingStatistics {
        &self.statistics
    }

    /// Kerf the placements were made with
    pub fn kerf(&self) -> f64 {
        self.kerf
    }

    /// Overall utilization percentage (placed net area / stock area)
    pub fn utilization(&self) -> f64 {
        self.statistics.utilization
    }

    pub fn total_waste_area(&self) -> f64 {
        self.statistics.total_waste_area
    }

    pub fn n_placed(&self) -> usize {
        self.statistics.n_placed
    }
}
