use itertools::Itertools;
use log::info;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::entities::NestItem;
use crate::nesting::engine::NestingEngine;
use crate::nesting::result::NestingResult;
use crate::util::NestConfig;
use crate::Result;

/// Thicknesses are grouped in steps of 0.01 mm
pub const THICKNESS_STEPS_PER_MM: f64 = 100.0;

/// Nesting result of all plates sharing one thickness.
#[derive(Clone, Debug)]
pub struct ThicknessGroup {
    /// Nominal thickness of the group, rounded to [`THICKNESS_STEPS_PER_MM`]
    pub thickness: f64,
    pub result: NestingResult,
}

/// Measured thicknesses carry float noise, plates within the same 0.01 mm step share a group
pub fn thickness_key(thickness: f64) -> i64 {
    (thickness * THICKNESS_STEPS_PER_MM).round() as i64
}

/// Plates of a different thickness are never cut from the same sheet.
/// Nests every thickness separately (concurrently with the `parallel` feature), thinnest first.
pub fn nest_by_thickness(items: &[NestItem], config: &NestConfig) -> Result<Vec<ThicknessGroup>> {
    let engine = NestingEngine::new(config.clone())?;

    let groups = items
        .iter()
        .cloned()
        .into_group_map_by(|i| thickness_key(i.shape.thickness()))
        .into_iter()
        .sorted_by_key(|(key, _)| *key)
        .collect_vec();

    info!("[NEST] nesting {} thickness groups", groups.len());

    let run = |(key, items): &(i64, Vec<NestItem>)| {
        engine.nest(items).map(|result| ThicknessGroup {
            thickness: *key as f64 / THICKNESS_STEPS_PER_MM,
            result,
        })
    };

    #[cfg(feature = "parallel")]
    let results: Result<Vec<ThicknessGroup>> = groups.par_iter().map(run).collect();
    #[cfg(not(feature = "parallel"))]
    let results: Result<Vec<ThicknessGroup>> = groups.iter().map(run).collect();

    results
}
