use std::time::Instant;

use anyhow::{Context, Result};
use itertools::Itertools;
use log::{info, warn};
use thousands::Separable;

use platenest::entities::{NestItem, RawMesh};
use platenest::extraction::extract_plates;
use platenest::io::export::{export_nesting_result, export_plate_shape};
use platenest::io::ext_repr::{ExtInstance, ExtNestingResult};
use platenest::io::import;
use platenest::nesting::{nest, nest_by_thickness};

use crate::config::PlateNestConfig;
use crate::io::output::PlateNestSolution;

/// Extracts every mesh of the instance and nests the resulting plates on its stock sizes.
pub fn solve(ext_instance: &ExtInstance, config: &PlateNestConfig) -> Result<PlateNestSolution> {
    let start = Instant::now();
    let unit_scale = import::import_unit_scale(ext_instance);
    let (meshes, quantities): (Vec<RawMesh>, Vec<usize>) =
        import::import_meshes(ext_instance).into_iter().unzip();

    let outcomes = extract_plates(&meshes, &unit_scale, &config.extraction)
        .context("could not extract plate shapes")?;
    for outcome in outcomes.iter().filter(|o| o.failure.is_some()) {
        warn!(
            "[SOLVE] plate {} nested as its bounding box",
            outcome.shape.element_id()
        );
    }

    let items = outcomes
        .iter()
        .zip(quantities)
        .map(|(o, quantity)| NestItem::new(o.shape.clone(), quantity))
        .collect_vec();
    let nest_config =
        import::import_nest_config(ext_instance, config.kerf, config.allow_rotation);

    let results: Vec<ExtNestingResult> = if config.group_by_thickness {
        nest_by_thickness(&items, &nest_config)
            .context("nesting failed")?
            .iter()
            .map(|g| export_nesting_result(&g.result, Some(g.thickness)))
            .collect()
    } else {
        let result = nest(&items, &nest_config).context("nesting failed")?;
        vec![export_nesting_result(&result, None)]
    };

    let n_sheets: usize = results.iter().map(|r| r.statistics.sheets_used).sum();
    let stock_area: f64 = results.iter().map(|r| r.statistics.total_stock_area_m2).sum();
    let tonnage: f64 = results.iter().map(|r| r.statistics.plates_tonnage).sum();
    info!(
        "[SOLVE] {} plates in {} groups on {} sheets, {} m² of stock, {:.3} t of plate",
        items.iter().map(|i| i.quantity).sum::<usize>().separate_with_commas(),
        results.len(),
        n_sheets.separate_with_commas(),
        (stock_area.round() as u64).separate_with_commas(),
        tonnage
    );

    Ok(PlateNestSolution {
        shapes: outcomes.iter().map(|o| export_plate_shape(&o.shape)).collect(),
        results,
        run_time_sec: start.elapsed().as_secs_f64(),
    })
}
