use std::cmp::Reverse;
use std::time::Instant;

use itertools::Itertools;
use log::{debug, info, warn};
use ordered_float::OrderedFloat;

use crate::entities::{NestItem, PlacedPlate, Sheet};
use crate::nesting::plan::PlanSearch;
use crate::nesting::result::{NestingResult, Unplaceable};
use crate::nesting::shelf::PlateInstance;
use crate::util::{NestConfig, assertions};
use crate::{NestError, Result};

/// Deterministic largest-first shelf nesting of plates on candidate stock sizes.
#[derive(Clone, Debug)]
pub struct NestingEngine {
    config: NestConfig,
}

impl NestingEngine {
    pub fn new(config: NestConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &NestConfig {
        &self.config
    }

    /// Nests all copies of all items. Plates fitting no stock size are reported as unplaceable.
    pub fn nest(&self, items: &[NestItem]) -> Result<NestingResult> {
        if let Some(item) = items.iter().find(|i| i.quantity == 0) {
            return Err(NestError::Configuration(format!(
                "quantity of plate {} must be at least 1",
                item.shape.element_id()
            )));
        }
        let start = Instant::now();
        let NestConfig {
            stock_sizes,
            kerf,
            allow_rotation,
        } = &self.config;

        let (placeable, unplaceable): (Vec<PlateInstance>, Vec<PlateInstance>) =
            placement_order(items)
                .into_iter()
                .partition(|i| stock_sizes.iter().any(|s| i.fits(s, *kerf, *allow_rotation)));

        let unplaceable = unplaceable
            .into_iter()
            .map(|i| {
                let err = NestError::PlacementInfeasible {
                    element_id: i.shape.element_id(),
                };
                warn!("[NEST] {err} ({:.1}x{:.1})", i.shape.width(), i.shape.height());
                Unplaceable {
                    element_id: i.shape.element_id(),
                    instance: i.instance,
                    name: i.shape.name(),
                    width: i.shape.width(),
                    height: i.shape.height(),
                    reason: "exceeds all candidate stock sizes".to_string(),
                }
            })
            .collect_vec();

        let plan = PlanSearch::new(&placeable, stock_sizes, *kerf, *allow_rotation).best_plan();

        let sheets = plan
            .sheets
            .into_iter()
            .enumerate()
            .map(|(index, packed)| {
                let stock = stock_sizes[packed.stock_index];
                let placements = packed
                    .placements
                    .iter()
                    .map(|p| {
                        let item = &placeable[p.item];
                        let placed =
                            PlacedPlate::new(item.shape.clone(), item.instance, index, p.rotation, p.position);
                        debug!(
                            "[NEST] placed plate {} ({}) on sheet {index} ({stock}), {}",
                            placed.element_id, placed.instance, placed.transform
                        );
                        placed
                    })
                    .collect();
                Sheet {
                    index,
                    stock,
                    stock_index: packed.stock_index,
                    placements,
                }
            })
            .collect_vec();

        let result = NestingResult::new(sheets, unplaceable, stock_sizes, *kerf);
        debug_assert!(assertions::result_is_consistent(&result));
        info!(
            "[NEST] nested {} plates on {} sheets in {:.3}ms, utilization {:.2}%, {} unplaceable",
            result.n_placed(),
            result.sheets().len(),
            start.elapsed().as_secs_f64() * 1000.0,
            result.utilization(),
            result.unplaceable().len()
        );
        Ok(result)
    }
}

/// Validates `config` and nests `items` in a single call
pub fn nest(items: &[NestItem], config: &NestConfig) -> Result<NestingResult> {
    NestingEngine::new(config.clone())?.nest(items)
}

/// All plate copies, largest bounding box first. Ties by element id, then copy.
pub fn placement_order(items: &[NestItem]) -> Vec<PlateInstance> {
    items
        .iter()
        .flat_map(|item| {
            (0..item.quantity).map(|instance| PlateInstance {
                shape: item.shape.clone(),
                instance,
            })
        })
        .sorted_by_key(|i| {
            (
                Reverse(OrderedFloat(i.shape.bbox_area())),
                i.shape.element_id(),
                i.instance,
            )
        })
        .collect()
}
