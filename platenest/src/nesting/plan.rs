use itertools::Itertools;
use log::debug;
use ordered_float::OrderedFloat;

use crate::entities::StockSize;
use crate::nesting::shelf::{PackedSheet, PlateInstance, ShelfPacker, ShelfPlacement};

/// Assignment of all placeable plate instances to sheets, possibly of different stock sizes.
/// Placements refer to the instance list the plan was built for.
#[derive(Clone, Debug, PartialEq)]
pub struct Plan {
    pub sheets: Vec<PackedSheet>,
    pub total_stock_area: f64,
}

impl Plan {
    fn new(sheets: Vec<PackedSheet>, stocks: &[StockSize]) -> Self {
        let total_stock_area = sheets.iter().map(|s| stocks[s.stock_index].area()).sum();
        Self {
            sheets,
            total_stock_area,
        }
    }

    fn cost(&self) -> (OrderedFloat<f64>, usize) {
        (OrderedFloat(self.total_stock_area), self.sheets.len())
    }
}

/// Builds candidate plans for the (sorted) plate instances and picks the cheapest one.
pub struct PlanSearch<'a> {
    instances: &'a [PlateInstance],
    stocks: &'a [StockSize],
    kerf: f64,
    allow_rotation: bool,
}

impl<'a> PlanSearch<'a> {
    pub fn new(
        instances: &'a [PlateInstance],
        stocks: &'a [StockSize],
        kerf: f64,
        allow_rotation: bool,
    ) -> Self {
        Self {
            instances,
            stocks,
            kerf,
            allow_rotation,
        }
    }

    /// Stock indices by ascending area, ties by index
    fn stocks_by_area(&self) -> Vec<usize> {
        (0..self.stocks.len())
            .sorted_by_key(|&i| (OrderedFloat(self.stocks[i].area()), i))
            .collect()
    }

    fn fits(&self, item: usize, stock_index: usize) -> bool {
        self.instances[item].fits(&self.stocks[stock_index], self.kerf, self.allow_rotation)
    }

    /// Full shelf pass of the given instances (indices into the search's instances) on one stock size.
    /// Instances that do not fit are left out.
    fn pass(&self, stock_index: usize, items: &[usize]) -> Vec<PackedSheet> {
        let fitting = items
            .iter()
            .copied()
            .filter(|&i| self.fits(i, stock_index))
            .collect_vec();
        let pass_items = fitting
            .iter()
            .map(|&i| self.instances[i].clone())
            .collect_vec();

        ShelfPacker::new(
            self.stocks[stock_index],
            stock_index,
            self.kerf,
            self.allow_rotation,
        )
        .pack(&pass_items)
        .into_iter()
        .map(|mut sheet| {
            //map back onto the search's instance indices
            sheet.placements.iter_mut().for_each(|p| p.item = fitting[p.item]);
            sheet
        })
        .collect()
    }

    /// Packs `items` on the stock sizes in `order`, each size taking what fits of the remainder.
    fn cascade(&self, items: Vec<usize>, order: &[usize]) -> Vec<PackedSheet> {
        let mut remaining = items;
        let mut sheets = vec![];
        for &stock_index in order {
            if remaining.is_empty() {
                break;
            }
            let packed = self.pass(stock_index, &remaining);
            let placed = placed_items(&packed);
            remaining.retain(|i| placed.binary_search(i).is_err());
            sheets.extend(packed);
        }
        sheets
    }

    /// `first` followed by all other stock sizes, smallest area first
    fn cascade_order(&self, first: usize) -> Vec<usize> {
        std::iter::once(first)
            .chain(self.stocks_by_area().into_iter().filter(|&i| i != first))
            .collect()
    }

    /// Visits all candidate plans in enumeration order:
    /// single-size plans (smallest size first), then mixed plans combining
    /// the first sheets of a larger size with a cascade starting at a smaller size.
    pub fn for_each_candidate(&self, mut visit: impl FnMut(Plan)) {
        let all_items = (0..self.instances.len()).collect_vec();
        let by_area = self.stocks_by_area();

        for &s in &by_area {
            let sheets = self.cascade(all_items.clone(), &self.cascade_order(s));
            visit(Plan::new(sheets, self.stocks));
        }

        for &large in &by_area {
            let large_pass = self.pass(large, &all_items);
            for &small in by_area
                .iter()
                .filter(|&&t| self.stocks[t].area() < self.stocks[large].area())
            {
                for j in 1..large_pass.len() {
                    let kept = &large_pass[..j];
                    let placed = placed_items(kept);
                    let remaining = all_items
                        .iter()
                        .copied()
                        .filter(|i| placed.binary_search(i).is_err())
                        .collect_vec();
                    let mut sheets = kept.to_vec();
                    sheets.extend(self.cascade(remaining, &self.cascade_order(small)));
                    visit(Plan::new(sheets, self.stocks));
                }
            }
        }
    }

    /// Plan with the least total stock area, then the fewest sheets, then the earliest enumerated.
    /// Only the best plan so far is kept while enumerating.
    pub fn best_plan(&self) -> Plan {
        let mut best: Option<Plan> = None;
        let mut n_evaluated = 0;
        self.for_each_candidate(|plan| {
            n_evaluated += 1;
            //strict comparison: ties go to the earlier plan
            if best.as_ref().is_none_or(|b| plan.cost() < b.cost()) {
                best = Some(plan);
            }
        });
        debug!("[NEST] evaluated {n_evaluated} candidate plans");
        best.unwrap_or(Plan {
            sheets: vec![],
            total_stock_area: 0.0,
        })
    }
}

fn placed_items(sheets: &[PackedSheet]) -> Vec<usize> {
    sheets
        .iter()
        .flat_map(|s| s.placements.iter().map(|p: &ShelfPlacement| p.item))
        .sorted()
        .collect()
}
