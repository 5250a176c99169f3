use std::sync::Arc;

use ordered_float::OrderedFloat;

use crate::entities::{PlateShape, StockSize};
use crate::geometry::geo_enums::Rotation;
use crate::geometry::primitives::Point;

/// One copy of a plate waiting to be nested.
#[derive(Clone, Debug)]
pub struct PlateInstance {
    pub shape: Arc<PlateShape>,
    /// Which copy of the plate this is, `0..quantity`
    pub instance: usize,
}

impl PlateInstance {
    pub fn fits(&self, stock: &StockSize, kerf: f64, allow_rotation: bool) -> bool {
        !stock
            .admitted_rotations(self.shape.width(), self.shape.height(), kerf, allow_rotation)
            .is_empty()
    }
}

/// Placement decided by a shelf pass, referring to the pass's input by index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShelfPlacement {
    pub item: usize,
    pub rotation: Rotation,
    /// Lower-left corner of the placed bounding box
    pub position: Point,
}

/// A sheet filled by a shelf pass.
#[derive(Clone, Debug, PartialEq)]
pub struct PackedSheet {
    pub stock_index: usize,
    pub placements: Vec<ShelfPlacement>,
}

/// Horizontal band of a sheet, filled from left to right.
#[derive(Clone, Copy, Debug)]
struct Row {
    y: f64,
    height: f64,
    /// Left edge of the next plate in this row
    x_cursor: f64,
}

/// Where (and at what cost) a plate would go in the current state of the pass.
#[derive(Clone, Copy, Debug)]
enum Slot {
    ExistingRow(usize),
    NewRow,
    NewSheet,
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    rotation: Rotation,
    slot: Slot,
    /// (opens a new sheet, growth of the used sheet height, width consumed)
    footprint: (bool, OrderedFloat<f64>, OrderedFloat<f64>),
}

/// Greedy row (shelf) packer filling sheets of a single stock size one after another.
pub struct ShelfPacker {
    stock: StockSize,
    stock_index: usize,
    kerf: f64,
    allow_rotation: bool,
    sheets: Vec<PackedSheet>,
    rows: Vec<Row>,
}

impl ShelfPacker {
    pub fn new(stock: StockSize, stock_index: usize, kerf: f64, allow_rotation: bool) -> Self {
        Self {
            stock,
            stock_index,
            kerf,
            allow_rotation,
            sheets: vec![],
            rows: vec![],
        }
    }

    /// Places `items` in the given order. Items that do not fit the stock size are skipped.
    pub fn pack(mut self, items: &[PlateInstance]) -> Vec<PackedSheet> {
        for (idx, item) in items.iter().enumerate() {
            let (width, height) = (item.shape.width(), item.shape.height());
            let best = self
                .stock
                .admitted_rotations(width, height, self.kerf, self.allow_rotation)
                .into_iter()
                .map(|rotation| {
                    let (w, h) = rotation.apply_to_dims(width, height);
                    self.candidate(rotation, w, h)
                })
                .min_by_key(|c| c.footprint);

            if let Some(candidate) = best {
                let (w, h) = candidate.rotation.apply_to_dims(width, height);
                self.place(idx, candidate, w, h);
            }
        }
        self.sheets
    }

    fn used_height(&self) -> f64 {
        self.rows.last().map_or(0.0, |r| r.y + r.height)
    }

    fn row_admits(&self, row_idx: usize, w: f64, h: f64) -> bool {
        let row = &self.rows[row_idx];
        let is_top = row_idx + 1 == self.rows.len();
        let width_ok = row.x_cursor + w + self.kerf <= self.stock.width;
        let height_ok = h <= row.height || (is_top && row.y + h + self.kerf <= self.stock.height);
        width_ok && height_ok
    }

    fn new_row_y(&self) -> f64 {
        self.rows
            .last()
            .map_or(self.kerf, |r| r.y + r.height + self.kerf)
    }

    fn candidate(&self, rotation: Rotation, w: f64, h: f64) -> Candidate {
        let used = self.used_height();
        let no_sheet = self.sheets.is_empty();

        if !no_sheet {
            if let Some(row_idx) = (0..self.rows.len()).find(|&i| self.row_admits(i, w, h)) {
                let row = &self.rows[row_idx];
                let growth = (row.y + h - used).max(0.0);
                return Candidate {
                    rotation,
                    slot: Slot::ExistingRow(row_idx),
                    footprint: (false, OrderedFloat(growth), OrderedFloat(w)),
                };
            }
            let y = self.new_row_y();
            if y + h + self.kerf <= self.stock.height {
                return Candidate {
                    rotation,
                    slot: Slot::NewRow,
                    footprint: (false, OrderedFloat(y + h - used), OrderedFloat(w)),
                };
            }
        }
        Candidate {
            rotation,
            slot: Slot::NewSheet,
            footprint: (true, OrderedFloat(self.kerf + h), OrderedFloat(w)),
        }
    }

    fn place(&mut self, item: usize, candidate: Candidate, w: f64, h: f64) {
        let row_idx = match candidate.slot {
            Slot::ExistingRow(row_idx) => row_idx,
            Slot::NewRow => {
                let y = self.new_row_y();
                self.rows.push(Row {
                    y,
                    height: 0.0,
                    x_cursor: self.kerf,
                });
                self.rows.len() - 1
            }
            Slot::NewSheet => {
                self.sheets.push(PackedSheet {
                    stock_index: self.stock_index,
                    placements: vec![],
                });
                self.rows = vec![Row {
                    y: self.kerf,
                    height: 0.0,
                    x_cursor: self.kerf,
                }];
                0
            }
        };

        let row = &mut self.rows[row_idx];
        let position = Point(row.x_cursor, row.y);
        row.x_cursor += w + self.kerf;
        row.height = row.height.max(h);

        if let Some(sheet) = self.sheets.last_mut() {
            sheet.placements.push(ShelfPlacement {
                item,
                rotation: candidate.rotation,
                position,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packer() -> ShelfPacker {
        ShelfPacker::new(StockSize::new(100.0, 50.0), 0, 0.0, true)
    }

    #[test]
    fn first_row_starts_at_kerf() {
        let p = ShelfPacker::new(StockSize::new(100.0, 50.0), 0, 2.0, true);
        assert_eq!(p.new_row_y(), 2.0);
    }

    #[test]
    fn new_sheet_is_the_only_option_for_an_empty_pass() {
        let c = packer().candidate(Rotation::Deg0, 10.0, 10.0);
        assert!(matches!(c.slot, Slot::NewSheet));
        assert!(c.footprint.0);
    }
}
