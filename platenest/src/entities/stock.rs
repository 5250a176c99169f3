use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::geometry::geo_enums::Rotation;

/// Size of a raw stock sheet, available in unlimited supply.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StockSize {
    pub width: f64,
    pub height: f64,
}

impl StockSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Whether a `width` x `height` box, kept `kerf` away from every sheet edge, fits on the sheet
    pub fn admits(&self, width: f64, height: f64, kerf: f64) -> bool {
        width + 2.0 * kerf <= self.width && height + 2.0 * kerf <= self.height
    }

    /// Orientations in which a `width` x `height` box fits on the sheet
    pub fn admitted_rotations(
        &self,
        width: f64,
        height: f64,
        kerf: f64,
        allow_rotation: bool,
    ) -> Vec<Rotation> {
        let candidates: &[Rotation] = match allow_rotation {
            true => &[Rotation::Deg0, Rotation::Deg90],
            false => &[Rotation::Deg0],
        };
        candidates
            .iter()
            .copied()
            .filter(|r| {
                let (w, h) = r.apply_to_dims(width, height);
                self.admits(w, h, kerf)
            })
            .collect()
    }
}

impl Display for StockSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
