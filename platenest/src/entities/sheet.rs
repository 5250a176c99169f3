use crate::entities::{PlacedPlate, StockSize};

/// A stock sheet of the nesting result with the plates cut from it.
#[derive(Clone, Debug)]
pub struct Sheet {
    pub index: usize,
    pub stock: StockSize,
    /// Position of `stock` in the list of candidate stock sizes
    pub stock_index: usize,
    pub placements: Vec<PlacedPlate>,
}

impl Sheet {
    pub fn area(&self) -> f64 {
        self.stock.area()
    }

    /// Sum of the net (true polygon) area of all placed plates
    pub fn placed_area(&self) -> f64 {
        self.placements.iter().map(PlacedPlate::net_area).sum()
    }

    /// Placed net area as a percentage of the sheet area
    pub fn utilization(&self) -> f64 {
        match self.area() > 0.0 {
            true => self.placed_area() / self.area() * 100.0,
            false => 0.0,
        }
    }

    pub fn waste_area(&self) -> f64 {
        self.area() - self.placed_area()
    }
}
