use serde::{Deserialize, Serialize};

use platenest::io::ext_repr::{ExtNestingResult, ExtPlateShape};

use crate::config::PlateNestConfig;

/// Extracted shapes and nesting results of a single run
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PlateNestSolution {
    pub shapes: Vec<ExtPlateShape>,
    /// One result per thickness group, or a single one if plates were nested together
    pub results: Vec<ExtNestingResult>,
    /// Seconds since the start of the run
    pub run_time_sec: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PlateNestOutput {
    pub instance: String,
    pub solution: PlateNestSolution,
    pub config: PlateNestConfig,
}
