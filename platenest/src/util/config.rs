use serde::{Deserialize, Serialize};

use crate::NestError;
use crate::entities::StockSize;

///Configuration of the 3D to 2D plate extraction
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct ExtractionConfig {
    ///If the smallest and largest bounding box extents of a mesh differ by less than this fraction,
    ///the mesh is considered isotropic and all three projection axes are evaluated
    pub isotropy_tolerance: f64,
    ///Projected points closer than this fraction of the point set's diagonal are welded together
    pub weld_tolerance: f64,
    ///Triangles with a circumradius larger than `alpha` times the median edge length are treated as gaps.
    ///Empirical value, validate per model source. `None` disables gap detection
    pub alpha: Option<f64>,
    ///Gap detection is skipped when the flagged triangles would cover more than this fraction of the projected area
    pub max_gap_area_ratio: f64,
    ///Rings outside the exterior boundary with an area below this fraction of the exterior's area are discarded as mesh noise
    pub noise_area_ratio: f64,
    ///Projected triangles with an area below this fraction of the squared diagonal are considered degenerate (side walls)
    pub min_triangle_area_ratio: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            isotropy_tolerance: 0.05,
            weld_tolerance: 1e-9,
            alpha: Some(25.0),
            max_gap_area_ratio: 0.5,
            noise_area_ratio: 0.001,
            min_triangle_area_ratio: 1e-12,
        }
    }
}

impl ExtractionConfig {
    /// Checks the configuration before any computation starts
    pub fn validate(&self) -> Result<(), NestError> {
        let ratios = [
            ("isotropy_tolerance", self.isotropy_tolerance),
            ("weld_tolerance", self.weld_tolerance),
            ("max_gap_area_ratio", self.max_gap_area_ratio),
            ("noise_area_ratio", self.noise_area_ratio),
            ("min_triangle_area_ratio", self.min_triangle_area_ratio),
        ];
        if let Some((name, value)) = ratios.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Err(NestError::Configuration(format!(
                "{name} must be a non-negative number, got {value}"
            )));
        }
        match self.alpha {
            Some(alpha) if !alpha.is_finite() || alpha <= 0.0 => Err(NestError::Configuration(
                format!("alpha must be a positive number, got {alpha}"),
            )),
            _ => Ok(()),
        }
    }
}

///Configuration of a single nesting run
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NestConfig {
    ///Candidate stock sheet sizes, unlimited supply of each
    pub stock_sizes: Vec<StockSize>,
    ///Minimum spacing between any two placed plates and between a plate and the sheet edges
    #[serde(default)]
    pub kerf: f64,
    ///Whether plates may be placed rotated by 90°
    #[serde(default = "default_allow_rotation")]
    pub allow_rotation: bool,
}

fn default_allow_rotation() -> bool {
    true
}

impl NestConfig {
    pub fn new(stock_sizes: Vec<StockSize>, kerf: f64, allow_rotation: bool) -> Self {
        Self {
            stock_sizes,
            kerf,
            allow_rotation,
        }
    }

    /// Checks the configuration before any computation starts
    pub fn validate(&self) -> Result<(), NestError> {
        if self.stock_sizes.is_empty() {
            return Err(NestError::Configuration(
                "no candidate stock sizes supplied".to_string(),
            ));
        }
        if !self.kerf.is_finite() || self.kerf < 0.0 {
            return Err(NestError::Configuration(format!(
                "kerf must be a non-negative number, got {}",
                self.kerf
            )));
        }
        if let Some(s) = self
            .stock_sizes
            .iter()
            .find(|s| !(s.width.is_finite() && s.height.is_finite() && s.width > 0.0 && s.height > 0.0))
        {
            return Err(NestError::Configuration(format!(
                "stock size {s} must have a positive width and height"
            )));
        }
        Ok(())
    }
}
