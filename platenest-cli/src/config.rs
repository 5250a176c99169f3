use serde::{Deserialize, Serialize};

use platenest::util::ExtractionConfig;

/// Configuration of a full extraction and nesting run
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct PlateNestConfig {
    /// Configuration of the 3D to 2D plate extraction
    pub extraction: ExtractionConfig,
    /// Minimum spacing between plates and between plates and sheet edges, in mm
    pub kerf: f64,
    /// Whether plates may be placed rotated by 90°
    pub allow_rotation: bool,
    /// Nest every plate thickness separately. If false, all plates are nested together
    pub group_by_thickness: bool,
}

impl Default for PlateNestConfig {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            kerf: 0.0,
            allow_rotation: true,
            group_by_thickness: true,
        }
    }
}
