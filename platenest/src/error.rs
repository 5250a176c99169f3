use thiserror::Error;

use crate::entities::ElementId;

/// Errors raised by the extraction and nesting core.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NestError {
    /// The mesh of an element could not be reduced to a plate shape with positive area.
    #[error("geometry extraction failed for element {element_id}: {reason}")]
    GeometryExtraction { element_id: ElementId, reason: String },
    /// A plate does not fit on any of the candidate stock sizes.
    #[error("plate {element_id} exceeds all candidate stock sizes")]
    PlacementInfeasible { element_id: ElementId },
    /// Invalid input configuration, detected before any computation starts.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl NestError {
    pub fn extraction(element_id: ElementId, reason: impl Into<String>) -> Self {
        NestError::GeometryExtraction {
            element_id,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NestError>;
