use std::sync::Arc;

use crate::entities::PlateShape;

/// A plate shape together with the number of copies to be cut.
#[derive(Clone, Debug)]
pub struct NestItem {
    pub shape: Arc<PlateShape>,
    pub quantity: usize,
}

impl NestItem {
    pub fn new(shape: impl Into<Arc<PlateShape>>, quantity: usize) -> Self {
        Self {
            shape: shape.into(),
            quantity,
        }
    }
}
