use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};

use crate::entities::{ElementId, PlateShape, RawMesh};
use crate::extraction::builder::extract_plate;
use crate::extraction::unit_scale::UnitScale;
use crate::util::ExtractionConfig;
use crate::Result;

/// Cache of extracted plate shapes, owned by the caller and keyed by element id.
///
/// Meshes of an element that was already extracted are not processed again.
#[derive(Debug)]
pub struct ExtractionSession {
    config: ExtractionConfig,
    unit_scale: UnitScale,
    shapes: HashMap<ElementId, Arc<PlateShape>>,
    n_cache_hits: usize,
}

impl ExtractionSession {
    pub fn new(config: ExtractionConfig, unit_scale: UnitScale) -> Result<Self> {
        unit_scale.validate()?;
        config.validate()?;
        Ok(Self {
            config,
            unit_scale,
            shapes: HashMap::new(),
            n_cache_hits: 0,
        })
    }

    /// Shape of the mesh's element, extracting it on first request.
    /// Extraction failures are replaced by the bounding box fallback.
    pub fn extract(&mut self, mesh: &RawMesh) -> Arc<PlateShape> {
        if let Some(shape) = self.shapes.get(&mesh.element_id) {
            debug!("[EXTRACT] element {} served from session", mesh.element_id);
            self.n_cache_hits += 1;
            return shape.clone();
        }
        let shape = match extract_plate(mesh, &self.unit_scale, &self.config) {
            Ok(shape) => shape,
            Err(err) => {
                warn!("[EXTRACT] {err}, falling back to the bounding box");
                let scale = self.unit_scale.resolve(mesh);
                PlateShape::bounding_box_fallback(mesh, &self.config, scale, err.to_string())
            }
        };
        let shape = Arc::new(shape);
        self.shapes.insert(mesh.element_id, shape.clone());
        shape
    }

    pub fn get(&self, element_id: ElementId) -> Option<Arc<PlateShape>> {
        self.shapes.get(&element_id).cloned()
    }

    /// All cached shapes, ordered by element id
    pub fn shapes(&self) -> Vec<Arc<PlateShape>> {
        let mut shapes: Vec<_> = self.shapes.values().cloned().collect();
        shapes.sort_by_key(|s| s.element_id());
        shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn n_cache_hits(&self) -> usize {
        self.n_cache_hits
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
        self.n_cache_hits = 0;
    }
}
