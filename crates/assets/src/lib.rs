//! Content-addressed registry of shapes and materials.
//!
//! A shape here is a cloud of sample points on a canonical surface, the data
//! the collision query consumes. Renderers and the simulation refer to both
//! shapes and materials by handle, never by raw data or file paths.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;
use tempo_common::{MaterialId, ShapeId};

pub mod sample;

pub use sample::{unit_cube_points, unit_sphere_points};

/// A named cloud of sample points on a canonical surface (unit radius or
/// unit half-extent). Body `size` scales it per instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    pub name: String,
    pub samples: Vec<Vec3>,
}

/// A minimal material definition consumed by renderers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub base_color: [f32; 4],
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "default".into(),
            base_color: [0.8, 0.8, 0.8, 1.0],
        }
    }
}

/// Errors from registry operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("shape not found: {0:?}")]
    ShapeNotFound(ShapeId),
    #[error("material not found: {0:?}")]
    MaterialNotFound(MaterialId),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Content-addressed registry of shapes and materials.
///
/// Handles are hashes of the content, so registering the same data twice
/// yields the same handle. The registry persists to JSON for inspection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetStore {
    shapes: BTreeMap<ShapeId, Shape>,
    materials: BTreeMap<MaterialId, Material>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shape and return its handle.
    pub fn register_shape(&mut self, shape: Shape) -> ShapeId {
        let id = shape_hash(&shape);
        tracing::debug!(name = %shape.name, samples = shape.samples.len(), "registered shape");
        self.shapes.insert(id, shape);
        id
    }

    /// Register a material and return its handle.
    pub fn register_material(&mut self, material: Material) -> MaterialId {
        let id = material_hash(&material);
        self.materials.insert(id, material);
        id
    }

    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn get_material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(&id)
    }

    /// Sample cloud of a registered shape, for handing to the collision
    /// query.
    pub fn samples(&self, id: ShapeId) -> Result<&[Vec3], AssetError> {
        self.shapes
            .get(&id)
            .map(|s| s.samples.as_slice())
            .ok_or(AssetError::ShapeNotFound(id))
    }

    /// Total number of registered shapes and materials.
    pub fn len(&self) -> usize {
        self.shapes.len() + self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty() && self.materials.is_empty()
    }

    /// Register the canonical subdivided unit sphere.
    pub fn register_unit_sphere(&mut self, subdivisions: u32) -> ShapeId {
        self.register_shape(Shape {
            name: format!("unit_sphere_{subdivisions}"),
            samples: unit_sphere_points(subdivisions),
        })
    }

    /// Register the canonical unit cube surface lattice.
    pub fn register_unit_cube(&mut self) -> ShapeId {
        self.register_shape(Shape {
            name: "unit_cube".into(),
            samples: unit_cube_points(),
        })
    }

    pub fn register_default_material(&mut self) -> MaterialId {
        self.register_material(Material::default())
    }

    /// Save the registry to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AssetError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load a registry from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let file = std::fs::File::open(path)?;
        let store: Self = serde_json::from_reader(file)?;
        tracing::debug!(
            shapes = store.shapes.len(),
            materials = store.materials.len(),
            "loaded asset registry"
        );
        Ok(store)
    }
}

fn shape_hash(shape: &Shape) -> ShapeId {
    let mut hasher = Sha256::new();
    hasher.update(shape.name.as_bytes());
    hasher.update((shape.samples.len() as u64).to_le_bytes());
    for p in &shape.samples {
        hasher.update(p.x.to_le_bytes());
        hasher.update(p.y.to_le_bytes());
        hasher.update(p.z.to_le_bytes());
    }
    ShapeId(truncate_hash(&hasher.finalize()))
}

fn material_hash(material: &Material) -> MaterialId {
    let mut hasher = Sha256::new();
    hasher.update(material.name.as_bytes());
    for c in &material.base_color {
        hasher.update(c.to_le_bytes());
    }
    MaterialId(truncate_hash(&hasher.finalize()))
}

fn truncate_hash(digest: &[u8]) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

pub fn crate_info() -> &'static str {
    "tempo-assets v0.1.0"
}
