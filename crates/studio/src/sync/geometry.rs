//! Renderer geometry with its recorded construction parameters

use shared::Dimensions;

use super::resources::{GeometryHandle, ResourceLedger};
use crate::viewport::mesh::{build_mesh, Aabb, GeometryMesh};

/// Built geometry. `params` are the dimensions it was constructed from and
/// are the only thing rebuild decisions compare against.
#[derive(Debug)]
pub struct Geometry {
    pub handle: GeometryHandle,
    pub params: Dimensions,
    pub mesh: GeometryMesh,
}

impl Geometry {
    pub fn build(dimensions: &Dimensions, ledger: &mut ResourceLedger) -> Self {
        Self {
            handle: ledger.allocate(),
            params: dimensions.clone(),
            mesh: build_mesh(dimensions),
        }
    }

    /// Whether this geometry was built from exactly `dimensions`
    pub fn matches(&self, dimensions: &Dimensions) -> bool {
        self.params == *dimensions
    }

    pub fn release(self, ledger: &mut ResourceLedger) {
        ledger.release(self.handle);
    }

    pub fn aabb(&self) -> Option<Aabb> {
        match &self.mesh {
            GeometryMesh::Triangles(mesh) if !mesh.vertices.is_empty() => {
                Some(Aabb::from_mesh(mesh))
            }
            _ => None,
        }
    }
}
