//! Mesh validation utilities.
//!
//! Checks renderer geometry integrity: buffer strides, index ranges, finite
//! positions, unit normals and extents.

use crate::viewport::mesh::{Aabb, GeometryMesh, LineMeshData, MeshData};

/// Validator for triangle `MeshData`
pub struct MeshValidator<'a> {
    mesh: &'a MeshData,
}

impl<'a> MeshValidator<'a> {
    pub fn new(mesh: &'a MeshData) -> Self {
        Self { mesh }
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    /// Vertex buffer length is a multiple of the 9-float stride
    pub fn is_stride_valid(&self) -> bool {
        self.mesh.vertices.len() % 9 == 0
    }

    pub fn is_index_stride_valid(&self) -> bool {
        self.mesh.indices.len() % 3 == 0
    }

    pub fn are_indices_in_range(&self) -> bool {
        let max_idx = self.vertex_count() as u32;
        self.mesh.indices.iter().all(|&i| i < max_idx)
    }

    pub fn are_positions_finite(&self) -> bool {
        self.mesh
            .vertices
            .chunks_exact(9)
            .all(|v| v[..3].iter().all(|c| c.is_finite()))
    }

    /// All vertex normals have unit length (within epsilon)
    pub fn are_normals_normalized(&self, epsilon: f32) -> bool {
        self.mesh.vertices.chunks_exact(9).all(|v| {
            let len = (v[3] * v[3] + v[4] * v[4] + v[5] * v[5]).sqrt();
            (len - 1.0).abs() <= epsilon
        })
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_mesh(self.mesh)
    }

    /// Extent (width, height, depth) of the bounding box
    pub fn dimensions(&self) -> [f32; 3] {
        self.aabb().size().to_array()
    }

    pub fn dimensions_approx(&self, expected: [f32; 3], tolerance: f32) -> bool {
        let dims = self.dimensions();
        dims.iter()
            .zip(expected)
            .all(|(d, e)| (d - e).abs() < tolerance)
    }

    /// Run all checks. An empty list means the mesh is valid.
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.is_stride_valid() {
            errors.push(format!(
                "Vertex buffer length {} is not a multiple of 9",
                self.mesh.vertices.len()
            ));
        }
        if !self.is_index_stride_valid() {
            errors.push(format!(
                "Index buffer length {} is not a multiple of 3",
                self.mesh.indices.len()
            ));
        }
        if !self.are_indices_in_range() {
            let max_idx = self.vertex_count() as u32;
            let out_of_range: Vec<_> = self
                .mesh
                .indices
                .iter()
                .filter(|&&i| i >= max_idx)
                .take(5)
                .collect();
            errors.push(format!(
                "Indices out of range (vertex_count={max_idx}): {out_of_range:?}"
            ));
        }
        if !self.are_positions_finite() {
            errors.push("Some positions are not finite".to_string());
        }
        if self.vertex_count() > 0 && !self.are_normals_normalized(0.1) {
            errors.push("Some normals are not unit-length (epsilon=0.1)".to_string());
        }
        if self.triangle_count() == 0 {
            errors.push("Mesh has no triangles".to_string());
        }

        errors
    }
}

/// Checks for plan line lists (7 floats per vertex, two vertices per line)
pub fn validate_lines(lines: &LineMeshData) -> Vec<String> {
    let mut errors = Vec::new();
    if lines.vertices.len() % 14 != 0 {
        errors.push(format!(
            "Line buffer length {} is not a multiple of 14",
            lines.vertices.len()
        ));
    }
    if !lines.vertices.iter().all(|c| c.is_finite()) {
        errors.push("Some line vertices are not finite".to_string());
    }
    errors
}

/// Validate either kind of renderer geometry
pub fn validate_geometry(mesh: &GeometryMesh) -> Vec<String> {
    match mesh {
        GeometryMesh::Triangles(mesh) => MeshValidator::new(mesh).validate_all(),
        GeometryMesh::Lines(lines) => validate_lines(lines),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::default_dimensions;
    use crate::viewport::mesh::build_mesh;
    use shared::PrimitiveKind;

    fn simple_triangle() -> MeshData {
        MeshData {
            vertices: vec![
                0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, //
                1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, //
                0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0,
            ],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn test_valid_triangle() {
        let mesh = simple_triangle();
        let v = MeshValidator::new(&mesh);
        assert!(v.validate_all().is_empty());
        assert!(v.dimensions_approx([1.0, 1.0, 0.0], 1e-6));
    }

    #[test]
    fn test_index_out_of_range() {
        let mut mesh = simple_triangle();
        mesh.indices[2] = 7;
        let errors = MeshValidator::new(&mesh).validate_all();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("out of range"));
    }

    #[test]
    fn test_non_finite_position() {
        let mut mesh = simple_triangle();
        mesh.vertices[0] = f32::NAN;
        assert!(!MeshValidator::new(&mesh).are_positions_finite());
    }

    #[test]
    fn test_bad_line_stride() {
        let lines = LineMeshData {
            vertices: vec![0.0; 10],
        };
        assert_eq!(validate_lines(&lines).len(), 1);
    }

    #[test]
    fn test_every_generative_kind_is_valid() {
        for kind in PrimitiveKind::generative() {
            let mesh = build_mesh(&default_dimensions(*kind));
            let errors = validate_geometry(&mesh);
            assert!(errors.is_empty(), "{kind:?}: {errors:?}");
        }
    }
}
