//! CPU-side geometry for the renderer mirror.
//!
//! Every generator produces geometry in the object's local frame, centered on
//! the origin. Flat kinds (plane, polygon, torus) are built in the XY plane and
//! laid down by the object's resting rotation.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use shared::{Dimensions, LineSegment2D};

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z, r, g, b]
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    /// 9 floats per vertex: position(3) + normal(3) + color(3)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 9
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Lines mesh: interleaved [pos.x, pos.y, pos.z, r, g, b, a], two vertices per line
#[derive(Debug, Clone, PartialEq)]
pub struct LineMeshData {
    /// 7 floats per vertex: position(3) + color(4)
    pub vertices: Vec<f32>,
}

impl LineMeshData {
    pub fn line_count(&self) -> usize {
        self.vertices.len() / 14
    }
}

/// Axis-aligned bounding box of a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Compute AABB from MeshData (9 floats per vertex: pos+normal+color)
    pub fn from_mesh(data: &MeshData) -> Self {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);

        for v in data.vertices.chunks_exact(9) {
            let p = Vec3::new(v[0], v[1], v[2]);
            min = min.min(p);
            max = max.max(p);
        }

        Self { min, max }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Neutral vertex color; surface color comes from the bound material
pub const BASE_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
/// Line color for imported plans
pub const PLAN_LINE_COLOR: [f32; 4] = [0.1, 0.1, 0.1, 1.0];

/// Geometry for one set of dimensions
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryMesh {
    Triangles(MeshData),
    Lines(LineMeshData),
}

/// Build the renderer geometry for `dimensions`
pub fn build_mesh(dimensions: &Dimensions) -> GeometryMesh {
    let c = BASE_COLOR;
    match dimensions {
        Dimensions::Box {
            width,
            height,
            depth,
        } => GeometryMesh::Triangles(cube(*width as f32, *height as f32, *depth as f32, c)),
        Dimensions::Cylinder {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
        } => GeometryMesh::Triangles(cylinder(
            *radius_top as f32,
            *radius_bottom as f32,
            *height as f32,
            *radial_segments,
            c,
        )),
        Dimensions::Plane { width, depth } => {
            GeometryMesh::Triangles(plane(*width as f32, *depth as f32, c))
        }
        Dimensions::Sphere {
            radius,
            width_segments,
            height_segments,
        } => GeometryMesh::Triangles(sphere(*radius as f32, *height_segments, *width_segments, c)),
        Dimensions::Cone {
            radius,
            height,
            radial_segments,
        } => GeometryMesh::Triangles(cone(*radius as f32, *height as f32, *radial_segments, c)),
        Dimensions::Torus {
            radius,
            tube,
            radial_segments,
            tubular_segments,
        } => GeometryMesh::Triangles(torus(
            *radius as f32,
            *tube as f32,
            *radial_segments,
            *tubular_segments,
            c,
        )),
        Dimensions::Polygon { radius, sides } => {
            GeometryMesh::Triangles(polygon(*radius as f32, *sides, c))
        }
        Dimensions::Text { text, size, depth } => {
            GeometryMesh::Triangles(text_placeholder(text, *size as f32, *depth as f32, c))
        }
        Dimensions::CadPlan(plan) => GeometryMesh::Lines(plan_lines(&plan.segments)),
    }
}

pub fn cube(w: f32, h: f32, d: f32, color: [f32; 3]) -> MeshData {
    let hw = w * 0.5;
    let hh = h * 0.5;
    let hd = d * 0.5;

    let faces: [([Vec3; 4], Vec3); 6] = [
        // Front (+Z)
        ([Vec3::new(-hw, -hh, hd), Vec3::new(hw, -hh, hd), Vec3::new(hw, hh, hd), Vec3::new(-hw, hh, hd)], Vec3::Z),
        // Back (-Z)
        ([Vec3::new(hw, -hh, -hd), Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, hh, -hd), Vec3::new(hw, hh, -hd)], Vec3::NEG_Z),
        // Right (+X)
        ([Vec3::new(hw, -hh, hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, hh, -hd), Vec3::new(hw, hh, hd)], Vec3::X),
        // Left (-X)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, -hh, hd), Vec3::new(-hw, hh, hd), Vec3::new(-hw, hh, -hd)], Vec3::NEG_X),
        // Top (+Y)
        ([Vec3::new(-hw, hh, hd), Vec3::new(hw, hh, hd), Vec3::new(hw, hh, -hd), Vec3::new(-hw, hh, -hd)], Vec3::Y),
        // Bottom (-Y)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, -hh, hd), Vec3::new(-hw, -hh, hd)], Vec3::NEG_Y),
    ];

    let mut vertices = Vec::with_capacity(24 * 9);
    let mut indices = Vec::with_capacity(36);

    for (quad, normal) in &faces {
        let base = (vertices.len() / 9) as u32;
        for v in quad {
            push_vert(&mut vertices, v.x, v.y, v.z, *normal, color);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

/// Frustum with independent top and bottom radii
pub fn cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    segments: u32,
    color: [f32; 3],
) -> MeshData {
    let hh = height * 0.5;
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    // Side normals tilt by the radius difference
    let slope = (radius_bottom - radius_top) / height;
    for i in 0..segments {
        let a0 = (i as f32) * TAU / segments as f32;
        let a1 = ((i + 1) as f32) * TAU / segments as f32;

        let c0 = a0.cos();
        let s0 = a0.sin();
        let c1 = a1.cos();
        let s1 = a1.sin();

        let n0 = Vec3::new(c0, slope, s0).normalize();
        let n1 = Vec3::new(c1, slope, s1).normalize();

        let base = (vertices.len() / 9) as u32;

        push_vert(&mut vertices, radius_bottom * c0, -hh, radius_bottom * s0, n0, color);
        push_vert(&mut vertices, radius_bottom * c1, -hh, radius_bottom * s1, n1, color);
        push_vert(&mut vertices, radius_top * c1, hh, radius_top * s1, n1, color);
        push_vert(&mut vertices, radius_top * c0, hh, radius_top * s0, n0, color);

        indices.extend_from_slice(&[base, base + 2, base + 1, base, base + 3, base + 2]);
    }

    add_cap(&mut vertices, &mut indices, radius_top, hh, segments, Vec3::Y, color);
    add_cap_reversed(&mut vertices, &mut indices, radius_bottom, -hh, segments, Vec3::NEG_Y, color);

    MeshData { vertices, indices }
}

pub fn sphere(radius: f32, rings: u32, sectors: u32, color: [f32; 3]) -> MeshData {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for r in 0..=rings {
        let phi = PI * r as f32 / rings as f32;
        let sp = phi.sin();
        let cp = phi.cos();

        for s in 0..=sectors {
            let theta = TAU * s as f32 / sectors as f32;
            let x = sp * theta.cos();
            let y = cp;
            let z = sp * theta.sin();

            push_vert(&mut vertices, radius * x, radius * y, radius * z, Vec3::new(x, y, z), color);
        }
    }

    for r in 0..rings {
        for s in 0..sectors {
            let i0 = r * (sectors + 1) + s;
            let i1 = i0 + 1;
            let i2 = i0 + sectors + 1;
            let i3 = i2 + 1;
            indices.extend_from_slice(&[i0, i1, i2, i1, i3, i2]);
        }
    }

    MeshData { vertices, indices }
}

pub fn cone(radius: f32, height: f32, segments: u32, color: [f32; 3]) -> MeshData {
    let hh = height * 0.5;
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    let slope = radius / height;
    for i in 0..segments {
        let a0 = (i as f32) * TAU / segments as f32;
        let a1 = ((i + 1) as f32) * TAU / segments as f32;

        let c0 = a0.cos();
        let s0 = a0.sin();
        let c1 = a1.cos();
        let s1 = a1.sin();

        let n0 = Vec3::new(c0, slope, s0).normalize();
        let n1 = Vec3::new(c1, slope, s1).normalize();
        let n_top = (n0 + n1).normalize();

        let base = (vertices.len() / 9) as u32;

        push_vert(&mut vertices, 0.0, hh, 0.0, n_top, color); // apex
        push_vert(&mut vertices, radius * c0, -hh, radius * s0, n0, color);
        push_vert(&mut vertices, radius * c1, -hh, radius * s1, n1, color);

        indices.extend_from_slice(&[base, base + 2, base + 1]);
    }

    add_cap_reversed(&mut vertices, &mut indices, radius, -hh, segments, Vec3::NEG_Y, color);

    MeshData { vertices, indices }
}

/// Ring in the XY plane around the Z axis
pub fn torus(
    radius: f32,
    tube: f32,
    radial_segments: u32,
    tubular_segments: u32,
    color: [f32; 3],
) -> MeshData {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for j in 0..=radial_segments {
        let v = TAU * j as f32 / radial_segments as f32;
        for i in 0..=tubular_segments {
            let u = TAU * i as f32 / tubular_segments as f32;

            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            let p = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let n = (p - center).normalize();
            push_vert(&mut vertices, p.x, p.y, p.z, n, color);
        }
    }

    for j in 1..=radial_segments {
        for i in 1..=tubular_segments {
            let a = (tubular_segments + 1) * j + i - 1;
            let b = (tubular_segments + 1) * (j - 1) + i - 1;
            let c = (tubular_segments + 1) * (j - 1) + i;
            let d = (tubular_segments + 1) * j + i;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    MeshData { vertices, indices }
}

/// Rectangle in the XY plane facing +Z
pub fn plane(width: f32, depth: f32, color: [f32; 3]) -> MeshData {
    let hw = width * 0.5;
    let hd = depth * 0.5;
    let mut vertices = Vec::with_capacity(4 * 9);

    push_vert(&mut vertices, -hw, -hd, 0.0, Vec3::Z, color);
    push_vert(&mut vertices, hw, -hd, 0.0, Vec3::Z, color);
    push_vert(&mut vertices, hw, hd, 0.0, Vec3::Z, color);
    push_vert(&mut vertices, -hw, hd, 0.0, Vec3::Z, color);

    MeshData {
        vertices,
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

/// Regular polygon in the XY plane facing +Z
pub fn polygon(radius: f32, sides: u32, color: [f32; 3]) -> MeshData {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    push_vert(&mut vertices, 0.0, 0.0, 0.0, Vec3::Z, color);
    for i in 0..sides {
        let angle = TAU * i as f32 / sides as f32;
        push_vert(&mut vertices, radius * angle.cos(), radius * angle.sin(), 0.0, Vec3::Z, color);
    }
    for i in 0..sides {
        let next = (i + 1) % sides;
        indices.extend_from_slice(&[0, 1 + i, 1 + next]);
    }

    MeshData { vertices, indices }
}

/// Box standing in for text until glyph geometry is available
pub fn text_placeholder(text: &str, size: f32, depth: f32, color: [f32; 3]) -> MeshData {
    let glyphs = text.chars().count().max(1) as f32;
    cube(glyphs * size * 0.6, size, depth, color)
}

/// Plan segments laid on the XZ plane (plan Y → local Z)
pub fn plan_lines(segments: &[LineSegment2D]) -> LineMeshData {
    let mut vertices = Vec::with_capacity(segments.len() * 14);
    for seg in segments {
        push_line_vert(&mut vertices, seg.start.x as f32, 0.0, seg.start.y as f32, PLAN_LINE_COLOR);
        push_line_vert(&mut vertices, seg.end.x as f32, 0.0, seg.end.y as f32, PLAN_LINE_COLOR);
    }
    LineMeshData { vertices }
}

// ── Helpers ──────────────────────────────────────────────────

fn push_vert(v: &mut Vec<f32>, px: f32, py: f32, pz: f32, n: Vec3, c: [f32; 3]) {
    v.extend_from_slice(&[px, py, pz, n.x, n.y, n.z, c[0], c[1], c[2]]);
}

fn push_line_vert(v: &mut Vec<f32>, px: f32, py: f32, pz: f32, c: [f32; 4]) {
    v.extend_from_slice(&[px, py, pz, c[0], c[1], c[2], c[3]]);
}

fn add_cap(
    vertices: &mut Vec<f32>,
    indices: &mut Vec<u32>,
    radius: f32,
    y: f32,
    segments: u32,
    normal: Vec3,
    color: [f32; 3],
) {
    let center_idx = (vertices.len() / 9) as u32;
    push_vert(vertices, 0.0, y, 0.0, normal, color);

    for i in 0..segments {
        let angle = (i as f32) * TAU / segments as f32;
        push_vert(vertices, radius * angle.cos(), y, radius * angle.sin(), normal, color);
    }

    for i in 0..segments {
        let next = (i + 1) % segments;
        indices.extend_from_slice(&[center_idx, center_idx + 1 + next, center_idx + 1 + i]);
    }
}

fn add_cap_reversed(
    vertices: &mut Vec<f32>,
    indices: &mut Vec<u32>,
    radius: f32,
    y: f32,
    segments: u32,
    normal: Vec3,
    color: [f32; 3],
) {
    let center_idx = (vertices.len() / 9) as u32;
    push_vert(vertices, 0.0, y, 0.0, normal, color);

    for i in 0..segments {
        let angle = (i as f32) * TAU / segments as f32;
        push_vert(vertices, radius * angle.cos(), y, radius * angle.sin(), normal, color);
    }

    for i in 0..segments {
        let next = (i + 1) % segments;
        indices.extend_from_slice(&[center_idx, center_idx + 1 + i, center_idx + 1 + next]);
    }
}
