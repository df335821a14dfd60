//! Factory functions for test data.
//!
//! DXF builders emit the minimal ENTITIES-only documents the importer accepts;
//! scene factories build objects, materials and documents directly.

use shared::*;

// ── DXF builders ────────────────────────────────────────────────

/// Wrap entity blocks into a DXF document with a single ENTITIES section
pub fn dxf_document(entities: &[String]) -> String {
    let mut doc = String::from("0\nSECTION\n2\nENTITIES\n");
    for entity in entities {
        doc.push_str(entity);
    }
    doc.push_str("0\nENDSEC\n0\nEOF\n");
    doc
}

/// LINE from (x1, y1) to (x2, y2)
pub fn dxf_line(x1: f64, y1: f64, x2: f64, y2: f64) -> String {
    format!("0\nLINE\n8\n0\n10\n{x1}\n20\n{y1}\n30\n0.0\n11\n{x2}\n21\n{y2}\n31\n0.0\n")
}

/// LWPOLYLINE through `points`; `closed` sets flag bit 1
pub fn dxf_lwpolyline(points: &[(f64, f64)], closed: bool) -> String {
    let flags = if closed { 1 } else { 0 };
    let mut entity = format!("0\nLWPOLYLINE\n8\n0\n90\n{}\n70\n{flags}\n", points.len());
    for (x, y) in points {
        entity.push_str(&format!("10\n{x}\n20\n{y}\n"));
    }
    entity
}

/// Legacy POLYLINE: header, one VERTEX per point, then SEQEND
pub fn dxf_polyline(points: &[(f64, f64)], closed: bool) -> String {
    let flags = if closed { 1 } else { 0 };
    let mut entity = format!("0\nPOLYLINE\n8\n0\n66\n1\n70\n{flags}\n");
    for (x, y) in points {
        entity.push_str(&format!("0\nVERTEX\n8\n0\n10\n{x}\n20\n{y}\n30\n0.0\n"));
    }
    entity.push_str("0\nSEQEND\n8\n0\n");
    entity
}

pub fn dxf_circle(cx: f64, cy: f64, radius: f64) -> String {
    format!("0\nCIRCLE\n8\n0\n10\n{cx}\n20\n{cy}\n30\n0.0\n40\n{radius}\n")
}

/// ARC with angles in degrees, counter-clockwise from `start` to `end`
pub fn dxf_arc(cx: f64, cy: f64, radius: f64, start: f64, end: f64) -> String {
    format!(
        "0\nARC\n8\n0\n10\n{cx}\n20\n{cy}\n30\n0.0\n40\n{radius}\n50\n{start}\n51\n{end}\n"
    )
}

/// Entity kind the importer does not handle
pub fn dxf_text(x: f64, y: f64, value: &str) -> String {
    format!("0\nTEXT\n8\n0\n10\n{x}\n20\n{y}\n30\n0.0\n40\n1.0\n1\n{value}\n")
}

/// Closed square of side `size` with its lower-left corner at (x, y)
pub fn dxf_square(x: f64, y: f64, size: f64) -> String {
    dxf_lwpolyline(
        &[(x, y), (x + size, y), (x + size, y + size), (x, y + size)],
        true,
    )
}

// ── Scene factories ─────────────────────────────────────────────

/// Box creation request with explicit dimensions
pub fn box_init(width: f64, height: f64, depth: f64) -> ObjectInit {
    ObjectInit::new(PrimitiveKind::Box).with_dimensions(DimensionPatch {
        width: Some(width),
        height: Some(height),
        depth: Some(depth),
        ..Default::default()
    })
}

/// `count` default objects of `kind`
pub fn inits(kind: PrimitiveKind, count: usize) -> Vec<ObjectInit> {
    vec![ObjectInit::new(kind); count]
}

/// Fully-specified box object, bypassing store defaults
pub fn box_object(id: &str, name: &str, w: f64, h: f64, d: f64) -> SceneObject {
    SceneObject {
        id: id.to_string(),
        name: name.to_string(),
        position: [0.0, h / 2.0, 0.0],
        rotation: [0.0, 0.0, 0.0],
        scale: [1.0, 1.0, 1.0],
        dimensions: Dimensions::Box {
            width: w,
            height: h,
            depth: d,
        },
        material_id: DEFAULT_MATERIAL_ID.to_string(),
        visible: true,
        locked: false,
        custom_attributes: Default::default(),
        modifiers: Vec::new(),
    }
}

/// Material with a solid color
pub fn colored_material(id: &str, name: &str, color: Color) -> MaterialProperties {
    MaterialProperties {
        color,
        ..MaterialProperties::new(id, name)
    }
}

/// Material referencing an albedo texture
pub fn textured_material(id: &str, albedo: &str) -> MaterialProperties {
    let mut material = MaterialProperties::new(id, id);
    material.maps.albedo = Some(albedo.to_string());
    material
}

/// Document holding `objects` plus the default material
pub fn document_with(objects: Vec<SceneObject>) -> SceneDocument {
    SceneDocument {
        objects,
        ..Default::default()
    }
}
