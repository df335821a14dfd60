//! DXF plan import.
//!
//! Supported entities (LINE, LWPOLYLINE, POLYLINE, CIRCLE, ARC) are flattened
//! into straight segments, re-centered on the drawing's bounding box and
//! wrapped into a single CAD-plan object. Any other entity kind is ignored.

mod entities;

pub use entities::{entity_segments, EntityError};

use std::io::Cursor;

use shared::{CadPlanData, LineSegment2D, ObjectInit, Point2D, PrimitiveKind};
use thiserror::Error;

use crate::geometry::{bounds_2d, Bounds2D};
use crate::state::settings::CadSettings;

/// Reasons an import produces no object
#[derive(Error, Debug)]
pub enum CadImportError {
    #[error("failed to parse DXF document: {0}")]
    Parse(String),

    #[error("document contains no usable line geometry")]
    NoSegments,

    #[error("document has no valid points to bound")]
    EmptyBounds,
}

/// Statistics of a successful import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub entities_seen: usize,
    pub entities_skipped: usize,
    pub entities_ignored: usize,
    pub segments_dropped: usize,
}

/// Import result with the object to admit and what was discarded on the way
#[derive(Debug, Clone)]
pub struct CadImport {
    pub object: ObjectInit,
    pub stats: ImportStats,
}

/// Import a DXF document with default settings. Returns `None` when the
/// document cannot be parsed or holds no usable geometry.
pub fn import_cad_document(text: &str) -> Option<ObjectInit> {
    import_cad_document_with(text, &CadSettings::default())
}

/// Import a DXF document, logging and swallowing the failure reason
pub fn import_cad_document_with(text: &str, settings: &CadSettings) -> Option<ObjectInit> {
    match try_import_cad_document(text, settings) {
        Ok(import) => Some(import.object),
        Err(e) => {
            tracing::warn!("CAD import failed: {e}");
            None
        }
    }
}

/// Import a DXF document, returning the failure reason
pub fn try_import_cad_document(
    text: &str,
    settings: &CadSettings,
) -> Result<CadImport, CadImportError> {
    let drawing = dxf::Drawing::load(&mut Cursor::new(text.as_bytes()))
        .map_err(|e| CadImportError::Parse(e.to_string()))?;

    let mut stats = ImportStats::default();
    let mut segments: Vec<LineSegment2D> = Vec::new();
    let mut bounds: Option<Bounds2D> = None;

    for entity in drawing.entities() {
        stats.entities_seen += 1;
        match entity_segments(&entity.specific, settings) {
            Ok(Some(raw)) => {
                for seg in raw {
                    if !(seg.length() >= settings.min_segment_length) {
                        stats.segments_dropped += 1;
                        continue;
                    }
                    bounds = bounds_2d([seg.start, seg.end], bounds);
                    segments.push(seg);
                }
            }
            Ok(None) => stats.entities_ignored += 1,
            Err(e) => {
                tracing::warn!("Skipping malformed DXF entity: {e}");
                stats.entities_skipped += 1;
            }
        }
    }

    if segments.is_empty() {
        return Err(CadImportError::NoSegments);
    }
    let bounds = bounds.ok_or(CadImportError::EmptyBounds)?;
    let center = bounds.center();

    let local = |p: Point2D| Point2D::new(p.x - center.x, p.y - center.y);
    let segments: Vec<LineSegment2D> = segments
        .into_iter()
        .map(|s| LineSegment2D::new(local(s.start), local(s.end)))
        .collect();

    tracing::info!(
        "Imported CAD plan: {} segments, {:.3} x {:.3} ({} entities, {} skipped, {} ignored)",
        segments.len(),
        bounds.width(),
        bounds.depth(),
        stats.entities_seen,
        stats.entities_skipped,
        stats.entities_ignored
    );

    let mut object = ObjectInit::new(PrimitiveKind::CadPlan);
    object.position = Some([center.x, settings.plan_elevation, center.y]);
    object.cad_plan = Some(CadPlanData {
        segments,
        width: bounds.width(),
        depth: bounds.depth(),
    });

    Ok(CadImport { object, stats })
}
