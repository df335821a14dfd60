//! Conversion of single DXF entities into straight segments

use std::f64::consts::TAU;

use dxf::entities::EntityType;
use shared::{LineSegment2D, Point2D};
use thiserror::Error;

use crate::geometry::{MAX_SEGMENTS, MIN_SEGMENTS};
use crate::state::settings::CadSettings;

/// Why an individual entity could not be converted
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EntityError {
    #[error("{entity} has non-finite coordinates")]
    NonFinite { entity: &'static str },

    #[error("{entity} has invalid radius {radius}")]
    InvalidRadius { entity: &'static str, radius: f64 },

    #[error("{entity} has {count} vertices, at least 2 required")]
    TooFewVertices { entity: &'static str, count: usize },
}

/// Segments for one entity, before length filtering.
///
/// `Ok(None)` means the entity kind is not supported and should be ignored.
pub fn entity_segments(
    entity: &EntityType,
    settings: &CadSettings,
) -> Result<Option<Vec<LineSegment2D>>, EntityError> {
    let segments = match entity {
        EntityType::Line(line) => {
            let start = point("LINE", line.p1.x, line.p1.y)?;
            let end = point("LINE", line.p2.x, line.p2.y)?;
            vec![LineSegment2D::new(start, end)]
        }
        EntityType::LwPolyline(polyline) => {
            let vertices = polyline
                .vertices
                .iter()
                .map(|v| point("LWPOLYLINE", v.x, v.y))
                .collect::<Result<Vec<_>, _>>()?;
            // Bit 0 (value 1) marks a closed polyline
            polyline_segments("LWPOLYLINE", &vertices, polyline.flags & 1 != 0)?
        }
        EntityType::Polyline(polyline) => {
            let vertices = polyline
                .vertices()
                .map(|v| point("POLYLINE", v.location.x, v.location.y))
                .collect::<Result<Vec<_>, _>>()?;
            polyline_segments("POLYLINE", &vertices, polyline.flags & 1 != 0)?
        }
        EntityType::Circle(circle) => {
            let center = point("CIRCLE", circle.center.x, circle.center.y)?;
            let radius = radius("CIRCLE", circle.radius)?;
            circle_segments(center, radius, settings.circle_segments)
        }
        EntityType::Arc(arc) => {
            let center = point("ARC", arc.center.x, arc.center.y)?;
            let radius = radius("ARC", arc.radius)?;
            if !arc.start_angle.is_finite() || !arc.end_angle.is_finite() {
                return Err(EntityError::NonFinite { entity: "ARC" });
            }
            arc_segments(
                center,
                radius,
                arc.start_angle.to_radians(),
                arc.end_angle.to_radians(),
                settings.arc_segments,
            )
        }
        _ => return Ok(None),
    };

    Ok(Some(segments))
}

fn point(entity: &'static str, x: f64, y: f64) -> Result<Point2D, EntityError> {
    if x.is_finite() && y.is_finite() {
        Ok(Point2D::new(x, y))
    } else {
        Err(EntityError::NonFinite { entity })
    }
}

fn radius(entity: &'static str, radius: f64) -> Result<f64, EntityError> {
    if radius.is_finite() && radius > 0.0 {
        Ok(radius)
    } else {
        Err(EntityError::InvalidRadius { entity, radius })
    }
}

/// One segment per consecutive vertex pair, plus last→first when closed
pub fn polyline_segments(
    entity: &'static str,
    vertices: &[Point2D],
    closed: bool,
) -> Result<Vec<LineSegment2D>, EntityError> {
    if vertices.len() < 2 {
        return Err(EntityError::TooFewVertices {
            entity,
            count: vertices.len(),
        });
    }

    let mut segments: Vec<LineSegment2D> = vertices
        .windows(2)
        .map(|w| LineSegment2D::new(w[0], w[1]))
        .collect();

    if closed {
        if let (Some(first), Some(last)) = (vertices.first(), vertices.last()) {
            segments.push(LineSegment2D::new(*last, *first));
        }
    }

    Ok(segments)
}

/// Regular polygon approximating a full circle
pub fn circle_segments(center: Point2D, radius: f64, count: u32) -> Vec<LineSegment2D> {
    let count = count.clamp(MIN_SEGMENTS, MAX_SEGMENTS);
    let at = |i: u32| {
        let angle = TAU * f64::from(i) / f64::from(count);
        Point2D::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
    };

    (0..count)
        .map(|i| LineSegment2D::new(at(i), at((i + 1) % count)))
        .collect()
}

/// Counter-clockwise arc from `start` to `end` (radians), split evenly.
/// Both angles are reduced to one turn; equal angles give a full circle.
pub fn arc_segments(
    center: Point2D,
    radius: f64,
    start: f64,
    end: f64,
    count: u32,
) -> Vec<LineSegment2D> {
    let count = count.clamp(1, MAX_SEGMENTS);
    let start = start.rem_euclid(TAU);
    let mut sweep = (end.rem_euclid(TAU) - start).rem_euclid(TAU);
    if sweep <= 0.0 {
        sweep = TAU;
    }

    let at = |i: u32| {
        let angle = start + sweep * f64::from(i) / f64::from(count);
        Point2D::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
    };

    (0..count)
        .map(|i| LineSegment2D::new(at(i), at(i + 1)))
        .collect()
}
