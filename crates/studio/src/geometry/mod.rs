//! Placement defaults and dimension clamping for every primitive kind.
//!
//! Pure functions only. The store calls these when objects are created or
//! edited; the importer uses [`bounds`] to fold plan extents.

pub mod bounds;

pub use bounds::{bounds_2d, Bounds2D};

use std::f64::consts::FRAC_PI_2;

use shared::{CadPlanData, DimensionPatch, Dimensions, PrimitiveKind, Vec3};

/// Smallest accepted size for any length-like dimension
pub const MIN_DIMENSION: f64 = 1e-3;
/// Largest accepted size for any length-like dimension
pub const MAX_DIMENSION: f64 = 1e5;
/// Smallest scale magnitude per axis
pub const MIN_SCALE: f64 = 1e-3;
pub const MIN_SEGMENTS: u32 = 3;
pub const MAX_SEGMENTS: u32 = 256;
pub const MAX_POLYGON_SIDES: u32 = 64;
/// Height at which imported plans float above the ground plane
pub const CAD_PLAN_ELEVATION: f64 = 0.01;

const UPRIGHT_EPSILON: f64 = 1e-6;

/// Initial placement computed for a new object
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    pub dimensions: Dimensions,
    pub position: Vec3,
    pub rotation: Vec3,
}

/// Result of merging a dimension patch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DimensionChange {
    pub changed: bool,
    pub height_like_changed: bool,
}

/// Factory dimensions for a kind
pub fn default_dimensions(kind: PrimitiveKind) -> Dimensions {
    match kind {
        PrimitiveKind::Box => Dimensions::Box {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
        },
        PrimitiveKind::Cylinder => Dimensions::Cylinder {
            radius_top: 0.5,
            radius_bottom: 0.5,
            height: 1.0,
            radial_segments: 32,
        },
        PrimitiveKind::Plane => Dimensions::Plane {
            width: 2.0,
            depth: 2.0,
        },
        PrimitiveKind::Sphere => Dimensions::Sphere {
            radius: 0.5,
            width_segments: 32,
            height_segments: 16,
        },
        PrimitiveKind::Cone => Dimensions::Cone {
            radius: 0.5,
            height: 1.0,
            radial_segments: 32,
        },
        PrimitiveKind::Torus => Dimensions::Torus {
            radius: 0.5,
            tube: 0.2,
            radial_segments: 16,
            tubular_segments: 48,
        },
        PrimitiveKind::Polygon => Dimensions::Polygon {
            radius: 0.5,
            sides: 6,
        },
        PrimitiveKind::Text => Dimensions::Text {
            text: "Text".to_string(),
            size: 0.5,
            depth: 0.1,
        },
        PrimitiveKind::CadPlan => Dimensions::CadPlan(CadPlanData::default()),
    }
}

/// Rotation an object of this kind has when resting in its natural pose.
/// Planes, polygons and tori lie flat on the ground.
pub fn resting_rotation(kind: PrimitiveKind) -> Vec3 {
    match kind {
        PrimitiveKind::Plane | PrimitiveKind::Polygon | PrimitiveKind::Torus => {
            [-FRAC_PI_2, 0.0, 0.0]
        }
        _ => [0.0, 0.0, 0.0],
    }
}

/// Whether the object still stands in its resting orientation. Spinning
/// around the vertical axis keeps it upright; tilting does not.
pub fn is_axis_upright(kind: PrimitiveKind, rotation: &Vec3) -> bool {
    let rest = resting_rotation(kind);
    (rotation[0] - rest[0]).abs() < UPRIGHT_EPSILON && (rotation[2] - rest[2]).abs() < UPRIGHT_EPSILON
}

/// Y coordinate at which the object's base touches y = 0
pub fn resting_y(dimensions: &Dimensions, plan_elevation: f64) -> f64 {
    match dimensions {
        Dimensions::Box { height, .. } => height / 2.0,
        Dimensions::Cylinder { height, .. } => height / 2.0,
        Dimensions::Cone { height, .. } => height / 2.0,
        Dimensions::Sphere { radius, .. } => *radius,
        Dimensions::Torus { tube, .. } => *tube,
        Dimensions::Text { size, .. } => size / 2.0,
        Dimensions::Plane { .. } | Dimensions::Polygon { .. } => 0.0,
        Dimensions::CadPlan(_) => plan_elevation,
    }
}

/// Defaults for `kind` with `overrides` applied, followed by the resting
/// position. An explicit `position` is taken verbatim; an explicit
/// `rotation` that is not upright leaves Y at 0.
pub fn default_dimensions_and_pose(
    kind: PrimitiveKind,
    overrides: &DimensionPatch,
    position: Option<Vec3>,
    rotation: Option<Vec3>,
    plan_elevation: f64,
) -> Pose {
    let mut dimensions = default_dimensions(kind);
    merge_dimensions(&mut dimensions, overrides);
    normalize_dimensions(&mut dimensions);

    let rotation = rotation.unwrap_or_else(|| resting_rotation(kind));
    let position = match position {
        Some(p) => p,
        None if is_axis_upright(kind, &rotation) => {
            [0.0, resting_y(&dimensions, plan_elevation), 0.0]
        }
        None => [0.0, 0.0, 0.0],
    };

    Pose {
        dimensions,
        position,
        rotation,
    }
}

/// Merge a patch into existing dimensions, field by field
pub fn merge_dimensions(dimensions: &mut Dimensions, patch: &DimensionPatch) -> DimensionChange {
    let mut change = DimensionChange::default();

    fn set<T: PartialEq + Clone>(slot: &mut T, value: &Option<T>, changed: &mut bool) -> bool {
        match value {
            Some(v) if slot != v => {
                *slot = v.clone();
                *changed = true;
                true
            }
            _ => false,
        }
    }

    let c = &mut change.changed;
    let height_like = match dimensions {
        Dimensions::Box {
            width,
            height,
            depth,
        } => {
            set(width, &patch.width, c);
            set(depth, &patch.depth, c);
            set(height, &patch.height, c)
        }
        Dimensions::Cylinder {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
        } => {
            // A plain radius sets both ends
            set(radius_top, &patch.radius, c);
            set(radius_bottom, &patch.radius, c);
            set(radius_top, &patch.radius_top, c);
            set(radius_bottom, &patch.radius_bottom, c);
            set(radial_segments, &patch.radial_segments, c);
            set(height, &patch.height, c)
        }
        Dimensions::Plane { width, depth } => {
            set(width, &patch.width, c);
            set(depth, &patch.depth, c);
            false
        }
        Dimensions::Sphere {
            radius,
            width_segments,
            height_segments,
        } => {
            set(width_segments, &patch.width_segments, c);
            set(height_segments, &patch.height_segments, c);
            set(radius, &patch.radius, c)
        }
        Dimensions::Cone {
            radius,
            height,
            radial_segments,
        } => {
            set(radius, &patch.radius, c);
            set(radial_segments, &patch.radial_segments, c);
            set(height, &patch.height, c)
        }
        Dimensions::Torus {
            radius,
            tube,
            radial_segments,
            tubular_segments,
        } => {
            set(radius, &patch.radius, c);
            set(radial_segments, &patch.radial_segments, c);
            set(tubular_segments, &patch.tubular_segments, c);
            set(tube, &patch.tube, c)
        }
        Dimensions::Polygon { radius, sides } => {
            set(radius, &patch.radius, c);
            set(sides, &patch.sides, c);
            false
        }
        Dimensions::Text { text, size, depth } => {
            set(text, &patch.text, c);
            set(depth, &patch.depth, c);
            set(size, &patch.size, c)
        }
        // Plan extents come from the imported drawing only
        Dimensions::CadPlan(_) => false,
    };

    change.height_like_changed = height_like;
    change
}

/// Clamp every field into its sane range
pub fn normalize_dimensions(dimensions: &mut Dimensions) {
    fn len(v: &mut f64) {
        *v = clamp_length(*v);
    }
    fn segs(v: &mut u32, max: u32) {
        *v = (*v).clamp(MIN_SEGMENTS, max);
    }

    match dimensions {
        Dimensions::Box {
            width,
            height,
            depth,
        } => {
            len(width);
            len(height);
            len(depth);
        }
        Dimensions::Cylinder {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
        } => {
            len(radius_top);
            len(radius_bottom);
            len(height);
            segs(radial_segments, MAX_SEGMENTS);
        }
        Dimensions::Plane { width, depth } => {
            len(width);
            len(depth);
        }
        Dimensions::Sphere {
            radius,
            width_segments,
            height_segments,
        } => {
            len(radius);
            segs(width_segments, MAX_SEGMENTS);
            // Two latitude bands are enough for a closed sphere
            *height_segments = (*height_segments).clamp(2, MAX_SEGMENTS);
        }
        Dimensions::Cone {
            radius,
            height,
            radial_segments,
        } => {
            len(radius);
            len(height);
            segs(radial_segments, MAX_SEGMENTS);
        }
        Dimensions::Torus {
            radius,
            tube,
            radial_segments,
            tubular_segments,
        } => {
            len(radius);
            len(tube);
            segs(radial_segments, MAX_SEGMENTS);
            segs(tubular_segments, MAX_SEGMENTS);
        }
        Dimensions::Polygon { radius, sides } => {
            len(radius);
            segs(sides, MAX_POLYGON_SIDES);
        }
        Dimensions::Text { size, depth, .. } => {
            len(size);
            len(depth);
        }
        Dimensions::CadPlan(plan) => {
            // Degenerate plans (a single straight run) keep a zero extent
            plan.width = non_negative(plan.width);
            plan.depth = non_negative(plan.depth);
        }
    }
}

/// Clamp a length into `[MIN_DIMENSION, MAX_DIMENSION]`. NaN becomes the minimum.
pub fn clamp_length(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_DIMENSION;
    }
    value.abs().clamp(MIN_DIMENSION, MAX_DIMENSION)
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Keep each scale component at least `MIN_SCALE` in magnitude, preserving sign
pub fn clamp_scale(scale: Vec3) -> Vec3 {
    scale.map(|s| {
        if !s.is_finite() {
            1.0
        } else if s.abs() < MIN_SCALE {
            if s < 0.0 {
                -MIN_SCALE
            } else {
                MIN_SCALE
            }
        } else {
            s
        }
    })
}
