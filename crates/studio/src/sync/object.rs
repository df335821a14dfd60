//! Scene object → renderer object

use std::f64::consts::FRAC_PI_2;

use glam::{EulerRot, Mat4, Quat, Vec3};
use shared::{MaterialId, MaterialProperties, ObjectId, PrimitiveKind, SceneObject};

use super::geometry::Geometry;
use super::resources::ResourceLedger;

const FLAT_EPSILON: f64 = 1e-6;

/// What a sync step did to the renderer object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// No prior renderer object existed
    Created,
    /// Geometry was released and rebuilt
    Rebuilt,
    /// Transform, material or visibility changed in place
    Updated,
    Unchanged,
}

/// Mutable renderer-side mirror of one scene object
#[derive(Debug)]
pub struct RenderObject {
    pub object_id: ObjectId,
    pub geometry: Geometry,
    pub position: Vec3,
    /// Euler angles in radians, XYZ order
    pub rotation: Vec3,
    pub scale: Vec3,
    pub material_id: MaterialId,
    pub visible: bool,
}

impl RenderObject {
    pub fn world_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

fn vec3(v: [f64; 3]) -> Vec3 {
    Vec3::new(v[0] as f32, v[1] as f32, v[2] as f32)
}

/// Rotation the renderer uses. Planes always lie flat.
fn render_rotation(object: &SceneObject) -> [f64; 3] {
    let mut rotation = object.rotation;
    if object.kind() == PrimitiveKind::Plane && (rotation[0] + FRAC_PI_2).abs() > FLAT_EPSILON {
        rotation[0] = -FRAC_PI_2;
    }
    rotation
}

/// Bring `previous` in line with `object`, rebuilding geometry only when the
/// geometry's recorded parameters differ from the object's dimensions.
pub fn sync_object(
    object: &SceneObject,
    previous: Option<RenderObject>,
    material: &MaterialProperties,
    ledger: &mut ResourceLedger,
) -> (RenderObject, SyncAction) {
    let position = vec3(object.position);
    let rotation = vec3(render_rotation(object));
    let scale = vec3(object.scale);

    let Some(mut render) = previous else {
        let render = RenderObject {
            object_id: object.id.clone(),
            geometry: Geometry::build(&object.dimensions, ledger),
            position,
            rotation,
            scale,
            material_id: material.id.clone(),
            visible: object.visible,
        };
        return (render, SyncAction::Created);
    };

    let rebuilt = if render.geometry.matches(&object.dimensions) {
        false
    } else {
        let fresh = Geometry::build(&object.dimensions, ledger);
        let old = std::mem::replace(&mut render.geometry, fresh);
        old.release(ledger);
        tracing::debug!("Rebuilt geometry for {}", object.id);
        true
    };

    let unchanged = render.position == position
        && render.rotation == rotation
        && render.scale == scale
        && render.material_id == material.id
        && render.visible == object.visible;
    render.position = position;
    render.rotation = rotation;
    render.scale = scale;
    render.material_id = material.id.clone();
    render.visible = object.visible;

    let action = if rebuilt {
        SyncAction::Rebuilt
    } else if unchanged {
        SyncAction::Unchanged
    } else {
        SyncAction::Updated
    };
    (render, action)
}
