//! Scene data model shared between the store, the importer and the renderer mirror.
//!
//! Everything here is plain serde data. Behaviour (placement rules, clamping,
//! reconciliation) lives in the studio crate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

mod lights;
mod patch;

pub use lights::*;
pub use patch::*;

/// Stable identifier of a scene object
pub type ObjectId = String;

/// Stable identifier of a material
pub type MaterialId = String;

/// Stable identifier of a light
pub type LightId = String;

/// 3-component vector as stored in documents (position, rotation in radians, scale)
pub type Vec3 = [f64; 3];

/// Linear RGB color, 0.0..=1.0 per channel
pub type Color = [f32; 3];

/// Material every object falls back to; it can never be deleted
pub const DEFAULT_MATERIAL_ID: &str = "default";
pub const DEFAULT_MATERIAL_NAME: &str = "Default";

fn default_true() -> bool {
    true
}

fn default_scale() -> Vec3 {
    [1.0, 1.0, 1.0]
}

fn default_opacity() -> f32 {
    1.0
}

fn default_material_id() -> MaterialId {
    DEFAULT_MATERIAL_ID.to_string()
}

// ============================================================================
// Primitives
// ============================================================================

/// Tag identifying the generative shape (or imported plan) of an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Box,
    Cylinder,
    Plane,
    Sphere,
    Cone,
    Torus,
    Polygon,
    Text,
    CadPlan,
}

impl PrimitiveKind {
    /// Prefix used for auto-numbered display names ("Box 3")
    pub fn label(&self) -> &'static str {
        match self {
            PrimitiveKind::Box => "Box",
            PrimitiveKind::Cylinder => "Cylinder",
            PrimitiveKind::Plane => "Plane",
            PrimitiveKind::Sphere => "Sphere",
            PrimitiveKind::Cone => "Cone",
            PrimitiveKind::Torus => "Torus",
            PrimitiveKind::Polygon => "Polygon",
            PrimitiveKind::Text => "Text",
            PrimitiveKind::CadPlan => "CAD Plan",
        }
    }

    /// All kinds that can be placed interactively
    pub fn generative() -> &'static [PrimitiveKind] {
        &[
            PrimitiveKind::Box,
            PrimitiveKind::Cylinder,
            PrimitiveKind::Plane,
            PrimitiveKind::Sphere,
            PrimitiveKind::Cone,
            PrimitiveKind::Torus,
            PrimitiveKind::Polygon,
            PrimitiveKind::Text,
        ]
    }
}

/// 2D point in a plan's local frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point2D) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Straight segment of an imported plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment2D {
    pub start: Point2D,
    pub end: Point2D,
}

impl LineSegment2D {
    pub fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }
}

/// Imported CAD geometry: segments centered on the source drawing's bounding box.
///
/// Coordinates are always local; the owning object's position places the plan
/// in the world (plan X → world X, plan Y → world Z).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CadPlanData {
    pub segments: Vec<LineSegment2D>,
    pub width: f64,
    pub depth: f64,
}

/// Kind-specific dimensions. The variant is the object's primitive kind, so a
/// record can only ever carry the fields meaningful for that kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Dimensions {
    Box {
        width: f64,
        height: f64,
        depth: f64,
    },
    Cylinder {
        radius_top: f64,
        radius_bottom: f64,
        height: f64,
        radial_segments: u32,
    },
    Plane {
        width: f64,
        depth: f64,
    },
    Sphere {
        radius: f64,
        width_segments: u32,
        height_segments: u32,
    },
    Cone {
        radius: f64,
        height: f64,
        radial_segments: u32,
    },
    Torus {
        radius: f64,
        tube: f64,
        radial_segments: u32,
        tubular_segments: u32,
    },
    Polygon {
        radius: f64,
        sides: u32,
    },
    Text {
        text: String,
        size: f64,
        depth: f64,
    },
    CadPlan(CadPlanData),
}

impl Dimensions {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Dimensions::Box { .. } => PrimitiveKind::Box,
            Dimensions::Cylinder { .. } => PrimitiveKind::Cylinder,
            Dimensions::Plane { .. } => PrimitiveKind::Plane,
            Dimensions::Sphere { .. } => PrimitiveKind::Sphere,
            Dimensions::Cone { .. } => PrimitiveKind::Cone,
            Dimensions::Torus { .. } => PrimitiveKind::Torus,
            Dimensions::Polygon { .. } => PrimitiveKind::Polygon,
            Dimensions::Text { .. } => PrimitiveKind::Text,
            Dimensions::CadPlan(_) => PrimitiveKind::CadPlan,
        }
    }

    /// Embedded plan for CAD-plan objects
    pub fn cad_plan(&self) -> Option<&CadPlanData> {
        match self {
            Dimensions::CadPlan(plan) => Some(plan),
            _ => None,
        }
    }
}

/// Non-destructive modifier attached to an object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub kind: String,
    pub name: String,
}

/// One placed entity in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneObject {
    pub id: ObjectId,
    pub name: String,
    pub position: Vec3,
    pub rotation: Vec3,
    #[serde(default = "default_scale")]
    pub scale: Vec3,
    pub dimensions: Dimensions,
    #[serde(default = "default_material_id")]
    pub material_id: MaterialId,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_attributes: BTreeMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,
}

impl SceneObject {
    pub fn kind(&self) -> PrimitiveKind {
        self.dimensions.kind()
    }
}

// ============================================================================
// Materials
// ============================================================================

/// Texture map slots of a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Albedo,
    Normal,
    Roughness,
    Metalness,
    AmbientOcclusion,
}

impl TextureSlot {
    pub const ALL: [TextureSlot; 5] = [
        TextureSlot::Albedo,
        TextureSlot::Normal,
        TextureSlot::Roughness,
        TextureSlot::Metalness,
        TextureSlot::AmbientOcclusion,
    ];

    pub fn index(&self) -> usize {
        match self {
            TextureSlot::Albedo => 0,
            TextureSlot::Normal => 1,
            TextureSlot::Roughness => 2,
            TextureSlot::Metalness => 3,
            TextureSlot::AmbientOcclusion => 4,
        }
    }
}

/// Texture references by URL or data URI
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextureMaps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub albedo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roughness: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metalness: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ao: Option<String>,
}

impl TextureMaps {
    pub fn get(&self, slot: TextureSlot) -> Option<&str> {
        match slot {
            TextureSlot::Albedo => self.albedo.as_deref(),
            TextureSlot::Normal => self.normal.as_deref(),
            TextureSlot::Roughness => self.roughness.as_deref(),
            TextureSlot::Metalness => self.metalness.as_deref(),
            TextureSlot::AmbientOcclusion => self.ao.as_deref(),
        }
    }

    pub fn set(&mut self, slot: TextureSlot, value: Option<String>) {
        match slot {
            TextureSlot::Albedo => self.albedo = value,
            TextureSlot::Normal => self.normal = value,
            TextureSlot::Roughness => self.roughness = value,
            TextureSlot::Metalness => self.metalness = value,
            TextureSlot::AmbientOcclusion => self.ao = value,
        }
    }
}

/// Surface description referenced by objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialProperties {
    pub id: MaterialId,
    pub name: String,
    pub color: Color,
    pub roughness: f32,
    pub metalness: f32,
    #[serde(default)]
    pub maps: TextureMaps,
    #[serde(default)]
    pub transparent: bool,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    #[serde(default)]
    pub emissive: Color,
    #[serde(default)]
    pub emissive_intensity: f32,
}

impl MaterialProperties {
    /// Plain material with the given id/name and neutral surface values
    pub fn new(id: impl Into<MaterialId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: [0.8, 0.8, 0.8],
            roughness: 0.5,
            metalness: 0.0,
            maps: TextureMaps::default(),
            transparent: false,
            opacity: 1.0,
            emissive: [0.0, 0.0, 0.0],
            emissive_intensity: 0.0,
        }
    }

    /// The reserved default material
    pub fn default_material() -> Self {
        Self::new(DEFAULT_MATERIAL_ID, DEFAULT_MATERIAL_NAME)
    }

    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_MATERIAL_ID
    }
}

// ============================================================================
// Scene document
// ============================================================================

/// Persisted/exchanged scene: content plus transient fields accepted on load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDocument {
    pub objects: Vec<SceneObject>,
    pub materials: Vec<MaterialProperties>,
    pub ambient_light: AmbientLight,
    pub directional_light: DirectionalLight,
    #[serde(default)]
    pub lights: Vec<SceneLight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_object_id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_tool: Option<String>,
}

impl Default for SceneDocument {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            materials: vec![MaterialProperties::default_material()],
            ambient_light: AmbientLight::default(),
            directional_light: DirectionalLight::default(),
            lights: Vec::new(),
            selected_object_id: None,
            active_tool: None,
        }
    }
}

impl SceneDocument {
    /// Top-level fields a document must carry to be accepted as-is
    pub const REQUIRED_FIELDS: [&'static str; 4] =
        ["objects", "materials", "ambientLight", "directionalLight"];

    pub fn object(&self, id: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn object_mut(&mut self, id: &str) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn material(&self, id: &str) -> Option<&MaterialProperties> {
        self.materials.iter().find(|m| m.id == id)
    }

    pub fn material_mut(&mut self, id: &str) -> Option<&mut MaterialProperties> {
        self.materials.iter_mut().find(|m| m.id == id)
    }

    pub fn has_material(&self, id: &str) -> bool {
        self.materials.iter().any(|m| m.id == id)
    }

    /// Material for `id`, or the default material when `id` does not resolve
    pub fn resolve_material(&self, id: &str) -> Option<&MaterialProperties> {
        self.material(id).or_else(|| self.material(DEFAULT_MATERIAL_ID))
    }

    pub fn light(&self, id: &str) -> Option<&SceneLight> {
        self.lights.iter().find(|l| l.id() == id)
    }

    pub fn light_mut(&mut self, id: &str) -> Option<&mut SceneLight> {
        self.lights.iter_mut().find(|l| l.id() == id)
    }
}
