//! Partial records used to create and edit scene content.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{CadPlanData, Color, MaterialId, Modifier, PrimitiveKind, TextureMaps, Vec3};

/// Per-field dimension overrides. Fields that are not meaningful for the
/// target kind are ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DimensionPatch {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub depth: Option<f64>,
    pub radius: Option<f64>,
    pub radius_top: Option<f64>,
    pub radius_bottom: Option<f64>,
    pub tube: Option<f64>,
    pub radial_segments: Option<u32>,
    pub tubular_segments: Option<u32>,
    pub width_segments: Option<u32>,
    pub height_segments: Option<u32>,
    pub sides: Option<u32>,
    pub size: Option<f64>,
    pub text: Option<String>,
}

impl DimensionPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn height(height: f64) -> Self {
        Self {
            height: Some(height),
            ..Default::default()
        }
    }
}

/// Partially-specified object handed to the store for creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectInit {
    pub kind: PrimitiveKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<Vec3>,
    #[serde(default)]
    pub rotation: Option<Vec3>,
    #[serde(default)]
    pub scale: Option<Vec3>,
    #[serde(default)]
    pub dimensions: DimensionPatch,
    #[serde(default)]
    pub material_id: Option<MaterialId>,
    /// Imported geometry; only used for `PrimitiveKind::CadPlan`
    #[serde(default)]
    pub cad_plan: Option<CadPlanData>,
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    pub locked: Option<bool>,
    #[serde(default)]
    pub custom_attributes: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

impl ObjectInit {
    pub fn new(kind: PrimitiveKind) -> Self {
        Self {
            kind,
            name: None,
            position: None,
            rotation: None,
            scale: None,
            dimensions: DimensionPatch::default(),
            material_id: None,
            cad_plan: None,
            visible: None,
            locked: None,
            custom_attributes: BTreeMap::new(),
            modifiers: Vec::new(),
        }
    }

    pub fn with_dimensions(mut self, dimensions: DimensionPatch) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_material(mut self, material_id: impl Into<MaterialId>) -> Self {
        self.material_id = Some(material_id.into());
        self
    }
}

/// Field-by-field edit of an existing object. `None` leaves a field untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectPatch {
    pub name: Option<String>,
    pub position: Option<Vec3>,
    pub rotation: Option<Vec3>,
    pub scale: Option<Vec3>,
    pub dimensions: Option<DimensionPatch>,
    pub material_id: Option<MaterialId>,
    pub visible: Option<bool>,
    pub locked: Option<bool>,
    pub custom_attributes: Option<BTreeMap<String, serde_json::Value>>,
    pub modifiers: Option<Vec<Modifier>>,
}

impl ObjectPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn dimensions(dimensions: DimensionPatch) -> Self {
        Self {
            dimensions: Some(dimensions),
            ..Default::default()
        }
    }
}

/// Edit of a material
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaterialPatch {
    pub name: Option<String>,
    pub color: Option<Color>,
    pub roughness: Option<f32>,
    pub metalness: Option<f32>,
    pub maps: Option<TextureMaps>,
    pub transparent: Option<bool>,
    pub opacity: Option<f32>,
    pub emissive: Option<Color>,
    pub emissive_intensity: Option<f32>,
}

/// Edit of a light. Fields that do not exist on the target kind are ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LightPatch {
    pub name: Option<String>,
    pub color: Option<Color>,
    pub intensity: Option<f32>,
    pub visible: Option<bool>,
    pub position: Option<Vec3>,
    pub target: Option<Vec3>,
    pub distance: Option<f32>,
    pub decay: Option<f32>,
    pub angle: Option<f32>,
    pub penumbra: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub ground_color: Option<Color>,
    pub cast_shadow: Option<bool>,
    pub shadow_bias: Option<f32>,
    pub shadow_radius: Option<f32>,
}
