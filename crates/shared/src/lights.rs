//! Scene lights.
//!
//! Ambient and directional lights are singletons held in dedicated document
//! fields; every other kind lives in the ordered `lights` collection.

use serde::{Deserialize, Serialize};

use crate::{Color, LightId, Vec3};

pub const AMBIENT_LIGHT_ID: &str = "ambient";
pub const DIRECTIONAL_LIGHT_ID: &str = "directional";

fn default_true() -> bool {
    true
}

/// Explicit light discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightKind {
    Ambient,
    Directional,
    Point,
    Spot,
    Area,
    Hemisphere,
}

impl LightKind {
    /// Singleton kinds are never added to or removed from the light list
    pub fn is_singleton(&self) -> bool {
        matches!(self, LightKind::Ambient | LightKind::Directional)
    }

    pub fn label(&self) -> &'static str {
        match self {
            LightKind::Ambient => "Ambient Light",
            LightKind::Directional => "Directional Light",
            LightKind::Point => "Point Light",
            LightKind::Spot => "Spot Light",
            LightKind::Area => "Area Light",
            LightKind::Hemisphere => "Hemisphere Light",
        }
    }
}

/// Shadow map tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowSettings {
    pub bias: f32,
    pub radius: f32,
    pub map_size: u32,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            bias: -0.0001,
            radius: 1.0,
            map_size: 2048,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmbientLight {
    pub id: LightId,
    pub name: String,
    pub color: Color,
    pub intensity: f32,
    #[serde(default = "default_true")]
    pub visible: bool,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            id: AMBIENT_LIGHT_ID.to_string(),
            name: LightKind::Ambient.label().to_string(),
            color: [1.0, 1.0, 1.0],
            intensity: 0.4,
            visible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionalLight {
    pub id: LightId,
    pub name: String,
    pub color: Color,
    pub intensity: f32,
    #[serde(default = "default_true")]
    pub visible: bool,
    pub position: Vec3,
    #[serde(default)]
    pub target: Vec3,
    #[serde(default = "default_true")]
    pub cast_shadow: bool,
    #[serde(default)]
    pub shadow: ShadowSettings,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            id: DIRECTIONAL_LIGHT_ID.to_string(),
            name: LightKind::Directional.label().to_string(),
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
            visible: true,
            position: [5.0, 10.0, 7.5],
            target: [0.0, 0.0, 0.0],
            cast_shadow: true,
            shadow: ShadowSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointLight {
    pub id: LightId,
    pub name: String,
    pub color: Color,
    pub intensity: f32,
    #[serde(default = "default_true")]
    pub visible: bool,
    pub position: Vec3,
    pub distance: f32,
    pub decay: f32,
    #[serde(default)]
    pub cast_shadow: bool,
    #[serde(default)]
    pub shadow: ShadowSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotLight {
    pub id: LightId,
    pub name: String,
    pub color: Color,
    pub intensity: f32,
    #[serde(default = "default_true")]
    pub visible: bool,
    pub position: Vec3,
    pub target: Vec3,
    pub distance: f32,
    pub decay: f32,
    /// Cone half-angle in radians
    pub angle: f32,
    pub penumbra: f32,
    #[serde(default)]
    pub cast_shadow: bool,
    #[serde(default)]
    pub shadow: ShadowSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaLight {
    pub id: LightId,
    pub name: String,
    pub color: Color,
    pub intensity: f32,
    #[serde(default = "default_true")]
    pub visible: bool,
    pub position: Vec3,
    pub target: Vec3,
    pub width: f32,
    pub height: f32,
}

/// Sky/ground gradient light (experimental)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HemisphereLight {
    pub id: LightId,
    pub name: String,
    pub color: Color,
    pub intensity: f32,
    #[serde(default = "default_true")]
    pub visible: bool,
    pub position: Vec3,
    pub ground_color: Color,
}

/// Non-singleton light kept in the document's light list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneLight {
    Point(PointLight),
    Spot(SpotLight),
    Area(AreaLight),
    Hemisphere(HemisphereLight),
}

impl SceneLight {
    pub fn kind(&self) -> LightKind {
        match self {
            SceneLight::Point(_) => LightKind::Point,
            SceneLight::Spot(_) => LightKind::Spot,
            SceneLight::Area(_) => LightKind::Area,
            SceneLight::Hemisphere(_) => LightKind::Hemisphere,
        }
    }

    pub fn id(&self) -> &LightId {
        match self {
            SceneLight::Point(l) => &l.id,
            SceneLight::Spot(l) => &l.id,
            SceneLight::Area(l) => &l.id,
            SceneLight::Hemisphere(l) => &l.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SceneLight::Point(l) => &l.name,
            SceneLight::Spot(l) => &l.name,
            SceneLight::Area(l) => &l.name,
            SceneLight::Hemisphere(l) => &l.name,
        }
    }

    pub fn intensity(&self) -> f32 {
        match self {
            SceneLight::Point(l) => l.intensity,
            SceneLight::Spot(l) => l.intensity,
            SceneLight::Area(l) => l.intensity,
            SceneLight::Hemisphere(l) => l.intensity,
        }
    }

    pub fn visible(&self) -> bool {
        match self {
            SceneLight::Point(l) => l.visible,
            SceneLight::Spot(l) => l.visible,
            SceneLight::Area(l) => l.visible,
            SceneLight::Hemisphere(l) => l.visible,
        }
    }

    /// Default-configured light of a non-singleton kind
    pub fn with_defaults(kind: LightKind, id: LightId, name: String) -> Option<Self> {
        let light = match kind {
            LightKind::Ambient | LightKind::Directional => return None,
            LightKind::Point => SceneLight::Point(PointLight {
                id,
                name,
                color: [1.0, 1.0, 1.0],
                intensity: 1.0,
                visible: true,
                position: [0.0, 3.0, 0.0],
                distance: 0.0,
                decay: 2.0,
                cast_shadow: false,
                shadow: ShadowSettings::default(),
            }),
            LightKind::Spot => SceneLight::Spot(SpotLight {
                id,
                name,
                color: [1.0, 1.0, 1.0],
                intensity: 1.0,
                visible: true,
                position: [0.0, 5.0, 0.0],
                target: [0.0, 0.0, 0.0],
                distance: 0.0,
                decay: 2.0,
                angle: std::f32::consts::FRAC_PI_6,
                penumbra: 0.1,
                cast_shadow: true,
                shadow: ShadowSettings::default(),
            }),
            LightKind::Area => SceneLight::Area(AreaLight {
                id,
                name,
                color: [1.0, 1.0, 1.0],
                intensity: 5.0,
                visible: true,
                position: [0.0, 3.0, 0.0],
                target: [0.0, 0.0, 0.0],
                width: 2.0,
                height: 1.0,
            }),
            LightKind::Hemisphere => SceneLight::Hemisphere(HemisphereLight {
                id,
                name,
                color: [0.6, 0.75, 1.0],
                intensity: 0.5,
                visible: true,
                position: [0.0, 10.0, 0.0],
                ground_color: [0.35, 0.3, 0.25],
            }),
        };
        Some(light)
    }
}
