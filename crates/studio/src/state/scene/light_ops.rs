//! Light CRUD
//!
//! Ambient and directional lights are edited in place through their fixed
//! ids and can never be added or removed.

use shared::{
    LightId, LightKind, LightPatch, SceneDocument, SceneLight, AMBIENT_LIGHT_ID,
    DIRECTIONAL_LIGHT_ID,
};

use super::display::next_numbered_name;
use super::SceneStore;

macro_rules! patch_fields {
    ($light:expr, $patch:expr, [$($field:ident),* $(,)?]) => {
        $(
            if let Some(v) = $patch.$field.clone() {
                $light.$field = v;
            }
        )*
    };
}

fn apply_light_patch(doc: &mut SceneDocument, id: &str, patch: &LightPatch) -> Option<()> {
    let patch = &sanitized(patch);

    if id == AMBIENT_LIGHT_ID {
        let light = &mut doc.ambient_light;
        patch_fields!(light, patch, [name, color, intensity, visible]);
        return Some(());
    }

    if id == DIRECTIONAL_LIGHT_ID {
        let light = &mut doc.directional_light;
        patch_fields!(light, patch, [name, color, intensity, visible, position, target, cast_shadow]);
        if let Some(bias) = patch.shadow_bias {
            light.shadow.bias = bias;
        }
        if let Some(radius) = patch.shadow_radius {
            light.shadow.radius = radius;
        }
        return Some(());
    }

    match doc.light_mut(id)? {
        SceneLight::Point(light) => {
            patch_fields!(light, patch, [name, color, intensity, visible, position, distance, decay, cast_shadow]);
            if let Some(bias) = patch.shadow_bias {
                light.shadow.bias = bias;
            }
            if let Some(radius) = patch.shadow_radius {
                light.shadow.radius = radius;
            }
        }
        SceneLight::Spot(light) => {
            patch_fields!(light, patch, [
                name, color, intensity, visible, position, target, distance, decay, angle,
                penumbra, cast_shadow,
            ]);
            if let Some(bias) = patch.shadow_bias {
                light.shadow.bias = bias;
            }
            if let Some(radius) = patch.shadow_radius {
                light.shadow.radius = radius;
            }
        }
        SceneLight::Area(light) => {
            patch_fields!(light, patch, [name, color, intensity, visible, position, target, width, height]);
        }
        SceneLight::Hemisphere(light) => {
            patch_fields!(light, patch, [name, color, intensity, visible, position, ground_color]);
        }
    }
    Some(())
}

/// Clamp values that must stay non-negative; drop blank names
fn sanitized(patch: &LightPatch) -> LightPatch {
    let non_negative = |v: Option<f32>| v.filter(|v| v.is_finite()).map(|v| v.max(0.0));
    LightPatch {
        name: patch.name.clone().filter(|n| !n.trim().is_empty()),
        intensity: non_negative(patch.intensity),
        distance: non_negative(patch.distance),
        decay: non_negative(patch.decay),
        width: non_negative(patch.width),
        height: non_negative(patch.height),
        angle: patch
            .angle
            .filter(|a| a.is_finite())
            .map(|a| a.clamp(0.0, std::f32::consts::FRAC_PI_2)),
        penumbra: patch.penumbra.filter(|p| p.is_finite()).map(|p| p.clamp(0.0, 1.0)),
        ..patch.clone()
    }
}

impl SceneStore {
    /// Add a light of a list kind with defaults. Singleton kinds yield `None`.
    pub fn add_light(&mut self, kind: LightKind) -> Option<LightId> {
        if kind.is_singleton() {
            return None;
        }
        let id = uuid::Uuid::new_v4().to_string();
        let name = next_numbered_name(
            kind.label(),
            self.document.lights.iter().map(|l| l.name()),
        );
        let light = SceneLight::with_defaults(kind, id.clone(), name)?;

        let mut next = (*self.document).clone();
        next.lights.push(light);
        self.commit(next);
        Some(id)
    }

    /// Patch a light by id, including the ambient and directional singletons
    pub fn update_light(&mut self, id: &str, patch: &LightPatch) -> bool {
        let mut updated = (*self.document).clone();
        if apply_light_patch(&mut updated, id, patch).is_none() || updated == *self.document {
            return false;
        }
        self.commit(updated);
        true
    }

    /// Remove a list light. The singleton ids are never removed.
    pub fn remove_light(&mut self, id: &str) -> bool {
        if id == AMBIENT_LIGHT_ID || id == DIRECTIONAL_LIGHT_ID {
            return false;
        }
        self.mutate(|doc| {
            let index = doc.lights.iter().position(|l| l.id() == id)?;
            Some(doc.lights.remove(index))
        })
        .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_light_numbers_per_kind() {
        let mut store = SceneStore::default();
        let a = store.add_light(LightKind::Point).unwrap();
        store.add_light(LightKind::Point).unwrap();
        store.add_light(LightKind::Spot).unwrap();
        assert_eq!(store.get_light(&a).unwrap().name(), "Point Light 1");
        assert_eq!(store.lights()[1].name(), "Point Light 2");
        assert_eq!(store.lights()[2].name(), "Spot Light 1");
    }

    #[test]
    fn test_singletons_cannot_be_added_or_removed() {
        let mut store = SceneStore::default();
        assert!(store.add_light(LightKind::Ambient).is_none());
        assert!(store.add_light(LightKind::Directional).is_none());
        assert!(!store.remove_light(AMBIENT_LIGHT_ID));
        assert!(!store.remove_light(DIRECTIONAL_LIGHT_ID));
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn test_update_singletons() {
        let mut store = SceneStore::default();
        assert!(store.update_light(
            AMBIENT_LIGHT_ID,
            &LightPatch {
                intensity: Some(0.8),
                ..Default::default()
            }
        ));
        assert_eq!(store.ambient_light().intensity, 0.8);

        assert!(store.update_light(
            DIRECTIONAL_LIGHT_ID,
            &LightPatch {
                position: Some([1.0, 2.0, 3.0]),
                shadow_bias: Some(-0.001),
                ..Default::default()
            }
        ));
        assert_eq!(store.directional_light().position, [1.0, 2.0, 3.0]);
        assert_eq!(store.directional_light().shadow.bias, -0.001);
    }

    #[test]
    fn test_update_ignores_foreign_fields() {
        let mut store = SceneStore::default();
        let id = store.add_light(LightKind::Hemisphere).unwrap();
        // Hemisphere lights have no cone angle
        assert!(!store.update_light(
            &id,
            &LightPatch {
                angle: Some(0.3),
                ..Default::default()
            }
        ));
    }

    #[test]
    fn test_spot_angle_clamped() {
        let mut store = SceneStore::default();
        let id = store.add_light(LightKind::Spot).unwrap();
        store.update_light(
            &id,
            &LightPatch {
                angle: Some(10.0),
                intensity: Some(-4.0),
                ..Default::default()
            },
        );
        match store.get_light(&id).unwrap() {
            SceneLight::Spot(spot) => {
                assert_eq!(spot.angle, std::f32::consts::FRAC_PI_2);
                assert_eq!(spot.intensity, 0.0);
            }
            other => panic!("unexpected light {other:?}"),
        }
    }

    #[test]
    fn test_remove_light() {
        let mut store = SceneStore::default();
        let id = store.add_light(LightKind::Area).unwrap();
        assert!(store.remove_light(&id));
        assert!(store.lights().is_empty());
        assert!(!store.remove_light(&id));
    }
}
