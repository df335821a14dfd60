//! Material CRUD and the paint tool

use shared::{MaterialId, MaterialPatch, MaterialProperties, DEFAULT_MATERIAL_ID};

use super::display::next_numbered_name;
use super::SceneStore;

fn unit(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn apply_material_patch(material: &mut MaterialProperties, patch: &MaterialPatch) {
    if let Some(name) = patch.name.as_ref().filter(|n| !n.trim().is_empty()) {
        material.name = name.clone();
    }
    if let Some(color) = patch.color {
        material.color = color.map(unit);
    }
    if let Some(roughness) = patch.roughness {
        material.roughness = unit(roughness);
    }
    if let Some(metalness) = patch.metalness {
        material.metalness = unit(metalness);
    }
    if let Some(maps) = &patch.maps {
        material.maps = maps.clone();
    }
    if let Some(transparent) = patch.transparent {
        material.transparent = transparent;
    }
    if let Some(opacity) = patch.opacity {
        material.opacity = unit(opacity);
    }
    if let Some(emissive) = patch.emissive {
        material.emissive = emissive.map(unit);
    }
    if let Some(intensity) = patch.emissive_intensity {
        material.emissive_intensity = if intensity.is_finite() {
            intensity.max(0.0)
        } else {
            0.0
        };
    }
}

impl SceneStore {
    /// Add a material. A missing or taken id is replaced by a fresh one,
    /// an empty name by "Material <n>".
    pub fn add_material(&mut self, mut material: MaterialProperties) -> MaterialId {
        if material.id.trim().is_empty() || self.document.has_material(&material.id) {
            material.id = uuid::Uuid::new_v4().to_string();
        }
        if material.name.trim().is_empty() {
            material.name = next_numbered_name(
                "Material",
                self.document.materials.iter().map(|m| m.name.as_str()),
            );
        }
        let id = material.id.clone();

        let mut next = (*self.document).clone();
        next.materials.push(material);
        self.commit(next);
        id
    }

    /// Apply a patch to a material. Returns true when it changed.
    pub fn update_material(&mut self, id: &str, patch: &MaterialPatch) -> bool {
        let Some(current) = self.document.material(id) else {
            return false;
        };
        let mut updated = current.clone();
        apply_material_patch(&mut updated, patch);
        if updated == *current {
            return false;
        }

        self.mutate(|doc| {
            *doc.material_mut(id)? = updated;
            Some(())
        })
        .is_some()
    }

    /// Remove a material and reassign its objects to the default material.
    /// The default material itself cannot be removed.
    pub fn remove_material(&mut self, id: &str) -> bool {
        if id == DEFAULT_MATERIAL_ID {
            return false;
        }

        let reassigned = self.mutate(|doc| {
            let index = doc.materials.iter().position(|m| m.id == id)?;
            doc.materials.remove(index);
            let mut count = 0;
            for obj in doc.objects.iter_mut().filter(|o| o.material_id == id) {
                obj.material_id = DEFAULT_MATERIAL_ID.to_string();
                count += 1;
            }
            Some(count)
        });

        match reassigned {
            Some(count) => {
                tracing::info!("Removed material {id}, {count} object(s) reassigned to default");
                if self.tools.paint_material_id == id {
                    self.tools.paint_material_id = DEFAULT_MATERIAL_ID.to_string();
                }
                true
            }
            None => false,
        }
    }

    /// Material the paint tool applies. Unknown ids are rejected.
    pub fn set_paint_material(&mut self, id: &str) -> bool {
        if !self.document.has_material(id) {
            return false;
        }
        self.tools.paint_material_id = id.to_string();
        true
    }

    /// Assign the active paint material to an object
    pub fn paint_object(&mut self, object_id: &str) -> bool {
        let material_id = self.tools.paint_material_id.clone();
        self.update_object(
            object_id,
            shared::ObjectPatch {
                material_id: Some(material_id),
                ..Default::default()
            },
        )
    }
}
