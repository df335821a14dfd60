//! Headless test harness for programmatic scene manipulation.
//!
//! Couples a [`SceneStore`] with a [`SceneSynchronizer`] so tests and the
//! command protocol can drive edits and inspect the renderer mirror.

use shared::{
    DimensionPatch, ObjectId, ObjectInit, ObjectPatch, PrimitiveKind, SceneObject,
};

use crate::cad::{try_import_cad_document, CadImportError};
use crate::state::{SceneStore, SelectionCause, StudioSettings};
use crate::sync::{RenderObject, SceneSynchronizer, SyncReport, TextureCache};
use crate::validation::MeshValidator;
use crate::viewport::mesh::GeometryMesh;

/// Headless harness: scene store plus renderer mirror
pub struct TestHarness {
    pub store: SceneStore,
    pub sync: SceneSynchronizer,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_settings(StudioSettings::default())
    }

    pub fn with_settings(settings: StudioSettings) -> Self {
        Self {
            store: SceneStore::with_settings(settings),
            sync: SceneSynchronizer::default(),
        }
    }

    /// Harness whose synchronizer uses a custom texture cache
    pub fn with_textures(textures: TextureCache) -> Self {
        Self {
            store: SceneStore::default(),
            sync: SceneSynchronizer::new(textures),
        }
    }

    // ── Scene manipulation ────────────────────────────────────

    /// Add an object with defaults and return its ID
    pub fn add(&mut self, kind: PrimitiveKind) -> ObjectId {
        self.store.add_object(ObjectInit::new(kind)).id
    }

    /// Add a box with explicit dimensions and return its ID
    pub fn add_box(&mut self, width: f64, height: f64, depth: f64) -> ObjectId {
        self.store
            .add_object(crate::fixtures::box_init(width, height, depth))
            .id
    }

    pub fn update(&mut self, id: &str, patch: ObjectPatch) -> bool {
        self.store.update_object(id, patch)
    }

    /// Change only the height-like dimension of `kind`'s object
    pub fn resize_height(&mut self, id: &str, value: f64) -> bool {
        let Some(obj) = self.store.get_object(id) else {
            return false;
        };
        let patch = match obj.kind() {
            PrimitiveKind::Sphere => DimensionPatch {
                radius: Some(value),
                ..Default::default()
            },
            PrimitiveKind::Torus => DimensionPatch {
                tube: Some(value),
                ..Default::default()
            },
            PrimitiveKind::Text => DimensionPatch {
                size: Some(value),
                ..Default::default()
            },
            _ => DimensionPatch::height(value),
        };
        self.store.update_object(id, ObjectPatch::dimensions(patch))
    }

    pub fn delete(&mut self, id: &str) -> bool {
        self.store.remove_object(id)
    }

    /// Import a DXF document as one CAD-plan object
    pub fn import_dxf(&mut self, text: &str) -> Result<SceneObject, CadImportError> {
        let import = try_import_cad_document(text, &self.store.settings().cad)?;
        Ok(self.store.add_object(import.object))
    }

    pub fn undo(&mut self) -> bool {
        self.store.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.store.redo()
    }

    /// Replace the scene with an empty default document
    pub fn clear(&mut self) {
        self.store.load_document(Default::default());
        self.sync.clear();
    }

    pub fn load_scene_json(&mut self, json: &str) -> bool {
        self.store.load_json(json)
    }

    pub fn export_scene_json(&self) -> String {
        self.store.export_json().unwrap_or_default()
    }

    // ── Selection / visibility ────────────────────────────────

    pub fn select(&mut self, id: &str) -> bool {
        self.store.select_object(Some(id), SelectionCause::User)
    }

    pub fn clear_selection(&mut self) {
        self.store.clear_selection();
    }

    pub fn hide(&mut self, id: &str) -> bool {
        self.store.set_object_visible(id, false)
    }

    pub fn show(&mut self, id: &str) -> bool {
        self.store.set_object_visible(id, true)
    }

    // ── Sync + inspection ─────────────────────────────────────

    /// Reconcile the mirror with the store if the store moved on
    pub fn sync(&mut self) -> Option<SyncReport> {
        self.sync
            .reconcile_if_newer(self.store.document(), self.store.version())
    }

    pub fn object_count(&self) -> usize {
        self.store.objects().len()
    }

    pub fn visible_count(&self) -> usize {
        self.store.objects().iter().filter(|o| o.visible).count()
    }

    pub fn object(&self, id: &str) -> Option<&SceneObject> {
        self.store.get_object(id)
    }

    pub fn render_object(&self, id: &str) -> Option<&RenderObject> {
        self.sync.object(id)
    }

    /// Validator for an object's triangle mesh (none for plans)
    pub fn validate_mesh(&self, id: &str) -> Option<MeshValidator<'_>> {
        match &self.sync.object(id)?.geometry.mesh {
            GeometryMesh::Triangles(mesh) => Some(MeshValidator::new(mesh)),
            GeometryMesh::Lines(_) => None,
        }
    }

    /// Geometry buffers currently allocated by the mirror
    pub fn live_geometry(&self) -> usize {
        self.sync.ledger().live_count()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_harness_empty() {
        let h = TestHarness::new();
        assert_eq!(h.object_count(), 0);
        assert_eq!(h.live_geometry(), 0);
    }

    #[test]
    fn test_add_every_kind() {
        let mut h = TestHarness::new();
        for kind in PrimitiveKind::generative() {
            h.add(*kind);
        }
        assert_eq!(h.object_count(), PrimitiveKind::generative().len());
        let report = h.sync().unwrap();
        assert_eq!(report.created, h.object_count());
    }

    #[test]
    fn test_undo_redo_cycle() {
        let mut h = TestHarness::new();
        h.add_box(1.0, 1.0, 1.0);
        assert!(h.undo());
        assert_eq!(h.object_count(), 0);
        assert!(h.redo());
        assert_eq!(h.object_count(), 1);
    }

    #[test]
    fn test_clear_releases_geometry() {
        let mut h = TestHarness::new();
        h.add_box(1.0, 1.0, 1.0);
        h.sync();
        h.clear();
        assert_eq!(h.object_count(), 0);
        assert_eq!(h.live_geometry(), 0);
    }

    #[test]
    fn test_hide_keeps_mirror_object() {
        let mut h = TestHarness::new();
        let id = h.add_box(1.0, 1.0, 1.0);
        h.sync();
        h.hide(&id);
        let report = h.sync().unwrap();
        assert_eq!(report.updated, 1);
        assert!(!h.render_object(&id).unwrap().visible);
        assert_eq!(h.visible_count(), 0);
    }

    #[test]
    fn test_validate_mesh() {
        let mut h = TestHarness::new();
        let id = h.add_box(2.0, 3.0, 4.0);
        h.sync();
        let v = h.validate_mesh(&id).unwrap();
        assert!(v.validate_all().is_empty());
        assert!(v.dimensions_approx([2.0, 3.0, 4.0], 1e-5));
    }
}
