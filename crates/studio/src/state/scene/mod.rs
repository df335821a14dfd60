//! Scene store
//!
//! Single owner of the canonical scene: objects, materials, lights, plus
//! selection and tool state. Every content mutation builds the next snapshot
//! and swaps it in whole, so readers only ever see complete documents.

mod display;
mod history;
mod import;
mod light_ops;
mod material_ops;
mod object_ops;
mod persistence;
mod tool_ops;

pub use display::{next_numbered_name, short_id};
pub use object_ops::SelectionCause;
pub use persistence::{normalize_document, parse_scene_document, DocumentError};

use std::sync::Arc;

use shared::{
    AmbientLight, DirectionalLight, MaterialProperties, ObjectId, SceneDocument, SceneLight,
    SceneObject,
};
use tokio::sync::watch;

use super::settings::StudioSettings;
use super::tools::ToolState;

/// Scene store with undo/redo history and snapshot notification
pub struct SceneStore {
    /// Current snapshot
    document: Arc<SceneDocument>,
    /// Selected object (transient, not part of history)
    pub(crate) selected: Option<ObjectId>,
    /// Active tool, drawing and paint state (transient)
    pub(crate) tools: ToolState,
    /// Undo stack - previous snapshots
    pub(crate) undo_stack: Vec<Arc<SceneDocument>>,
    /// Redo stack - undone snapshots
    pub(crate) redo_stack: Vec<Arc<SceneDocument>>,
    /// Monotonically increasing version counter, bumped on every snapshot swap
    pub(crate) version: u64,
    pub(crate) settings: StudioSettings,
    notifier: watch::Sender<Arc<SceneDocument>>,
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::with_settings(StudioSettings::default())
    }
}

impl SceneStore {
    pub fn with_settings(settings: StudioSettings) -> Self {
        let document = Arc::new(SceneDocument::default());
        let (notifier, _) = watch::channel(document.clone());
        Self {
            document,
            selected: None,
            tools: ToolState::default(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            version: 0,
            settings,
            notifier,
        }
    }

    /// Current scene version (increments on every snapshot swap)
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn settings(&self) -> &StudioSettings {
        &self.settings
    }

    /// Current immutable snapshot
    pub fn snapshot(&self) -> Arc<SceneDocument> {
        self.document.clone()
    }

    pub fn document(&self) -> &SceneDocument {
        &self.document
    }

    /// Receiver that always holds the latest snapshot
    pub fn subscribe(&self) -> watch::Receiver<Arc<SceneDocument>> {
        self.notifier.subscribe()
    }

    // ── Lookups ──────────────────────────────────────────────

    pub fn objects(&self) -> &[SceneObject] {
        &self.document.objects
    }

    pub fn get_object(&self, id: &str) -> Option<&SceneObject> {
        self.document.object(id)
    }

    pub fn selected_object_id(&self) -> Option<&ObjectId> {
        self.selected.as_ref()
    }

    pub fn selected_object(&self) -> Option<&SceneObject> {
        self.selected.as_deref().and_then(|id| self.document.object(id))
    }

    pub fn materials(&self) -> &[MaterialProperties] {
        &self.document.materials
    }

    pub fn get_material(&self, id: &str) -> Option<&MaterialProperties> {
        self.document.material(id)
    }

    /// Material for `id`, falling back to the default material
    pub fn resolve_material(&self, id: &str) -> Option<&MaterialProperties> {
        self.document.resolve_material(id)
    }

    pub fn lights(&self) -> &[SceneLight] {
        &self.document.lights
    }

    pub fn get_light(&self, id: &str) -> Option<&SceneLight> {
        self.document.light(id)
    }

    pub fn ambient_light(&self) -> &AmbientLight {
        &self.document.ambient_light
    }

    pub fn directional_light(&self) -> &DirectionalLight {
        &self.document.directional_light
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    // ── Snapshot swapping ────────────────────────────────────

    /// Apply `edit` to a copy of the current snapshot and commit it when the
    /// closure reports a result. `None` leaves the store untouched.
    pub(crate) fn mutate<R>(
        &mut self,
        edit: impl FnOnce(&mut SceneDocument) -> Option<R>,
    ) -> Option<R> {
        let mut next = (*self.document).clone();
        let result = edit(&mut next)?;
        self.commit(next);
        Some(result)
    }

    /// Replace the snapshot, recording the previous one for undo
    pub(crate) fn commit(&mut self, next: SceneDocument) {
        let previous = std::mem::replace(&mut self.document, Arc::new(next));
        self.undo_stack.push(previous);
        if self.undo_stack.len() > self.settings.history.undo_limit {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
        self.publish();
    }

    /// Install a snapshot without touching history
    pub(crate) fn replace_document(&mut self, document: Arc<SceneDocument>) {
        self.document = document;
        self.publish();
    }

    fn publish(&mut self) {
        self.version += 1;
        self.notifier.send_replace(self.document.clone());
    }

    /// Drop selection and drawing target that no longer resolve
    pub(crate) fn prune_stale_references(&mut self) {
        if let Some(id) = &self.selected {
            if self.document.object(id).is_none() {
                self.selected = None;
            }
        }
        if let Some(id) = &self.tools.drawing.target_object_id {
            if self.document.object(id).is_none() {
                self.tools.reset_drawing();
            }
        }
        if !self.document.has_material(&self.tools.paint_material_id) {
            self.tools.paint_material_id = shared::DEFAULT_MATERIAL_ID.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{ObjectInit, PrimitiveKind};

    #[test]
    fn test_new_store_is_empty_with_default_material() {
        let store = SceneStore::default();
        assert!(store.objects().is_empty());
        assert_eq!(store.materials().len(), 1);
        assert_eq!(store.version(), 0);
        assert!(store.selected_object().is_none());
    }

    #[test]
    fn test_subscribers_see_latest_snapshot() {
        let mut store = SceneStore::default();
        let rx = store.subscribe();
        store.add_object(ObjectInit::new(PrimitiveKind::Box));
        store.add_object(ObjectInit::new(PrimitiveKind::Sphere));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow().objects.len(), 2);
        assert_eq!(store.version(), 2);
    }

    #[test]
    fn test_snapshots_are_not_mutated_in_place() {
        let mut store = SceneStore::default();
        let before = store.snapshot();
        store.add_object(ObjectInit::new(PrimitiveKind::Box));
        assert!(before.objects.is_empty());
        assert_eq!(store.snapshot().objects.len(), 1);
    }

    #[test]
    fn test_undo_limit_from_settings() {
        let mut settings = StudioSettings::default();
        settings.history.undo_limit = 2;
        let mut store = SceneStore::with_settings(settings);
        for _ in 0..5 {
            store.add_object(ObjectInit::new(PrimitiveKind::Box));
        }
        assert_eq!(store.undo_stack.len(), 2);
    }
}
