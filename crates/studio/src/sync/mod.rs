//! Renderer synchronization.
//!
//! Keeps a mutable renderer-side mirror (geometry, transforms, materials,
//! textures) in line with immutable scene snapshots. Objects and materials
//! are indexed by id and diffed one by one; nothing is rebuilt wholesale.

pub mod geometry;
mod material;
mod object;
pub mod resources;
pub mod texture_cache;

pub use geometry::Geometry;
pub use material::{sync_material, RenderMaterial, TextureBinding};
pub use object::{sync_object, RenderObject, SyncAction};
pub use resources::{GeometryHandle, ResourceLedger};
pub use texture_cache::{ImageDecoder, Texture, TextureCache, TextureDecoder, TextureError};

use std::collections::HashMap;

use shared::{MaterialId, MaterialProperties, ObjectId, SceneDocument};

/// Counts of what one reconciliation did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub created: usize,
    pub rebuilt: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub removed: usize,
    pub materials_synced: usize,
    pub materials_removed: usize,
}

/// Owner of the renderer mirror
pub struct SceneSynchronizer {
    objects: HashMap<ObjectId, RenderObject>,
    materials: HashMap<MaterialId, RenderMaterial>,
    textures: TextureCache,
    ledger: ResourceLedger,
    /// Store version last reconciled against
    version: u64,
}

impl Default for SceneSynchronizer {
    fn default() -> Self {
        Self::new(TextureCache::default())
    }
}

impl SceneSynchronizer {
    pub fn new(textures: TextureCache) -> Self {
        Self {
            objects: HashMap::new(),
            materials: HashMap::new(),
            textures,
            ledger: ResourceLedger::new(),
            version: u64::MAX, // force first reconcile
        }
    }

    /// Whether the mirror reflects snapshot `version`
    pub fn is_current(&self, version: u64) -> bool {
        self.version == version
    }

    /// Reconcile only if `version` differs from the last one seen
    pub fn reconcile_if_newer(&mut self, doc: &SceneDocument, version: u64) -> Option<SyncReport> {
        if self.is_current(version) {
            return None;
        }
        let report = self.reconcile(doc);
        self.version = version;
        Some(report)
    }

    /// Diff the mirror against `doc` and apply targeted updates
    pub fn reconcile(&mut self, doc: &SceneDocument) -> SyncReport {
        let mut report = SyncReport::default();

        let mut materials = HashMap::with_capacity(doc.materials.len());
        for props in &doc.materials {
            let previous = self.materials.remove(&props.id);
            let render = match previous {
                Some(prev) if prev.source == *props => prev,
                prev => {
                    report.materials_synced += 1;
                    sync_material(props, prev, &mut self.textures)
                }
            };
            materials.insert(props.id.clone(), render);
        }
        report.materials_removed = self.materials.len();
        self.materials = materials;

        let fallback = MaterialProperties::default_material();
        let mut objects = HashMap::with_capacity(doc.objects.len());
        for object in &doc.objects {
            let material = doc.resolve_material(&object.material_id).unwrap_or(&fallback);
            let previous = self.objects.remove(&object.id);
            let (render, action) = sync_object(object, previous, material, &mut self.ledger);
            match action {
                SyncAction::Created => report.created += 1,
                SyncAction::Rebuilt => report.rebuilt += 1,
                SyncAction::Updated => report.updated += 1,
                SyncAction::Unchanged => report.unchanged += 1,
            }
            objects.insert(object.id.clone(), render);
        }

        for (id, stale) in self.objects.drain() {
            tracing::debug!("Releasing renderer object {id}");
            stale.geometry.release(&mut self.ledger);
            report.removed += 1;
        }
        self.objects = objects;

        tracing::debug!(?report, "Scene reconciled");
        report
    }

    pub fn object(&self, id: &str) -> Option<&RenderObject> {
        self.objects.get(id)
    }

    pub fn objects(&self) -> impl Iterator<Item = &RenderObject> {
        self.objects.values()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn material(&self, id: &str) -> Option<&RenderMaterial> {
        self.materials.get(id)
    }

    pub fn textures(&self) -> &TextureCache {
        &self.textures
    }

    pub fn textures_mut(&mut self) -> &mut TextureCache {
        &mut self.textures
    }

    pub fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    /// Release every resource and forget the mirror
    pub fn clear(&mut self) {
        for (_, render) in self.objects.drain() {
            render.geometry.release(&mut self.ledger);
        }
        self.materials.clear();
        self.version = u64::MAX;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SceneStore;
    use shared::{DimensionPatch, ObjectInit, ObjectPatch, PrimitiveKind};

    #[test]
    fn test_reconcile_lifecycle() {
        let mut store = SceneStore::default();
        let mut sync = SceneSynchronizer::default();

        let a = store.add_object(ObjectInit::new(PrimitiveKind::Box));
        let b = store.add_object(ObjectInit::new(PrimitiveKind::Cylinder));
        let report = sync.reconcile(store.document());
        assert_eq!(report.created, 2);
        assert_eq!(report.materials_synced, 1);

        store.update_object(
            &a.id,
            ObjectPatch {
                position: Some([2.0, 0.5, 0.0]),
                ..Default::default()
            },
        );
        store.update_object(&b.id, ObjectPatch::dimensions(DimensionPatch::height(3.0)));
        let report = sync.reconcile(store.document());
        assert_eq!(report.updated, 1);
        assert_eq!(report.rebuilt, 1);
        assert_eq!(report.materials_synced, 0);

        store.remove_object(&a.id);
        let report = sync.reconcile(store.document());
        assert_eq!(report.removed, 1);
        assert_eq!(report.unchanged, 1);
        assert_eq!(sync.ledger().live_count(), 1);
    }

    #[test]
    fn test_reconcile_if_newer_skips_same_version() {
        let mut store = SceneStore::default();
        let mut sync = SceneSynchronizer::default();
        store.add_object(ObjectInit::new(PrimitiveKind::Sphere));

        assert!(sync.reconcile_if_newer(store.document(), store.version()).is_some());
        assert!(sync.reconcile_if_newer(store.document(), store.version()).is_none());
        assert!(sync.is_current(store.version()));
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut store = SceneStore::default();
        let mut sync = SceneSynchronizer::default();
        store.add_object(ObjectInit::new(PrimitiveKind::Torus));
        store.add_object(ObjectInit::new(PrimitiveKind::Cone));
        sync.reconcile(store.document());
        sync.clear();
        assert_eq!(sync.ledger().live_count(), 0);
        assert_eq!(sync.object_count(), 0);
    }

    #[test]
    fn test_every_handle_released_exactly_once() {
        let mut store = SceneStore::default();
        let mut sync = SceneSynchronizer::default();
        let id = store.add_object(ObjectInit::new(PrimitiveKind::Box)).id;
        sync.reconcile(store.document());
        for height in [2.0, 3.0, 4.0] {
            store.update_object(&id, ObjectPatch::dimensions(DimensionPatch::height(height)));
            sync.reconcile(store.document());
        }
        assert_eq!(sync.ledger().allocated(), 4);
        assert_eq!(sync.ledger().released(), 3);

        sync.clear();
        assert_eq!(sync.ledger().released(), sync.ledger().allocated());
        assert_eq!(sync.ledger().live_count(), 0);
    }
}
