//! Chunked bulk import
//!
//! Large batches are admitted a chunk at a time with a short pause between
//! chunks so the host loop keeps running. Dropping the returned future stops
//! the import at the next chunk boundary; chunks already admitted remain.

use std::time::Duration;

use shared::{ObjectInit, SceneObject};

use super::object_ops::instantiate;
use super::SceneStore;

impl SceneStore {
    /// Admit `inits` in chunks of `import.chunk_size`, one snapshot per chunk.
    /// The last created object ends up selected.
    pub async fn import_objects_chunked(&mut self, inits: Vec<ObjectInit>) -> Vec<SceneObject> {
        let chunk_size = self.settings.import.chunk_size.max(1);
        let pause = Duration::from_millis(self.settings.import.yield_ms);
        let total = inits.len();

        let mut created = Vec::with_capacity(total);
        let mut pending = inits.into_iter().peekable();
        let mut chunk_index = 0usize;

        while pending.peek().is_some() {
            if chunk_index > 0 {
                if pause.is_zero() {
                    tokio::task::yield_now().await;
                } else {
                    tokio::time::sleep(pause).await;
                }
            }

            let chunk: Vec<ObjectInit> = pending.by_ref().take(chunk_size).collect();
            let admitted = self.admit_chunk(chunk);
            if let Some(last) = admitted.last() {
                self.selected = Some(last.id.clone());
            }
            created.extend(admitted);
            chunk_index += 1;

            tracing::debug!("Import chunk {chunk_index}: {}/{total} objects admitted", created.len());
        }

        if total > 0 {
            tracing::info!("Imported {total} object(s) in {chunk_index} chunk(s)");
        }
        created
    }

    /// Append a whole chunk in a single snapshot swap
    fn admit_chunk(&mut self, chunk: Vec<ObjectInit>) -> Vec<SceneObject> {
        let plan_elevation = self.settings.cad.plan_elevation;
        let mut next = (*self.document()).clone();
        let mut admitted = Vec::with_capacity(chunk.len());
        for init in chunk {
            let object = instantiate(init, &next, plan_elevation);
            next.objects.push(object.clone());
            admitted.push(object);
        }
        self.commit(next);
        admitted
    }
}
