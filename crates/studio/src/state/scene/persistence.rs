//! Scene document import/export

use std::sync::Arc;

use shared::{MaterialProperties, SceneDocument, AMBIENT_LIGHT_ID, DEFAULT_MATERIAL_ID, DIRECTIONAL_LIGHT_ID};
use thiserror::Error;

use super::SceneStore;
use crate::geometry::{clamp_scale, normalize_dimensions};
use crate::state::tools::Tool;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("scene document is missing required field '{0}'")]
    MissingField(&'static str),
}

/// Parse a scene document, requiring the mandatory top-level fields
pub fn parse_scene_document(text: &str) -> Result<SceneDocument, DocumentError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    for field in SceneDocument::REQUIRED_FIELDS {
        if value.get(field).is_none() {
            return Err(DocumentError::MissingField(field));
        }
    }
    Ok(serde_json::from_value(value)?)
}

/// Repair loaded content so store invariants hold
pub fn normalize_document(doc: &mut SceneDocument) {
    if !doc.has_material(DEFAULT_MATERIAL_ID) {
        doc.materials.insert(0, MaterialProperties::default_material());
    }

    let mut reassigned = 0usize;
    let materials: Vec<String> = doc.materials.iter().map(|m| m.id.clone()).collect();
    for obj in &mut doc.objects {
        if !materials.contains(&obj.material_id) {
            obj.material_id = DEFAULT_MATERIAL_ID.to_string();
            reassigned += 1;
        }
        obj.scale = clamp_scale(obj.scale);
        normalize_dimensions(&mut obj.dimensions);
    }
    if reassigned > 0 {
        tracing::debug!("Reassigned {reassigned} dangling material reference(s)");
    }

    doc.ambient_light.id = AMBIENT_LIGHT_ID.to_string();
    doc.directional_light.id = DIRECTIONAL_LIGHT_ID.to_string();

    if let Some(id) = &doc.selected_object_id {
        if doc.object(id).is_none() {
            doc.selected_object_id = None;
        }
    }
}

impl SceneStore {
    /// Snapshot for persistence, including selection and active tool
    pub fn export_document(&self) -> SceneDocument {
        let mut doc = (*self.document).clone();
        doc.selected_object_id = self.selected.clone();
        doc.active_tool = Some(self.tools.active.name().to_string());
        doc
    }

    pub fn export_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(&self.export_document())?)
    }

    /// Replace the scene with `doc`. History is cleared.
    pub fn load_document(&mut self, mut doc: SceneDocument) {
        normalize_document(&mut doc);

        self.selected = doc.selected_object_id.take();
        let tool = doc.active_tool.take().and_then(|name| Tool::from_name(&name));
        self.set_active_tool_keep_selection(tool.unwrap_or_default());

        self.undo_stack.clear();
        self.redo_stack.clear();
        self.replace_document(Arc::new(doc));
        self.prune_stale_references();
    }

    /// Load a scene from JSON, substituting the default document when the
    /// text is invalid or lacks a required field. Returns false on fallback.
    pub fn load_json(&mut self, text: &str) -> bool {
        match parse_scene_document(text) {
            Ok(doc) => {
                self.load_document(doc);
                true
            }
            Err(e) => {
                tracing::warn!("Falling back to default scene: {e}");
                self.load_document(SceneDocument::default());
                false
            }
        }
    }

    fn set_active_tool_keep_selection(&mut self, tool: Tool) {
        self.tools.active = tool;
        self.tools.reset_drawing();
    }
}
