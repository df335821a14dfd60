//! JSON command protocol.
//!
//! One command per JSON object, tagged by `"command"`. Every command maps to
//! a single store operation and yields a [`CommandResponse`].

use serde::{Deserialize, Serialize};
use shared::{LightKind, LightPatch, MaterialPatch, MaterialProperties, ObjectInit, ObjectPatch};

use crate::harness::TestHarness;
use crate::state::Tool;

/// A command understood by the studio
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Add an object with kind defaults plus overrides
    AddObject {
        object: ObjectInit,
    },
    UpdateObject {
        id: String,
        patch: ObjectPatch,
    },
    RemoveObject {
        id: String,
    },
    DuplicateObject {
        id: String,
    },
    Select {
        id: String,
    },
    ClearSelection,
    AddMaterial {
        material: MaterialProperties,
    },
    UpdateMaterial {
        id: String,
        patch: MaterialPatch,
    },
    RemoveMaterial {
        id: String,
    },
    AddLight {
        kind: LightKind,
    },
    UpdateLight {
        id: String,
        patch: LightPatch,
    },
    RemoveLight {
        id: String,
    },
    SetTool {
        tool: Tool,
    },
    SetPaintMaterial {
        id: String,
    },
    PaintObject {
        id: String,
    },
    /// Import DXF text as one CAD-plan object
    ImportCad {
        dxf: String,
    },
    Undo,
    Redo,
    /// Replace the scene with an empty default document
    Clear,
    /// Reconcile the renderer mirror and report what changed
    Sync,
    /// List objects, materials and lights
    Inspect,
    /// Export the scene as JSON
    ExportScene,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }

    /// `ok` when `done`, otherwise an error naming the missing target
    fn done_or(done: bool, msg: impl Into<String>) -> Self {
        if done {
            Self::ok()
        } else {
            Self::err(msg)
        }
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: AgentCommand) -> CommandResponse {
    let store = &mut harness.store;
    match cmd {
        AgentCommand::AddObject { object } => {
            let obj = store.add_object(object);
            CommandResponse::ok_with_data(serde_json::json!({ "id": obj.id, "name": obj.name }))
        }

        AgentCommand::UpdateObject { id, patch } => {
            if store.get_object(&id).is_none() {
                return CommandResponse::err(format!("Object not found: {id}"));
            }
            let changed = store.update_object(&id, patch);
            CommandResponse::ok_with_data(serde_json::json!({ "changed": changed }))
        }

        AgentCommand::RemoveObject { id } => {
            let removed = store.remove_object(&id);
            CommandResponse::done_or(removed, format!("Object not found: {id}"))
        }

        AgentCommand::DuplicateObject { id } => match store.duplicate_object(&id) {
            Some(copy) => CommandResponse::ok_with_data(serde_json::json!({ "id": copy.id })),
            None => CommandResponse::err(format!("Object not found: {id}")),
        },

        AgentCommand::Select { id } => {
            let selected = store.select_object(Some(&id), crate::state::SelectionCause::User);
            CommandResponse::done_or(selected, format!("Object not found: {id}"))
        }

        AgentCommand::ClearSelection => {
            store.clear_selection();
            CommandResponse::ok()
        }

        AgentCommand::AddMaterial { material } => {
            let id = store.add_material(material);
            CommandResponse::ok_with_data(serde_json::json!({ "id": id }))
        }

        AgentCommand::UpdateMaterial { id, patch } => {
            if store.get_material(&id).is_none() {
                return CommandResponse::err(format!("Material not found: {id}"));
            }
            let changed = store.update_material(&id, &patch);
            CommandResponse::ok_with_data(serde_json::json!({ "changed": changed }))
        }

        AgentCommand::RemoveMaterial { id } => {
            let removed = store.remove_material(&id);
            CommandResponse::done_or(removed, format!("Material cannot be removed: {id}"))
        }

        AgentCommand::AddLight { kind } => match store.add_light(kind) {
            Some(id) => CommandResponse::ok_with_data(serde_json::json!({ "id": id })),
            None => CommandResponse::err(format!("{} is a fixed light", kind.label())),
        },

        AgentCommand::UpdateLight { id, patch } => {
            let changed = store.update_light(&id, &patch);
            CommandResponse::ok_with_data(serde_json::json!({ "changed": changed }))
        }

        AgentCommand::RemoveLight { id } => {
            let removed = store.remove_light(&id);
            CommandResponse::done_or(removed, format!("Light cannot be removed: {id}"))
        }

        AgentCommand::SetTool { tool } => {
            store.set_active_tool(tool);
            CommandResponse::ok()
        }

        AgentCommand::SetPaintMaterial { id } => {
            let set = store.set_paint_material(&id);
            CommandResponse::done_or(set, format!("Material not found: {id}"))
        }

        AgentCommand::PaintObject { id } => {
            if store.get_object(&id).is_none() {
                return CommandResponse::err(format!("Object not found: {id}"));
            }
            let changed = store.paint_object(&id);
            CommandResponse::ok_with_data(serde_json::json!({ "changed": changed }))
        }

        AgentCommand::ImportCad { dxf } => match harness.import_dxf(&dxf) {
            Ok(obj) => CommandResponse::ok_with_data(serde_json::json!({
                "id": obj.id,
                "segments": obj.dimensions.cad_plan().map_or(0, |p| p.segments.len()),
            })),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        AgentCommand::Undo => {
            let success = store.undo();
            CommandResponse::ok_with_data(serde_json::json!({ "undone": success }))
        }

        AgentCommand::Redo => {
            let success = store.redo();
            CommandResponse::ok_with_data(serde_json::json!({ "redone": success }))
        }

        AgentCommand::Clear => {
            harness.clear();
            CommandResponse::ok()
        }

        AgentCommand::Sync => {
            let report = harness.sync().unwrap_or_default();
            CommandResponse::ok_with_data(serde_json::json!({
                "created": report.created,
                "rebuilt": report.rebuilt,
                "updated": report.updated,
                "removed": report.removed,
            }))
        }

        AgentCommand::Inspect => {
            let objects: Vec<serde_json::Value> = store
                .objects()
                .iter()
                .map(|obj| {
                    serde_json::json!({
                        "id": obj.id,
                        "name": obj.name,
                        "kind": obj.kind(),
                        "position": obj.position,
                        "material_id": obj.material_id,
                        "visible": obj.visible,
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "object_count": objects.len(),
                "objects": objects,
                "material_count": store.materials().len(),
                "light_count": store.lights().len(),
                "selected": store.selected_object_id(),
                "tool": store.tools().active,
            }))
        }

        AgentCommand::ExportScene => {
            let json = harness.export_scene_json();
            CommandResponse::ok_with_data(serde_json::json!({ "scene_json": json }))
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: AgentCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut TestHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<AgentCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::PrimitiveKind;

    #[test]
    fn test_command_serde_undo() {
        let cmd: AgentCommand = serde_json::from_str(r#"{"command": "undo"}"#).unwrap();
        assert!(matches!(cmd, AgentCommand::Undo));
    }

    #[test]
    fn test_command_serde_add_object() {
        let json = r#"{"command": "add_object", "object": {"kind": "box", "dimensions": {"height": 2.0}}}"#;
        match serde_json::from_str::<AgentCommand>(json).unwrap() {
            AgentCommand::AddObject { object } => {
                assert_eq!(object.kind, PrimitiveKind::Box);
                assert_eq!(object.dimensions.height, Some(2.0));
            }
            other => panic!("Expected AddObject, got {other:?}"),
        }
    }

    #[test]
    fn test_command_serde_set_tool() {
        let json = r#"{"command": "set_tool", "tool": "push_pull"}"#;
        match serde_json::from_str::<AgentCommand>(json).unwrap() {
            AgentCommand::SetTool { tool } => assert_eq!(tool, Tool::PushPull),
            other => panic!("Expected SetTool, got {other:?}"),
        }
    }

    #[test]
    fn test_execute_add_object() {
        let mut h = TestHarness::new();
        let json = r#"{"command": "add_object", "object": {"kind": "box", "dimensions": {"height": 2.0}}}"#;
        let resp = execute_json(&mut h, json).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.unwrap()["name"], "Box 1");
        assert_eq!(h.object_count(), 1);
        assert_eq!(h.store.objects()[0].position[1], 1.0);
    }

    #[test]
    fn test_execute_update_missing_object() {
        let mut h = TestHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "update_object", "id": "x", "patch": {}}"#)
            .unwrap();
        assert!(!resp.success);
    }

    #[test]
    fn test_execute_inspect() {
        let mut h = TestHarness::new();
        h.add_box(1.0, 1.0, 1.0);
        h.add_box(2.0, 2.0, 2.0);

        let resp = execute_json(&mut h, r#"{"command": "inspect"}"#).unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data["object_count"], 2);
        assert_eq!(data["material_count"], 1);
        assert_eq!(data["tool"], "select");
    }

    #[test]
    fn test_execute_undo_redo() {
        let mut h = TestHarness::new();
        h.add_box(1.0, 1.0, 1.0);

        let resp = execute_json(&mut h, r#"{"command": "undo"}"#).unwrap();
        assert_eq!(resp.data.unwrap()["undone"], true);
        assert_eq!(h.object_count(), 0);

        let resp = execute_json(&mut h, r#"{"command": "redo"}"#).unwrap();
        assert_eq!(resp.data.unwrap()["redone"], true);
        assert_eq!(h.object_count(), 1);
    }

    #[test]
    fn test_execute_remove_default_material_fails() {
        let mut h = TestHarness::new();
        let resp =
            execute_json(&mut h, r#"{"command": "remove_material", "id": "default"}"#).unwrap();
        assert!(!resp.success);
    }

    #[test]
    fn test_execute_add_singleton_light_fails() {
        let mut h = TestHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "add_light", "kind": "ambient"}"#).unwrap();
        assert!(!resp.success);
        let resp = execute_json(&mut h, r#"{"command": "add_light", "kind": "point"}"#).unwrap();
        assert!(resp.success);
    }

    #[test]
    fn test_execute_export_scene() {
        let mut h = TestHarness::new();
        h.add_box(1.0, 1.0, 1.0);
        let resp = execute_json(&mut h, r#"{"command": "export_scene"}"#).unwrap();
        let data = resp.data.unwrap();
        let scene_json = data["scene_json"].as_str().unwrap();
        assert!(scene_json.contains("directionalLight"));
    }

    #[test]
    fn test_execute_clear() {
        let mut h = TestHarness::new();
        h.add_box(1.0, 1.0, 1.0);
        let resp = execute_json(&mut h, r#"{"command": "clear"}"#).unwrap();
        assert!(resp.success);
        assert_eq!(h.object_count(), 0);
    }

    #[test]
    fn test_execute_invalid_json() {
        let mut h = TestHarness::new();
        assert!(execute_json(&mut h, "not valid json").is_err());
    }

    #[test]
    fn test_execute_batch() {
        let mut h = TestHarness::new();
        let responses = execute_json_batch(
            &mut h,
            r#"[
                {"command": "add_object", "object": {"kind": "sphere"}},
                {"command": "add_object", "object": {"kind": "cone"}},
                {"command": "sync"}
            ]"#,
        )
        .unwrap();
        assert_eq!(responses.len(), 3);
        assert_eq!(responses[2].data.as_ref().unwrap()["created"], 2);
    }
}
