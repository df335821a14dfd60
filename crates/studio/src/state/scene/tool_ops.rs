//! Active tool transitions and drawing setters

use shared::{ObjectId, Vec3};

use super::SceneStore;
use crate::state::tools::{DrawingState, Tool};

impl SceneStore {
    /// Switch tools. Persistent tools keep selection and drawing; any other
    /// tool clears the selection and starts a fresh drawing.
    pub fn set_active_tool(&mut self, tool: Tool) {
        self.tools.active = tool;
        if tool.preserves_selection() {
            return;
        }
        self.selected = None;
        self.tools.drawing = DrawingState::default();
    }

    pub fn begin_drawing(&mut self, point: Vec3) {
        self.tools.drawing.begin(point);
    }

    pub fn add_drawing_point(&mut self, point: Vec3) {
        self.tools.drawing.add_point(point);
    }

    pub fn set_polygon_sides(&mut self, sides: u32) {
        self.tools.drawing.set_polygon_sides(sides);
    }

    pub fn set_offset_distance(&mut self, distance: f64) {
        self.tools.drawing.set_offset_distance(distance);
    }

    /// Object the current drawing operates on; must exist when set
    pub fn set_drawing_target(&mut self, target: Option<ObjectId>) -> bool {
        if let Some(id) = &target {
            if self.document.object(id).is_none() {
                return false;
            }
        }
        self.tools.drawing.target_object_id = target;
        true
    }

    /// Finish the drawing, handing back what was collected
    pub fn complete_drawing(&mut self) -> Option<DrawingState> {
        if !self.tools.drawing.is_active() {
            return None;
        }
        let fresh = DrawingState::default();
        Some(std::mem::replace(&mut self.tools.drawing, fresh))
    }

    pub fn cancel_drawing(&mut self) {
        self.tools.reset_drawing();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SelectionCause;
    use shared::{ObjectInit, PrimitiveKind};

    #[test]
    fn test_persistent_tools_keep_selection() {
        let mut store = SceneStore::default();
        let obj = store.add_object(ObjectInit::new(PrimitiveKind::Box));
        for tool in [Tool::Move, Tool::Paint, Tool::Select, Tool::Orbit] {
            store.set_active_tool(tool);
            assert_eq!(store.selected_object_id(), Some(&obj.id));
        }
    }

    #[test]
    fn test_other_tools_clear_selection() {
        let mut store = SceneStore::default();
        let obj = store.add_object(ObjectInit::new(PrimitiveKind::Box));
        store.set_active_tool(Tool::Line);
        assert!(store.selected_object_id().is_none());

        store.select_object(Some(&obj.id), SelectionCause::User);
        store.set_active_tool(Tool::AddSphere);
        assert!(store.selected_object_id().is_none());
    }

    #[test]
    fn test_switching_drawing_tools_resets_drawing() {
        let mut store = SceneStore::default();
        store.set_active_tool(Tool::Polygon);
        store.set_polygon_sides(9);
        store.add_drawing_point([1.0, 0.0, 1.0]);

        store.set_active_tool(Tool::Offset);
        assert!(!store.tools().drawing.is_active());
        assert_eq!(store.tools().drawing.polygon_sides, 6);
        assert_eq!(store.tools().drawing.offset_distance, 0.1);
    }

    #[test]
    fn test_complete_drawing_returns_points() {
        let mut store = SceneStore::default();
        store.set_active_tool(Tool::Measure);
        assert!(store.complete_drawing().is_none());

        store.begin_drawing([0.0, 0.0, 0.0]);
        store.add_drawing_point([3.0, 0.0, 4.0]);
        let done = store.complete_drawing().unwrap();
        assert_eq!(done.points, vec![[3.0, 0.0, 4.0]]);
        assert!(!store.tools().drawing.is_active());
    }

    #[test]
    fn test_drawing_target_must_exist() {
        let mut store = SceneStore::default();
        assert!(!store.set_drawing_target(Some("ghost".into())));
        assert!(store.set_drawing_target(None));
    }
}
