//! Object CRUD and selection

use shared::{
    Dimensions, ObjectInit, ObjectPatch, PrimitiveKind, SceneDocument, SceneObject,
    DEFAULT_MATERIAL_ID,
};

use super::display::{next_numbered_name, short_id};
use super::SceneStore;
use crate::geometry::{
    clamp_scale, default_dimensions_and_pose, is_axis_upright, merge_dimensions,
    normalize_dimensions, resting_y,
};
use crate::state::tools::{DrawingState, Tool, ToolClass};

/// Where a selection change comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionCause {
    /// Plain user pick; aborts an unrelated drawing in progress
    #[default]
    User,
    /// Side effect of the interaction driving the current drawing
    DrawingInteraction,
}

/// Build a new object from `init` against the document it will join
pub(crate) fn instantiate(
    init: ObjectInit,
    document: &SceneDocument,
    plan_elevation: f64,
) -> SceneObject {
    let kind = init.kind;
    let name = init
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| next_object_name(kind, &document.objects));

    let mut pose = default_dimensions_and_pose(
        kind,
        &init.dimensions,
        init.position,
        init.rotation,
        plan_elevation,
    );
    if kind == PrimitiveKind::CadPlan {
        let mut dims = Dimensions::CadPlan(init.cad_plan.unwrap_or_default());
        normalize_dimensions(&mut dims);
        pose.dimensions = dims;
    }

    let material_id = match init.material_id {
        Some(id) if document.has_material(&id) => id,
        Some(id) => {
            tracing::debug!("Unknown material '{id}', using default");
            DEFAULT_MATERIAL_ID.to_string()
        }
        None => DEFAULT_MATERIAL_ID.to_string(),
    };

    SceneObject {
        id: uuid::Uuid::new_v4().to_string(),
        name,
        position: pose.position,
        rotation: pose.rotation,
        scale: clamp_scale(init.scale.unwrap_or([1.0, 1.0, 1.0])),
        dimensions: pose.dimensions,
        material_id,
        visible: init.visible.unwrap_or(true),
        locked: init.locked.unwrap_or(false),
        custom_attributes: init.custom_attributes,
        modifiers: init.modifiers,
    }
}

fn next_object_name(kind: PrimitiveKind, objects: &[SceneObject]) -> String {
    next_numbered_name(kind.label(), objects.iter().map(|o| o.name.as_str()))
}

/// Apply `patch` to `object`. Returns the patched copy.
fn apply_patch(
    object: &SceneObject,
    patch: &ObjectPatch,
    document: &SceneDocument,
    plan_elevation: f64,
) -> SceneObject {
    let mut obj = object.clone();

    if let Some(name) = patch.name.as_ref().filter(|n| !n.trim().is_empty()) {
        obj.name = name.clone();
    }
    if let Some(locked) = patch.locked {
        obj.locked = locked;
    }
    if let Some(visible) = patch.visible {
        obj.visible = visible;
    }

    let transform_requested =
        patch.position.is_some() || patch.rotation.is_some() || patch.scale.is_some();
    if obj.locked && transform_requested {
        tracing::debug!("Object {} is locked, ignoring transform", short_id(&obj.id));
    } else {
        if let Some(position) = patch.position {
            obj.position = position;
        }
        if let Some(rotation) = patch.rotation {
            obj.rotation = rotation;
        }
        if let Some(scale) = patch.scale {
            obj.scale = clamp_scale(scale);
        }
    }

    if let Some(dims) = &patch.dimensions {
        let change = merge_dimensions(&mut obj.dimensions, dims);
        normalize_dimensions(&mut obj.dimensions);
        // Keep resized objects grounded unless the caller is placing them
        if change.height_like_changed
            && patch.position.is_none()
            && is_axis_upright(obj.kind(), &obj.rotation)
        {
            obj.position[1] = resting_y(&obj.dimensions, plan_elevation);
        }
    }

    if let Some(material_id) = &patch.material_id {
        obj.material_id = if document.has_material(material_id) {
            material_id.clone()
        } else {
            DEFAULT_MATERIAL_ID.to_string()
        };
    }
    if let Some(attrs) = &patch.custom_attributes {
        obj.custom_attributes = attrs.clone();
    }
    if let Some(modifiers) = &patch.modifiers {
        obj.modifiers = modifiers.clone();
    }

    obj
}

impl SceneStore {
    /// Add an object with kind defaults, select it and retire a placement tool
    pub fn add_object(&mut self, init: ObjectInit) -> SceneObject {
        let plan_elevation = self.settings.cad.plan_elevation;
        let object = instantiate(init, &self.document, plan_elevation);

        let mut next = (*self.document).clone();
        next.objects.push(object.clone());
        self.commit(next);

        tracing::debug!("Added {} '{}'", object.kind().label(), object.name);
        self.selected = Some(object.id.clone());
        if self.tools.active.class() == ToolClass::Placement {
            self.tools.active = Tool::Select;
            self.tools.drawing = DrawingState::default();
        }
        object
    }

    /// Merge `patch` into an object. Returns true when the object changed.
    pub fn update_object(&mut self, id: &str, patch: ObjectPatch) -> bool {
        let Some(current) = self.document.object(id) else {
            return false;
        };
        let updated = apply_patch(current, &patch, &self.document, self.settings.cad.plan_elevation);
        if updated == *current {
            return false;
        }

        self.mutate(|doc| {
            let slot = doc.object_mut(id)?;
            *slot = updated;
            Some(())
        })
        .is_some()
    }

    /// Remove an object, clearing selection and drawing target pointing at it
    pub fn remove_object(&mut self, id: &str) -> bool {
        let removed = self
            .mutate(|doc| {
                let index = doc.objects.iter().position(|o| o.id == id)?;
                Some(doc.objects.remove(index))
            })
            .is_some();

        if removed {
            if self.selected.as_deref() == Some(id) {
                self.selected = None;
            }
            if self.tools.drawing.target_object_id.as_deref() == Some(id) {
                self.tools.reset_drawing();
            }
        }
        removed
    }

    /// Copy an object next to the original and select the copy
    pub fn duplicate_object(&mut self, id: &str) -> Option<SceneObject> {
        let source = self.document.object(id)?;
        let mut copy = source.clone();
        copy.id = uuid::Uuid::new_v4().to_string();
        copy.name = next_object_name(copy.kind(), &self.document.objects);
        copy.position[0] += 1.0;

        let mut next = (*self.document).clone();
        next.objects.push(copy.clone());
        self.commit(next);

        self.selected = Some(copy.id.clone());
        Some(copy)
    }

    pub fn set_object_visible(&mut self, id: &str, visible: bool) -> bool {
        self.update_object(
            id,
            ObjectPatch {
                visible: Some(visible),
                ..Default::default()
            },
        )
    }

    pub fn set_object_locked(&mut self, id: &str, locked: bool) -> bool {
        self.update_object(
            id,
            ObjectPatch {
                locked: Some(locked),
                ..Default::default()
            },
        )
    }

    /// Change the selection. Returns false when `id` does not resolve.
    ///
    /// A drawing in progress is reset unless the change comes from the
    /// drawing's own interaction or targets the drawing's object.
    pub fn select_object(&mut self, id: Option<&str>, cause: SelectionCause) -> bool {
        if let Some(id) = id {
            if self.document.object(id).is_none() {
                return false;
            }
        }
        if self.selected.as_deref() == id {
            return true;
        }

        let drives_drawing = cause == SelectionCause::DrawingInteraction
            || (id.is_some() && self.tools.drawing.target_object_id.as_deref() == id);
        if self.tools.drawing.is_active() && !drives_drawing {
            tracing::debug!("Selection change aborts drawing in progress");
            self.tools.reset_drawing();
        }

        self.selected = id.map(str::to_string);
        true
    }

    pub fn clear_selection(&mut self) {
        self.select_object(None, SelectionCause::User);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{DimensionPatch, MaterialProperties};

    fn store_with_box() -> (SceneStore, SceneObject) {
        let mut store = SceneStore::default();
        let obj = store.add_object(ObjectInit::new(PrimitiveKind::Box));
        (store, obj)
    }

    #[test]
    fn test_add_object_names_and_selects() {
        let mut store = SceneStore::default();
        let a = store.add_object(ObjectInit::new(PrimitiveKind::Box));
        let b = store.add_object(ObjectInit::new(PrimitiveKind::Box));
        let c = store.add_object(ObjectInit::new(PrimitiveKind::Cone));
        assert_eq!(a.name, "Box 1");
        assert_eq!(b.name, "Box 2");
        assert_eq!(c.name, "Cone 1");
        assert_eq!(store.selected_object_id(), Some(&c.id));
    }

    #[test]
    fn test_add_object_keeps_explicit_name() {
        let mut store = SceneStore::default();
        let mut init = ObjectInit::new(PrimitiveKind::Box);
        init.name = Some("Kitchen counter".into());
        assert_eq!(store.add_object(init).name, "Kitchen counter");
    }

    #[test]
    fn test_unknown_material_falls_back_to_default() {
        let mut store = SceneStore::default();
        let obj = store.add_object(ObjectInit::new(PrimitiveKind::Box).with_material("missing"));
        assert_eq!(obj.material_id, DEFAULT_MATERIAL_ID);
    }

    #[test]
    fn test_placement_tool_is_single_shot() {
        let mut store = SceneStore::default();
        store.set_active_tool(Tool::AddBox);
        store.add_object(ObjectInit::new(PrimitiveKind::Box));
        assert_eq!(store.tools().active, Tool::Select);

        store.set_active_tool(Tool::Move);
        store.add_object(ObjectInit::new(PrimitiveKind::Box));
        assert_eq!(store.tools().active, Tool::Move);
    }

    #[test]
    fn test_update_height_regrounds() {
        let (mut store, obj) = store_with_box();
        assert!(store.update_object(&obj.id, ObjectPatch::dimensions(DimensionPatch::height(4.0))));
        assert_eq!(store.get_object(&obj.id).unwrap().position[1], 2.0);
    }

    #[test]
    fn test_update_with_explicit_position_not_regrounded() {
        let (mut store, obj) = store_with_box();
        store.update_object(
            &obj.id,
            ObjectPatch {
                position: Some([0.0, 9.0, 0.0]),
                dimensions: Some(DimensionPatch::height(4.0)),
                ..Default::default()
            },
        );
        assert_eq!(store.get_object(&obj.id).unwrap().position[1], 9.0);
    }

    #[test]
    fn test_tilted_object_not_regrounded() {
        let (mut store, obj) = store_with_box();
        store.update_object(
            &obj.id,
            ObjectPatch {
                rotation: Some([0.5, 0.0, 0.0]),
                ..Default::default()
            },
        );
        store.update_object(&obj.id, ObjectPatch::dimensions(DimensionPatch::height(4.0)));
        assert_eq!(store.get_object(&obj.id).unwrap().position[1], 0.5);
    }

    #[test]
    fn test_width_change_keeps_y() {
        let (mut store, obj) = store_with_box();
        store.update_object(
            &obj.id,
            ObjectPatch {
                position: Some([0.0, 3.0, 0.0]),
                ..Default::default()
            },
        );
        store.update_object(
            &obj.id,
            ObjectPatch::dimensions(DimensionPatch {
                width: Some(5.0),
                ..Default::default()
            }),
        );
        assert_eq!(store.get_object(&obj.id).unwrap().position[1], 3.0);
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let (mut store, obj) = store_with_box();
        let version = store.version();
        assert!(!store.update_object(&obj.id, ObjectPatch::default()));
        assert_eq!(store.get_object(&obj.id), Some(&obj));
        assert_eq!(store.version(), version);
    }

    #[test]
    fn test_zero_scale_clamped() {
        let (mut store, obj) = store_with_box();
        store.update_object(
            &obj.id,
            ObjectPatch {
                scale: Some([0.0, 1.0, -0.0]),
                ..Default::default()
            },
        );
        let scale = store.get_object(&obj.id).unwrap().scale;
        assert_eq!(scale[0], crate::geometry::MIN_SCALE);
        assert!(scale[2].abs() >= crate::geometry::MIN_SCALE);
    }

    #[test]
    fn test_locked_object_ignores_transform() {
        let (mut store, obj) = store_with_box();
        store.set_object_locked(&obj.id, true);
        store.update_object(
            &obj.id,
            ObjectPatch {
                position: Some([5.0, 5.0, 5.0]),
                name: Some("Pinned".into()),
                ..Default::default()
            },
        );
        let after = store.get_object(&obj.id).unwrap();
        assert_eq!(after.position, obj.position);
        assert_eq!(after.name, "Pinned");
    }

    #[test]
    fn test_update_material_reference_validated() {
        let (mut store, obj) = store_with_box();
        let wood = store.add_material(MaterialProperties::new("wood", "Wood"));
        store.update_object(
            &obj.id,
            ObjectPatch {
                material_id: Some(wood.clone()),
                ..Default::default()
            },
        );
        assert_eq!(store.get_object(&obj.id).unwrap().material_id, wood);

        store.update_object(
            &obj.id,
            ObjectPatch {
                material_id: Some("nope".into()),
                ..Default::default()
            },
        );
        assert_eq!(store.get_object(&obj.id).unwrap().material_id, DEFAULT_MATERIAL_ID);
    }

    #[test]
    fn test_remove_selected_clears_selection() {
        let (mut store, obj) = store_with_box();
        assert!(store.remove_object(&obj.id));
        assert!(store.selected_object_id().is_none());
        assert!(!store.remove_object(&obj.id));
    }

    #[test]
    fn test_remove_other_keeps_selection() {
        let mut store = SceneStore::default();
        let a = store.add_object(ObjectInit::new(PrimitiveKind::Box));
        let b = store.add_object(ObjectInit::new(PrimitiveKind::Box));
        store.remove_object(&a.id);
        assert_eq!(store.selected_object_id(), Some(&b.id));
    }

    #[test]
    fn test_duplicate_offsets_and_renames() {
        let (mut store, obj) = store_with_box();
        let copy = store.duplicate_object(&obj.id).unwrap();
        assert_ne!(copy.id, obj.id);
        assert_eq!(copy.name, "Box 2");
        assert_eq!(copy.position[0], obj.position[0] + 1.0);
        assert_eq!(store.selected_object_id(), Some(&copy.id));
        assert!(store.duplicate_object("missing").is_none());
    }

    #[test]
    fn test_select_unknown_is_rejected() {
        let (mut store, obj) = store_with_box();
        assert!(!store.select_object(Some("missing"), SelectionCause::User));
        assert_eq!(store.selected_object_id(), Some(&obj.id));
    }

    #[test]
    fn test_unrelated_selection_aborts_drawing() {
        let mut store = SceneStore::default();
        let a = store.add_object(ObjectInit::new(PrimitiveKind::Box));
        let b = store.add_object(ObjectInit::new(PrimitiveKind::Box));
        store.set_active_tool(Tool::Line);
        store.add_drawing_point([0.0, 0.0, 0.0]);

        store.select_object(Some(&a.id), SelectionCause::User);
        assert!(!store.tools().drawing.is_active());

        store.add_drawing_point([0.0, 0.0, 0.0]);
        store.select_object(Some(&b.id), SelectionCause::DrawingInteraction);
        assert!(store.tools().drawing.is_active());
    }

    #[test]
    fn test_selecting_drawing_target_keeps_drawing() {
        let mut store = SceneStore::default();
        let target = store.add_object(ObjectInit::new(PrimitiveKind::Box));
        store.set_active_tool(Tool::PushPull);
        store.set_drawing_target(Some(target.id.clone()));
        store.select_object(Some(&target.id), SelectionCause::User);
        assert_eq!(
            store.tools().drawing.target_object_id.as_deref(),
            Some(target.id.as_str())
        );
    }
}
