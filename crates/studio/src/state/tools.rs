//! Active tool and in-progress drawing state.
//!
//! Tools fall into three classes:
//! - placement: single-shot, reverts to [`Tool::Select`] once an object is added
//! - drawing: multi-click, owns a [`DrawingState`] until completed or canceled
//! - persistent: stays active across selection changes and keeps the selection

use serde::{Deserialize, Serialize};
use shared::{MaterialId, ObjectId, Vec3, DEFAULT_MATERIAL_ID};

use crate::geometry::MAX_POLYGON_SIDES;

/// Behavioral class of a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolClass {
    Placement,
    Drawing,
    Persistent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    #[default]
    Select,
    Move,
    Rotate,
    Scale,
    Pan,
    Orbit,
    Paint,
    // Placement
    AddBox,
    AddCylinder,
    AddPlane,
    AddSphere,
    AddCone,
    AddTorus,
    AddText,
    Rectangle,
    // Drawing
    Line,
    Circle,
    Polygon,
    Arc,
    PushPull,
    Offset,
    Measure,
}

impl Tool {
    pub const ALL: [Tool; 22] = [
        Tool::Select,
        Tool::Move,
        Tool::Rotate,
        Tool::Scale,
        Tool::Pan,
        Tool::Orbit,
        Tool::Paint,
        Tool::AddBox,
        Tool::AddCylinder,
        Tool::AddPlane,
        Tool::AddSphere,
        Tool::AddCone,
        Tool::AddTorus,
        Tool::AddText,
        Tool::Rectangle,
        Tool::Line,
        Tool::Circle,
        Tool::Polygon,
        Tool::Arc,
        Tool::PushPull,
        Tool::Offset,
        Tool::Measure,
    ];

    pub fn class(&self) -> ToolClass {
        match self {
            Tool::Select
            | Tool::Move
            | Tool::Rotate
            | Tool::Scale
            | Tool::Pan
            | Tool::Orbit
            | Tool::Paint => ToolClass::Persistent,
            Tool::AddBox
            | Tool::AddCylinder
            | Tool::AddPlane
            | Tool::AddSphere
            | Tool::AddCone
            | Tool::AddTorus
            | Tool::AddText
            | Tool::Rectangle => ToolClass::Placement,
            Tool::Line
            | Tool::Circle
            | Tool::Polygon
            | Tool::Arc
            | Tool::PushPull
            | Tool::Offset
            | Tool::Measure => ToolClass::Drawing,
        }
    }

    /// Identifier used in scene documents and the command protocol
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Select => "select",
            Tool::Move => "move",
            Tool::Rotate => "rotate",
            Tool::Scale => "scale",
            Tool::Pan => "pan",
            Tool::Orbit => "orbit",
            Tool::Paint => "paint",
            Tool::AddBox => "add_box",
            Tool::AddCylinder => "add_cylinder",
            Tool::AddPlane => "add_plane",
            Tool::AddSphere => "add_sphere",
            Tool::AddCone => "add_cone",
            Tool::AddTorus => "add_torus",
            Tool::AddText => "add_text",
            Tool::Rectangle => "rectangle",
            Tool::Line => "line",
            Tool::Circle => "circle",
            Tool::Polygon => "polygon",
            Tool::Arc => "arc",
            Tool::PushPull => "push_pull",
            Tool::Offset => "offset",
            Tool::Measure => "measure",
        }
    }

    pub fn from_name(name: &str) -> Option<Tool> {
        Tool::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Persistent tools keep the selection and any drawing in progress
    pub fn preserves_selection(&self) -> bool {
        self.class() == ToolClass::Persistent
    }
}

/// In-progress multi-click drawing
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingState {
    /// First click of the current drawing
    pub start_point: Option<Vec3>,
    /// Further clicks, in order
    pub points: Vec<Vec3>,
    pub polygon_sides: u32,
    pub offset_distance: f64,
    /// Object the drawing operates on (push/pull face owner, measured object)
    pub target_object_id: Option<ObjectId>,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            start_point: None,
            points: Vec::new(),
            polygon_sides: 6,
            offset_distance: 0.1,
            target_object_id: None,
        }
    }
}

impl DrawingState {
    /// Whether any click has been recorded
    pub fn is_active(&self) -> bool {
        self.start_point.is_some() || !self.points.is_empty() || self.target_object_id.is_some()
    }

    pub fn begin(&mut self, point: Vec3) {
        self.start_point = Some(point);
        self.points.clear();
    }

    pub fn add_point(&mut self, point: Vec3) {
        if self.start_point.is_none() {
            self.start_point = Some(point);
        } else {
            self.points.push(point);
        }
    }

    pub fn set_polygon_sides(&mut self, sides: u32) {
        self.polygon_sides = sides.clamp(3, MAX_POLYGON_SIDES);
    }

    pub fn set_offset_distance(&mut self, distance: f64) {
        if distance.is_finite() {
            self.offset_distance = distance;
        }
    }
}

/// Tool-related transient state of the store
#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    pub active: Tool,
    pub drawing: DrawingState,
    /// Material applied by the paint tool
    pub paint_material_id: MaterialId,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            active: Tool::Select,
            drawing: DrawingState::default(),
            paint_material_id: DEFAULT_MATERIAL_ID.to_string(),
        }
    }
}

impl ToolState {
    pub fn reset_drawing(&mut self) {
        self.drawing = DrawingState::default();
    }
}
