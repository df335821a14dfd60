pub mod scene;
pub mod settings;
pub mod tools;

pub use scene::{
    next_numbered_name, normalize_document, parse_scene_document, short_id, DocumentError,
    SceneStore, SelectionCause,
};
pub use settings::{CadSettings, HistorySettings, ImportSettings, StudioSettings};
pub use tools::{DrawingState, Tool, ToolClass, ToolState};
