//! DrawTools Core Library
//!
//! Interactive drawing tools for a vector editor: selection, rectangle-family
//! shapes and polygons, with handle-to-handle snapping. Platform-agnostic; the
//! host supplies pointer events and a [`View`].

pub mod canvas;
pub mod config;
pub mod input;
pub mod selection;
pub mod shapes;
pub mod snap;
pub mod tools;
pub mod view;

pub use canvas::{Canvas, Document};
pub use config::{ConfigError, ToolConfig};
pub use input::{EventFlags, ToolEvent};
pub use selection::Selection;
pub use shapes::{DrawObject, ObjectId, Polygon, RectKind, RectShape, Shape};
pub use snap::{SNAP_MEMORY_RADIUS, SNAP_RADIUS, SnapCandidate, SnapRadii, find_snap_candidate};
pub use tools::{DrawShape, InteractionSession, SelectMode, Tool, ToolContext, ToolManager};
pub use view::{CanvasView, Cursor, View};
