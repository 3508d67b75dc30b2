//! State shared by the tools for the duration of one gesture.

use super::{DrawShape, SelectMode};
use crate::canvas::Document;
use crate::input::EventFlags;
use crate::shapes::{DrawObject, ObjectId};
use kurbo::Point;

/// Interaction state handed to whichever tool is active.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionSession {
    /// Client point where the primary button went down.
    pub anchor: Point,
    /// Last client point seen.
    pub last: Point,
    /// Flags of the last event.
    pub flags: EventFlags,
    /// Tool that receives the next button-down.
    pub draw_shape: DrawShape,
    /// Current drag interpretation.
    pub mode: SelectMode,
    /// Handle being dragged, 0 when none.
    pub drag_handle: usize,
    /// Last document point used for moves and snapping.
    pub last_document_point: Point,
    /// Snap point currently in effect.
    pub last_snap: Option<Point>,
    /// Object being resized or built.
    pub active_object: Option<ObjectId>,
}

impl InteractionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the manipulated object, hiding any snap it shows.
    pub fn release_active(&mut self, document: &mut Document) {
        self.last_snap = None;
        let Some(id) = self.active_object.take() else {
            return;
        };
        match document.get_mut(id) {
            Some(object) => object.set_active_snap(None, 0),
            None => log::warn!("Active object {id} is no longer in the document"),
        }
    }
}
