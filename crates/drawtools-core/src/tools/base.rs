//! Behavior shared by every tool. Tools call these helpers explicitly.

use super::{DrawShape, SelectMode, ToolContext};
use crate::input::EventFlags;
use crate::shapes::DrawObject;
use crate::snap::find_snap_candidate;
use crate::view::Cursor;
use kurbo::Point;

/// Start a gesture: close in-place editing, capture input and record the anchor.
pub fn button_down(cx: &mut ToolContext<'_>, flags: EventFlags, point: Point) {
    if cx.view.close_in_place_item() {
        log::debug!("Closed in-place item before gesture");
    }
    cx.view.capture_input();
    cx.session.anchor = point;
    cx.session.last = point;
    cx.session.flags = flags;
}

/// End a gesture. Releasing at the anchor is a click, which reverts the
/// selector to the selection tool.
pub fn button_up(cx: &mut ToolContext<'_>, flags: EventFlags, point: Point) {
    cx.view.release_capture();
    cx.session.flags = flags;
    if point == cx.session.anchor && cx.session.draw_shape != DrawShape::Selection {
        log::debug!("Click with {:?} tool, back to selection", cx.session.draw_shape);
        cx.session.draw_shape = DrawShape::Selection;
    }
    cx.session.release_active(&mut cx.canvas.document);
}

pub fn mouse_move(cx: &mut ToolContext<'_>, flags: EventFlags, point: Point) {
    cx.session.last = point;
    cx.session.flags = flags;
    cx.view.set_cursor(Cursor::Arrow);
}

/// Abort whatever is in progress and return to the selection tool.
pub fn cancel(cx: &mut ToolContext<'_>) {
    if cx.view.has_capture() {
        cx.view.release_capture();
    }
    cx.session.mode = SelectMode::None;
    cx.session.draw_shape = DrawShape::Selection;
    cx.session.release_active(&mut cx.canvas.document);
}

/// Lock the dragged handle of the active object onto a nearby handle of
/// another object, or drop a snap the pointer has moved away from.
pub fn snap(cx: &mut ToolContext<'_>) {
    let session = &mut *cx.session;
    if session.mode != SelectMode::Resize {
        return;
    }
    let Some(active) = session.active_object else {
        return;
    };
    let radii = cx.config.snap_radii();
    let reference = session.last_document_point;

    match find_snap_candidate(&cx.canvas.document, active, reference, radii) {
        Some(candidate) => {
            let Some(object) = cx.canvas.document.get_mut(active) else {
                log::warn!("Snap target {active} is no longer in the document");
                return;
            };
            session.last_document_point = candidate.point;
            if session.last_snap != Some(candidate.point) {
                log::debug!(
                    "Snapped handle {} of {active} to handle {} of {}",
                    session.drag_handle,
                    candidate.handle,
                    candidate.object
                );
                session.last_snap = Some(candidate.point);
                object.set_active_snap(Some(candidate.point), session.drag_handle);
            }
            session.last = cx.view.document_to_client(candidate.point);
            object.move_handle_to(session.drag_handle, candidate.point);
            cx.view.invalidate(active);
        }
        None => {
            let Some(previous) = session.last_snap else {
                return;
            };
            if radii.is_memory(previous, reference) {
                return;
            }
            log::debug!("Released snap at {previous:?}");
            session.last_snap = None;
            if let Some(object) = cx.canvas.document.get_mut(active) {
                object.set_active_snap(None, 0);
                cx.view.invalidate(active);
            }
        }
    }
}
