//! Drag-to-create tool for lines, rectangles, rounded rectangles and ellipses.

use super::{DrawShape, SelectMode, SelectTool, Tool, ToolContext, base};
use crate::input::EventFlags;
use crate::shapes::{DrawObject, RectKind, RectShape, Shape};
use crate::view::Cursor;
use kurbo::{Point, Rect};

#[derive(Debug, Clone, Copy)]
pub struct ShapeTool {
    shape: DrawShape,
    kind: RectKind,
}

impl ShapeTool {
    /// Create the tool for a rectangle-family selector.
    ///
    /// # Panics
    /// If `shape` does not draw a rectangle-family object.
    pub fn new(shape: DrawShape) -> Self {
        match shape.rect_kind() {
            Some(kind) => Self { shape, kind },
            None => panic!("{shape:?} is not drawn by the shape tool"),
        }
    }

    pub fn kind(&self) -> RectKind {
        self.kind
    }
}

impl Tool for ShapeTool {
    fn draw_shape(&self) -> DrawShape {
        self.shape
    }

    fn on_button_down(&self, cx: &mut ToolContext<'_>, flags: EventFlags, point: Point) {
        base::button_down(cx, flags, point);

        let local = cx.view.client_to_document(point);
        let object = RectShape::new(self.kind, Rect::from_points(local, local));
        let id = cx.canvas.document.add(Shape::Rect(object));
        cx.canvas.select(Some(id), false);
        log::debug!("Drawing {:?} {id} from {local:?}", self.kind);

        cx.session.active_object = Some(id);
        cx.session.mode = SelectMode::Resize;
        cx.session.drag_handle = 1;
        cx.session.last_document_point = local;
        cx.view.invalidate(id);
    }

    fn on_button_up(&self, cx: &mut ToolContext<'_>, flags: EventFlags, point: Point) {
        if point == cx.session.anchor {
            // A click creates nothing; treat it as a selection click instead.
            if let Some(id) = cx.session.active_object.take() {
                log::debug!("Discarding empty {:?} {id}", self.kind);
                cx.canvas.remove_object(id);
            }
            cx.session.last_snap = None;
            SelectTool.on_button_down(cx, flags, point);
        } else if cx.session.mode == SelectMode::Resize {
            // The release point is final even when no move preceded it.
            if let Some(id) = cx.session.active_object {
                let target = cx
                    .session
                    .last_snap
                    .unwrap_or_else(|| cx.view.client_to_document(point));
                if let Some(object) = cx.canvas.document.get_mut(id) {
                    object.move_handle_to(cx.session.drag_handle, target);
                    cx.view.invalidate(id);
                }
            }
        }
        SelectTool.on_button_up(cx, flags, point);
    }

    fn on_mouse_move(&self, cx: &mut ToolContext<'_>, flags: EventFlags, point: Point) {
        cx.view.set_cursor(Cursor::Crosshair);
        SelectTool.on_mouse_move(cx, flags, point);
    }

    fn snap(&self, cx: &mut ToolContext<'_>) {
        if matches!(self.kind, RectKind::Line | RectKind::Rectangle) {
            base::snap(cx);
        }
    }
}
