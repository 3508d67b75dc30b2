//! Click-by-click polygon construction.

use super::{DrawShape, SelectMode, SelectTool, Tool, ToolContext, base};
use crate::input::EventFlags;
use crate::shapes::{ObjectId, POLYGON_VERTEX_OFFSET, Polygon, Shape};
use crate::view::Cursor;
use kurbo::Point;

/// Each click adds a vertex; clicking the first vertex closes the polygon and
/// a double-click finishes it open-ended. Dragging with the button held
/// sketches freehand vertices.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolygonTool;

impl PolygonTool {
    /// The polygon under construction, if it still exists.
    fn active_polygon(cx: &ToolContext<'_>) -> Option<ObjectId> {
        cx.session.active_object.filter(|&id| {
            cx.canvas
                .document
                .get(id)
                .is_some_and(|s| s.as_polygon().is_some())
        })
    }

    /// Close the polygon on its first vertex, discarding it if too few vertices remain.
    fn close(cx: &mut ToolContext<'_>, id: ObjectId) {
        cx.view.release_capture();
        let keep = cx
            .canvas
            .document
            .get_mut(id)
            .and_then(Shape::as_polygon_mut)
            .is_some_and(Polygon::close);
        cx.session.release_active(&mut cx.canvas.document);
        if keep {
            log::debug!("Closed polygon {id}");
            cx.view.invalidate(id);
        } else {
            log::debug!("Discarded degenerate polygon {id}");
            cx.canvas.remove_object(id);
            cx.view.refresh();
        }
        cx.session.draw_shape = DrawShape::Selection;
        cx.session.mode = SelectMode::None;
    }
}

impl Tool for PolygonTool {
    fn draw_shape(&self) -> DrawShape {
        DrawShape::Polygon
    }

    fn on_button_down(&self, cx: &mut ToolContext<'_>, flags: EventFlags, point: Point) {
        base::button_down(cx, flags, point);
        let mut local = cx.view.client_to_document(point);

        let id = match Self::active_polygon(cx) {
            Some(id) => {
                let first = cx
                    .canvas
                    .document
                    .get(id)
                    .and_then(Shape::as_polygon)
                    .and_then(Polygon::first);
                if first == Some(local) {
                    Self::close(cx, id);
                    return;
                }
                id
            }
            None => {
                let mut polygon = Polygon::new();
                polygon.add_point(local);
                let id = cx.canvas.document.add(Shape::Polygon(polygon));
                cx.canvas.select(Some(id), false);
                cx.session.active_object = Some(id);
                log::debug!("Started polygon {id} at {local:?}");
                id
            }
        };

        // The new vertex starts one unit right of the click so it never
        // coincides with the vertex just placed there.
        local.x += POLYGON_VERTEX_OFFSET;
        let Some(polygon) = cx
            .canvas
            .document
            .get_mut(id)
            .and_then(Shape::as_polygon_mut)
        else {
            return;
        };
        polygon.add_point(local);
        log::trace!("Polygon {id} now has {} vertices", polygon.len());
        cx.session.mode = SelectMode::Resize;
        cx.session.drag_handle = polygon.len();
        cx.session.last_document_point = local;
        cx.view.invalidate(id);
    }

    fn on_button_up(&self, _cx: &mut ToolContext<'_>, _flags: EventFlags, _point: Point) {
        // Vertices are placed on button-down; the gesture continues until
        // the polygon is closed.
    }

    fn on_mouse_move(&self, cx: &mut ToolContext<'_>, flags: EventFlags, point: Point) {
        if flags.primary {
            if let Some(id) = Self::active_polygon(cx) {
                let local = cx.view.client_to_document(point);
                if let Some(polygon) = cx
                    .canvas
                    .document
                    .get_mut(id)
                    .and_then(Shape::as_polygon_mut)
                {
                    if polygon.add_point(local) {
                        cx.session.drag_handle = polygon.len();
                        cx.session.last_document_point = local;
                    }
                }
                cx.session.last = point;
                cx.session.flags = flags;
                cx.view.set_cursor(Cursor::Pencil);
                cx.view.invalidate(id);
                return;
            }
        }
        cx.view.set_cursor(Cursor::Crosshair);
        SelectTool.on_mouse_move(cx, flags, point);
    }

    fn on_double_click(&self, cx: &mut ToolContext<'_>, _flags: EventFlags, _point: Point) {
        cx.view.release_capture();
        if let Some(id) = Self::active_polygon(cx) {
            if let Some(polygon) = cx
                .canvas
                .document
                .get_mut(id)
                .and_then(Shape::as_polygon_mut)
            {
                polygon.drop_redundant_last();
                log::debug!("Finished polygon {id} with {} vertices", polygon.len());
            }
            cx.view.invalidate(id);
        }
        cx.session.release_active(&mut cx.canvas.document);
        cx.session.draw_shape = DrawShape::Selection;
        cx.session.mode = SelectMode::None;
    }
}
