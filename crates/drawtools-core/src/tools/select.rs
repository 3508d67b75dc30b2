//! Selection tool: click to select, rubber-band select, move and resize.

use super::{DrawShape, SelectMode, Tool, ToolContext, base};
use crate::input::EventFlags;
use crate::shapes::DrawObject;
use kurbo::{Point, Rect};

#[derive(Debug, Clone, Copy, Default)]
pub struct SelectTool;

impl SelectTool {
    /// The rubber band currently on screen, in client coordinates.
    fn net_rect(cx: &ToolContext<'_>) -> Rect {
        Rect::from_points(cx.session.anchor, cx.session.last)
    }
}

impl Tool for SelectTool {
    fn draw_shape(&self) -> DrawShape {
        DrawShape::Selection
    }

    fn on_button_down(&self, cx: &mut ToolContext<'_>, flags: EventFlags, point: Point) {
        let local = cx.view.client_to_document(point);
        cx.session.mode = SelectMode::None;

        // Handles of a single selected object take priority over the objects.
        if let Some(id) = cx.canvas.selection.single() {
            match cx.canvas.document.get(id) {
                Some(object) => {
                    let handle = object.hit_test_handle(local, cx.config.handle_tolerance);
                    if handle != 0 {
                        log::debug!("Resizing {id} by handle {handle}");
                        cx.session.mode = SelectMode::Resize;
                        cx.session.drag_handle = handle;
                        cx.session.active_object = Some(id);
                    }
                }
                None => log::warn!("Selected object {id} is no longer in the document"),
            }
        }

        if cx.session.mode == SelectMode::None {
            if let Some(id) = cx.canvas.document.object_at(local, cx.config.hit_tolerance) {
                log::debug!("Moving selection from {id}");
                cx.session.mode = SelectMode::Move;
                cx.session.drag_handle = 0;
                if !cx.canvas.is_selected(id) {
                    cx.canvas.select(Some(id), flags.shift);
                }
                if flags.ctrl {
                    let copies = cx.canvas.clone_selection();
                    log::debug!("Cloned {} object(s)", copies.len());
                }
            }
        }

        if cx.session.mode == SelectMode::None {
            log::debug!("Net select from {point:?}");
            if !flags.shift {
                cx.canvas.select(None, false);
            }
            cx.session.mode = SelectMode::NetSelect;
            cx.session.drag_handle = 0;
            cx.view.draw_focus_rect(Rect::from_points(point, point));
        }

        cx.session.last_document_point = local;
        base::button_down(cx, flags, point);
    }

    fn on_button_up(&self, cx: &mut ToolContext<'_>, flags: EventFlags, point: Point) {
        if cx.view.has_capture() {
            match cx.session.mode {
                SelectMode::NetSelect => {
                    let rect = Self::net_rect(cx);
                    cx.view.draw_focus_rect(rect);
                    let corner0 = cx.view.client_to_document(cx.session.anchor);
                    let corner1 = cx.view.client_to_document(cx.session.last);
                    cx.canvas
                        .select_within_rect(Rect::from_points(corner0, corner1), true, true);
                }
                SelectMode::Move | SelectMode::Resize => {
                    cx.session.release_active(&mut cx.canvas.document);
                    cx.view.refresh();
                }
                SelectMode::None => {}
            }
        }
        cx.session.mode = SelectMode::None;
        base::button_up(cx, flags, point);
    }

    fn on_mouse_move(&self, cx: &mut ToolContext<'_>, flags: EventFlags, point: Point) {
        let selecting = cx.session.draw_shape == DrawShape::Selection;

        if !cx.view.has_capture() {
            if !selecting {
                return;
            }
            if let Some(object) = cx
                .canvas
                .selection
                .single()
                .and_then(|id| cx.canvas.document.get(id))
            {
                let local = cx.view.client_to_document(point);
                let handle = object.hit_test_handle(local, cx.config.handle_tolerance);
                if handle != 0 {
                    cx.view.set_cursor(object.cursor_for_handle(handle));
                    return;
                }
            }
            base::mouse_move(cx, flags, point);
            return;
        }

        if cx.session.mode == SelectMode::NetSelect {
            let old = Self::net_rect(cx);
            cx.view.draw_focus_rect(old);
            cx.view
                .draw_focus_rect(Rect::from_points(cx.session.anchor, point));
            base::mouse_move(cx, flags, point);
            return;
        }

        let local = cx.view.client_to_document(point);
        let delta = local - cx.session.last_document_point;
        let mode = cx.session.mode;
        let handle = cx.session.drag_handle;
        for id in cx.canvas.selection.iter() {
            let Some(object) = cx.canvas.document.get_mut(id) else {
                log::warn!("Selected object {id} is no longer in the document");
                continue;
            };
            if mode == SelectMode::Move {
                let position = object.position();
                object.move_to(position + delta);
            } else if handle != 0 {
                object.move_handle_to(handle, local);
            }
            cx.view.invalidate(id);
        }
        log::trace!("{mode:?} to {local:?}");
        cx.session.last_document_point = local;
        cx.session.last = point;

        if mode == SelectMode::Resize && selecting {
            if let Some(object) = cx
                .canvas
                .selection
                .head()
                .and_then(|id| cx.canvas.document.get(id))
            {
                cx.view.set_cursor(object.cursor_for_handle(handle));
            }
            return;
        }
        if selecting {
            base::mouse_move(cx, flags, point);
        }
    }

    fn on_double_click(&self, cx: &mut ToolContext<'_>, flags: EventFlags, point: Point) {
        if flags.shift {
            let local = cx.view.client_to_document(point);
            if let Some(id) = cx.canvas.document.object_at(local, cx.config.hit_tolerance) {
                cx.canvas.deselect(id);
                cx.view.invalidate(id);
            }
        } else if let Some(id) = cx.canvas.selection.single() {
            cx.view.open_object(id);
        }
    }

    fn on_edit_properties(&self, cx: &mut ToolContext<'_>) {
        if let Some(id) = cx.canvas.selection.single() {
            cx.view.edit_properties(id);
        }
    }

    fn on_cancel(&self, cx: &mut ToolContext<'_>) {
        if cx.session.mode == SelectMode::NetSelect && cx.view.has_capture() {
            let rect = Self::net_rect(cx);
            cx.view.draw_focus_rect(rect);
        }
        base::cancel(cx);
    }

    fn snap(&self, cx: &mut ToolContext<'_>) {
        let snappable = cx
            .session
            .active_object
            .and_then(|id| cx.canvas.document.get(id))
            .is_some_and(|object| object.can_snap_at(cx.session.drag_handle));
        if snappable {
            base::snap(cx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Harness;
    use super::*;
    use crate::shapes::{ObjectId, Polygon, RectKind, RectShape, Shape};
    use crate::view::{Cursor, View};

    fn add_rect(h: &mut Harness, rect: Rect) -> ObjectId {
        h.canvas
            .document
            .add(Shape::Rect(RectShape::new(RectKind::Rectangle, rect)))
    }

    #[test]
    fn test_net_select_selects_enclosed() {
        let mut h = Harness::new();
        let a = add_rect(&mut h, Rect::new(10.0, 10.0, 20.0, 20.0));
        let _b = add_rect(&mut h, Rect::new(100.0, 100.0, 120.0, 120.0));

        h.down(0.0, 0.0);
        assert_eq!(h.manager.session().mode, SelectMode::NetSelect);
        h.drag(50.0, 50.0);
        h.up(50.0, 50.0);

        assert_eq!(h.canvas.selection.as_slice(), &[a]);
        assert!(h.view.visible_focus_rects().is_empty());
        assert_eq!(h.manager.session().mode, SelectMode::None);
    }

    #[test]
    fn test_net_select_reversed_drag() {
        let mut h = Harness::new();
        let a = add_rect(&mut h, Rect::new(10.0, 10.0, 20.0, 20.0));

        h.down(50.0, 50.0);
        h.drag(0.0, 0.0);
        h.up(0.0, 0.0);
        assert_eq!(h.canvas.selection.as_slice(), &[a]);
    }

    #[test]
    fn test_click_background_clears_unless_shift() {
        let mut h = Harness::new();
        let a = add_rect(&mut h, Rect::new(10.0, 10.0, 20.0, 20.0));
        h.canvas.select(Some(a), false);

        h.down_with(500.0, 500.0, EventFlags::NONE.with_primary().with_shift());
        h.up(500.0, 500.0);
        assert!(h.canvas.is_selected(a));

        h.down(500.0, 500.0);
        h.up(500.0, 500.0);
        assert!(h.canvas.selection.is_empty());
    }

    #[test]
    fn test_drag_moves_selection() {
        let mut h = Harness::new();
        let a = add_rect(&mut h, Rect::new(10.0, 10.0, 20.0, 20.0));

        h.down(15.0, 15.0);
        assert_eq!(h.manager.session().mode, SelectMode::Move);
        assert!(h.canvas.is_selected(a));
        h.drag(25.0, 20.0);
        h.drag(35.0, 25.0);
        h.up(35.0, 25.0);

        assert_eq!(
            h.canvas.document.get(a).unwrap().position(),
            Rect::new(30.0, 20.0, 40.0, 30.0)
        );
        assert_eq!(h.view.refresh_count(), 1);
    }

    #[test]
    fn test_move_uses_document_delta() {
        let mut h = Harness::new();
        h.view.zoom = 2.0;
        let a = add_rect(&mut h, Rect::new(10.0, 10.0, 20.0, 20.0));

        // Client (30, 30) is document (15, 15).
        h.down(30.0, 30.0);
        h.drag(50.0, 30.0);
        h.up(50.0, 30.0);
        assert_eq!(
            h.canvas.document.get(a).unwrap().position(),
            Rect::new(20.0, 10.0, 30.0, 20.0)
        );
    }

    #[test]
    fn test_shift_click_adds_to_selection() {
        let mut h = Harness::new();
        let a = add_rect(&mut h, Rect::new(10.0, 10.0, 20.0, 20.0));
        let b = add_rect(&mut h, Rect::new(100.0, 100.0, 120.0, 120.0));

        h.down(15.0, 15.0);
        h.up(15.0, 15.0);
        h.down_with(110.0, 110.0, EventFlags::NONE.with_primary().with_shift());
        h.up(110.0, 110.0);
        assert_eq!(h.canvas.selection.as_slice(), &[a, b]);

        h.down(110.0, 110.0);
        h.up(110.0, 110.0);
        // Clicking an already selected object keeps the selection.
        assert_eq!(h.canvas.selection.len(), 2);
    }

    #[test]
    fn test_ctrl_drag_clones() {
        let mut h = Harness::new();
        let a = add_rect(&mut h, Rect::new(10.0, 10.0, 20.0, 20.0));

        h.down_with(15.0, 15.0, EventFlags::NONE.with_primary().with_ctrl());
        h.drag(115.0, 15.0);
        h.up(115.0, 15.0);

        assert_eq!(h.canvas.document.len(), 2);
        assert_eq!(
            h.canvas.document.get(a).unwrap().position(),
            Rect::new(110.0, 10.0, 120.0, 20.0)
        );
        let copy = h
            .canvas
            .document
            .objects_ordered()
            .find(|s| s.id() != a)
            .unwrap();
        assert_eq!(copy.position(), Rect::new(10.0, 10.0, 20.0, 20.0));
    }

    #[test]
    fn test_resize_by_handle() {
        let mut h = Harness::new();
        let a = add_rect(&mut h, Rect::new(10.0, 10.0, 20.0, 20.0));
        h.canvas.select(Some(a), false);

        // Bottom-right corner is handle 5.
        h.down(21.0, 21.0);
        assert_eq!(h.manager.session().mode, SelectMode::Resize);
        assert_eq!(h.manager.session().drag_handle, 5);
        h.drag(40.0, 50.0);
        assert_eq!(h.view.cursor(), Cursor::SizeNwse);
        h.up(40.0, 50.0);

        assert_eq!(
            h.canvas.document.get(a).unwrap().position(),
            Rect::new(10.0, 10.0, 40.0, 50.0)
        );
        assert!(h.manager.session().active_object.is_none());
    }

    #[test]
    fn test_hover_handle_sets_cursor() {
        let mut h = Harness::new();
        let a = add_rect(&mut h, Rect::new(10.0, 10.0, 20.0, 20.0));
        h.canvas.select(Some(a), false);

        h.hover(15.0, 10.0);
        assert_eq!(h.view.cursor(), Cursor::SizeNs);
        h.hover(300.0, 300.0);
        assert_eq!(h.view.cursor(), Cursor::Arrow);
        assert_eq!(h.manager.session().mode, SelectMode::None);
    }

    #[test]
    fn test_resize_snaps_to_other_corner() {
        let mut h = Harness::new();
        let target = add_rect(&mut h, Rect::new(100.0, 100.0, 200.0, 200.0));
        let a = add_rect(&mut h, Rect::new(10.0, 10.0, 20.0, 20.0));
        h.canvas.select(Some(a), false);

        h.down(20.0, 20.0);
        h.drag(95.0, 92.0);
        let moved = h.canvas.document.get(a).unwrap();
        assert_eq!(moved.position(), Rect::new(10.0, 10.0, 100.0, 100.0));
        assert_eq!(moved.active_snap().unwrap().point, Point::new(100.0, 100.0));
        assert_eq!(h.manager.session().last_snap, Some(Point::new(100.0, 100.0)));
        assert_eq!(h.manager.session().last, Point::new(100.0, 100.0));

        // Out of the active radius but within memory: snap still shown.
        h.drag(75.0, 100.0);
        assert!(h.canvas.document.get(a).unwrap().active_snap().is_some());
        // Beyond the memory radius: released.
        h.drag(40.0, 40.0);
        assert!(h.canvas.document.get(a).unwrap().active_snap().is_none());
        assert!(h.manager.session().last_snap.is_none());

        h.up(40.0, 40.0);
        assert!(h.canvas.document.get(target).unwrap().active_snap().is_none());
    }

    #[test]
    fn test_edge_handle_does_not_snap() {
        let mut h = Harness::new();
        add_rect(&mut h, Rect::new(100.0, 100.0, 200.0, 200.0));
        let a = add_rect(&mut h, Rect::new(10.0, 10.0, 20.0, 20.0));
        h.canvas.select(Some(a), false);

        // Right-centre handle (4).
        h.down(20.0, 15.0);
        assert_eq!(h.manager.session().drag_handle, 4);
        h.drag(98.0, 101.0);
        assert!(h.manager.session().last_snap.is_none());
        assert_eq!(h.canvas.document.get(a).unwrap().position().x1, 98.0);
    }

    #[test]
    fn test_double_click_opens_or_deselects() {
        let mut h = Harness::new();
        let a = add_rect(&mut h, Rect::new(10.0, 10.0, 20.0, 20.0));
        let p = h.canvas.document.add(Shape::Polygon(Polygon::from_points([
            Point::new(50.0, 50.0),
            Point::new(60.0, 60.0),
        ])));
        h.canvas.select(Some(a), false);

        h.double_click(15.0, 15.0, EventFlags::NONE);
        assert_eq!(h.view.opened(), &[a]);

        h.canvas.select(Some(p), true);
        h.double_click(15.0, 15.0, EventFlags::NONE.with_shift());
        assert_eq!(h.canvas.selection.as_slice(), &[p]);
    }

    #[test]
    fn test_cancel_net_select_erases_rubber_band() {
        let mut h = Harness::new();
        add_rect(&mut h, Rect::new(10.0, 10.0, 20.0, 20.0));

        h.down(500.0, 500.0);
        h.cancel();
        assert!(h.view.visible_focus_rects().is_empty());

        h.down(500.0, 500.0);
        h.drag(520.0, 530.0);
        assert_eq!(h.view.visible_focus_rects().len(), 1);
        h.cancel();

        assert!(h.view.visible_focus_rects().is_empty());
        assert!(!h.view.has_capture());
        assert!(h.canvas.selection.is_empty());
        assert_eq!(h.manager.draw_shape(), DrawShape::Selection);
        assert_eq!(h.manager.session().mode, SelectMode::None);
    }

    #[test]
    fn test_cancel_mid_resize() {
        let mut h = Harness::new();
        let a = add_rect(&mut h, Rect::new(100.0, 100.0, 200.0, 200.0));
        h.canvas.select(Some(a), false);

        h.down(200.0, 200.0);
        assert_eq!(h.manager.session().mode, SelectMode::Resize);
        h.drag(230.0, 240.0);
        h.cancel();

        assert_eq!(h.manager.draw_shape(), DrawShape::Selection);
        assert_eq!(h.manager.session().mode, SelectMode::None);
        assert!(h.manager.session().active_object.is_none());
        assert!(!h.view.has_capture());
        assert_eq!(
            h.canvas.document.get(a).unwrap().position(),
            Rect::new(100.0, 100.0, 230.0, 240.0)
        );
    }

    #[test]
    fn test_button_down_closes_in_place_item() {
        let mut h = Harness::new();
        let a = add_rect(&mut h, Rect::new(10.0, 10.0, 20.0, 20.0));
        h.view.begin_in_place(a);
        h.down(500.0, 500.0);
        assert!(h.view.in_place_item().is_none());
        assert!(h.view.has_capture());
        h.up(500.0, 500.0);
        assert!(!h.view.has_capture());
    }
}
