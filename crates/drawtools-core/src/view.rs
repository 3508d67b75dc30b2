//! The view a tool works through: coordinate mapping, input capture, cursor
//! and redraw requests.

use crate::shapes::ObjectId;
use kurbo::{Affine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Cursor shapes a tool can request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cursor {
    #[default]
    Arrow,
    Crosshair,
    Pencil,
    /// Diagonal resize, top-left to bottom-right.
    SizeNwse,
    /// Diagonal resize, top-right to bottom-left.
    SizeNesw,
    SizeNs,
    SizeWe,
    SizeAll,
}

/// Host view interface used by the tools.
///
/// Points handed to the tools are in client coordinates; the document works in
/// document coordinates. The view owns the mapping between the two.
pub trait View {
    /// Convert a client point to document coordinates.
    fn client_to_document(&self, point: Point) -> Point;

    /// Convert a document point to client coordinates.
    fn document_to_client(&self, point: Point) -> Point;

    /// Route all pointer input to this view until released.
    fn capture_input(&mut self);

    fn release_capture(&mut self);

    fn has_capture(&self) -> bool;

    fn set_cursor(&mut self, cursor: Cursor);

    /// Schedule a redraw of one object.
    fn invalidate(&mut self, id: ObjectId);

    /// Notify every view of the document that it changed.
    fn refresh(&mut self);

    /// Draw an inverting rubber-band rectangle in client coordinates.
    /// Drawing the same rectangle twice erases it.
    fn draw_focus_rect(&mut self, rect: Rect);

    /// Close any in-place editing session. Returns whether one was open.
    fn close_in_place_item(&mut self) -> bool {
        false
    }

    /// Open the object's editor.
    fn open_object(&mut self, _id: ObjectId) {}

    /// Show the properties editor for an object.
    fn edit_properties(&mut self, _id: ObjectId) {}
}

/// A headless view with a pan/zoom transform that records every request.
#[derive(Debug, Clone)]
pub struct CanvasView {
    /// Client-space translation.
    pub offset: Vec2,
    /// Scale from document to client units.
    pub zoom: f64,
    captured: bool,
    cursor: Cursor,
    invalidated: Vec<ObjectId>,
    refresh_count: usize,
    focus_rects: Vec<Rect>,
    in_place_item: Option<ObjectId>,
    opened: Vec<ObjectId>,
    properties: Vec<ObjectId>,
}

impl Default for CanvasView {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            captured: false,
            cursor: Cursor::Arrow,
            invalidated: Vec::new(),
            refresh_count: 0,
            focus_rects: Vec::new(),
            in_place_item: None,
            opened: Vec::new(),
            properties: Vec::new(),
        }
    }
}

impl CanvasView {
    /// Create a view with an identity transform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a view with the given pan offset and zoom.
    pub fn with_transform(offset: Vec2, zoom: f64) -> Self {
        Self {
            offset,
            zoom,
            ..Self::default()
        }
    }

    /// Document to client transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Client to document transform.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Objects invalidated so far, in request order.
    pub fn invalidated(&self) -> &[ObjectId] {
        &self.invalidated
    }

    pub fn refresh_count(&self) -> usize {
        self.refresh_count
    }

    /// Every rubber-band rectangle drawn, in order.
    pub fn focus_rects(&self) -> &[Rect] {
        &self.focus_rects
    }

    /// Rubber-band rectangles currently visible, each drawn an odd number of times.
    pub fn visible_focus_rects(&self) -> Vec<Rect> {
        let mut visible: Vec<Rect> = Vec::new();
        for rect in &self.focus_rects {
            match visible.iter().position(|r| r == rect) {
                Some(i) => {
                    visible.remove(i);
                }
                None => visible.push(*rect),
            }
        }
        visible
    }

    /// Start an in-place editing session on an object.
    pub fn begin_in_place(&mut self, id: ObjectId) {
        self.in_place_item = Some(id);
    }

    pub fn in_place_item(&self) -> Option<ObjectId> {
        self.in_place_item
    }

    /// Objects whose editor was requested.
    pub fn opened(&self) -> &[ObjectId] {
        &self.opened
    }

    /// Objects whose properties editor was requested.
    pub fn properties_requested(&self) -> &[ObjectId] {
        &self.properties
    }

    /// Forget recorded invalidations, refreshes and rubber bands.
    pub fn clear_requests(&mut self) {
        self.invalidated.clear();
        self.refresh_count = 0;
        self.focus_rects.clear();
    }
}

impl View for CanvasView {
    fn client_to_document(&self, point: Point) -> Point {
        self.inverse_transform() * point
    }

    fn document_to_client(&self, point: Point) -> Point {
        self.transform() * point
    }

    fn capture_input(&mut self) {
        self.captured = true;
    }

    fn release_capture(&mut self) {
        self.captured = false;
    }

    fn has_capture(&self) -> bool {
        self.captured
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    fn invalidate(&mut self, id: ObjectId) {
        self.invalidated.push(id);
    }

    fn refresh(&mut self) {
        self.refresh_count += 1;
    }

    fn draw_focus_rect(&mut self, rect: Rect) {
        self.focus_rects.push(rect);
    }

    fn close_in_place_item(&mut self) -> bool {
        match self.in_place_item.take() {
            Some(id) => {
                log::debug!("Closed in-place item {id}");
                true
            }
            None => false,
        }
    }

    fn open_object(&mut self, id: ObjectId) {
        self.opened.push(id);
    }

    fn edit_properties(&mut self, id: ObjectId) {
        self.properties.push(id);
    }
}
