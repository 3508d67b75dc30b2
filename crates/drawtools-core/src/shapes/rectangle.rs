//! Rectangle-family shapes: lines, rectangles, rounded rectangles and ellipses.

use super::{ActiveSnap, DrawObject, ObjectId, point_to_segment_dist, segments_touch_rect};
use crate::view::Cursor;
use kurbo::{Ellipse, Point, Rect, Shape as KurboShape, Vec2};
use uuid::Uuid;

/// Default corner roundness (diameter of the corner arc on each axis).
pub const DEFAULT_ROUNDNESS: Vec2 = Vec2::new(16.0, 16.0);

/// Handle controlling the corner roundness of a rounded rectangle.
const ROUNDNESS_HANDLE: usize = 9;

/// Which primitive a [`RectShape`] draws inside its position rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RectKind {
    /// A segment from the first corner to the opposite one.
    Line,
    Rectangle,
    RoundedRectangle,
    Ellipse,
}

/// A primitive defined by an axis-aligned position rectangle.
///
/// Handles are numbered clockwise from the top-left corner:
/// 1 top-left, 2 top, 3 top-right, 4 right, 5 bottom-right, 6 bottom,
/// 7 bottom-left, 8 left. Lines only have handles 1 and 2 (the latter is
/// corner 5). Rounded rectangles add handle 9 for the roundness.
#[derive(Debug, Clone)]
pub struct RectShape {
    pub(crate) id: ObjectId,
    /// Primitive drawn inside the rectangle.
    pub kind: RectKind,
    /// Position rectangle, un-normalized: (x0, y0) is handle 1 and (x1, y1) is handle 5.
    pub position: Rect,
    /// Corner roundness for rounded rectangles.
    pub roundness: Vec2,
    active_snap: Option<ActiveSnap>,
}

impl RectShape {
    /// Create a new shape.
    pub fn new(kind: RectKind, position: Rect) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            position,
            roundness: DEFAULT_ROUNDNESS,
            active_snap: None,
        }
    }

    /// Endpoints of a line (handle 1 and handle 5 corners).
    pub fn endpoints(&self) -> (Point, Point) {
        (
            Point::new(self.position.x0, self.position.y0),
            Point::new(self.position.x1, self.position.y1),
        )
    }

    /// Map a public handle index to the corner/edge numbering.
    fn corner_index(&self, index: usize) -> usize {
        if self.kind == RectKind::Line && index == 2 {
            5
        } else {
            index
        }
    }

    fn is_roundness_handle(&self, index: usize) -> bool {
        self.kind == RectKind::RoundedRectangle && index == ROUNDNESS_HANDLE
    }

    fn move_roundness_handle(&mut self, point: Point) {
        let rect = self.position.abs();
        let mut x = point.x;
        let mut y = point.y;
        // Keep the handle inside the bottom-right quadrant
        if x > rect.x1 - 1.0 {
            x = rect.x1 - 1.0;
        } else if x < rect.x0 + rect.width() / 2.0 {
            x = rect.x0 + rect.width() / 2.0;
        }
        if y > rect.y1 - 1.0 {
            y = rect.y1 - 1.0;
        } else if y < rect.y0 + rect.height() / 2.0 {
            y = rect.y0 + rect.height() / 2.0;
        }
        self.roundness = Vec2::new(2.0 * (rect.x1 - x), 2.0 * (rect.y1 - y));
    }
}

impl DrawObject for RectShape {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn position(&self) -> Rect {
        self.position
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self.kind {
            RectKind::Line => {
                let (start, end) = self.endpoints();
                point_to_segment_dist(point, start, end) <= tolerance
            }
            RectKind::Ellipse => {
                let outer = self.bounds().inflate(tolerance, tolerance);
                Ellipse::from_rect(outer).contains(point)
            }
            RectKind::Rectangle | RectKind::RoundedRectangle => {
                self.bounds().inflate(tolerance, tolerance).contains(point)
            }
        }
    }

    fn intersects(&self, rect: Rect) -> bool {
        match self.kind {
            RectKind::Line => {
                let (start, end) = self.endpoints();
                segments_touch_rect(&[start, end], rect)
            }
            _ => rect.intersect(self.bounds().inflate(1.0, 1.0)).area() > 0.0,
        }
    }

    fn handle_count(&self) -> usize {
        match self.kind {
            RectKind::Line => 2,
            RectKind::RoundedRectangle => 9,
            RectKind::Rectangle | RectKind::Ellipse => 8,
        }
    }

    fn handle(&self, index: usize) -> Point {
        debug_assert!(
            (1..=self.handle_count()).contains(&index),
            "handle {index} out of range"
        );
        if self.is_roundness_handle(index) {
            let rect = self.position.abs();
            return Point::new(
                rect.x1 - self.roundness.x / 2.0,
                rect.y1 - self.roundness.y / 2.0,
            );
        }
        let Rect { x0, y0, x1, y1 } = self.position;
        let cx = (x0 + x1) / 2.0;
        let cy = (y0 + y1) / 2.0;
        match self.corner_index(index) {
            1 => Point::new(x0, y0),
            2 => Point::new(cx, y0),
            3 => Point::new(x1, y0),
            4 => Point::new(x1, cy),
            5 => Point::new(x1, y1),
            6 => Point::new(cx, y1),
            7 => Point::new(x0, y1),
            8 => Point::new(x0, cy),
            _ => self.position.center(),
        }
    }

    fn can_snap_at(&self, index: usize) -> bool {
        !self.is_roundness_handle(index) && matches!(self.corner_index(index), 1 | 3 | 5 | 7)
    }

    fn cursor_for_handle(&self, index: usize) -> Cursor {
        if self.is_roundness_handle(index) {
            return Cursor::Crosshair;
        }
        match self.corner_index(index) {
            1 | 5 => Cursor::SizeNwse,
            2 | 6 => Cursor::SizeNs,
            3 | 7 => Cursor::SizeNesw,
            4 | 8 => Cursor::SizeWe,
            _ => Cursor::Arrow,
        }
    }

    fn move_to(&mut self, position: Rect) {
        self.position = position;
    }

    fn move_handle_to(&mut self, index: usize, point: Point) {
        if self.is_roundness_handle(index) {
            self.move_roundness_handle(point);
            return;
        }
        let corner = self.corner_index(index);
        let p = &mut self.position;
        match corner {
            1 => {
                p.x0 = point.x;
                p.y0 = point.y;
            }
            2 => p.y0 = point.y,
            3 => {
                p.x1 = point.x;
                p.y0 = point.y;
            }
            4 => p.x1 = point.x,
            5 => {
                p.x1 = point.x;
                p.y1 = point.y;
            }
            6 => p.y1 = point.y,
            7 => {
                p.x0 = point.x;
                p.y1 = point.y;
            }
            8 => p.x0 = point.x,
            other => debug_assert!(false, "handle {other} out of range"),
        }
    }

    fn active_snap(&self) -> Option<ActiveSnap> {
        self.active_snap
    }

    fn set_active_snap(&mut self, point: Option<Point>, handle: usize) {
        self.active_snap = point.map(|point| ActiveSnap { point, handle });
    }
}
