//! Drawable objects manipulated by the tools.

mod polygon;
mod rectangle;

pub use polygon::{POLYGON_VERTEX_OFFSET, Polygon};
pub use rectangle::{DEFAULT_ROUNDNESS, RectKind, RectShape};

use crate::snap::squared_distance;
use crate::view::Cursor;
use kurbo::{Point, Rect};
use uuid::Uuid;

/// Unique identifier for objects in a document.
pub type ObjectId = Uuid;

/// A snap target currently shown on a manipulated object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveSnap {
    /// Document-space point the handle is locked to.
    pub point: Point,
    /// Handle of the manipulated object that is locked.
    pub handle: usize,
}

/// Common interface for all drawable objects.
///
/// Handles are numbered from 1; index 0 means "no handle".
pub trait DrawObject {
    /// Get the unique identifier.
    fn id(&self) -> ObjectId;

    /// Position rectangle. May be un-normalized while a handle is dragged across
    /// the opposite corner.
    fn position(&self) -> Rect;

    /// Normalized bounding box in document coordinates.
    fn bounds(&self) -> Rect {
        self.position().abs()
    }

    /// Check if a document point hits this object.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Check if this object touches a rectangle.
    fn intersects(&self, rect: Rect) -> bool;

    /// Number of handles.
    fn handle_count(&self) -> usize;

    /// Document-space position of a handle.
    fn handle(&self, index: usize) -> Point;

    /// Whether the handle participates in snapping.
    fn can_snap_at(&self, index: usize) -> bool;

    /// Cursor shown while hovering or dragging a handle.
    fn cursor_for_handle(&self, index: usize) -> Cursor;

    /// Replace the position rectangle.
    fn move_to(&mut self, position: Rect);

    /// Move a single handle to a document point.
    fn move_handle_to(&mut self, index: usize, point: Point);

    /// The snap currently shown on this object, if any.
    fn active_snap(&self) -> Option<ActiveSnap>;

    /// Show (or with `None`, hide) a snap on `handle`.
    fn set_active_snap(&mut self, point: Option<Point>, handle: usize);

    /// Find the first handle within `tolerance` of `point`. Returns 0 if none.
    fn hit_test_handle(&self, point: Point, tolerance: f64) -> usize {
        let tolerance_sq = tolerance * tolerance;
        (1..=self.handle_count())
            .find(|&index| squared_distance(self.handle(index), point) <= tolerance_sq)
            .unwrap_or(0)
    }
}

/// Enum wrapper for all object types.
#[derive(Debug, Clone)]
pub enum Shape {
    Rect(RectShape),
    Polygon(Polygon),
}

impl Shape {
    fn object(&self) -> &dyn DrawObject {
        match self {
            Shape::Rect(s) => s,
            Shape::Polygon(s) => s,
        }
    }

    fn object_mut(&mut self) -> &mut dyn DrawObject {
        match self {
            Shape::Rect(s) => s,
            Shape::Polygon(s) => s,
        }
    }

    /// Get the polygon if this object is one.
    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            Shape::Polygon(p) => Some(p),
            _ => None,
        }
    }

    /// Get the mutable polygon if this object is one.
    pub fn as_polygon_mut(&mut self) -> Option<&mut Polygon> {
        match self {
            Shape::Polygon(p) => Some(p),
            _ => None,
        }
    }

    /// Get the rectangle-family shape if this object is one.
    pub fn as_rect(&self) -> Option<&RectShape> {
        match self {
            Shape::Rect(r) => Some(r),
            _ => None,
        }
    }

    /// Copy this object under a fresh identifier, without any shown snap.
    pub fn duplicate(&self) -> Shape {
        let mut copy = self.clone();
        let new_id = Uuid::new_v4();
        match &mut copy {
            Shape::Rect(s) => s.id = new_id,
            Shape::Polygon(s) => s.id = new_id,
        }
        copy.set_active_snap(None, 0);
        copy
    }
}

impl DrawObject for Shape {
    fn id(&self) -> ObjectId {
        self.object().id()
    }

    fn position(&self) -> Rect {
        self.object().position()
    }

    fn bounds(&self) -> Rect {
        self.object().bounds()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.object().hit_test(point, tolerance)
    }

    fn intersects(&self, rect: Rect) -> bool {
        self.object().intersects(rect)
    }

    fn handle_count(&self) -> usize {
        self.object().handle_count()
    }

    fn handle(&self, index: usize) -> Point {
        self.object().handle(index)
    }

    fn can_snap_at(&self, index: usize) -> bool {
        self.object().can_snap_at(index)
    }

    fn cursor_for_handle(&self, index: usize) -> Cursor {
        self.object().cursor_for_handle(index)
    }

    fn move_to(&mut self, position: Rect) {
        self.object_mut().move_to(position)
    }

    fn move_handle_to(&mut self, index: usize, point: Point) {
        self.object_mut().move_handle_to(index, point)
    }

    fn active_snap(&self) -> Option<ActiveSnap> {
        self.object().active_snap()
    }

    fn set_active_snap(&mut self, point: Option<Point>, handle: usize) {
        self.object_mut().set_active_snap(point, handle)
    }

    fn hit_test_handle(&self, point: Point, tolerance: f64) -> usize {
        self.object().hit_test_handle(point, tolerance)
    }
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = kurbo::Vec2::new(b.x - a.x, b.y - a.y);
    let pv = kurbo::Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    squared_distance(point, proj).sqrt()
}

/// Test if any segment of a polyline intersects or lies inside a rectangle.
pub(crate) fn segments_touch_rect(points: &[Point], rect: Rect) -> bool {
    if points.iter().any(|p| rect.contains(*p)) {
        return true;
    }
    let corners = [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x1, rect.y1),
        Point::new(rect.x0, rect.y1),
    ];
    let edges = [
        (corners[0], corners[1]),
        (corners[1], corners[2]),
        (corners[2], corners[3]),
        (corners[3], corners[0]),
    ];
    points.windows(2).any(|w| {
        edges
            .iter()
            .any(|&(c, d)| segments_intersect(w[0], w[1], c, d))
    })
}

/// Test if two line segments (a-b) and (c-d) intersect.
fn segments_intersect(a: Point, b: Point, c: Point, d: Point) -> bool {
    let cross = |o: Point, p: Point, q: Point| -> f64 {
        (p.x - o.x) * (q.y - o.y) - (p.y - o.y) * (q.x - o.x)
    };
    let d1 = cross(c, d, a);
    let d2 = cross(c, d, b);
    let d3 = cross(a, b, c);
    let d4 = cross(a, b, d);
    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }
    // Collinear: an endpoint lies on the other segment
    let on_segment = |p: Point, q: Point, r: Point| -> bool {
        r.x >= p.x.min(q.x) && r.x <= p.x.max(q.x) && r.y >= p.y.min(q.y) && r.y <= p.y.max(q.y)
    };
    (d1.abs() < 1e-10 && on_segment(c, d, a))
        || (d2.abs() < 1e-10 && on_segment(c, d, b))
        || (d3.abs() < 1e-10 && on_segment(a, b, c))
        || (d4.abs() < 1e-10 && on_segment(a, b, d))
}
