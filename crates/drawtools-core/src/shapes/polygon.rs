//! Polygon shape built vertex by vertex.

use super::{ActiveSnap, DrawObject, ObjectId, segments_touch_rect};
use crate::view::Cursor;
use kurbo::{Point, Rect};
use uuid::Uuid;

/// X offset applied to a vertex added by a click, so it never coincides with
/// the vertex placed just before it.
pub const POLYGON_VERTEX_OFFSET: f64 = 1.0;

/// A closed polygon. Its handles are its vertices.
#[derive(Debug, Clone)]
pub struct Polygon {
    pub(crate) id: ObjectId,
    points: Vec<Point>,
    active_snap: Option<ActiveSnap>,
}

impl Default for Polygon {
    fn default() -> Self {
        Self::new()
    }
}

impl Polygon {
    /// Create an empty polygon.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            points: Vec::new(),
            active_snap: None,
        }
    }

    /// Create a polygon from a list of vertices, dropping repeated neighbours.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        let mut poly = Self::new();
        for point in points {
            poly.add_point(point);
        }
        poly
    }

    /// The vertices in order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Append a vertex. A point less than one unit (on both axes) from the
    /// current last vertex is ignored, so adjacent vertices always differ by at
    /// least [`POLYGON_VERTEX_OFFSET`]. Returns whether it was added.
    pub fn add_point(&mut self, point: Point) -> bool {
        if let Some(last) = self.points.last() {
            let spacing = (point.x - last.x).abs().max((point.y - last.y).abs());
            if spacing < POLYGON_VERTEX_OFFSET {
                return false;
            }
        }
        self.points.push(point);
        true
    }

    /// Drop the closing vertex (the repeat of the first one).
    /// Returns whether enough vertices remain to keep the polygon.
    pub fn close(&mut self) -> bool {
        self.points.pop();
        self.points.len() >= 2
    }

    /// Drop the last vertex if it repeats the previous one, either exactly or
    /// shifted by [`POLYGON_VERTEX_OFFSET`] along x. Only applies to polygons
    /// with more than two vertices. Returns whether a vertex was dropped.
    pub fn drop_redundant_last(&mut self) -> bool {
        let n = self.points.len();
        if n <= 2 {
            return false;
        }
        let last = self.points[n - 1];
        let prev = self.points[n - 2];
        let coincident =
            last == prev || (last.x - POLYGON_VERTEX_OFFSET == prev.x && last.y == prev.y);
        if coincident {
            self.points.pop();
        }
        coincident
    }

    /// The vertices with the first one repeated at the end.
    fn ring(&self) -> Vec<Point> {
        let mut ring = self.points.clone();
        if let Some(&first) = self.points.first() {
            ring.push(first);
        }
        ring
    }
}

impl DrawObject for Polygon {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn position(&self) -> Rect {
        let mut points = self.points.iter();
        let Some(&first) = points.next() else {
            return Rect::ZERO;
        };
        points.fold(Rect::from_points(first, first), |rect, &p| {
            rect.union_pt(p)
        })
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        !self.points.is_empty() && self.bounds().inflate(tolerance, tolerance).contains(point)
    }

    fn intersects(&self, rect: Rect) -> bool {
        segments_touch_rect(&self.ring(), rect)
    }

    fn handle_count(&self) -> usize {
        self.points.len()
    }

    fn handle(&self, index: usize) -> Point {
        debug_assert!(
            (1..=self.points.len()).contains(&index),
            "handle {index} out of range"
        );
        self.points
            .get(index.wrapping_sub(1))
            .copied()
            .unwrap_or(Point::ZERO)
    }

    fn can_snap_at(&self, index: usize) -> bool {
        (1..=self.points.len()).contains(&index)
    }

    fn cursor_for_handle(&self, _index: usize) -> Cursor {
        Cursor::SizeAll
    }

    fn move_to(&mut self, position: Rect) {
        let old = self.position();
        if old == position {
            return;
        }
        let scale_x = if old.width() > 0.0 {
            position.width() / old.width()
        } else {
            1.0
        };
        let scale_y = if old.height() > 0.0 {
            position.height() / old.height()
        } else {
            1.0
        };
        for point in &mut self.points {
            point.x = position.x0 + (point.x - old.x0) * scale_x;
            point.y = position.y0 + (point.y - old.y0) * scale_y;
        }
    }

    fn move_handle_to(&mut self, index: usize, point: Point) {
        match self.points.get_mut(index.wrapping_sub(1)) {
            Some(vertex) => *vertex = point,
            None => debug_assert!(false, "handle {index} out of range"),
        }
    }

    fn active_snap(&self) -> Option<ActiveSnap> {
        self.active_snap
    }

    fn set_active_snap(&mut self, point: Option<Point>, handle: usize) {
        self.active_snap = point.map(|point| ActiveSnap { point, handle });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn test_add_point_skips_repeats() {
        let mut poly = Polygon::new();
        assert!(poly.add_point(Point::new(1.0, 1.0)));
        assert!(!poly.add_point(Point::new(1.0, 1.0)));
        assert!(poly.add_point(Point::new(2.0, 1.0)));
        assert!(poly.add_point(Point::new(1.0, 1.0)));
        assert_eq!(poly.len(), 3);
        assert!(poly.points().windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn test_add_point_requires_unit_spacing() {
        let mut poly = Polygon::new();
        assert!(poly.add_point(Point::new(0.0, 0.0)));
        assert!(!poly.add_point(Point::new(0.5, 0.9)));
        assert!(poly.add_point(Point::new(1.0, 0.2)));
        assert!(!poly.add_point(Point::new(1.3, -0.4)));
        assert_eq!(poly.len(), 2);
    }

    #[test]
    fn test_close_removes_duplicate_closing_vertex() {
        let mut poly = Polygon::from_points(pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 0.0)]));
        assert_eq!(poly.len(), 4);
        assert!(poly.close());
        assert_eq!(poly.points(), pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]).as_slice());
    }

    #[test]
    fn test_close_degenerate() {
        let mut poly = Polygon::from_points(pts(&[(0.0, 0.0), (10.0, 0.0)]));
        assert!(!poly.close());
        assert_eq!(poly.len(), 1);
    }

    #[test]
    fn test_drop_redundant_last() {
        // Exact repeat cannot come from add_point, so build the offset case.
        let mut poly = Polygon::from_points(pts(&[(0.0, 0.0), (10.0, 0.0), (20.0, 5.0), (21.0, 5.0)]));
        assert!(poly.drop_redundant_last());
        assert_eq!(poly.len(), 3);
        assert!(!poly.drop_redundant_last());

        let mut short = Polygon::from_points(pts(&[(0.0, 0.0), (1.0, 0.0)]));
        assert!(!short.drop_redundant_last());
        assert_eq!(short.len(), 2);
    }

    #[test]
    fn test_bounds_and_handles() {
        let poly = Polygon::from_points(pts(&[(5.0, 5.0), (15.0, -5.0), (0.0, 20.0)]));
        assert_eq!(poly.bounds(), Rect::new(0.0, -5.0, 15.0, 20.0));
        assert_eq!(poly.handle_count(), 3);
        assert_eq!(poly.handle(2), Point::new(15.0, -5.0));
        assert!(poly.can_snap_at(3));
        assert!(!poly.can_snap_at(0));
        assert!(!poly.can_snap_at(4));
    }

    #[test]
    fn test_move_to_translates_and_scales() {
        let mut poly = Polygon::from_points(pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]));
        poly.move_to(Rect::new(5.0, 5.0, 15.0, 15.0));
        assert_eq!(poly.points(), pts(&[(5.0, 5.0), (15.0, 5.0), (15.0, 15.0)]).as_slice());

        poly.move_to(Rect::new(0.0, 0.0, 20.0, 20.0));
        assert_eq!(poly.points(), pts(&[(0.0, 0.0), (20.0, 0.0), (20.0, 20.0)]).as_slice());
    }

    #[test]
    fn test_move_handle_to() {
        let mut poly = Polygon::from_points(pts(&[(0.0, 0.0), (10.0, 0.0)]));
        poly.move_handle_to(2, Point::new(7.0, 8.0));
        assert_eq!(poly.last(), Some(Point::new(7.0, 8.0)));
    }

    #[test]
    fn test_intersects_closed_ring() {
        let poly = Polygon::from_points(pts(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)]));
        // Only the closing edge (100,100)->(0,0) passes through this rect.
        assert!(poly.intersects(Rect::new(40.0, 45.0, 50.0, 55.0)));
        assert!(!poly.intersects(Rect::new(200.0, 200.0, 210.0, 210.0)));
    }
}
