//! Canvas document and per-view selection state.

use crate::selection::Selection;
use crate::shapes::{DrawObject, ObjectId, Shape};
use kurbo::{Point, Rect};
use std::collections::HashMap;

/// The objects being edited, in back-to-front order.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// All objects in the document, keyed by ID.
    objects: HashMap<ObjectId, Shape>,
    /// Z-order of objects (back to front).
    z_order: Vec<ObjectId>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object on top of the others.
    pub fn add(&mut self, shape: Shape) -> ObjectId {
        let id = shape.id();
        log::trace!("Adding object {id}");
        if self.objects.insert(id, shape).is_none() {
            self.z_order.push(id);
        }
        id
    }

    /// Remove an object from the document.
    pub fn remove(&mut self, id: ObjectId) -> Option<Shape> {
        self.z_order.retain(|&object_id| object_id != id);
        self.objects.remove(&id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&Shape> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Shape> {
        self.objects.get_mut(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    /// Get objects in z-order (back to front).
    pub fn objects_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.objects.get(id))
    }

    /// Front-most object hit by a document point.
    pub fn object_at(&self, point: Point, tolerance: f64) -> Option<ObjectId> {
        self.z_order.iter().rev().copied().find(|id| {
            self.objects
                .get(id)
                .is_some_and(|s| s.hit_test(point, tolerance))
        })
    }

    /// Objects enclosed by a rectangle, or with `partial_ok` merely touching it.
    /// Returned back to front.
    pub fn objects_in_rect(&self, rect: Rect, partial_ok: bool) -> Vec<ObjectId> {
        let rect = rect.abs();
        self.objects_ordered()
            .filter(|s| {
                let bounds = s.bounds();
                let enclosed = rect.union(bounds) == rect;
                enclosed || (partial_ok && s.intersects(rect))
            })
            .map(|s| s.id())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// A document together with the selection of the view editing it.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    pub document: Document,
    pub selection: Selection,
}

impl Canvas {
    /// Create a new canvas with an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a canvas with an existing document.
    pub fn with_document(document: Document) -> Self {
        Self {
            document,
            selection: Selection::new(),
        }
    }

    /// Select an object. `None` without `additive` clears the selection.
    pub fn select(&mut self, id: Option<ObjectId>, additive: bool) {
        match id {
            Some(id) if self.document.contains(id) => self.selection.select(id, additive),
            Some(id) => log::warn!("Ignoring selection of unknown object {id}"),
            None if !additive => self.selection.clear(),
            None => {}
        }
    }

    pub fn deselect(&mut self, id: ObjectId) {
        self.selection.deselect(id);
    }

    pub fn is_selected(&self, id: ObjectId) -> bool {
        self.selection.contains(id)
    }

    /// Select every object inside `rect` (document coordinates).
    /// Without `additive` the previous selection is dropped.
    pub fn select_within_rect(&mut self, rect: Rect, additive: bool, partial_ok: bool) {
        if !additive {
            self.selection.clear();
        }
        for id in self.document.objects_in_rect(rect, partial_ok) {
            self.selection.select(id, true);
        }
        log::debug!(
            "Net selection {:?} selected {} object(s)",
            rect,
            self.selection.len()
        );
    }

    /// Duplicate every selected object into the document. The selection still
    /// refers to the originals, which are the ones dragged afterwards.
    pub fn clone_selection(&mut self) -> Vec<ObjectId> {
        let copies: Vec<Shape> = self
            .selection
            .iter()
            .filter_map(|id| self.document.get(id))
            .map(Shape::duplicate)
            .collect();
        copies
            .into_iter()
            .map(|copy| self.document.add(copy))
            .collect()
    }

    /// Remove an object from both document and selection.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<Shape> {
        self.selection.deselect(id);
        self.document.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Polygon, RectKind, RectShape};

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Shape {
        Shape::Rect(RectShape::new(RectKind::Rectangle, Rect::new(x0, y0, x1, y1)))
    }

    #[test]
    fn test_add_remove() {
        let mut doc = Document::new();
        assert!(doc.is_empty());
        let id = doc.add(rect(0.0, 0.0, 10.0, 10.0));
        assert_eq!(doc.len(), 1);
        assert!(doc.contains(id));
        assert!(doc.remove(id).is_some());
        assert!(doc.is_empty());
        assert!(doc.remove(id).is_none());
    }

    #[test]
    fn test_object_at_prefers_front() {
        let mut doc = Document::new();
        let back = doc.add(rect(0.0, 0.0, 100.0, 100.0));
        let front = doc.add(rect(50.0, 50.0, 150.0, 150.0));
        assert_eq!(doc.object_at(Point::new(75.0, 75.0), 2.0), Some(front));
        assert_eq!(doc.object_at(Point::new(10.0, 10.0), 2.0), Some(back));
        assert_eq!(doc.object_at(Point::new(500.0, 500.0), 2.0), None);
    }

    #[test]
    fn test_objects_in_rect() {
        let mut doc = Document::new();
        let a = doc.add(rect(10.0, 10.0, 20.0, 20.0));
        let b = doc.add(rect(100.0, 100.0, 200.0, 200.0));
        let area = Rect::new(0.0, 0.0, 150.0, 150.0);

        assert_eq!(doc.objects_in_rect(area, false), vec![a]);
        assert_eq!(doc.objects_in_rect(area, true), vec![a, b]);
        // Un-normalized rectangles are accepted.
        assert_eq!(doc.objects_in_rect(Rect::new(150.0, 150.0, 0.0, 0.0), false), vec![a]);
    }

    #[test]
    fn test_select_within_rect_additive() {
        let mut canvas = Canvas::new();
        let a = canvas.document.add(rect(10.0, 10.0, 20.0, 20.0));
        let b = canvas.document.add(rect(300.0, 300.0, 310.0, 310.0));
        canvas.select(Some(b), false);

        canvas.select_within_rect(Rect::new(0.0, 0.0, 50.0, 50.0), true, true);
        assert!(canvas.is_selected(a));
        assert!(canvas.is_selected(b));

        canvas.select_within_rect(Rect::new(0.0, 0.0, 50.0, 50.0), false, true);
        assert_eq!(canvas.selection.as_slice(), &[a]);
    }

    #[test]
    fn test_select_none_clears() {
        let mut canvas = Canvas::new();
        let a = canvas.document.add(rect(0.0, 0.0, 1.0, 1.0));
        canvas.select(Some(a), false);
        canvas.select(None, true);
        assert!(canvas.is_selected(a));
        canvas.select(None, false);
        assert!(canvas.selection.is_empty());
    }

    #[test]
    fn test_clone_selection() {
        let mut canvas = Canvas::new();
        let a = canvas.document.add(rect(0.0, 0.0, 10.0, 10.0));
        let p = canvas
            .document
            .add(Shape::Polygon(Polygon::from_points([Point::ZERO, Point::new(5.0, 5.0)])));
        canvas.select(Some(a), false);
        canvas.select(Some(p), true);

        let copies = canvas.clone_selection();
        assert_eq!(copies.len(), 2);
        assert_eq!(canvas.document.len(), 4);
        assert_eq!(canvas.selection.as_slice(), &[a, p]);
        let copy = canvas.document.get(copies[0]).unwrap();
        assert_eq!(copy.position(), Rect::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_with_document_starts_unselected() {
        let mut document = Document::new();
        let a = document.add(rect(0.0, 0.0, 10.0, 10.0));
        document.add(rect(20.0, 20.0, 30.0, 30.0));

        let canvas = Canvas::with_document(document);
        assert_eq!(canvas.document.len(), 2);
        assert!(canvas.selection.is_empty());
        assert!(!canvas.is_selected(a));
    }

    #[test]
    fn test_remove_object_deselects() {
        let mut canvas = Canvas::new();
        let a = canvas.document.add(rect(0.0, 0.0, 10.0, 10.0));
        canvas.select(Some(a), false);
        assert!(canvas.remove_object(a).is_some());
        assert!(canvas.selection.is_empty());
        assert!(canvas.document.is_empty());
    }
}
