//! Snap functionality for locking a dragged handle onto other objects' handles.
//!
//! Proximity is always compared on squared distances. Two radii are used:
//! the active radius establishes a snap, the wider memory radius decides how
//! long an established snap keeps being shown.

use crate::canvas::Document;
use crate::shapes::{DrawObject, ObjectId};
use kurbo::Point;

/// Distance within which a dragged handle locks onto another handle.
pub const SNAP_RADIUS: f64 = 20.0;

/// Distance within which an established snap stays visible.
pub const SNAP_MEMORY_RADIUS: f64 = 2.0 * SNAP_RADIUS;

/// Squared Euclidean distance between two points.
pub fn squared_distance(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Check whether `candidate` is close enough to `reference` to establish a snap.
pub fn is_active_snap(candidate: Point, reference: Point) -> bool {
    SnapRadii::default().is_active(candidate, reference)
}

/// Check whether a remembered snap at `candidate` should still be shown.
pub fn is_memory_snap(candidate: Point, reference: Point) -> bool {
    SnapRadii::default().is_memory(candidate, reference)
}

/// The pair of radii used by the snap engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapRadii {
    /// Radius that establishes a snap.
    pub active: f64,
    /// Hysteresis radius that keeps a snap displayed.
    pub memory: f64,
}

impl Default for SnapRadii {
    fn default() -> Self {
        Self::new(SNAP_RADIUS, SNAP_MEMORY_RADIUS)
    }
}

impl SnapRadii {
    pub fn new(active: f64, memory: f64) -> Self {
        debug_assert!(memory > active, "memory radius must exceed the active radius");
        Self { active, memory }
    }

    pub fn is_active(&self, candidate: Point, reference: Point) -> bool {
        squared_distance(candidate, reference) < self.active * self.active
    }

    pub fn is_memory(&self, candidate: Point, reference: Point) -> bool {
        squared_distance(candidate, reference) < self.memory * self.memory
    }
}

/// A handle that a dragged handle can lock onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapCandidate {
    /// Object owning the handle.
    pub object: ObjectId,
    /// 1-based handle index on that object.
    pub handle: usize,
    /// Document-space position of the handle.
    pub point: Point,
}

/// Find the handle a dragged point snaps to.
///
/// Objects are scanned in document order and handles in ascending index order.
/// The first snappable handle inside the active radius wins, even if a later one
/// is closer. The manipulated object itself (`exclude`) is never a candidate.
pub fn find_snap_candidate(
    document: &Document,
    exclude: ObjectId,
    reference: Point,
    radii: SnapRadii,
) -> Option<SnapCandidate> {
    for object in document.objects_ordered() {
        if object.id() == exclude {
            continue;
        }
        for handle in 1..=object.handle_count() {
            if !object.can_snap_at(handle) {
                continue;
            }
            let point = object.handle(handle);
            if radii.is_active(point, reference) {
                return Some(SnapCandidate {
                    object: object.id(),
                    handle,
                    point,
                });
            }
        }
    }
    None
}
