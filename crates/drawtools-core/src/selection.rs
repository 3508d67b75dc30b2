//! Ordered selection set of a view.

use crate::shapes::ObjectId;

/// Selected object ids in selection order. The first one is the head.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<ObjectId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select an object. Without `additive` the previous selection is dropped first.
    /// Already selected ids are not duplicated.
    pub fn select(&mut self, id: ObjectId, additive: bool) {
        if !additive {
            self.ids.clear();
        }
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Remove an object. Returns whether it was selected.
    pub fn deselect(&mut self, id: ObjectId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|&s| s != id);
        self.ids.len() != before
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.ids.contains(&id)
    }

    /// First selected object.
    pub fn head(&self) -> Option<ObjectId> {
        self.ids.first().copied()
    }

    /// Last selected object.
    pub fn tail(&self) -> Option<ObjectId> {
        self.ids.last().copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.ids.iter().copied()
    }

    /// The selected object when exactly one is selected.
    pub fn single(&self) -> Option<ObjectId> {
        match self.ids.as_slice() {
            [id] => Some(*id),
            _ => None,
        }
    }

    pub fn as_slice(&self) -> &[ObjectId] {
        &self.ids
    }
}
