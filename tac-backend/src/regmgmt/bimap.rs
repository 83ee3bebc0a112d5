//! Ordered bidirectional map
//!
//! Every left key maps to at most one right key and vice versa. The only
//! way to change the map is [`BiMap::insert`], which drops any existing
//! pair that shares either side with the new one before storing it, so the
//! two directions can never disagree.

use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct BiMap<L, R> {
    left_to_right: BTreeMap<L, R>,
    right_to_left: BTreeMap<R, L>,
}

impl<L: Ord + Clone, R: Ord + Clone> BiMap<L, R> {
    pub fn new() -> Self {
        Self {
            left_to_right: BTreeMap::new(),
            right_to_left: BTreeMap::new(),
        }
    }

    /// Associate `left` with `right`, breaking any pairs either was part of
    pub fn insert(&mut self, left: L, right: R) {
        if let Some(old_right) = self.left_to_right.remove(&left) {
            self.right_to_left.remove(&old_right);
        }
        if let Some(old_left) = self.right_to_left.remove(&right) {
            self.left_to_right.remove(&old_left);
        }
        self.left_to_right.insert(left.clone(), right.clone());
        self.right_to_left.insert(right, left);
    }

    pub fn get_by_left(&self, left: &L) -> Option<&R> {
        self.left_to_right.get(left)
    }

    pub fn get_by_right(&self, right: &R) -> Option<&L> {
        self.right_to_left.get(right)
    }

    pub fn contains_left(&self, left: &L) -> bool {
        self.left_to_right.contains_key(left)
    }

    pub fn contains_right(&self, right: &R) -> bool {
        self.right_to_left.contains_key(right)
    }

    pub fn len(&self) -> usize {
        self.left_to_right.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left_to_right.is_empty()
    }

    /// Pairs in left-key order
    pub fn iter(&self) -> impl Iterator<Item = (&L, &R)> {
        self.left_to_right.iter()
    }

    /// Both directions describe the same set of pairs
    pub fn is_consistent(&self) -> bool {
        self.left_to_right.len() == self.right_to_left.len()
            && self
                .left_to_right
                .iter()
                .all(|(l, r)| self.right_to_left.get(r) == Some(l))
    }
}

impl<L: Ord + Clone, R: Ord + Clone> Default for BiMap<L, R> {
    fn default() -> Self {
        Self::new()
    }
}
