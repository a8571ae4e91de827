//! Using maps as sets (i.e. without values, but only handles).

use crate::handle::{hsize, Handle};
use super::{DenseMap, Handles, PropStore, PropStoreMut};


/// A *set* of handles, stored as a [`DenseMap`] with `()` values.
///
/// See [`DenseMap`] for more information on memory requirements and speed.
#[derive(Clone, Debug)]
pub struct DenseSet<H: Handle> {
    map: DenseMap<H, ()>,
}

impl<H: Handle> DenseSet<H> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self { map: DenseMap::new() }
    }

    /// Creates an empty set with memory for `cap` many handles.
    pub fn with_capacity(cap: hsize) -> Self {
        Self { map: DenseMap::with_capacity(cap) }
    }

    /// Returns `true` if the given `handle` is part of this set.
    pub fn contains_handle(&self, handle: H) -> bool {
        self.map.contains_handle(handle)
    }

    /// Returns the number of elements in this set.
    pub fn num_elements(&self) -> hsize {
        self.map.num_props()
    }

    /// Returns `true` if this set is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns an iterator over all handles in this set (in increasing
    /// order).
    pub fn handles(&self) -> Handles<'_, H, ()> {
        self.map.handles()
    }

    /// Inserts the given `handle` into the set. Returns `true` if the handle
    /// was already in the set before, `false` otherwise.
    pub fn insert(&mut self, handle: H) -> bool {
        self.map.insert(handle, ()).is_some()
    }

    /// Removes all handles from this set. Afterwards the set is empty.
    pub fn clear(&mut self) {
        self.map.clear()
    }
}

impl<H: Handle> Default for DenseSet<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Handle> std::iter::FromIterator<H> for DenseSet<H> {
    fn from_iter<I: IntoIterator<Item = H>>(iter: I) -> Self {
        Self { map: iter.into_iter().map(|h| (h, ())).collect() }
    }
}
