//! Maps to associate data (properties) with mesh elements.
//!
//! Mesh data structures in this crate only store connectivity. Everything
//! else, like vertex positions, lives in a *prop map* that maps handles to
//! values. The same maps are used for temporary data of algorithms (e.g. the
//! per-pass side tables of Loop subdivision), which keeps the mesh records
//! free of scratch fields.
//!
//! The main implementation is [`DenseMap`], which uses the handle index as
//! index into a vector. [`DenseSet`] is a set of handles built on top of it.

use crate::handle::{hsize, Handle};


mod dense;
mod set;

pub use self::{
    dense::{DenseMap, Handles, Iter, Values},
    set::DenseSet,
};


// ===========================================================================
// ===== Main traits
// ===========================================================================

/// A storage that maps handles to owned properties.
///
/// Types implementing this trait usually also implement `Index<H>`, which
/// panics if there is no property for a handle. Use
/// [`get_ref`][PropStore::get_ref] if you are not sure whether the property
/// exists.
pub trait PropStore<H: Handle> {
    /// The property type stored in this map.
    type Target;

    /// Returns a reference to the property associated with `handle` or `None`
    /// if no such property exists.
    fn get_ref(&self, handle: H) -> Option<&Self::Target>;

    /// Returns `true` if there is a property associated with `handle`, `false`
    /// otherwise.
    fn contains_handle(&self, handle: H) -> bool {
        self.get_ref(handle).is_some()
    }

    /// Returns the number of properties stored in this map.
    fn num_props(&self) -> hsize;

    /// Returns `true` if there are no properties stored in this map.
    fn is_empty(&self) -> bool {
        self.num_props() == 0
    }
}

/// A [`PropStore`] that allows mutation.
pub trait PropStoreMut<H: Handle>: PropStore<H> {
    /// Returns a mutable reference to the property associated with `handle`
    /// or `None` if no such property exists.
    fn get_mut(&mut self, handle: H) -> Option<&mut Self::Target>;

    /// Inserts the given property for `handle`. Returns the old property if
    /// there was one.
    fn insert(&mut self, handle: H, elem: Self::Target) -> Option<Self::Target>;

    /// Removes all properties.
    fn clear(&mut self);

    /// Reserves memory for at least `additional` more properties.
    fn reserve(&mut self, additional: hsize);
}
