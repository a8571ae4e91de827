//! This lives in its own module to make sure no one can access the private
//! field. To create a `Checked`, everyone has to go through `Checked::new`.

use std::{fmt, ops};

use crate::handle::{EdgeHandle, Handle, HalfEdgeHandle};


/// A wrapper for handles to signal that they point to an existing element.
/// Used by the data structure internally.
///
/// Handles passed in by the user are checked once at the API boundary and
/// then wrapped in this type. Handles read from the mesh's own records are
/// `Checked` as long as the implementation is correct. That way it is visible
/// in the types which handles still need to be checked.
///
/// There can exist instances of this with a handle that is invalid (does not
/// point to an existing element), but these instances must be temporary and
/// must never persist over multiple public method calls. Indexing the mesh
/// with such a handle panics.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Checked<H: Handle>(H);

impl<H: Handle> Checked<H> {
    /// Creates a new `Checked` instance. The caller has to make sure the
    /// handle refers to an existing element before the instance is used.
    #[inline(always)]
    pub(crate) fn new(handle: H) -> Self {
        Self(handle)
    }
}

impl Checked<HalfEdgeHandle> {
    /// Returns the handle of the twin half edge. A half edge exists if and
    /// only if its twin exists, so this is still checked.
    #[inline(always)]
    pub(crate) fn twin(self) -> Self {
        Self(self.0.twin())
    }

    /// Returns the full edge this half edge belongs to.
    #[inline(always)]
    pub(crate) fn full_edge(self) -> EdgeHandle {
        self.0.full_edge()
    }
}

impl<H: Handle> fmt::Debug for Checked<H> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<H: Handle> ops::Deref for Checked<H> {
    type Target = H;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
