//! Handles to refer to mesh elements.
//!
//! A handle is a small `Copy` index into one of the arenas of a mesh. Handles
//! are assigned sequentially starting at 0 and are never invalidated, as mesh
//! elements are never removed. All navigational fields of the half edge mesh
//! are stored as handles.

use std::{
    fmt,
    hash::Hash,
};

use static_assertions::assert_eq_size;


/// The integer type used as handle index.
///
/// This is `u32` by default and `u64` if the `large-handle` feature is
/// enabled. With `u32`, a mesh can hold roughly 4 billion elements of each
/// kind, which is plenty for almost all use cases while keeping the data
/// structures small.
#[cfg(not(feature = "large-handle"))]
#[allow(non_camel_case_types)]
pub type hsize = u32;

#[cfg(feature = "large-handle")]
#[allow(non_camel_case_types)]
pub type hsize = u64;


/// Types that can be used as handles to refer to mesh elements.
pub trait Handle: 'static + Copy + fmt::Debug + Eq + Ord + Hash {
    /// Creates a handle from the given index.
    fn new(idx: hsize) -> Self;

    /// Returns the index of this handle.
    fn idx(&self) -> hsize;

    /// Helper method to create a handle from a `usize`.
    ///
    /// Panics if `raw` does not fit into `hsize`.
    #[inline(always)]
    fn from_usize(raw: usize) -> Self {
        assert!(
            raw <= hsize::max_value() as usize,
            "handle index {} is out of range for `hsize`",
            raw,
        );
        Self::new(raw as hsize)
    }

    /// Helper method to get the index as `usize`.
    #[inline(always)]
    fn to_usize(&self) -> usize {
        self.idx() as usize
    }
}

macro_rules! make_handle_type {
    ($(#[$attr:meta])* $name:ident = $short:expr;) => {
        $(#[$attr])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(hsize);

        impl Handle for $name {
            #[inline(always)]
            fn new(idx: hsize) -> Self {
                $name(idx)
            }

            #[inline(always)]
            fn idx(&self) -> hsize {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}{}", $short, self.idx())
            }
        }

        assert_eq_size!($name, hsize);
    }
}

make_handle_type!{
    /// A handle that is associated with a face.
    FaceHandle = "F";
}
make_handle_type!{
    /// A handle that is associated with a full edge (a pair of half edges).
    EdgeHandle = "E";
}
make_handle_type!{
    /// A handle that is associated with a vertex.
    VertexHandle = "V";
}
make_handle_type!{
    /// A handle that is associated with one oriented half of an edge.
    ///
    /// The two halves of edge `k` always have the indices `2k` and `2k + 1`.
    HalfEdgeHandle = "HE";
}

impl HalfEdgeHandle {
    /// Returns the half edge of the given edge with the lower index value.
    ///
    /// Due to our assumptions on how edges are stored, we just have to
    /// multiply the edge handle with 2 to get a corresponding half edge
    /// handle. This method does not check if the half edge actually exists.
    #[inline(always)]
    pub fn lower_half_of(edge: EdgeHandle) -> Self {
        Self(edge.idx() * 2)
    }

    /// Returns the full edge this half edge belongs to.
    ///
    /// Of one edge, the half edge with the smaller index always has an even
    /// index, while the other one has an odd one. This means we can just
    /// integer divide by 2 and get the edge index.
    #[inline(always)]
    pub fn full_edge(self) -> EdgeHandle {
        EdgeHandle::new(self.0 / 2)
    }

    /// Returns the handle of the twin half edge (the other half of the same
    /// full edge, pointing in the opposite direction). Flipping the lowest
    /// bit of the index is all there is to it.
    #[inline(always)]
    pub fn twin(self) -> Self {
        Self(self.0 ^ 1)
    }
}
