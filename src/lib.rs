//! Half edge triangle meshes with local surgery and Loop subdivision.
//!
//! The crate is split into a few layers:
//!
//! - [`ds::HalfEdgeMesh`] stores only connectivity. Its records (vertices,
//!   faces and half edges) live in arenas and refer to each other via
//!   [handles][handle]. On top of the basic navigation, it offers the two
//!   local surgery operations [`flip_edge`][ds::HalfEdgeMesh::flip_edge] and
//!   [`split_edge`][ds::HalfEdgeMesh::split_edge].
//! - Properties like vertex positions are stored in separate [prop
//!   maps][map], indexed by handles.
//! - [`algo`] contains algorithms working on a mesh plus its properties: Loop
//!   subdivision and normal estimation.
//! - [`fat::MiniMesh`] bundles a mesh with its vertex positions and is the
//!   most convenient entry point.
//!
//! ```
//! use loopmesh::shape::{Shape, Tetrahedron};
//!
//! let mut m = Tetrahedron::default().build().unwrap();
//! m.subdivide().unwrap();
//!
//! assert_eq!(m.mesh.num_vertices(), 10);
//! assert_eq!(m.mesh.num_edges(), 24);
//! assert_eq!(m.mesh.num_faces(), 16);
//! ```

#![deny(missing_debug_implementations)]

pub use cgmath;


#[cfg(test)]
#[macro_use]
mod test_utils;

#[macro_use]
mod macros;

pub mod algo;
pub mod ds;
pub mod fat;
pub mod handle;
pub mod map;
pub mod math;
pub mod shape;

pub use self::{
    handle::{hsize, Handle, EdgeHandle, FaceHandle, HalfEdgeHandle, VertexHandle},
};
