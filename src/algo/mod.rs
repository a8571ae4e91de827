//! Algorithms working on a mesh together with its vertex positions.
//!
//! All algorithms take the connectivity ([`HalfEdgeMesh`][crate::ds::HalfEdgeMesh])
//! and the vertex positions as separate arguments. Positions can be stored
//! in any prop map with `Point3` values, usually a
//! [`DenseMap`][crate::map::DenseMap]. A vertex without position is a bug in
//! the caller's code and leads to a panic.

pub mod normals;
pub mod subdivision;

pub use self::{
    normals::{face_normal, vertex_normal, vertex_normals},
    subdivision::loop_subdivision,
};
