//! Estimating surface normals from vertex positions.

use cgmath::{prelude::*, Point3, Vector3};
use num_traits::Zero;

use crate::{
    FaceHandle, VertexHandle,
    ds::HalfEdgeMesh,
    map::{DenseMap, PropStore},
    math::PrimitiveFloat,
};


/// Returns the normalized vector or `None` if it has zero length.
fn normalize<S: PrimitiveFloat>(v: Vector3<S>) -> Option<Vector3<S>> {
    if v.magnitude2() > S::zero() {
        Some(v.normalize())
    } else {
        None
    }
}

fn pos_of<S, MapT>(vertex_positions: &MapT, v: VertexHandle) -> Point3<S>
where
    MapT: PropStore<VertexHandle, Target = Point3<S>>,
    S: PrimitiveFloat,
{
    *vertex_positions.get_ref(v).expect("missing vertex position")
}

/// Calculates the normal of the given triangle, following the counter clock
/// wise order of its corners.
///
/// Returns `None` if the triangle is degenerate (has zero area).
pub fn face_normal<S, MapT>(
    mesh: &HalfEdgeMesh,
    vertex_positions: &MapT,
    face: FaceHandle,
) -> Option<Vector3<S>>
where
    MapT: PropStore<VertexHandle, Target = Point3<S>>,
    S: PrimitiveFloat,
{
    let [a, b, c] = mesh.vertices_around_triangle(face);
    let pa = pos_of(vertex_positions, a);
    normalize((pos_of(vertex_positions, b) - pa).cross(pos_of(vertex_positions, c) - pa))
}

/// Estimates the normal of `vertex` by averaging the normals of all adjacent
/// faces, weighted by their area.
///
/// For each face `(v, b, c)` around the vertex, the unnormalized cross
/// product `(b - v) × (c - v)` is added up. Its length is twice the face's
/// area, so larger faces have more influence. The sum is normalized at the
/// end. For boundary vertices, only the existing faces are taken into
/// account.
///
/// Returns `None` if the vertex is isolated or the sum has zero length (e.g.
/// all adjacent faces are degenerate or cancel each other out).
pub fn vertex_normal<S, MapT>(
    mesh: &HalfEdgeMesh,
    vertex_positions: &MapT,
    vertex: VertexHandle,
) -> Option<Vector3<S>>
where
    MapT: PropStore<VertexHandle, Target = Point3<S>>,
    S: PrimitiveFloat,
{
    let center = pos_of(vertex_positions, vertex);
    let sum = mesh.faces_around_vertex(vertex)
        .map(|f| {
            // Rotate the corners such that `vertex` comes first.
            let [a, b, c] = mesh.vertices_around_triangle(f);
            let (b, c) = if a == vertex {
                (b, c)
            } else if b == vertex {
                (c, a)
            } else {
                (a, b)
            };

            (pos_of(vertex_positions, b) - center).cross(pos_of(vertex_positions, c) - center)
        })
        .fold(Vector3::zero(), |acc, n| acc + n);

    normalize(sum)
}

/// Estimates the normals of all vertices (see [`vertex_normal`]). Vertices
/// without a defined normal are not part of the returned map.
pub fn vertex_normals<S, MapT>(
    mesh: &HalfEdgeMesh,
    vertex_positions: &MapT,
) -> DenseMap<VertexHandle, Vector3<S>>
where
    MapT: PropStore<VertexHandle, Target = Point3<S>>,
    S: PrimitiveFloat,
{
    mesh.vertex_handles()
        .filter_map(|v| vertex_normal(mesh, vertex_positions, v).map(|n| (v, n)))
        .collect()
}
