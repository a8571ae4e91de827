//! Loop subdivision of closed triangle meshes.
//!
//! One step of Loop subdivision splits every triangle into four. It is
//! implemented with the two local surgery operations of the half edge mesh:
//! first, every edge is split, which inserts one new vertex per edge. Then,
//! the new edges that connect a new vertex with an old vertex are flipped. The
//! result is the regular 1-to-4 split of every face. Positions of old vertices
//! are smoothed, positions of new vertices are weighted averages of the old
//! vertices around their edge.

use cgmath::{prelude::*, Point3, Rad, Vector3};
use derive_more::From;
use failure::Fail;
use num_traits::Zero;
use tracing::debug;

use crate::{
    hsize, EdgeHandle, VertexHandle,
    ds::{HalfEdgeMesh, SurgeryError},
    map::{DenseMap, DenseSet, PropStoreMut},
    math::{from_count, lit, PrimitiveFloat},
};


// ===============================================================================================
// ===== Configuration
// ===============================================================================================

/// Compile-time configuration of [`loop_subdivision_with`].
///
/// To configure the algorithm, either use one of the existing types
/// implementing this trait, or create your own (preferably uninhabitable)
/// type and implement this trait.
pub trait Config: 'static {
    /// The weight `u` of each neighbor when smoothing an old vertex with the
    /// given valence (which is never 0). The new position is
    /// `(1 - n·u)·p + u·(sum of neighbor positions)`.
    fn vertex_weight<S: PrimitiveFloat>(valence: hsize) -> S;
}

/// Warren's simplified weights: `3/16` for vertices with valence 3 and
/// `3/(8n)` otherwise. This is the default.
#[allow(missing_debug_implementations)]
pub enum WarrenConfig {}
impl Config for WarrenConfig {
    fn vertex_weight<S: PrimitiveFloat>(valence: hsize) -> S {
        if valence == 3 {
            lit(3.0 / 16.0)
        } else {
            lit::<S>(3.0) / (lit::<S>(8.0) * from_count::<S>(valence))
        }
    }
}

/// Loop's original weights: `(1/n)·(5/8 - (3/8 + 1/4·cos(2π/n))²)`.
#[allow(missing_debug_implementations)]
pub enum LoopConfig {}
impl Config for LoopConfig {
    fn vertex_weight<S: PrimitiveFloat>(valence: hsize) -> S {
        let n = from_count::<S>(valence);
        let c = lit::<S>(3.0 / 8.0) + lit::<S>(0.25) * Rad::cos(Rad::<S>::full_turn() / n);
        (lit::<S>(5.0 / 8.0) - c * c) / n
    }
}


// ===============================================================================================
// ===== Errors
// ===============================================================================================

/// Error returned by [`loop_subdivision`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Fail, From)]
pub enum Error {
    /// The mesh has a boundary, which is not supported. The given edge is one
    /// boundary edge. Nothing was modified.
    #[fail(display = "mesh is not closed: {:?} is a boundary edge", _0)]
    #[from(ignore)]
    NotClosed(EdgeHandle),

    /// One of the surgery operations failed. This only happens if the mesh
    /// was inconsistent before.
    #[fail(display = "surgery operation failed during subdivision: {}", _0)]
    Surgery(#[cause] SurgeryError),
}


// ===============================================================================================
// ===== Algorithm
// ===============================================================================================

/// Performs one step of Loop subdivision with the default weights
/// ([`WarrenConfig`]). See [`loop_subdivision_with`].
pub fn loop_subdivision<S, MapT>(
    mesh: &mut HalfEdgeMesh,
    vertex_positions: &mut MapT,
) -> Result<(), Error>
where
    MapT: PropStoreMut<VertexHandle, Target = Point3<S>>,
    S: PrimitiveFloat,
{
    loop_subdivision_with::<WarrenConfig, S, MapT>(mesh, vertex_positions)
}

/// Performs one step of Loop subdivision, using the weights of `C` to smooth
/// the old vertices.
///
/// The mesh has to be closed. Afterwards, it has four times as many faces,
/// one new vertex per old edge and `2E + 3F` edges (with `E` and `F` being
/// the old counts). All vertices get new positions; positions for new
/// vertices are inserted into `vertex_positions`. Isolated vertices keep
/// their position.
///
/// If the mesh has a boundary, `Error::NotClosed` is returned and nothing is
/// modified.
#[inline(never)]
pub fn loop_subdivision_with<C, S, MapT>(
    mesh: &mut HalfEdgeMesh,
    vertex_positions: &mut MapT,
) -> Result<(), Error>
where
    C: Config,
    MapT: PropStoreMut<VertexHandle, Target = Point3<S>>,
    S: PrimitiveFloat,
{
    if let Some(edge) = mesh.first_boundary_edge() {
        debug!("refusing to subdivide open mesh ({:?} is a boundary edge)", edge);
        return Err(Error::NotClosed(edge));
    }

    let pos_of = |positions: &MapT, v: VertexHandle| {
        *positions.get_ref(v).expect("missing vertex position")
    };

    debug!(
        "Loop subdivision: {} vertices, {} edges, {} faces",
        mesh.num_vertices(),
        mesh.num_edges(),
        mesh.num_faces(),
    );

    // ----- (1) Calculate new positions for old vertices ----------------------------------------
    // We need the old positions of all neighbors, so the new positions are
    // only stored in a side table and written back at the very end.
    let mut new_positions: DenseMap<VertexHandle, Point3<S>>
        = DenseMap::with_capacity(mesh.num_vertices());
    for vh in mesh.vertex_handles() {
        let old_pos = pos_of(vertex_positions, vh);

        let mut valence = 0;
        let sum = mesh.vertices_around_vertex(vh)
            .inspect(|_| valence += 1)
            .map(|n| pos_of(vertex_positions, n).to_vec())
            .fold(Vector3::zero(), |acc, p| acc + p);

        let new_pos = if valence == 0 {
            old_pos
        } else {
            let u = C::vertex_weight::<S>(valence);
            let self_weight = lit::<S>(1.0) - from_count::<S>(valence) * u;
            Point3::from_vec(old_pos.to_vec() * self_weight + sum * u)
        };
        new_positions.insert(vh, new_pos);
    }

    // ----- (2) Calculate positions of the new vertices ---------------------------------------
    // For each edge (a, b) with the opposite vertices c and d, the new vertex
    // is placed at 3/8 (a + b) + 1/8 (c + d).
    let old_edges = mesh.edge_handles().collect::<Vec<_>>();
    let mut edge_points: DenseMap<EdgeHandle, Point3<S>>
        = DenseMap::with_capacity(mesh.num_edges());
    for &eh in &old_edges {
        let he = mesh.half_edge_of_edge(eh);
        let twin = mesh.he_twin(he);
        let a = pos_of(vertex_positions, mesh.he_origin(he)).to_vec();
        let b = pos_of(vertex_positions, mesh.he_target(he)).to_vec();
        let c = pos_of(vertex_positions, mesh.he_target(mesh.he_next(he))).to_vec();
        let d = pos_of(vertex_positions, mesh.he_target(mesh.he_next(twin))).to_vec();

        let p = (a + b) * lit::<S>(3.0 / 8.0) + (c + d) * lit::<S>(1.0 / 8.0);
        edge_points.insert(eh, Point3::from_vec(p));
    }

    // ----- (3) Split all old edges -------------------------------------------------------------
    // Only the two cross edges of each split are candidates for flipping. The
    // two halves of the old edge stay as they are.
    let mut new_vertices: DenseSet<VertexHandle> = DenseSet::with_capacity(mesh.num_edges());
    let mut flip_candidates = Vec::with_capacity(2 * old_edges.len());
    for &eh in &old_edges {
        let res = mesh.split_edge(eh)?;
        vertex_positions.insert(res.vertex, edge_points[eh]);
        new_vertices.insert(res.vertex);
        flip_candidates.extend_from_slice(&res.cross_edges);
    }
    debug!(
        "split {} edges, {} flip candidates",
        old_edges.len(),
        flip_candidates.len(),
    );

    // ----- (4) Flip edges connecting an old and a new vertex -----------------------------------
    let mut num_flipped = 0;
    for eh in flip_candidates {
        let [a, b] = mesh.endpoints_of_edge(eh);
        if new_vertices.contains_handle(a) != new_vertices.contains_handle(b) {
            mesh.flip_edge(eh)?;
            num_flipped += 1;
        }
    }
    debug!("flipped {} edges", num_flipped);

    // ----- (5) Write back new positions of old vertices ----------------------------------------
    for (vh, pos) in new_positions.iter() {
        vertex_positions.insert(vh, *pos);
    }

    Ok(())
}
