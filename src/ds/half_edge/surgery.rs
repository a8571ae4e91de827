//! Local surgery: flipping and splitting interior edges.
//!
//! Both operations first gather and validate all records around the edge.
//! Only if everything is fine, the mesh is modified. So on error, the mesh
//! is exactly as before.

use failure::Fail;
use tracing::{debug, trace};

use crate::handle::{EdgeHandle, FaceHandle, HalfEdgeHandle, VertexHandle};
use super::{Checked, Face, HalfEdgeMesh};


/// Error returned by [`HalfEdgeMesh::flip_edge`] and
/// [`HalfEdgeMesh::split_edge`] if the operation cannot be performed on the
/// given edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Fail)]
pub enum SurgeryError {
    #[fail(display = "{:?} does not exist in this mesh", _0)]
    EdgeNotFound(EdgeHandle),

    #[fail(display = "{:?} is a boundary edge, but only interior edges are supported", _0)]
    BoundaryEdge(EdgeHandle),

    #[fail(display = "{:?} has the face {:?} on both sides", _0, _1)]
    SameFaceOnBothSides(EdgeHandle, FaceHandle),

    #[fail(display = "{:?} is adjacent to {:?}, which is not a triangle", _0, _1)]
    NotATriangle(EdgeHandle, FaceHandle),

    #[fail(
        display = "flipping {:?} would connect {:?} and {:?}, which are already connected",
        edge,
        from,
        to
    )]
    DiagonalExists {
        edge: EdgeHandle,
        from: VertexHandle,
        to: VertexHandle,
    },
}

/// The result of [`HalfEdgeMesh::split_edge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitEdgeResult {
    /// The new vertex in the middle of the old edge.
    pub vertex: VertexHandle,

    /// The two edges that replace the old edge. The first one is the old edge
    /// handle (it now ends at `vertex`), the second one is new.
    pub replacement_edges: [EdgeHandle; 2],

    /// The two new edges that connect `vertex` with the two vertices opposite
    /// of the old edge.
    pub cross_edges: [EdgeHandle; 2],
}

/// All records around an interior edge with a triangle on either side.
/// Half edges are named after their origin and target corner.
///
/// ```text
///              c
///            ↙   ↖
///          a ----> b
///            ↘   ↗
///              d
/// ```
///
/// `ab` is the lower half of the edge and lies in the face `upper` together
/// with `bc` and `ca`. Its twin `ba` lies in `lower` together with `ad` and
/// `db`.
#[derive(Debug, Clone, Copy)]
struct Diamond {
    ab: Checked<HalfEdgeHandle>,
    ba: Checked<HalfEdgeHandle>,
    bc: Checked<HalfEdgeHandle>,
    ca: Checked<HalfEdgeHandle>,
    ad: Checked<HalfEdgeHandle>,
    db: Checked<HalfEdgeHandle>,
    upper: Checked<FaceHandle>,
    lower: Checked<FaceHandle>,
    a: Checked<VertexHandle>,
    b: Checked<VertexHandle>,
    c: Checked<VertexHandle>,
    d: Checked<VertexHandle>,
}

impl HalfEdgeMesh {
    /// Gathers the records around `edge` and checks that `edge` is an
    /// interior edge between two different triangles.
    fn diamond_around(&self, edge: EdgeHandle) -> Result<Diamond, SurgeryError> {
        let ab = self.try_checked_half_of(edge).ok_or(SurgeryError::EdgeNotFound(edge))?;
        let ba = ab.twin();

        let (upper, lower) = match (self[ab].face, self[ba].face) {
            (Some(upper), Some(lower)) => (upper, lower),
            _ => return Err(SurgeryError::BoundaryEdge(edge)),
        };
        if upper == lower {
            return Err(SurgeryError::SameFaceOnBothSides(edge, *upper));
        }

        let bc = self[ab].next;
        let ca = self[bc].next;
        let ad = self[ba].next;
        let db = self[ad].next;

        if self[ca].next != ab {
            return Err(SurgeryError::NotATriangle(edge, *upper));
        }
        if self[db].next != ba {
            return Err(SurgeryError::NotATriangle(edge, *lower));
        }

        Ok(Diamond {
            ab,
            ba,
            bc,
            ca,
            ad,
            db,
            upper,
            lower,
            a: self[ba].target,
            b: self[ab].target,
            c: self[bc].target,
            d: self[ad].target,
        })
    }

    /// Flips the given interior edge: the two triangles adjacent to `edge`
    /// form a quadrilateral and `edge` is replaced by the other diagonal of
    /// it.
    ///
    /// No elements are added or removed. The edge keeps its handle, which is
    /// returned. It fails if `edge` does not exist, is a boundary edge, does
    /// not have two different triangles on its sides or if the other
    /// diagonal already exists as an edge. In that case, the mesh is not
    /// modified.
    pub fn flip_edge(&mut self, edge: EdgeHandle) -> Result<EdgeHandle, SurgeryError> {
        let Diamond { ab, ba, bc, ca, ad, db, upper, lower, a, b, c, d } = self.diamond_around(edge)
            .map_err(|e| {
                debug!("rejecting flip of {:?}: {}", edge, e);
                e
            })?;

        // `c == d` happens for two triangles sharing all three corners.
        if c == d || self.he_between(c, d).is_some() {
            let e = SurgeryError::DiagonalExists { edge, from: *c, to: *d };
            debug!("rejecting flip of {:?}: {}", edge, e);
            return Err(e);
        }

        // The edge is turned counter clock wise: `ab` becomes `cd` and `ba`
        // becomes `dc`.
        //
        //         c                  c
        //       ↙   ↖              ↙ ↑ ↓ ↖
        //     a ----> b    =>    a   | |   b
        //       ↘   ↗              ↘ ↑ ↓ ↗
        //         d                  d
        //
        // The faces are now (cd, db, bc) and (dc, ca, ad).
        let (cd, dc) = (ab, ba);
        self[cd].target = d;
        self[dc].target = c;

        self[cd].next = db;
        self[db].next = bc;
        self[bc].next = cd;
        self[db].face = Some(upper);
        self[upper].edge = cd;

        self[dc].next = ca;
        self[ca].next = ad;
        self[ad].next = dc;
        self[ca].face = Some(lower);
        self[lower].edge = dc;

        // `a` and `b` lose one edge each. If that was their `outgoing` one, they
        // were not on the boundary (both sides had faces), so any other
        // outgoing half edge works.
        if self[a].outgoing == Some(ab) {
            self[a].outgoing = Some(ad);
        }
        if self[b].outgoing == Some(ba) {
            self[b].outgoing = Some(bc);
        }

        trace!("flipped {:?}: it now connects {:?} and {:?}", edge, c, d);
        Ok(edge)
    }

    /// Splits the given interior edge in two by inserting a new vertex. The
    /// new vertex is connected to the two vertices opposite of `edge`, so both
    /// adjacent triangles are split into two.
    ///
    /// This adds one vertex, three edges and two faces. The new vertex has a
    /// valence of 4 and its outgoing half edge lies on one of the two
    /// replacement edges. It fails under the same conditions as
    /// [`flip_edge`][HalfEdgeMesh::flip_edge] (except that the diagonal may
    /// exist). In that case, the mesh is not modified.
    ///
    /// Only connectivity is changed. Positions for the new vertex have to be
    /// added by the caller (see [`MiniMesh::split_edge`][crate::fat::MiniMesh::split_edge]).
    pub fn split_edge(&mut self, edge: EdgeHandle) -> Result<SplitEdgeResult, SurgeryError> {
        let Diamond { ab, ba, bc, ca, ad, db, upper, lower, b, c, d, .. } = self.diamond_around(edge)
            .map_err(|e| {
                debug!("rejecting split of {:?}: {}", edge, e);
                e
            })?;

        // A new vertex `m` is inserted on the edge and connected to all four
        // corners:
        //
        //         c                  c
        //       ↙   ↖              ↙ ↑ ↖
        //     a ----> b    =>    a → m → b
        //       ↘   ↗              ↘ ↓ ↗
        //         d                  d
        //
        // `ab` keeps its handle and now ends in `m`, `ba` now starts in `m`.
        // The old faces become (am, mc, ca) and (ma, ad, dm), the new ones
        // are (mb, bc, cm) and (bm, md, db).
        let m = self.add_vertex_with(None);
        let mb = self.add_edge_partially(m, b);
        let mc = self.add_edge_partially(m, c);
        let md = self.add_edge_partially(m, d);
        let (am, ma, bm, cm, dm) = (ab, ba, mb.twin(), mc.twin(), md.twin());

        self[m].outgoing = Some(mb);
        self[am].target = m;

        // `b` was not on the boundary, so `bm` is as good as `ba`
        if self[b].outgoing == Some(ba) {
            self[b].outgoing = Some(bm);
        }

        let set_face = |
            mesh: &mut Self,
            face: Checked<FaceHandle>,
            [h0, h1, h2]: [Checked<HalfEdgeHandle>; 3],
        | {
            mesh[h0].next = h1;
            mesh[h1].next = h2;
            mesh[h2].next = h0;
            for &he in &[h0, h1, h2] {
                mesh[he].face = Some(face);
            }
            mesh[face].edge = h0;
        };

        let upper_right = Checked::new(self.faces.push(Face { edge: mb }));
        let lower_right = Checked::new(self.faces.push(Face { edge: bm }));
        set_face(self, upper, [am, mc, ca]);
        set_face(self, upper_right, [mb, bc, cm]);
        set_face(self, lower, [ma, ad, dm]);
        set_face(self, lower_right, [bm, md, db]);

        trace!("split {:?}: inserted {:?}", edge, m);
        Ok(SplitEdgeResult {
            vertex: *m,
            replacement_edges: [am.full_edge(), mb.full_edge()],
            cross_edges: [mc.full_edge(), md.full_edge()],
        })
    }
}
