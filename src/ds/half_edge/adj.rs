//! Contains internal circulators, the public adjacency iterators and the
//! adjacency queries of the half edge mesh.

use crate::{
    handle::{hsize, EdgeHandle, FaceHandle, HalfEdgeHandle, VertexHandle},
};
use super::{Checked, HalfEdgeMesh};


// ===============================================================================================
// ===== Internal circulators
// ===============================================================================================

/// An iterator that circulates around a vertex in clockwise order, yielding
/// the outgoing halfedge.
#[derive(Debug, Clone)]
pub(super) enum CwVertexCirculator<'a> {
    Empty,
    NonEmpty {
        mesh: &'a HalfEdgeMesh,
        current_he: Checked<HalfEdgeHandle>,
        start_he: Checked<HalfEdgeHandle>,
    },
}

impl Iterator for CwVertexCirculator<'_> {
    type Item = Checked<HalfEdgeHandle>;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        match *self {
            CwVertexCirculator::Empty => None,
            CwVertexCirculator::NonEmpty { mesh, ref mut current_he, start_he } => {
                let out = *current_he;

                // Advance iterator
                let next = mesh[out.twin()].next;
                if next == start_he {
                    // If we reached the start edge again, we are done and set
                    // the iterator to `Empty`.
                    *self = CwVertexCirculator::Empty;
                } else {
                    *current_he = next;
                }

                Some(out)
            }
        }
    }
}


/// An iterator that circulates around a face in counter-clockwise order,
/// yielding the inner halfedge.
#[derive(Debug, Clone)]
pub(super) enum FaceCirculator<'a> {
    Empty,
    NonEmpty {
        mesh: &'a HalfEdgeMesh,
        current_he: Checked<HalfEdgeHandle>,
        start_he: Checked<HalfEdgeHandle>,
    },
}

impl Iterator for FaceCirculator<'_> {
    type Item = Checked<HalfEdgeHandle>;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        match *self {
            FaceCirculator::Empty => None,
            FaceCirculator::NonEmpty { mesh, ref mut current_he, start_he } => {
                let out = *current_he;

                // Advance iterator
                let next = mesh[out].next;
                if next == start_he {
                    *self = FaceCirculator::Empty;
                } else {
                    *current_he = next;
                }

                Some(out)
            }
        }
    }
}


// ===============================================================================================
// ===== Public iterators
// ===============================================================================================

/// Iterator over all vertices adjacent to a vertex (the targets of all
/// outgoing half edges). Created by [`HalfEdgeMesh::vertices_around_vertex`].
#[derive(Debug, Clone)]
pub struct VerticesAroundVertex<'a> {
    it: CwVertexCirculator<'a>,
}

impl Iterator for VerticesAroundVertex<'_> {
    type Item = VertexHandle;

    fn next(&mut self) -> Option<Self::Item> {
        match self.it {
            CwVertexCirculator::Empty => None,
            CwVertexCirculator::NonEmpty { mesh, .. } => {
                self.it.next().map(|outgoing| *mesh[outgoing].target)
            }
        }
    }
}

/// Iterator over all faces adjacent to a vertex. Holes around boundary
/// vertices are skipped. Created by [`HalfEdgeMesh::faces_around_vertex`].
#[derive(Debug, Clone)]
pub struct FacesAroundVertex<'a> {
    it: CwVertexCirculator<'a>,
}

impl Iterator for FacesAroundVertex<'_> {
    type Item = FaceHandle;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mesh = match self.it {
                CwVertexCirculator::Empty => return None,
                CwVertexCirculator::NonEmpty { mesh, .. } => mesh,
            };

            let outgoing = self.it.next()?;
            if let Some(face) = mesh[outgoing].face {
                return Some(*face);
            }
        }
    }
}


// ===============================================================================================
// ===== Adjacency queries
// ===============================================================================================

impl HalfEdgeMesh {
    /// Returns an iterator over all vertices connected to `center` by an
    /// edge. Isolated vertices yield nothing.
    pub fn vertices_around_vertex(&self, center: VertexHandle) -> VerticesAroundVertex<'_> {
        VerticesAroundVertex {
            it: self.circulate_around_vertex(self.check_vertex(center)),
        }
    }

    /// Returns an iterator over all faces adjacent to `center`.
    pub fn faces_around_vertex(&self, center: VertexHandle) -> FacesAroundVertex<'_> {
        FacesAroundVertex {
            it: self.circulate_around_vertex(self.check_vertex(center)),
        }
    }

    /// Returns the three corners of `face` in counter clock wise order.
    ///
    /// The first corner is the origin of the half edge returned by
    /// [`half_edge_of_face`][HalfEdgeMesh::half_edge_of_face]. Which corner
    /// that is can change when the face is modified by surgery.
    pub fn vertices_around_triangle(&self, face: FaceHandle) -> [VertexHandle; 3] {
        let face = self.check_face(face);
        let he0 = self[face].edge;
        let he1 = self[he0].next;
        let he2 = self[he1].next;

        [*self[he2].target, *self[he0].target, *self[he1].target]
    }

    /// Returns the two endpoints of `edge`: first the origin, then the target
    /// of its lower half edge.
    pub fn endpoints_of_edge(&self, edge: EdgeHandle) -> [VertexHandle; 2] {
        let he = self.checked_half_of(edge);
        [*self[he.twin()].target, *self[he].target]
    }

    /// Returns the faces on both sides of `edge` (in the order of its two
    /// half edges). Boundary edges have `None` on one side.
    pub fn faces_of_edge(&self, edge: EdgeHandle) -> [Option<FaceHandle>; 2] {
        let he = self.checked_half_of(edge);
        [self[he].face.map(|f| *f), self[he.twin()].face.map(|f| *f)]
    }

    /// Returns the number of edges incident to `v`. Isolated vertices have a
    /// valence of 0.
    pub fn valence(&self, v: VertexHandle) -> hsize {
        self.circulate_around_vertex(self.check_vertex(v)).count() as hsize
    }

    /// Returns `true` if at least one side of `edge` has no face.
    pub fn is_boundary_edge(&self, edge: EdgeHandle) -> bool {
        self.faces_of_edge(edge).iter().any(|f| f.is_none())
    }

    /// Returns `true` if `v` is adjacent to a hole. Isolated vertices are not
    /// boundary vertices.
    pub fn is_boundary_vertex(&self, v: VertexHandle) -> bool {
        // Thanks to the boundary condition of `outgoing`, we only need to
        // look at that one half edge.
        match self[self.check_vertex(v)].outgoing {
            None => false,
            Some(outgoing) => self[outgoing].face.is_none(),
        }
    }
}
