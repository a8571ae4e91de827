//! Everything related to the `HalfEdgeMesh`.

// # Some notes for developers about this implementation
//
// - The twin half edges are stored implicitly: twins are always stored next to
//   one another in the underlying vector and thus always have handle indices
//   only one apart. Furthermore, since we start with the handle index 0, the
//   indices of two twins are always 2k and 2k + 1 where k is an integer.
// - We map edge handles to half edge handles by multiplying by two. Half edge
//   to edge is integer division by two. This works out very nicely: the edge
//   handle space is contiguous and the conversion operations are a simple
//   shift.
// - Elements are never removed. Flipping and splitting edges reuse records
//   where possible and only ever append new ones.
// - All faces are triangles. This is checked in `add_triangle` and kept by
//   `flip_edge` and `split_edge`.

use std::{fmt, ops};

use failure::Fail;

use crate::{
    handle::{hsize, Handle, EdgeHandle, FaceHandle, HalfEdgeHandle, VertexHandle},
    map::{DenseMap, DenseSet, PropStore},
};
use super::Checked;
use self::adj::{CwVertexCirculator, FaceCirculator};

pub use self::{
    adj::{FacesAroundVertex, VerticesAroundVertex},
    surgery::{SplitEdgeResult, SurgeryError},
};


mod adj;
mod surgery;
#[cfg(test)]
mod tests;


// ===============================================================================================
// ===== Errors
// ===============================================================================================

/// Error returned by [`HalfEdgeMesh::add_triangle`] when the triangle cannot
/// be added. The mesh is never modified in that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Fail)]
pub enum BuildError {
    #[fail(display = "{:?} does not exist in this mesh", _0)]
    VertexNotFound(VertexHandle),

    #[fail(display = "vertices of new face are not unique: {:?}", _0)]
    DuplicateVertex([VertexHandle; 3]),

    #[fail(
        display = "new face would add a non-manifold edge (the half edge {:?} -> {:?} \
            already has a face)",
        _0,
        _1
    )]
    NonManifoldEdge(VertexHandle, VertexHandle),

    #[fail(
        display = "new face would add a non-manifold vertex {:?} (no hole found in cycle)",
        _0
    )]
    NonManifoldVertex(VertexHandle),
}


// ===============================================================================================
// ===== Definition of types stored inside the data structure
// ===============================================================================================

/// A triangle mesh stored as half edge data structure.
///
/// Each edge is split into two oppositely oriented half edges. Each half edge
/// stores its target vertex, the next half edge around its face (or hole) and
/// its face, if any. Vertices store one outgoing half edge and faces store
/// one of their inner half edges. Everything else is derived from that.
///
/// The mesh only stores connectivity. Positions are usually stored in a
/// [`DenseMap`] next to it (see [`MiniMesh`][crate::fat::MiniMesh]).
///
/// All methods taking a handle panic if the handle does not refer to an
/// existing element of this mesh, unless documented otherwise.
#[derive(Clone)]
pub struct HalfEdgeMesh {
    vertices: DenseMap<VertexHandle, Vertex>,
    faces: DenseMap<FaceHandle, Face>,
    half_edges: DenseMap<HalfEdgeHandle, HalfEdge>,
}

/// Data stored per `Face`.
#[derive(Clone, Copy)]
pub(crate) struct Face {
    /// Handle of one (arbitrary) half edge adjacent to the face.
    edge: Checked<HalfEdgeHandle>,
}

/// Data stored per `Vertex`.
#[derive(Clone, Copy)]
pub(crate) struct Vertex {
    /// Handle of one outgoing half edge.
    ///
    /// - If the vertex is isolated, this is `None`.
    /// - If the vertex is a boundary vertex, this stores one arbitrary of the
    ///   boundary half edges. There only exists one such half edge per fan
    ///   blade.
    /// - If the vertex is not on the boundary, the half edge is completely
    ///   arbitrary.
    outgoing: Option<Checked<HalfEdgeHandle>>,
}

/// Data stored per half edge.
#[derive(Clone, Copy)]
pub(crate) struct HalfEdge {
    /// The adjacent face, if one exists.
    face: Option<Checked<FaceHandle>>,

    /// The vertex this half edge points to.
    target: Checked<VertexHandle>,

    /// The next half edge around the face or hole this half edge is adjacent
    /// to (going counter clock wise).
    next: Checked<HalfEdgeHandle>,
}

impl fmt::Debug for HalfEdgeMesh {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("HalfEdgeMesh")
            .field("vertices", &self.vertices)
            .field("faces", &self.faces)
            .field("half_edges", &self.half_edges)
            .finish()
    }
}

impl fmt::Debug for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Vertex {{ outgoing: {:?} }}", self.outgoing)
    }
}

impl fmt::Debug for Face {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Face {{ edge: {:?} }}", self.edge)
    }
}

impl fmt::Debug for HalfEdge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "HalfEdge {{ target: {:5} next: {:6} face: {:?} }}",
            format!("{:?},", self.target),
            format!("{:?},", self.next),
            self.face,
        )
    }
}

impl Default for HalfEdgeMesh {
    fn default() -> Self {
        Self::new()
    }
}


// ===============================================================================================
// ===== Internal helper methods
// ===============================================================================================

impl HalfEdgeMesh {
    /// Makes sure the given handle points to an existing element. If that's
    /// not the case, this method panics.
    fn check_face(&self, fh: FaceHandle) -> Checked<FaceHandle> {
        if self.faces.contains_handle(fh) {
            Checked::new(fh)
        } else {
            panic!(
                "{:?} was passed to a half edge mesh, but this face does not exist in this mesh",
                fh,
            );
        }
    }

    /// Makes sure the given handle points to an existing element. If that's
    /// not the case, this method panics.
    fn check_vertex(&self, vh: VertexHandle) -> Checked<VertexHandle> {
        self.try_check_vertex(vh).unwrap_or_else(|| {
            panic!(
                "{:?} was passed to a half edge mesh, but this vertex does not exist in this mesh",
                vh,
            )
        })
    }

    fn try_check_vertex(&self, vh: VertexHandle) -> Option<Checked<VertexHandle>> {
        if self.vertices.contains_handle(vh) {
            Some(Checked::new(vh))
        } else {
            None
        }
    }

    /// Makes sure the given handle points to an existing element. If that's
    /// not the case, this method panics.
    fn check_half_edge(&self, heh: HalfEdgeHandle) -> Checked<HalfEdgeHandle> {
        if self.half_edges.contains_handle(heh) {
            Checked::new(heh)
        } else {
            panic!(
                "{:?} was passed to a half edge mesh, but this half edge does not exist in \
                    this mesh",
                heh,
            );
        }
    }

    /// Makes sure the given handle points to an existing element. If that's
    /// not the case, this method panics. Otherwise, the half edge with the
    /// lower index is returned.
    fn checked_half_of(&self, eh: EdgeHandle) -> Checked<HalfEdgeHandle> {
        self.try_checked_half_of(eh).unwrap_or_else(|| {
            panic!(
                "{:?} was passed to a half edge mesh, but this edge does not exist in this mesh",
                eh,
            )
        })
    }

    fn try_checked_half_of(&self, eh: EdgeHandle) -> Option<Checked<HalfEdgeHandle>> {
        let heh = HalfEdgeHandle::lower_half_of(eh);
        if self.half_edges.contains_handle(heh) {
            Some(Checked::new(heh))
        } else {
            None
        }
    }

    /// Returns an iterator the circulates around the face `center`. The
    /// iterator yields inner half edges.
    fn circulate_around_face(&self, center: Checked<FaceHandle>) -> FaceCirculator<'_> {
        let start_he = self[center].edge;
        FaceCirculator::NonEmpty {
            mesh: self,
            current_he: start_he,
            start_he,
        }
    }

    /// Returns an iterator the circulates around the vertex `center`. The
    /// iterator yields outgoing half edges.
    fn circulate_around_vertex(&self, center: Checked<VertexHandle>) -> CwVertexCirculator<'_> {
        match self[center].outgoing {
            None => CwVertexCirculator::Empty,
            Some(start_he) => CwVertexCirculator::NonEmpty {
                mesh: self,
                current_he: start_he,
                start_he,
            }
        }
    }

    /// Tries to find the half edge from `from` to `to`. Returns `None` if
    /// there is no edge between the two vertices.
    fn he_between(
        &self,
        from: Checked<VertexHandle>,
        to: Checked<VertexHandle>,
    ) -> Option<Checked<HalfEdgeHandle>> {
        self.circulate_around_vertex(from)
            .find(|&outgoing| self[outgoing].target == to)
    }

    /// Returns the half edge whose `next` points to `he`.
    ///
    /// If `prev` handles would be stored, this would be easy. But since we
    /// don't store them, we have to circulate around the whole vertex. Inside
    /// of a triangle, `next(next(he))` is cheaper.
    fn prev(&self, he: Checked<HalfEdgeHandle>) -> Checked<HalfEdgeHandle> {
        self.find_incoming_he(he.twin(), |incoming| self[incoming].next == he)
            .expect("internal HEM error: could not find `prev` half edge")
    }

    /// Tries to find a half edge pointing towards `start_edge.target` that
    /// satisfies the given predicate. Returns `None` if no edge around
    /// `start_edge.target` satisfying `predicate` is found.
    #[inline(always)]
    fn find_incoming_he(
        &self,
        start_edge: Checked<HalfEdgeHandle>,
        mut predicate: impl FnMut(Checked<HalfEdgeHandle>) -> bool,
    ) -> Option<Checked<HalfEdgeHandle>> {
        let mut incoming = start_edge;
        loop {
            if predicate(incoming) {
                return Some(incoming);
            }

            let next = self[incoming].next.twin();
            if next == start_edge {
                return None;
            }

            incoming = next;
        }
    }

    /// Adds a new vertex with the given `outgoing` half edge and returns it
    /// as checked handle.
    fn add_vertex_with(&mut self, outgoing: Option<Checked<HalfEdgeHandle>>) -> Checked<VertexHandle> {
        Checked::new(self.vertices.push(Vertex { outgoing }))
    }

    /// Adds two half edges between `from` and `to`, partially filled with
    /// dummy values. Returns the handle of the halfedge pointing to `to`.
    ///
    /// This function:
    /// - Correctly sets the `target` field of the half edges.
    /// - Always sets the `face` field of the half edges to `None`.
    /// - Sets the `next` field of the half edges to a dummy value. You
    ///   have to overwrite this value!
    /// - Does not set the `outgoing` fields of the vertices.
    fn add_edge_partially(
        &mut self,
        from: Checked<VertexHandle>,
        to: Checked<VertexHandle>,
    ) -> Checked<HalfEdgeHandle> {
        // Of course, wrapping a dummy handle into `Checked` is a bad idea.
        // Unfortunately, this is necessary. All code using this method has to
        // pay special attention anyway.
        let face = None;
        let next = Checked::new(HalfEdgeHandle::new(0));

        self.half_edges.push(HalfEdge { target: from, face, next });
        let out = self.half_edges.push(HalfEdge { target: to, face, next });

        Checked::new(out)
    }

    /// Checks that a triangle with the given vertices can be added without
    /// breaking the manifold property. Returns the already existing inner
    /// half edges: the half edge at index `i` goes from `vertices[i]` to
    /// `vertices[(i + 1) % 3]`.
    fn check_new_triangle(
        &self,
        vertices: [Checked<VertexHandle>; 3],
    ) -> Result<[Option<Checked<HalfEdgeHandle>>; 3], BuildError> {
        let mut existing = [None; 3];
        for vi in 0..3 {
            let from = vertices[vi];
            let to = vertices[(vi + 1) % 3];

            // Make sure the half edge we found is not connected to a face
            // already. This would mean that we would create a non-manifold
            // edge.
            let he = self.he_between(from, to);
            if let Some(he) = he {
                if self[he].face.is_some() {
                    return Err(BuildError::NonManifoldEdge(*from, *to));
                }
            }
            existing[vi] = he;
        }

        // If both edges adjacent to a corner are new, the new face starts a
        // new fan blade at that vertex. That's only possible if the vertex
        // has a hole to put it in. Due to the boundary condition of
        // `outgoing`, it's sufficient to check that one half edge.
        for vi in 0..3 {
            let prev_idx = (vi + 2) % 3;
            if existing[vi].is_none() && existing[prev_idx].is_none() {
                if let Some(outgoing) = self[vertices[vi]].outgoing {
                    if self[outgoing].face.is_some() {
                        return Err(BuildError::NonManifoldVertex(*vertices[vi]));
                    }
                }
            }
        }

        Ok(existing)
    }
}


// ===============================================================================================
// ===== Public interface: building
// ===============================================================================================

impl HalfEdgeMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: DenseMap::new(),
            faces: DenseMap::new(),
            half_edges: DenseMap::new(),
        }
    }

    /// Adds a new, isolated vertex and returns its handle.
    pub fn add_vertex(&mut self) -> VertexHandle {
        *self.add_vertex_with(None)
    }

    /// Adds a triangle with the three given vertices, connecting them in
    /// counter clock wise order. Missing edges are created, existing boundary
    /// edges are reused.
    ///
    /// Returns an error if one of the vertices does not exist, the vertices
    /// are not unique or if the new face would make the mesh non-manifold. In
    /// that case, the mesh is not modified.
    pub fn add_triangle(&mut self, [a, b, c]: [VertexHandle; 3]) -> Result<FaceHandle, BuildError> {
        let check = |vh| self.try_check_vertex(vh).ok_or(BuildError::VertexNotFound(vh));
        let vertices = [check(a)?, check(b)?, check(c)?];
        if a == b || a == c || b == c {
            return Err(BuildError::DuplicateVertex([a, b, c]));
        }

        // ===================================================================
        // ===== Find edges between vertices
        // ===================================================================
        // All checks happen before anything is modified. Afterwards, missing
        // edges are added in an incomplete form (e.g. `next` and `outgoing`
        // handles won't be changed anywhere).
        //
        // `inner_half_edges` will store the half edges between the vertices of
        // the new face. The half edge at index `i` goes from `vertices[i]` to
        // `vertices[(i + 1) % 3]]`.
        let existing = self.check_new_triangle(vertices)?;
        let mut inner_half_edges = [Checked::new(HalfEdgeHandle::new(0)); 3];
        for vi in 0..3 {
            inner_half_edges[vi] = match existing[vi] {
                Some(he) => he,
                None => self.add_edge_partially(vertices[vi], vertices[(vi + 1) % 3]),
            };
        }

        // ===================================================================
        // ===== Add face and fix `face` handle of inner edges
        // ===================================================================
        // Insert new face (it is `Checked` because we just added it).
        let new_face = Checked::new(self.faces.push(Face {
            edge: inner_half_edges[0], // just an arbitrary edge
        }));

        // Set the `face` handle of the inner edges.
        for &he in &inner_half_edges {
            self[he].face = Some(new_face);
        }

        // ===================================================================
        // ===== Fix `next` handles
        // ===================================================================
        // This fixes the next handles of the outer three edges plus additional
        // edges not adjacent to this face, as necessary. We handle each corner
        // seperately.
        //
        // So for each corner, we have this situation (the corner vertex `v`,
        // the new face `F`, the two outer edges `incoming and `outgoing` and
        // we don't yet know what `v` is also connected too):
        //
        //                 ?
        //           ?           ?
        //
        //                (v)
        //               ^/ ^\
        //              //   \\
        //   incoming  //     \\  outgoing
        //            //   F   \\
        //           /v         \v
        //          ( ) ------> ( )
        //              <------
        //
        // Several fan blades can exist around one vertex while the mesh is
        // being built. The order of those blades is ambigious: when inserting
        // a new one, we do not know where in the cycle to insert it. Often,
        // blades are reconnected later (this is the `(true, true)` case
        // below) in which case we need to take special care.
        for vi in 0..3 {
            let prev_idx = (vi + 2) % 3;

            let vh = vertices[vi];
            let incoming = inner_half_edges[vi].twin();
            let outgoing = inner_half_edges[prev_idx].twin();

            let v_outgoing = self[vh].outgoing;
            let incoming_face = self[incoming].face;
            let outgoing_face = self[outgoing].face;

            // We have four different cases: it just depends whether incoming
            // and/or outgoing are already adjacent to a face.
            match (incoming_face.is_some(), outgoing_face.is_some()) {
                // Both edge pairs were newly inserted. This is usually easy,
                // but it can be a bit tricky when there are other edges (and
                // thus a face) connected to that vertex.
                (false, false) => {
                    if let Some(outgoing_from_v) = v_outgoing {
                        // More difficult case: we are creating a multi
                        // fan-blade vertex here. In order to correctly set the
                        // `next` handles, we need to find the start of some
                        // blade and the end of some blade. We will insert the
                        // new blade between the two.
                        //
                        //           ^  ?     ?  /
                        //            \         /
                        //      start  \   ?   /  end
                        //              \     /
                        //               \   v
                        //                (v)
                        //               ^/ ^\
                        //              //   \\
                        //             //     \\
                        //            //   F   \\
                        //           /v         \v
                        //          ( )         ( )
                        //

                        // Find the end edge of some blade. We checked above
                        // that `outgoing_from_v` is a boundary half edge, so
                        // there is at least one hole.
                        let end = self.find_incoming_he(
                            outgoing_from_v.twin(),
                            |incoming| self[incoming].face.is_none(),
                        ).expect("internal HEM error: no hole found around vertex");

                        // The start of another blade.
                        let start = self[end].next;

                        // Insert new blade in between.
                        self[incoming].next = start;
                        self[end].next = outgoing;

                        // Regarding the `outgoing` field of `v`: before adding
                        // this face, it was a boundary half edge. Since we
                        // didn't add a face adjacent to it, it still is. So we
                        // can keep it unchanged.
                    } else {
                        // This is the easy case: `incoming` and `outgoing` are
                        // the only edges adjacent to `v`. This also means that
                        // `v` was isolated before and we now need to set its
                        // `outgoing` handle.
                        self[incoming].next = outgoing;
                        self[vh].outgoing = Some(outgoing);
                    }
                }

                // The incoming edge is adjacent to another face (IF), but the
                // outgoing is not. We have to find the edge `before_new` whose
                // `next` handle points to `incoming`'s twin (a soon to be
                // inner edge of our new face). Because that `next` handle now
                // needs to point to `outgoing`.
                //
                //                      /
                //      ?         ?    /
                //           ?        /  before_new
                //                   /
                //                  v
                //      <-------- (v)
                //               ^/ ^\
                //         IF   //   \\
                //             //     \\
                //            //   F   \\
                //           /v         \v
                //          ( )         ( )
                //
                (true, false) => {
                    let before_new = self.prev(incoming.twin());
                    self[before_new].next = outgoing;

                    // The half edge `incoming.twin()` might have been
                    // `v.outgoing`. But this is bad because it's not a
                    // boundary half edge anymore (which we require). Therefore
                    // we update it to `outgoing` which is certainly a boundary
                    // half edge.
                    self[vh].outgoing = Some(outgoing);
                }

                // The outgoing edge is adjacent to another face (OF), but the
                // incoming is not. This is fairly easy: the twin of outgoing
                // points to some edge. The incoming edge just needs to point
                // that edge now. The `next` of the outgoing twin will be set
                // later (since it's an inner edge of our new face).
                //
                //            ^
                //             \   ?
                //              \           ?
                //               \   ?
                //                \
                //                (v)<---------
                //               ^/ ^\
                //              //   \\  OF
                //             //     \\
                //            //   F   \\
                //           /v         \v
                //          ( )         ( )
                //
                (false, true) => {
                    self[incoming].next = self[outgoing.twin()].next;

                    // We don't need to update `v.outgoing` here because the
                    // only old half edge that won't be boundary anymore is
                    // `outgoing.twin()`. But this is not an outgoing edge for
                    // `v`.
                }

                // The incoming and outgoing edge are both adjacent to a face.
                // That means we are connecting two fan blades. If the fan
                // blade of `incoming` is already directly after the fan blade
                // of `outgoing` (speaking about the "circulate around vertex"
                // order), then everything is fine.
                //
                //      <-------- (v) <--------
                //               ^/ ^\
                //         IF   //   \\   OF
                //             //     \\
                //            //   F   \\
                //           /v         \v
                //          ( )         ( )
                //
                // If that is not the case, we need to change the order of fan
                // blades to match the situation above. Additionally, we might
                // need to update `v.outgoing` because it might have been
                // `incoming.twin()` which is not a boundary half edge anymore.
                (true, true) => {
                    let ib_end_opt = self.find_incoming_he(
                        incoming,
                        |incoming| self[incoming].face.is_none(),
                    );

                    if self[outgoing.twin()].next != incoming.twin() {
                        // Here we need to conceptually delete one fan blade
                        // from the `next` circle around `v` and re-insert it
                        // into the right position. We choose to "move" the fan
                        // blade starting with `incoming` (IB).
                        //
                        // We have to deal with four fan blades:
                        // - IB: the blade containing `incoming` (where
                        //   `incoming.twin()` is its start).
                        // - OB: the blade containing `outgoing` (where
                        //   `outgoing.twin()` is its end)
                        // - BIB (before incoming blade): the blade before IB
                        // - AOB (after outgoing blade): the blade after OB
                        //   (outgoing.twin.next is its start).
                        //
                        //       ┌────┐    ┌─────┐         ┌─────┐    ┌────┐
                        //  +--> │ OB │ -> │ AOB │ -> ? -> │ BIB │ -> │ IB │ -> ?
                        //  |    └────┘    └─────┘         └─────┘    └────┘    |
                        //  +---------------------------------------------------+
                        //
                        let ib_end = ib_end_opt.expect("internal HEM error: cannot find `ib_end`");
                        let bib_end = self.prev(incoming.twin());

                        // Remove IB from the cycle and reinsert it right after
                        // OB. The cycle is broken until the `next` handles of
                        // the inner edges are set below, but nothing reads it
                        // in between.
                        self[bib_end].next = self[ib_end].next;
                        let aob_start = self[outgoing.twin()].next;
                        self[ib_end].next = aob_start;

                        // The start of AOB is a boundary outgoing half edge of
                        // `v`, just what we need.
                        self[vh].outgoing = Some(aob_start);
                    } else if let Some(ib_end) = ib_end_opt {
                        // The order of fan blades around the vertex is fine,
                        // but we might need to update `v.outgoing`. If we
                        // can't find the end of IB, there was only one blade
                        // left and the vertex won't be boundary anymore. In
                        // that case, `outgoing` can stay arbitrary.
                        let new_outgoing = self[ib_end].next;
                        self[vh].outgoing = Some(new_outgoing);
                    }
                }
            }
        }

        // Now we only need to set the `next` handles of the inner half edges.
        // This is easy.
        for he_i in 0..3 {
            let curr = inner_half_edges[he_i];
            let next = inner_half_edges[(he_i + 1) % 3];
            self[curr].next = next;
        }

        Ok(*new_face)
    }
}


// ===============================================================================================
// ===== Public interface: counts, handles and navigation
// ===============================================================================================

impl HalfEdgeMesh {
    pub fn num_vertices(&self) -> hsize {
        self.vertices.num_elements()
    }

    pub fn num_faces(&self) -> hsize {
        self.faces.num_elements()
    }

    pub fn num_edges(&self) -> hsize {
        self.half_edges.num_elements() / 2
    }

    pub fn contains_vertex(&self, vertex: VertexHandle) -> bool {
        self.vertices.contains_handle(vertex)
    }

    pub fn contains_face(&self, face: FaceHandle) -> bool {
        self.faces.contains_handle(face)
    }

    pub fn contains_edge(&self, edge: EdgeHandle) -> bool {
        self.half_edges.contains_handle(HalfEdgeHandle::lower_half_of(edge))
    }

    /// Returns all vertex handles in increasing order.
    pub fn vertex_handles(&self) -> impl Iterator<Item = VertexHandle> + '_ {
        self.vertices.handles()
    }

    /// Returns all face handles in increasing order.
    pub fn face_handles(&self) -> impl Iterator<Item = FaceHandle> + '_ {
        self.faces.handles()
    }

    /// Returns all edge handles in increasing order.
    pub fn edge_handles(&self) -> impl Iterator<Item = EdgeHandle> + '_ {
        // Half edges are only ever added in pairs, so every lower half stands
        // for one edge.
        self.half_edges.handles()
            .filter(|heh| heh.idx() % 2 == 0)
            .map(|heh| heh.full_edge())
    }

    /// Returns one outgoing half edge of `v` or `None` if `v` is isolated. If
    /// `v` is a boundary vertex, the returned half edge is a boundary half
    /// edge.
    pub fn outgoing_half_edge(&self, v: VertexHandle) -> Option<HalfEdgeHandle> {
        self[self.check_vertex(v)].outgoing.map(|he| *he)
    }

    /// Returns the half edge of `edge` with the lower index.
    pub fn half_edge_of_edge(&self, edge: EdgeHandle) -> HalfEdgeHandle {
        *self.checked_half_of(edge)
    }

    /// Returns one of the three inner half edges of `face`.
    pub fn half_edge_of_face(&self, face: FaceHandle) -> HalfEdgeHandle {
        *self[self.check_face(face)].edge
    }

    pub fn he_twin(&self, he: HalfEdgeHandle) -> HalfEdgeHandle {
        *self.check_half_edge(he).twin()
    }

    /// Returns the next half edge around the face (or hole) of `he`.
    pub fn he_next(&self, he: HalfEdgeHandle) -> HalfEdgeHandle {
        *self[self.check_half_edge(he)].next
    }

    /// Returns the half edge whose `next` is `he`.
    pub fn he_prev(&self, he: HalfEdgeHandle) -> HalfEdgeHandle {
        *self.prev(self.check_half_edge(he))
    }

    /// Returns the vertex `he` starts at.
    pub fn he_origin(&self, he: HalfEdgeHandle) -> VertexHandle {
        *self[self.check_half_edge(he).twin()].target
    }

    /// Returns the vertex `he` points to.
    pub fn he_target(&self, he: HalfEdgeHandle) -> VertexHandle {
        *self[self.check_half_edge(he)].target
    }

    /// Returns the face `he` is adjacent to or `None` if `he` is a boundary
    /// half edge.
    pub fn he_face(&self, he: HalfEdgeHandle) -> Option<FaceHandle> {
        self[self.check_half_edge(he)].face.map(|f| *f)
    }

    pub fn he_edge(&self, he: HalfEdgeHandle) -> EdgeHandle {
        self.check_half_edge(he).full_edge()
    }

    /// Returns the half edge from `from` to `to`, if it exists.
    pub fn he_between_vertices(&self, from: VertexHandle, to: VertexHandle) -> Option<HalfEdgeHandle> {
        self.he_between(self.check_vertex(from), self.check_vertex(to)).map(|he| *he)
    }

    /// Returns the edge between `a` and `b`, if it exists.
    pub fn edge_between(&self, a: VertexHandle, b: VertexHandle) -> Option<EdgeHandle> {
        self.he_between_vertices(a, b).map(|he| he.full_edge())
    }

    /// Returns `true` if the mesh does not have any boundary edges.
    pub fn is_closed(&self) -> bool {
        self.half_edges.values().all(|he| he.face.is_some())
    }

    /// Returns the first boundary edge (with the lowest handle) or `None` if
    /// the mesh is closed.
    pub fn first_boundary_edge(&self) -> Option<EdgeHandle> {
        self.half_edges.iter()
            .find(|(_, he)| he.face.is_none())
            .map(|(heh, _)| heh.full_edge())
    }
}


// ===============================================================================================
// ===== Integrity check
// ===============================================================================================

impl HalfEdgeMesh {
    /// Checks all invariants of the data structure and panics with a message
    /// starting with "bug" if one of them is violated.
    ///
    /// This walks through the whole mesh and is mainly useful in tests and
    /// while debugging.
    pub fn check_integrity(&self) {
        // Check vertices
        for (vh, v) in self.vertices.iter() {
            if let Some(outgoing) = v.outgoing {
                // Make sure outgoing handles are valid
                if !self.half_edges.contains_handle(*outgoing) {
                    panic!(
                        "bug (broken reference): [{:?}].outgoing = Some({:?}), but that \
                            half edge does not exist!",
                        vh,
                        outgoing,
                    );
                }

                // Check `outgoing <-> target` connection
                if *self[outgoing.twin()].target != vh {
                    panic!(
                        "bug: [{:?}].outgoing = Some({:?}), but [{:?}.twin()].target = {:?} \
                            (should be {:?})",
                        vh,
                        outgoing,
                        outgoing,
                        self[outgoing.twin()].target,
                        vh,
                    );
                }
            }
        }

        // Check faces
        for (fh, f) in self.faces.iter() {
            // Make sure all edge handles are valid
            if !self.half_edges.contains_handle(*f.edge) {
                panic!(
                    "bug (broken reference): [{:?}].edge = {:?}, but that \
                        half edge does not exist!",
                    fh,
                    f.edge,
                );
            }

            // Check `edge <-> face` connection
            if self[f.edge].face.map(|h| *h) != Some(fh) {
                panic!(
                    "bug: [{:?}].edge = {:?}, but [{:?}].face = {:?} (should be {:?})",
                    fh,
                    f.edge,
                    f.edge,
                    self[f.edge].face,
                    fh,
                );
            }

            // All faces are triangles
            let len = self.circulate_around_face(Checked::new(fh)).take(4).count();
            if len != 3 {
                panic!("bug: {:?} is not a triangle (it has {} or more sides)", fh, len);
            }
        }

        // Check half edges
        for (heh, he) in self.half_edges.iter() {
            // Make sure all face, target and next handles are valid
            if let Some(face) = he.face {
                if !self.faces.contains_handle(*face) {
                    panic!(
                        "bug (broken reference): [{:?}].face = {:?}, but that face does not exist!",
                        heh,
                        face,
                    );
                }
            }
            if !self.vertices.contains_handle(*he.target) {
                panic!(
                    "bug (broken reference): [{:?}].target = {:?}, but that vertex \
                        does not exist!",
                    heh,
                    he.target,
                );
            }
            if !self.half_edges.contains_handle(*he.next) {
                panic!(
                    "bug (broken reference): [{:?}].next = {:?}, but that \
                        half edge does not exist!",
                    heh,
                    he.next,
                );
            }
            if !self.half_edges.contains_handle(heh.twin()) {
                panic!("bug: {:?} exists, but its twin {:?} does not", heh, heh.twin());
            }

            // No loops
            if he.target == self.half_edges[heh.twin()].target {
                panic!("bug: {:?} and its twin both point to {:?}", heh, he.target);
            }
        }

        // Iterate around all faces to make sure all cycles are fine.
        let mut visited = DenseSet::with_capacity(self.half_edges.num_elements());
        for start in self.half_edges.handles() {
            if visited.contains_handle(start) {
                continue;
            }

            let face = self.half_edges[start].face;
            let mut heh = start;
            loop {
                if self.half_edges[heh].face != face {
                    panic!(
                        "bug: while iterating around {:?} starting from {:?}, {:?} was \
                            encountered and its face is {:?}",
                        face,
                        start,
                        heh,
                        self.half_edges[heh].face,
                    );
                }

                // All half edges in this cycles should be not visited yet!
                if visited.insert(heh) {
                    panic!(
                        "bug: encountered {:?} while iterating around {:?}, but we \
                            already visited it!",
                        heh,
                        face,
                    );
                }

                heh = *self.half_edges[heh].next;

                if heh == start {
                    break;
                }
            }
        }

        // Iterate around all vertices to make sure all cycles are fine.
        let mut visited = DenseSet::with_capacity(self.half_edges.num_elements());
        for start in self.half_edges.handles() {
            if visited.contains_handle(start) {
                continue;
            }

            let vertex = self.half_edges[start].target;
            let mut heh = start;
            loop {
                if self.half_edges[heh].target != vertex {
                    panic!(
                        "bug: while iterating around {:?} starting from {:?}, {:?} was \
                            encountered and its target is {:?}",
                        vertex,
                        start,
                        heh,
                        self.half_edges[heh].target,
                    );
                }

                // All half edges in this cycles should be not visited yet!
                if visited.insert(heh) {
                    panic!(
                        "bug: encountered {:?} while iterating around {:?}, but we \
                            already visited it!",
                        heh,
                        vertex,
                    );
                }

                heh = *self.half_edges[heh].next.twin();

                if heh == start {
                    break;
                }
            }
        }

        // Now that we know all cycles are fine, we can safely circulate.
        // Boundary vertices have to store a boundary half edge.
        for (vh, v) in self.vertices.iter() {
            if let Some(outgoing) = v.outgoing {
                let is_boundary = self.circulate_around_vertex(Checked::new(vh))
                    .any(|out| self[out].face.is_none());
                if is_boundary && self[outgoing].face.is_some() {
                    panic!(
                        "bug: {:?} is a boundary vertex, but [{:?}].outgoing = {:?} is not \
                            a boundary half edge",
                        vh,
                        vh,
                        outgoing,
                    );
                }
            }
        }
    }
}


macro_rules! impl_index {
    ($handle:ident, $field:ident, $out:ident) => {
        impl ops::Index<Checked<$handle>> for HalfEdgeMesh {
            type Output = $out;

            #[inline(always)]
            fn index(&self, idx: Checked<$handle>) -> &Self::Output {
                &self.$field[*idx]
            }
        }

        impl ops::IndexMut<Checked<$handle>> for HalfEdgeMesh {
            #[inline(always)]
            fn index_mut(&mut self, idx: Checked<$handle>) -> &mut Self::Output {
                &mut self.$field[*idx]
            }
        }
    }
}

impl_index!(VertexHandle, vertices, Vertex);
impl_index!(FaceHandle, faces, Face);
impl_index!(HalfEdgeHandle, half_edges, HalfEdge);
