//! Fat meshes: connectivity and vertex positions bundled in one type.

use cgmath::{Point3, Vector3};

use crate::{
    EdgeHandle, FaceHandle, VertexHandle,
    algo::{self, subdivision},
    ds::{BuildError, HalfEdgeMesh, SplitEdgeResult, SurgeryError},
    map::{DenseMap, PropStore, PropStoreMut},
    math::{lit, PrimitiveFloat},
};


/// A fat mesh that stores connectivity and vertex positions.
///
/// This is the most convenient way to use this crate: all operations keep
/// the positions in sync with the connectivity. Both fields are public, so
/// the mesh can still be passed to functions that only need one of them.
#[derive(Debug, Clone)]
pub struct MiniMesh<S: PrimitiveFloat = f64> {
    pub mesh: HalfEdgeMesh,
    pub vertex_positions: DenseMap<VertexHandle, Point3<S>>,
}

impl<S: PrimitiveFloat> MiniMesh<S> {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self {
            mesh: HalfEdgeMesh::new(),
            vertex_positions: DenseMap::new(),
        }
    }

    /// Adds a new, isolated vertex with the given position.
    pub fn add_vertex(&mut self, position: Point3<S>) -> VertexHandle {
        let v = self.mesh.add_vertex();
        self.vertex_positions.insert(v, position);
        v
    }

    /// See [`HalfEdgeMesh::add_triangle`].
    pub fn add_triangle(&mut self, vertices: [VertexHandle; 3]) -> Result<FaceHandle, BuildError> {
        self.mesh.add_triangle(vertices)
    }

    /// See [`HalfEdgeMesh::flip_edge`]. Positions are not changed.
    pub fn flip_edge(&mut self, edge: EdgeHandle) -> Result<EdgeHandle, SurgeryError> {
        self.mesh.flip_edge(edge)
    }

    /// Splits `edge` (see [`HalfEdgeMesh::split_edge`]) and places the new
    /// vertex in the middle of the old edge.
    pub fn split_edge(&mut self, edge: EdgeHandle) -> Result<SplitEdgeResult, SurgeryError> {
        if !self.mesh.contains_edge(edge) {
            return Err(SurgeryError::EdgeNotFound(edge));
        }
        let [a, b] = self.mesh.endpoints_of_edge(edge);
        let (pa, pb) = (self.position_of(a), self.position_of(b));

        let res = self.mesh.split_edge(edge)?;
        self.vertex_positions.insert(res.vertex, pa + (pb - pa) * lit::<S>(0.5));
        Ok(res)
    }

    /// See [`algo::vertex_normal`].
    pub fn vertex_normal(&self, v: VertexHandle) -> Option<Vector3<S>> {
        algo::vertex_normal(&self.mesh, &self.vertex_positions, v)
    }

    /// See [`algo::face_normal`].
    pub fn face_normal(&self, f: FaceHandle) -> Option<Vector3<S>> {
        algo::face_normal(&self.mesh, &self.vertex_positions, f)
    }

    /// See [`algo::vertex_normals`].
    pub fn vertex_normals(&self) -> DenseMap<VertexHandle, Vector3<S>> {
        algo::vertex_normals(&self.mesh, &self.vertex_positions)
    }

    /// Performs one step of Loop subdivision with the default weights. See
    /// [`subdivision::loop_subdivision_with`].
    pub fn subdivide(&mut self) -> Result<(), subdivision::Error> {
        subdivision::loop_subdivision(&mut self.mesh, &mut self.vertex_positions)
    }

    /// Performs one step of Loop subdivision with the weights of `C`.
    pub fn subdivide_with<C: subdivision::Config>(&mut self) -> Result<(), subdivision::Error> {
        subdivision::loop_subdivision_with::<C, _, _>(&mut self.mesh, &mut self.vertex_positions)
    }

    fn position_of(&self, v: VertexHandle) -> Point3<S> {
        *self.vertex_positions.get_ref(v).expect("missing vertex position")
    }
}

impl<S: PrimitiveFloat> Default for MiniMesh<S> {
    fn default() -> Self {
        Self::new()
    }
}
