//! Simple shapes that can be built as a [`MiniMesh`].
//!
//! All closed shapes are centered around a configurable point and scaled so
//! that all vertices lie on a sphere with the configured radius. All faces
//! are oriented counter clock wise when looking at them from the outside.

use cgmath::{
    Point3, Vector3,
    prelude::*,
};

use crate::{
    VertexHandle,
    ds::BuildError,
    fat::MiniMesh,
};


/// Something that can be turned into a mesh.
pub trait Shape {
    /// Builds a new mesh from this shape.
    fn build(&self) -> Result<MiniMesh<f64>, BuildError>;
}

/// Builds a mesh from the given vertices (relative to `center`) and faces
/// referring to indices of `directions`. All directions are scaled to have
/// the length `radius`.
fn build_closed(
    center: Point3<f64>,
    radius: f64,
    directions: &[Vector3<f64>],
    faces: &[[usize; 3]],
) -> Result<MiniMesh<f64>, BuildError> {
    let mut out = MiniMesh::new();
    let vertices = directions.iter()
        .map(|dir| out.add_vertex(center + dir.normalize_to(radius)))
        .collect::<Vec<VertexHandle>>();

    for &[a, b, c] in faces {
        out.add_triangle([vertices[a], vertices[b], vertices[c]])?;
    }

    Ok(out)
}


/// A regular tetrahedron with 4 vertices, 6 edges and 4 faces.
#[derive(Debug, Clone, Copy)]
pub struct Tetrahedron {
    /// *Default*: `[0, 0, 0]`.
    pub center: Point3<f64>,

    /// The distance from the center to each vertex. *Default*: 1.0.
    pub radius: f64,
}

impl Default for Tetrahedron {
    fn default() -> Self {
        Self {
            center: Point3::origin(),
            radius: 1.0,
        }
    }
}

impl Shape for Tetrahedron {
    fn build(&self) -> Result<MiniMesh<f64>, BuildError> {
        // Every other corner of a cube.
        let directions = [
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(1.0, -1.0, -1.0),
            Vector3::new(-1.0, 1.0, -1.0),
            Vector3::new(-1.0, -1.0, 1.0),
        ];
        let faces = [
            [0, 1, 2],
            [0, 2, 3],
            [0, 3, 1],
            [1, 3, 2],
        ];

        build_closed(self.center, self.radius, &directions, &faces)
    }
}


/// A regular octahedron with 6 vertices, 12 edges and 8 faces. The vertices
/// lie on the coordinate axes.
#[derive(Debug, Clone, Copy)]
pub struct Octahedron {
    /// *Default*: `[0, 0, 0]`.
    pub center: Point3<f64>,

    /// The distance from the center to each vertex. *Default*: 1.0.
    pub radius: f64,
}

impl Default for Octahedron {
    fn default() -> Self {
        Self {
            center: Point3::origin(),
            radius: 1.0,
        }
    }
}

impl Shape for Octahedron {
    fn build(&self) -> Result<MiniMesh<f64>, BuildError> {
        let directions = [
            Vector3::unit_x(),
            Vector3::unit_y(),
            -Vector3::unit_x(),
            -Vector3::unit_y(),
            Vector3::unit_z(),
            -Vector3::unit_z(),
        ];

        // The four faces around the top (4), then the four around the
        // bottom (5).
        let faces = [
            [4, 0, 1],
            [4, 1, 2],
            [4, 2, 3],
            [4, 3, 0],
            [5, 1, 0],
            [5, 2, 1],
            [5, 3, 2],
            [5, 0, 3],
        ];

        build_closed(self.center, self.radius, &directions, &faces)
    }
}


/// A regular icosahedron with 12 vertices, 30 edges and 20 faces.
#[derive(Debug, Clone, Copy)]
pub struct Icosahedron {
    /// *Default*: `[0, 0, 0]`.
    pub center: Point3<f64>,

    /// The distance from the center to each vertex. *Default*: 1.0.
    pub radius: f64,
}

impl Default for Icosahedron {
    fn default() -> Self {
        Self {
            center: Point3::origin(),
            radius: 1.0,
        }
    }
}

impl Shape for Icosahedron {
    fn build(&self) -> Result<MiniMesh<f64>, BuildError> {
        // The corners of three orthogonal golden rectangles.
        let t = (1.0 + 5.0f64.sqrt()) / 2.0;
        let directions = [
            Vector3::new(-1.0, t, 0.0),
            Vector3::new(1.0, t, 0.0),
            Vector3::new(-1.0, -t, 0.0),
            Vector3::new(1.0, -t, 0.0),
            Vector3::new(0.0, -1.0, t),
            Vector3::new(0.0, 1.0, t),
            Vector3::new(0.0, -1.0, -t),
            Vector3::new(0.0, 1.0, -t),
            Vector3::new(t, 0.0, -1.0),
            Vector3::new(t, 0.0, 1.0),
            Vector3::new(-t, 0.0, -1.0),
            Vector3::new(-t, 0.0, 1.0),
        ];

        // Faces are ordered such that each one shares an edge with a face
        // added before it.
        let faces = [
            // Around vertex 0
            [0, 11, 5],
            [0, 5, 1],
            [0, 1, 7],
            [0, 7, 10],
            [0, 10, 11],

            // Adjacent to the first five
            [1, 5, 9],
            [5, 11, 4],
            [11, 10, 2],
            [10, 7, 6],
            [7, 1, 8],

            // Around vertex 3
            [3, 9, 4],
            [3, 4, 2],
            [3, 2, 6],
            [3, 6, 8],
            [3, 8, 9],

            // The remaining belt
            [4, 9, 5],
            [2, 4, 11],
            [6, 2, 10],
            [8, 6, 7],
            [9, 8, 1],
        ];

        build_closed(self.center, self.radius, &directions, &faces)
    }
}


/// A flat round disc that lies in the XY-plane and which normals point upwards
/// (+z). Unlike the other shapes, this mesh has a boundary.
#[derive(Debug, Clone, Copy)]
pub struct Disc {
    /// The number of faces generated for the disc. Has to be at least 3 or
    /// else creating a mesh will panic. *Default*: 16.
    pub faces: u32,

    /// The center point of the disc. *Default*: `[0, 0, 0]`.
    pub center: Point3<f64>,

    /// The outer radius (with ∞ faces, this would be the real radius).
    /// *Default*: 1.0.
    pub radius: f64,
}

impl Default for Disc {
    fn default() -> Self {
        Self {
            faces: 16,
            center: Point3::origin(),
            radius: 1.0,
        }
    }
}

impl Shape for Disc {
    fn build(&self) -> Result<MiniMesh<f64>, BuildError> {
        assert!(
            self.faces >= 3,
            "trying to build a disc with {} faces (minimum is 3)",
            self.faces,
        );

        // We create vertices in counter clock wise order around the center,
        // the first one starting at [r, 0, 0]. This is looking top down onto
        // the disc:
        //
        //      3 _
        //      |   ‾ – _
        //      |         2
        //      |  B    ⋰  \
        //      |     ⋰     \
        //      |   ⋰   A    \
        //      | ⋰           \
        //      0 ------------ 1
        //
        // Vertex 0 is the `center` vertex, vertex 1 is the first outer one
        // and stored in `first`. Face A is the first face, face B the second
        // one and so on.
        let mut out = MiniMesh::new();
        let center = out.add_vertex(self.center);
        let first = out.add_vertex(self.center + Vector3::new(self.radius, 0.0, 0.0));

        // The last vertex we created.
        let mut last = first;

        for i in 1..self.faces {
            let angle = (f64::from(i) / f64::from(self.faces)) * 2.0 * std::f64::consts::PI;
            let position = self.center + Vector3::new(
                self.radius * angle.cos(),
                self.radius * angle.sin(),
                0.0,
            );

            let v = out.add_vertex(position);
            out.add_triangle([center, last, v])?;
            last = v;
        }

        // Close the disc with the first outer vertex
        out.add_triangle([center, last, first])?;

        Ok(out)
    }
}
