/// Convenience macro to quickly create a small triangle mesh with `f64`
/// positions.
///
/// Evaluates to a tuple of the [`MiniMesh`][crate::fat::MiniMesh] and an
/// array of all vertex handles in the order the vertices were listed. Faces
/// are added in the listed order, too. Panics if a face cannot be added.
///
/// ```
/// use loopmesh::mesh;
///
/// let (m, [a, b, c]) = mesh! {
///     vertices: [
///         a: [0.0, 0.0, 0.0],
///         b: [1.0, 0.0, 0.0],
///         c: [0.0, 1.0, 0.0],
///     ],
///     faces: [[a, b, c]],
/// };
///
/// assert_eq!(m.mesh.num_faces(), 1);
/// assert!(m.mesh.edge_between(a, c).is_some());
/// assert_eq!(m.vertex_positions[b].x, 1.0);
/// ```
#[macro_export]
macro_rules! mesh {
    (
        vertices: [
            $( $vert_name:ident: [$x:expr, $y:expr, $z:expr] ),* $(,)?
        ],
        faces: [
            $( [$va:ident, $vb:ident, $vc:ident] ),* $(,)?
        ] $(,)?
    ) => {{
        let mut mesh = $crate::fat::MiniMesh::<f64>::new();

        $(
            let $vert_name = mesh.add_vertex($crate::cgmath::Point3::new($x, $y, $z));
        )*

        $(
            mesh.add_triangle([$va, $vb, $vc]).expect("`mesh!` macro: invalid face");
        )*

        (mesh, [$($vert_name),*])
    }};
}
