use crate::{
    handle::{hsize, Handle, EdgeHandle, FaceHandle, HalfEdgeHandle, VertexHandle},
    test_utils::{face_triples, normalized_triangle},
};
use super::*;


/// Builds a tetrahedron. Returns the mesh and the vertices `[a, b, c, top]`.
///
///             (T)
///            / | \
///           /  |  \
///          /   |   \
///         /   (C)   \
///        / ⋰     ⋱  \
///       (A) ------- (B)
///
fn tetrahedron() -> (HalfEdgeMesh, [VertexHandle; 4]) {
    let mut m = HalfEdgeMesh::new();
    let va = m.add_vertex();
    let vb = m.add_vertex();
    let vc = m.add_vertex();
    let vt = m.add_vertex();

    m.add_triangle([va, vc, vb]).unwrap();
    m.add_triangle([va, vb, vt]).unwrap();
    m.add_triangle([vb, vc, vt]).unwrap();
    m.add_triangle([vc, va, vt]).unwrap();

    (m, [va, vb, vc, vt])
}

/// Builds a square out of two triangles. Returns the mesh and the vertices
/// `[a, b, c, d]`.
///
///    (D) ----- (C)
///     |      ⟋  |
///     |    ⟋    |
///     |  ⟋      |
///    (A) ----- (B)
///
fn square() -> (HalfEdgeMesh, [VertexHandle; 4]) {
    let mut m = HalfEdgeMesh::new();
    let va = m.add_vertex();
    let vb = m.add_vertex();
    let vc = m.add_vertex();
    let vd = m.add_vertex();

    m.add_triangle([va, vb, vc]).unwrap();
    m.add_triangle([va, vc, vd]).unwrap();

    (m, [va, vb, vc, vd])
}


// ===== Building ================================================================================

#[test]
fn empty() {
    let m = HalfEdgeMesh::new();
    m.check_integrity();

    assert_eq!(m.num_vertices(), 0);
    assert_eq!(m.num_edges(), 0);
    assert_eq!(m.num_faces(), 0);
    assert!(m.is_closed());
    assert_eq!(m.vertex_handles().count(), 0);
    assert!(!m.contains_vertex(VertexHandle::new(0)));
}

#[test]
fn single_vertex() {
    let mut m = HalfEdgeMesh::new();
    let v = m.add_vertex();
    m.check_integrity();

    assert_eq!(m.num_vertices(), 1);
    assert_eq!(m.outgoing_half_edge(v), None);
    assert_eq!(m.valence(v), 0);
    assert!(!m.is_boundary_vertex(v));
    assert_eq!(m.vertices_around_vertex(v).count(), 0);
    assert_eq!(m.faces_around_vertex(v).count(), 0);
}

#[test]
fn single_triangle() {
    //
    //         (C)
    //        /   \
    //       /     \
    //      /       \
    //    (A) ----- (B)
    //
    let mut m = HalfEdgeMesh::new();
    let va = m.add_vertex();
    let vb = m.add_vertex();
    let vc = m.add_vertex();
    let f = m.add_triangle([va, vb, vc]).unwrap();
    m.check_integrity();

    assert_eq!(m.num_faces(), 1);
    assert_eq!(m.num_edges(), 3);
    assert_eq!(m.vertices_around_triangle(f), [va, vb, vc]);
    assert!(!m.is_closed());
    assert!(!m.contains_face(FaceHandle::new(1)));

    let e0 = EdgeHandle::new(0);
    let e1 = EdgeHandle::new(1);
    let e2 = EdgeHandle::new(2);
    assert_eq_set!(m.edge_handles(), [e0, e1, e2]);
    assert_eq_set!(m.endpoints_of_edge(e0).iter().copied(), [va, vb]);
    assert_eq_set!(m.faces_of_edge(e0).iter().copied(), [Some(f), None]);

    for &v in &[va, vb, vc] {
        assert!(m.is_boundary_vertex(v));
        assert_eq!(m.valence(v), 2);
        assert_eq_set!(m.faces_around_vertex(v), [f]);

        // The outgoing half edge of a boundary vertex is a boundary half edge
        let out = m.outgoing_half_edge(v).unwrap();
        assert_eq!(m.he_origin(out), v);
        assert_eq!(m.he_face(out), None);
    }
    for &e in &[e0, e1, e2] {
        assert!(m.is_boundary_edge(e));
    }

    assert_eq_set!(m.vertices_around_vertex(va), [vb, vc]);
    assert_eq!(m.edge_between(va, vb), Some(e0));
    assert_eq!(m.edge_between(vb, va), Some(e0));
}

#[test]
fn half_edge_navigation() {
    let mut m = HalfEdgeMesh::new();
    let va = m.add_vertex();
    let vb = m.add_vertex();
    let vc = m.add_vertex();
    let f = m.add_triangle([va, vb, vc]).unwrap();

    let he = m.half_edge_of_face(f);
    assert_eq!(m.he_face(he), Some(f));
    assert_eq!(m.he_next(m.he_next(m.he_next(he))), he);
    assert_eq!(m.he_prev(m.he_next(he)), he);
    assert_eq!(m.he_target(he), m.he_origin(m.he_next(he)));
    assert_eq!(m.he_twin(m.he_twin(he)), he);
    assert_eq!(m.he_origin(he), m.he_target(m.he_twin(he)));
    assert_eq!(m.he_edge(he), m.he_edge(m.he_twin(he)));

    let e = m.he_edge(he);
    assert_eq!(m.half_edge_of_edge(e), HalfEdgeHandle::lower_half_of(e));

    // The boundary cycle runs the other way around
    let outer = m.he_twin(he);
    assert_eq!(m.he_face(outer), None);
    assert_eq!(m.he_next(m.he_next(m.he_next(outer))), outer);
    assert_eq!(m.he_between_vertices(m.he_origin(outer), m.he_target(outer)), Some(outer));
}

#[test]
fn tetrahedron_connectivity() {
    let (m, [va, vb, vc, vt]) = tetrahedron();
    m.check_integrity();

    assert_eq!(m.num_vertices(), 4);
    assert_eq!(m.num_edges(), 6);
    assert_eq!(m.num_faces(), 4);
    assert!(m.is_closed());
    assert_eq!(m.first_boundary_edge(), None);

    for &v in &[va, vb, vc, vt] {
        assert_eq!(m.valence(v), 3);
        assert!(!m.is_boundary_vertex(v));
        assert_eq!(m.faces_around_vertex(v).count(), 3);
    }
    assert_eq_set!(m.vertices_around_vertex(vt), [va, vb, vc]);
    for e in m.edge_handles() {
        assert!(!m.is_boundary_edge(e));
    }

    assert_eq_set!(face_triples(&m), [
        normalized_triangle([va, vc, vb]),
        normalized_triangle([va, vb, vt]),
        normalized_triangle([vb, vc, vt]),
        normalized_triangle([vc, va, vt]),
    ]);
}

#[test]
fn connect_two_blades_around_vertex() {
    // Three fan blades around (a). Then we add a face connecting two of
    // them.
    //
    //       (b)-------(c)
    //         \       /
    //          \  X  /
    //           \   /
    //            \ /
    //  (g)-------(a)-------(d)
    //    \       / \       /
    //     \  Z  /   \  Y  /
    //      \   /     \   /
    //       \ /       \ /
    //       (f)       (e)
    //
    let mut m = HalfEdgeMesh::new();
    let va = m.add_vertex();
    let vb = m.add_vertex();
    let vc = m.add_vertex();
    let vd = m.add_vertex();
    let ve = m.add_vertex();
    let vf = m.add_vertex();
    let vg = m.add_vertex();

    let fx = m.add_triangle([va, vc, vb]).unwrap();
    let fy = m.add_triangle([va, ve, vd]).unwrap();
    let fz = m.add_triangle([va, vg, vf]).unwrap();
    m.check_integrity();
    assert_eq!(m.valence(va), 6);

    let f = m.add_triangle([vd, vc, va]).unwrap();
    m.check_integrity();

    assert!(m.is_boundary_vertex(va));
    assert_eq_set!(m.faces_around_vertex(va), [fx, fy, fz, f]);
    assert_eq_set!(m.vertices_around_vertex(va), [vb, vc, vd, ve, vf, vg]);
    assert_eq_set!(m.faces_around_vertex(vc), [fx, f]);
    assert_eq!(m.num_edges(), 10);
}

#[test]
fn close_fan() {
    // A fan around (a) that is closed by the last triangle.
    let mut m = HalfEdgeMesh::new();
    let va = m.add_vertex();
    let vb = m.add_vertex();
    let vc = m.add_vertex();
    let vd = m.add_vertex();

    m.add_triangle([va, vb, vc]).unwrap();
    m.add_triangle([va, vc, vd]).unwrap();
    assert!(m.is_boundary_vertex(va));

    m.add_triangle([va, vd, vb]).unwrap();
    m.check_integrity();
    assert!(!m.is_boundary_vertex(va));
    assert_eq!(m.valence(va), 3);
    assert!(m.is_boundary_vertex(vb));
}

#[test]
fn add_triangle_unknown_vertex() {
    let mut m = HalfEdgeMesh::new();
    let va = m.add_vertex();
    let vb = m.add_vertex();
    let ghost = VertexHandle::new(7);

    assert_eq!(m.add_triangle([va, vb, ghost]), Err(BuildError::VertexNotFound(ghost)));
    assert_eq!(m.num_edges(), 0);
    assert_eq!(m.num_faces(), 0);
}

#[test]
fn add_triangle_duplicate_vertex() {
    let mut m = HalfEdgeMesh::new();
    let va = m.add_vertex();
    let vb = m.add_vertex();

    assert_eq!(
        m.add_triangle([va, vb, va]),
        Err(BuildError::DuplicateVertex([va, vb, va])),
    );
    assert_eq!(m.num_edges(), 0);
}

#[test]
fn non_manifold_triple_edge() {
    // This would connect three faces to a single edge.
    //
    //            (a)⟍
    //           / | \ ⟍
    //          /  |  \  ⟍
    //         /   |   \   ⟍
    //       (c)   |   (d)  (e)
    //         \   |   /   ⟋
    //          \  |  /  ⟋
    //           \ | / ⟋
    //            (b)⟋
    //
    let mut m = HalfEdgeMesh::new();
    let va = m.add_vertex();
    let vb = m.add_vertex();
    let vc = m.add_vertex();
    let vd = m.add_vertex();
    let ve = m.add_vertex();

    m.add_triangle([va, vc, vb]).unwrap();
    m.add_triangle([va, vb, vd]).unwrap();

    assert_eq!(
        m.add_triangle([va, vb, ve]),
        Err(BuildError::NonManifoldEdge(va, vb)),
    );
    m.check_integrity();
    assert_eq!(m.num_faces(), 2);
    assert_eq!(m.num_edges(), 5);
    assert_eq!(m.valence(ve), 0);
}

#[test]
fn non_manifold_add_to_closed_fan() {
    // (A) has a closed fan around itself. Adding another face to it would
    // make (A) non-manifold.
    //
    //             (B)          (E)
    //            / | \       ⟋  |
    //           /  |  \    ⟋    |
    //          /  (A)  \  A -- (F)
    //         / ⟋    ⟍ \
    //        (C) ----- (D)
    //
    let mut m = HalfEdgeMesh::new();
    let va = m.add_vertex();
    let vb = m.add_vertex();
    let vc = m.add_vertex();
    let vd = m.add_vertex();
    let ve = m.add_vertex();
    let vf = m.add_vertex();

    m.add_triangle([va, vb, vc]).unwrap();
    m.add_triangle([va, vc, vd]).unwrap();
    m.add_triangle([va, vd, vb]).unwrap();

    assert_eq!(
        m.add_triangle([va, vf, ve]),
        Err(BuildError::NonManifoldVertex(va)),
    );
    m.check_integrity();
    assert_eq!(m.num_faces(), 3);
    assert_eq!(m.num_edges(), 6);
}


// ===== Flip ====================================================================================

#[test]
fn flip_square_diagonal() {
    let (mut m, [va, vb, vc, vd]) = square();
    let diagonal = m.edge_between(va, vc).unwrap();

    assert_eq!(m.flip_edge(diagonal), Ok(diagonal));
    m.check_integrity();

    // Nothing was added
    assert_eq!(m.num_vertices(), 4);
    assert_eq!(m.num_edges(), 5);
    assert_eq!(m.num_faces(), 2);

    assert_eq_set!(m.endpoints_of_edge(diagonal).iter().copied(), [vb, vd]);
    assert_eq!(m.edge_between(va, vc), None);
    assert_eq!(m.edge_between(vb, vd), Some(diagonal));
    assert_eq_set!(face_triples(&m), [
        normalized_triangle([vb, vc, vd]),
        normalized_triangle([vd, va, vb]),
    ]);

    assert_eq!(m.valence(va), 2);
    assert_eq!(m.valence(vb), 3);
    assert_eq!(m.valence(vc), 2);
    assert_eq!(m.valence(vd), 3);
    for &v in &[va, vb, vc, vd] {
        assert!(m.is_boundary_vertex(v));
    }
}

#[test]
fn flip_twice_restores_faces() {
    let (mut m, [va, _, vc, _]) = square();
    let before = face_triples(&m);
    let diagonal = m.edge_between(va, vc).unwrap();

    m.flip_edge(diagonal).unwrap();
    assert_ne!(face_triples(&m), before);
    m.flip_edge(diagonal).unwrap();
    m.check_integrity();

    assert_eq!(face_triples(&m), before);
    assert_eq!(m.edge_between(va, vc), Some(diagonal));
}

#[test]
fn flip_in_closed_mesh() {
    // An octahedron with one edge flipped changes valences of four vertices.
    //
    //             (t)
    //          ⟋ / \ ⟍
    //      (w) -(s)-(e)- (n)      (n is behind)
    //          ⟍ \ / ⟋
    //             (b)
    //
    let mut m = HalfEdgeMesh::new();
    let vt = m.add_vertex();
    let vb = m.add_vertex();
    let vn = m.add_vertex();
    let ve = m.add_vertex();
    let vs = m.add_vertex();
    let vw = m.add_vertex();

    let ring = [vn, vw, vs, ve];
    for i in 0..4 {
        let (p, q) = (ring[i], ring[(i + 1) % 4]);
        m.add_triangle([vt, p, q]).unwrap();
        m.add_triangle([vb, q, p]).unwrap();
    }
    m.check_integrity();
    assert!(m.is_closed());

    let e = m.edge_between(vt, vs).unwrap();
    m.flip_edge(e).unwrap();
    m.check_integrity();

    assert!(m.is_closed());
    assert_eq_set!(m.endpoints_of_edge(e).iter().copied(), [vw, ve]);
    assert_eq!(m.valence(vt), 3);
    assert_eq!(m.valence(vs), 3);
    assert_eq!(m.valence(vw), 5);
    assert_eq!(m.valence(ve), 5);
}

#[test]
fn flip_rejects_boundary_edge() {
    let (mut m, [va, vb, _, _]) = square();
    let before = format!("{:?}", m);
    let e = m.edge_between(va, vb).unwrap();

    assert_eq!(m.flip_edge(e), Err(SurgeryError::BoundaryEdge(e)));
    assert_eq!(format!("{:?}", m), before);
}

#[test]
fn flip_rejects_existing_diagonal() {
    // In a tetrahedron, the two vertices opposite of an edge are always
    // connected already.
    let (mut m, [va, vb, vc, vt]) = tetrahedron();
    let before = format!("{:?}", m);
    let e = m.edge_between(va, vb).unwrap();

    let res = m.flip_edge(e);
    match res {
        Err(SurgeryError::DiagonalExists { edge, from, to }) => {
            assert_eq!(edge, e);
            assert_eq_set!(vec![from, to], [vc, vt]);
        }
        other => panic!("expected `DiagonalExists`, got {:?}", other),
    }
    assert_eq!(format!("{:?}", m), before);
}

#[test]
fn flip_rejects_unknown_edge() {
    let (mut m, _) = square();
    let e = EdgeHandle::new(99);
    assert_eq!(m.flip_edge(e), Err(SurgeryError::EdgeNotFound(e)));
}


// ===== Split ===================================================================================

#[test]
fn split_edge_with_two_faces() {
    //
    //             (A)                    (A)
    //            / | \                  / | \
    //           /  |  \                / (N) \
    //          /   |   \      =>      / / | \ \
    //         /   (M)   \            / / (M) \ \
    //        /  ⟋    ⟍  \          / / ⟋   ⟍\ \
    //       (B) ------- (C)        (B) ------- (C)
    //
    let mut m = HalfEdgeMesh::new();
    let va = m.add_vertex();
    let vb = m.add_vertex();
    let vc = m.add_vertex();
    let vm = m.add_vertex();

    m.add_triangle([va, vb, vm]).unwrap();
    let f_bc = m.add_triangle([vb, vc, vm]).unwrap();
    m.add_triangle([vc, va, vm]).unwrap();

    let edge = m.edge_between(va, vm).unwrap();
    let res = m.split_edge(edge).unwrap();
    let vn = res.vertex;
    m.check_integrity();

    assert_eq!(m.num_vertices(), 5);
    assert_eq!(m.num_faces(), 5);
    assert_eq!(m.num_edges(), 9);

    let split_faces = m.faces_around_vertex(vn).collect::<Vec<_>>();
    assert_eq!(split_faces.len(), 4);
    assert_eq_set!(split_faces.into_iter().chain(vec![f_bc]), [
        FaceHandle::new(0),
        FaceHandle::new(1),
        FaceHandle::new(2),
        FaceHandle::new(3),
        FaceHandle::new(4),
    ]);

    assert_eq_set!(m.vertices_around_vertex(va), [vc, vn, vb]);
    assert_eq_set!(m.vertices_around_vertex(vb), [va, vn, vm, vc]);
    assert_eq_set!(m.vertices_around_vertex(vc), [vb, vm, vn, va]);
    assert_eq_set!(m.vertices_around_vertex(vm), [vb, vn, vc]);
    assert_eq_set!(m.vertices_around_vertex(vn), [va, vc, vm, vb]);
    assert!(!m.is_boundary_vertex(vn));
    assert!(!m.is_boundary_vertex(vm));
    assert!(m.is_boundary_vertex(va));

    // The old edge handle is reused for one half
    assert_eq!(res.replacement_edges[0], edge);
    let mut halves = vec![];
    for &e in &res.replacement_edges {
        let [x, y] = m.endpoints_of_edge(e);
        assert!(x == vn || y == vn);
        halves.push(if x == vn { y } else { x });
    }
    assert_eq_set!(halves, [va, vm]);

    let mut opposite = vec![];
    for &e in &res.cross_edges {
        let [x, y] = m.endpoints_of_edge(e);
        assert!(x == vn || y == vn);
        opposite.push(if x == vn { y } else { x });
    }
    assert_eq_set!(opposite, [vb, vc]);

    // The new vertex points along the split edge, not along a cross edge
    let out = m.outgoing_half_edge(vn).unwrap();
    assert!(res.replacement_edges.contains(&m.he_edge(out)));
}

#[test]
fn split_square_diagonal() {
    let (mut m, [va, vb, vc, vd]) = square();
    let diagonal = m.edge_between(va, vc).unwrap();

    let res = m.split_edge(diagonal).unwrap();
    let vm = res.vertex;
    m.check_integrity();

    assert_eq!(m.num_vertices(), 5);
    assert_eq!(m.num_edges(), 8);
    assert_eq!(m.num_faces(), 4);

    // Both triangles are split in two, orientation is kept.
    assert_eq_set!(face_triples(&m), [
        normalized_triangle([va, vb, vm]),
        normalized_triangle([vb, vc, vm]),
        normalized_triangle([va, vm, vd]),
        normalized_triangle([vm, vc, vd]),
    ]);

    assert_eq!(m.edge_between(va, vc), None);
    assert_eq_set!(res.replacement_edges.iter().copied(), [
        m.edge_between(va, vm).unwrap(),
        m.edge_between(vm, vc).unwrap(),
    ]);
    assert_eq_set!(res.cross_edges.iter().copied(), [
        m.edge_between(vm, vb).unwrap(),
        m.edge_between(vm, vd).unwrap(),
    ]);

    assert_eq!(m.valence(vm), 4);
    assert!(!m.is_boundary_vertex(vm));
    for &v in &[va, vb, vc, vd] {
        assert!(m.is_boundary_vertex(v));
    }
}

#[test]
fn split_every_tetrahedron_edge() {
    let (mut m, vertices) = tetrahedron();
    let old_edges = m.edge_handles().collect::<Vec<_>>();

    for (i, &e) in old_edges.iter().enumerate() {
        let res = m.split_edge(e).unwrap();
        m.check_integrity();

        assert_eq!(m.valence(res.vertex), 4);
        assert_eq!(m.num_vertices(), 4 + i as hsize + 1);
        assert_eq!(m.num_edges(), 6 + 3 * (i as hsize + 1));
        assert_eq!(m.num_faces(), 4 + 2 * (i as hsize + 1));
        assert!(m.is_closed());
    }

    assert_eq!(m.num_vertices(), 10);
    assert_eq!(m.num_edges(), 24);
    assert_eq!(m.num_faces(), 16);

    // All edges between two original vertices were split. Cross edges of
    // later splits may end in original vertices, so their valence can grow
    // beyond 3.
    for &v in &vertices {
        assert!(m.valence(v) >= 3);
        for n in m.vertices_around_vertex(v) {
            assert!(!vertices.contains(&n));
        }
    }

    let valence_sum: hsize = m.vertex_handles().map(|v| m.valence(v)).sum();
    assert_eq!(valence_sum, 2 * m.num_edges());
}

#[test]
fn split_rejects_boundary_edge() {
    let (mut m, [_, vb, vc, _]) = square();
    let before = format!("{:?}", m);
    let e = m.edge_between(vb, vc).unwrap();

    assert_eq!(m.split_edge(e), Err(SurgeryError::BoundaryEdge(e)));
    assert_eq!(format!("{:?}", m), before);
    assert_eq!(m.num_vertices(), 4);
}

#[test]
fn split_rejects_unknown_edge() {
    let (mut m, _) = tetrahedron();
    let e = EdgeHandle::new(6);
    assert_eq!(m.split_edge(e), Err(SurgeryError::EdgeNotFound(e)));
    assert_eq!(m.num_vertices(), 4);
}

#[test]
#[should_panic(expected = "does not exist")]
fn invalid_handle_panics() {
    let (m, _) = square();
    m.valence(VertexHandle::new(10));
}
