use std::{
    collections::BTreeSet,
    fmt::Debug,
};

use crate::{
    VertexHandle,
    ds::HalfEdgeMesh,
};


/// Takes an iterator and a list of elements. Collects both into sets and
/// compares those sets for equality via `assert_eq`.
macro_rules! assert_eq_set {
    ($iter:expr, [$($item:expr),* $(,)*] $(,)?) => {
        crate::test_utils::assert_eq_set_fn(
            $iter,
            &[$($item),*],
            stringify!($iter),
            stringify!([$($item),*]),
        );
    }
}

/// Internal helper function for `assert_eq_set`.
pub(crate) fn assert_eq_set_fn<I, T>(actual: I, expected: &[T], left_str: &str, right_str: &str)
where
    I: IntoIterator<Item = T>,
    T: Debug + Clone + Eq + Ord,
{
    let actual = actual.into_iter().collect::<BTreeSet<_>>();
    let expected = expected.iter().cloned().collect::<BTreeSet<_>>();
    if actual != expected {
        panic!(
            "assert_eq_set({}, {}) failed:\n  left: {:?}\n right: {:?} ",
            left_str,
            right_str,
            actual,
            expected,
        );
    }
}

/// Rotates the triangle such that the smallest handle comes first. The
/// orientation is kept, so `[c, a, b]` and `[a, b, c]` are equal afterwards,
/// but `[a, c, b]` is not.
pub(crate) fn normalized_triangle([a, b, c]: [VertexHandle; 3]) -> [VertexHandle; 3] {
    if a < b && a < c {
        [a, b, c]
    } else if b < c {
        [b, c, a]
    } else {
        [c, a, b]
    }
}

/// Returns all faces of the mesh as oriented vertex triples (see
/// `normalized_triangle`). Two meshes with the same triples have the same
/// faces, independent of face handles and starting corners.
pub(crate) fn face_triples(mesh: &HalfEdgeMesh) -> BTreeSet<[VertexHandle; 3]> {
    mesh.face_handles()
        .map(|f| normalized_triangle(mesh.vertices_around_triangle(f)))
        .collect()
}
