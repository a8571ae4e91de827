//! Mesh data structures.
//!
//! Currently, this crate contains exactly one data structure: the
//! [`HalfEdgeMesh`]. It only stores connectivity. Positions and all other
//! per-element data are stored in [prop maps][crate::map] outside of it.

mod checked;
pub mod half_edge;

pub(crate) use self::checked::Checked;
pub use self::half_edge::{BuildError, HalfEdgeMesh, SplitEdgeResult, SurgeryError};
