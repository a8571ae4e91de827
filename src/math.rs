//! Abstractions over numerical types.

use std::fmt::Debug;

use cgmath::BaseFloat;

use crate::handle::hsize;


/// Primitive floating point types (`f32` and `f64`) that can be used as
/// scalar type of positions and normals.
///
/// This trait is automatically implemented for all types that satisfy the
/// super-trait constraints.
pub trait PrimitiveFloat: 'static + BaseFloat + Debug + From<f32> {}

impl<T> PrimitiveFloat for T
where
    T: 'static + BaseFloat + Debug + From<f32>,
{}

/// Converts a float literal to `S`. All literals used in this crate are
/// exactly representable as `f32`, so this never loses precision.
#[inline(always)]
pub(crate) fn lit<S: PrimitiveFloat>(x: f32) -> S {
    <S as From<f32>>::from(x)
}

/// Converts an element count (like a vertex valence) to `S`, rounding to the
/// nearest representable value if necessary.
#[inline(always)]
pub(crate) fn from_count<S: PrimitiveFloat>(count: hsize) -> S {
    // Integer to float casts only fail for values beyond the float's range,
    // which no `hsize` reaches.
    num_traits::cast::<hsize, S>(count).unwrap_or_else(S::infinity)
}
