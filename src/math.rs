//! Float helpers that work with and without `std`.
//!
//! `core` provides `f64` arithmetic but not the rounding intrinsics, so the
//! no_std build routes through `libm`.

#[cfg(feature = "std")]
#[inline]
pub(crate) fn trunc(x: f64) -> f64 {
    x.trunc()
}

#[cfg(not(feature = "std"))]
#[inline]
pub(crate) fn trunc(x: f64) -> f64 {
    libm::trunc(x)
}

#[cfg(feature = "std")]
#[inline]
pub(crate) fn floor(x: f64) -> f64 {
    x.floor()
}

#[cfg(not(feature = "std"))]
#[inline]
pub(crate) fn floor(x: f64) -> f64 {
    libm::floor(x)
}

#[cfg(feature = "std")]
#[inline]
pub(crate) fn fabs(x: f64) -> f64 {
    x.abs()
}

#[cfg(not(feature = "std"))]
#[inline]
pub(crate) fn fabs(x: f64) -> f64 {
    libm::fabs(x)
}
