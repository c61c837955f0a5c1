//! Mathematical utilities and type definitions.
//!
//! This module provides fundamental types used throughout the workspace
//! and the handful of geometry helpers the calibration and analysis stages
//! build on.

use nalgebra::{Point3, Vector3};

/// Scalar type used throughout the workspace (currently `f64`).
pub type Real = f64;

/// 3D vector with [`Real`] components.
pub type Vec3 = Vector3<Real>;
/// 3D point with [`Real`] coordinates.
pub type Pt3 = Point3<Real>;

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: &Pt3, b: &Pt3) -> Real {
    (b - a).norm()
}

/// Linear interpolation `a + t * (b - a)`, componentwise.
///
/// `t` is not clamped; callers restrict it to `[0, 1]` where needed.
#[inline]
pub fn lerp(a: &Pt3, b: &Pt3, t: Real) -> Pt3 {
    a + (b - a) * t
}

/// Clamp a scalar to `[0, 1]`. NaN maps to `0`.
#[inline]
pub fn clamp01(v: Real) -> Real {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Weighted centroid of `points`.
///
/// Points and weights are paired positionally; negative weights are treated
/// as zero. Returns `None` when the total weight is not positive.
pub fn weighted_centroid<'a, I>(pairs: I) -> Option<Pt3>
where
    I: IntoIterator<Item = (&'a Pt3, Real)>,
{
    let mut acc = Vec3::zeros();
    let mut total = 0.0;
    for (p, w) in pairs {
        let w = w.max(0.0);
        acc += p.coords * w;
        total += w;
    }
    if total > 0.0 {
        Some(Pt3::from(acc / total))
    } else {
        None
    }
}
