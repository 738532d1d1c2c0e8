//! Small vector helpers shared by segment evaluation and framing.
//!
//! Comparisons here are always tolerance based; exact float equality is
//! never used to detect degenerate vectors.

use coaster_core::Tolerance;

use crate::Vector3;

/// Linear interpolation, exact at both ends: `t = 0` yields `start`, `t = 1` yields `end`.
pub fn lerp(t: f64, start: Vector3, end: Vector3) -> Vector3 {
    start * (1.0 - t) + end * t
}

/// Normalize `v`, or `None` when its length is within linear tolerance of zero.
pub fn try_normalize(v: Vector3, tol: Tolerance) -> Option<Vector3> {
    let len = v.length();
    if !len.is_finite() || tol.is_zero(len) {
        None
    } else {
        Some(v / len)
    }
}

pub fn is_zero(v: Vector3, tol: Tolerance) -> bool {
    tol.is_zero(v.length())
}

/// Whether two vectors are equal within linear tolerance (euclidean distance).
pub fn approx_eq(a: Vector3, b: Vector3, tol: Tolerance) -> bool {
    tol.is_zero((a - b).length())
}
