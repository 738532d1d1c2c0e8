//! Straight line segments.

use coaster_math::vector::lerp;
use coaster_math::{Point3, Vector3};

pub(super) fn position(start: Point3, end: Point3, t: f64) -> Point3 {
    lerp(t, start, end)
}

/// Constant along the whole segment.
pub(super) fn direction(start: Point3, end: Point3) -> Vector3 {
    end - start
}
