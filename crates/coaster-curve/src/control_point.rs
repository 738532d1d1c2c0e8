//! Oriented control points placed by the track editor.

use coaster_core::Tolerance;
use coaster_math::vector::{approx_eq, try_normalize};
use coaster_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A track anchor: a position plus the local "up" used for banking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub position: Point3,
    /// Conventionally unit length; see [`ControlPoint::new`].
    pub orientation: Vector3,
}

impl ControlPoint {
    pub const DEFAULT_ORIENTATION: Vector3 = Vector3::Y;

    /// Create a control point, normalizing `orientation`.
    ///
    /// A degenerate orientation falls back to [`Self::DEFAULT_ORIENTATION`].
    pub fn new(position: Point3, orientation: Vector3) -> Self {
        Self {
            position,
            orientation: normalize_orientation(orientation),
        }
    }

    /// Control point with the default upright orientation.
    pub fn at(position: Point3) -> Self {
        Self {
            position,
            orientation: Self::DEFAULT_ORIENTATION,
        }
    }

    pub fn with_position(self, position: Point3) -> Self {
        Self { position, ..self }
    }

    pub fn with_orientation(self, orientation: Vector3) -> Self {
        Self::new(self.position, orientation)
    }

    pub fn approx_eq(&self, other: &Self, tol: Tolerance) -> bool {
        approx_eq(self.position, other.position, tol)
            && approx_eq(self.orientation, other.orientation, tol)
    }
}

impl Default for ControlPoint {
    fn default() -> Self {
        Self::at(Point3::ZERO)
    }
}

pub(crate) fn normalize_orientation(orientation: Vector3) -> Vector3 {
    try_normalize(orientation, Tolerance::default()).unwrap_or(ControlPoint::DEFAULT_ORIENTATION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec3;

    #[test]
    fn test_orientation_normalized() {
        let p = ControlPoint::new(dvec3(1.0, 2.0, 3.0), dvec3(0.0, 4.0, 3.0));
        assert!((p.orientation.length() - 1.0).abs() < 1e-12);
        assert!((p.orientation - dvec3(0.0, 0.8, 0.6)).length() < 1e-12);
    }

    #[test]
    fn test_degenerate_orientation_defaults_up() {
        let p = ControlPoint::new(Point3::ZERO, Vector3::ZERO);
        assert_eq!(p.orientation, Vector3::Y);
    }

    #[test]
    fn test_with_orientation_renormalizes() {
        let p = ControlPoint::at(dvec3(5.0, 0.0, 0.0)).with_orientation(dvec3(2.0, 0.0, 0.0));
        assert_eq!(p.position, dvec3(5.0, 0.0, 0.0));
        assert!((p.orientation - Vector3::X).length() < 1e-12);
    }
}
