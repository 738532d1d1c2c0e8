use coaster_core::Tolerance;
use serde::{Deserialize, Serialize};

use crate::vector::try_normalize;
use crate::{DMat4, Point3, Vector3};

/// Rigid orthonormal basis placed at a point on the track.
///
/// Local axes: X = `right`, Y = `up`, Z = `forward`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub origin: Point3,
    pub forward: Vector3,
    pub right: Vector3,
    pub up: Vector3,
}

impl Frame {
    /// Build a frame looking along `tangent` with `up_hint` as the preferred up.
    ///
    /// When the hint is parallel to the tangent, world Y and then world X are
    /// tried instead. Returns `None` only when `tangent` is degenerate.
    pub fn from_tangent(
        origin: Point3,
        tangent: Vector3,
        up_hint: Vector3,
        tol: Tolerance,
    ) -> Option<Self> {
        let forward = try_normalize(tangent, tol)?;
        let right = [up_hint, Vector3::Y, Vector3::X]
            .into_iter()
            .find_map(|hint| try_normalize(forward.cross(hint), tol))?;
        let up = right.cross(forward);
        Some(Self {
            origin,
            forward,
            right,
            up,
        })
    }

    pub fn to_mat4(&self) -> DMat4 {
        DMat4::from_cols(
            self.right.extend(0.0),
            self.up.extend(0.0),
            self.forward.extend(0.0),
            self.origin.extend(1.0),
        )
    }

    /// Map a point given in frame-local coordinates to world space.
    pub fn transform_point(&self, local: Point3) -> Point3 {
        self.origin + self.right * local.x + self.up * local.y + self.forward * local.z
    }

    /// Offset the frame along its own up axis, e.g. to seat a car on the rails.
    pub fn raised(&self, height: f64) -> Self {
        Self {
            origin: self.origin + self.up * height,
            ..*self
        }
    }
}
