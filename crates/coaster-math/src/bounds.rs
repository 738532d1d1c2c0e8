use crate::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounds of a set of track points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds3 {
    pub min: Point3,
    pub max: Point3,
}

impl Bounds3 {
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::new(first, first), |b, p| Self {
            min: b.min.min(p),
            max: b.max.max(p),
        }))
    }

    pub fn center(&self) -> Point3 {
        (self.min + self.max) * 0.5
    }

    pub fn extents(&self) -> Vector3 {
        self.max - self.min
    }

    /// Radius of the sphere through the box corners, used to frame an overhead view.
    pub fn radius(&self) -> f64 {
        self.extents().length() * 0.5
    }

    /// Inclusive containment test, widened by `slack` on every side.
    pub fn contains_point(&self, p: Point3, slack: f64) -> bool {
        let lo = self.min - Vector3::splat(slack);
        let hi = self.max + Vector3::splat(slack);
        p.cmpge(lo).all() && p.cmple(hi).all()
    }

    pub fn expand(&self, amount: f64) -> Self {
        let offset = Vector3::splat(amount);
        Self {
            min: self.min - offset,
            max: self.max + offset,
        }
    }
}
