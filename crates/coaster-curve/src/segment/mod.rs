//! Interpolated spans between cyclically adjacent control points.

mod bspline;
mod cardinal;
mod line;

use std::fmt;

use coaster_math::vector::lerp;
use coaster_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::control_point::ControlPoint;

pub use cardinal::CATMULL_ROM_TENSION;

/// Interpolation family used for every segment of a curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveType {
    /// Straight lines between consecutive points.
    Line,
    /// Cardinal spline with tension fixed at 0.5; passes through every point.
    #[default]
    CatmullRom,
    /// Cardinal (Hermite) spline with the curve-level tension.
    Cardinal,
    /// Uniform cubic B-spline; smooth but does not pass through the points.
    BSpline,
}

impl CurveType {
    pub const ALL: [CurveType; 4] = [
        CurveType::Line,
        CurveType::CatmullRom,
        CurveType::Cardinal,
        CurveType::BSpline,
    ];

    /// Cycle to the next curve type.
    pub fn next(self) -> Self {
        match self {
            Self::Line => Self::CatmullRom,
            Self::CatmullRom => Self::Cardinal,
            Self::Cardinal => Self::BSpline,
            Self::BSpline => Self::Line,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Line => "Lines",
            Self::CatmullRom => "Catmull-Rom",
            Self::Cardinal => "Cardinal",
            Self::BSpline => "B-Spline",
        }
    }

    /// Fewest control points for which segments are generated.
    pub fn min_points(&self) -> usize {
        match self {
            Self::Line => 2,
            Self::CatmullRom | Self::Cardinal | Self::BSpline => 4,
        }
    }

    /// Whether segment endpoints coincide with their control points.
    pub fn interpolates_control_points(&self) -> bool {
        !matches!(self, Self::BSpline)
    }
}

impl fmt::Display for CurveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One span of the track, from `start` to `end`.
///
/// `control1` and `control2` are the cyclic neighbours before `start` and
/// after `end`; line segments ignore them. Curve-level parameters such as
/// tension are passed into each evaluation instead of being stored here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveSegment {
    pub index: usize,
    pub kind: CurveType,
    pub start: ControlPoint,
    pub end: ControlPoint,
    pub control1: ControlPoint,
    pub control2: ControlPoint,
}

impl CurveSegment {
    pub fn new(
        index: usize,
        kind: CurveType,
        start: ControlPoint,
        end: ControlPoint,
        control1: ControlPoint,
        control2: ControlPoint,
    ) -> Self {
        Self {
            index,
            kind,
            start,
            end,
            control1,
            control2,
        }
    }

    /// Position at local parameter `t` in `[0, 1]`.
    pub fn position(&self, t: f64, tension: f64) -> Point3 {
        match self.kind {
            CurveType::Line => line::position(self.start.position, self.end.position, t),
            CurveType::CatmullRom => {
                self.weighted(cardinal::weights(t, CATMULL_ROM_TENSION))
            }
            CurveType::Cardinal => self.weighted(cardinal::weights(t, tension)),
            CurveType::BSpline => self.weighted(bspline::weights(t)),
        }
    }

    /// Unnormalized tangent at local parameter `t`.
    ///
    /// Zero when the spanned points coincide; callers normalize.
    pub fn direction(&self, t: f64, tension: f64) -> Vector3 {
        match self.kind {
            CurveType::Line => line::direction(self.start.position, self.end.position),
            CurveType::CatmullRom => {
                self.weighted(cardinal::derivative_weights(t, CATMULL_ROM_TENSION))
            }
            CurveType::Cardinal => self.weighted(cardinal::derivative_weights(t, tension)),
            CurveType::BSpline => self.weighted(bspline::derivative_weights(t)),
        }
    }

    /// Endpoint orientations blended from `start` (t = 0) to `end` (t = 1).
    ///
    /// Not renormalized.
    pub fn orientation(&self, t: f64) -> Vector3 {
        lerp(t, self.start.orientation, self.end.orientation)
    }

    /// Where the segment begins, exactly.
    pub fn seam_start(&self, tension: f64) -> Point3 {
        if self.kind.interpolates_control_points() {
            self.start.position
        } else {
            self.position(0.0, tension)
        }
    }

    /// Where the segment ends, exactly.
    pub fn seam_end(&self, tension: f64) -> Point3 {
        if self.kind.interpolates_control_points() {
            self.end.position
        } else {
            self.position(1.0, tension)
        }
    }

    /// Basis weights are ordered `[control1, start, end, control2]`.
    fn weighted(&self, w: [f64; 4]) -> Vector3 {
        self.control1.position * w[0]
            + self.start.position * w[1]
            + self.end.position * w[2]
            + self.control2.position * w[3]
    }
}

/// Build the closed segment list for `points`.
///
/// Segment `i` spans point `i` to point `(i + 1) mod n` with neighbours
/// `(i - 1) mod n` and `(i + 2) mod n`. Returns an empty list below the
/// type's minimum point count.
pub fn build_segments(kind: CurveType, points: &[ControlPoint]) -> Vec<CurveSegment> {
    let n = points.len();
    if n < kind.min_points() {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            CurveSegment::new(
                i,
                kind,
                points[i],
                points[(i + 1) % n],
                points[(i + n - 1) % n],
                points[(i + 2) % n],
            )
        })
        .collect()
}
