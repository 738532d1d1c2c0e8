//! Polyline sampling of a track for drawing collaborators.

use coaster_math::Point3;

use crate::curve::Curve;
use crate::segment::CurveSegment;

/// Sample every segment uniformly in its local parameter.
///
/// The returned polyline is closed: its last point repeats the first.
/// Empty when the curve has no segments.
pub fn curve_to_polyline(curve: &Curve, steps_per_segment: usize) -> Vec<Point3> {
    let steps = steps_per_segment.max(1);
    let tension = curve.tension();
    let segments = curve.segments();
    let Some(first) = segments.first() else {
        return Vec::new();
    };

    let mut points = Vec::with_capacity(segments.len() * steps + 1);
    for segment in segments {
        points.push(segment.seam_start(tension));
        for j in 1..steps {
            points.push(segment.position(j as f64 / steps as f64, tension));
        }
    }
    points.push(first.seam_start(tension));
    points
}

/// Maximum recursion depth for adaptive subdivision.
const MAX_DEPTH: u32 = 12;

/// Minimum depth, so symmetric bends whose midpoint lies on the chord still split.
const MIN_DEPTH: u32 = 2;

/// Convert the track to a closed polyline using adaptive subdivision.
///
/// Each segment is recursively split while the midpoint deviates from the
/// chord by more than `tolerance`.
pub fn curve_to_adaptive_polyline(curve: &Curve, tolerance: f64) -> Vec<Point3> {
    let tension = curve.tension();
    let segments = curve.segments();
    let Some(first) = segments.first() else {
        return Vec::new();
    };

    let mut points = vec![first.seam_start(tension)];
    for segment in segments {
        subdivide_segment(segment, tension, 0.0, 1.0, tolerance, &mut points, 0);
    }
    points
}

fn subdivide_segment(
    segment: &CurveSegment,
    tension: f64,
    t0: f64,
    t1: f64,
    tolerance: f64,
    points: &mut Vec<Point3>,
    depth: u32,
) {
    let end = || {
        if t1 >= 1.0 {
            segment.seam_end(tension)
        } else {
            segment.position(t1, tension)
        }
    };
    if depth >= MAX_DEPTH {
        points.push(end());
        return;
    }

    let t_mid = (t0 + t1) * 0.5;
    let p0 = segment.position(t0, tension);
    let p1 = segment.position(t1, tension);
    let p_mid = segment.position(t_mid, tension);

    let chord_mid = (p0 + p1) * 0.5;
    let deviation = (p_mid - chord_mid).length();

    if depth < MIN_DEPTH || deviation > tolerance {
        subdivide_segment(segment, tension, t0, t_mid, tolerance, points, depth + 1);
        subdivide_segment(segment, tension, t_mid, t1, tolerance, points, depth + 1);
    } else {
        points.push(end());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control_point::ControlPoint;
    use crate::segment::CurveType;
    use glam::dvec3;

    fn ring(kind: CurveType) -> Curve {
        Curve::from_points(
            kind,
            (0..6)
                .map(|i| {
                    let a = i as f64 * std::f64::consts::TAU / 6.0;
                    ControlPoint::at(dvec3(10.0 * a.cos(), 0.0, 10.0 * a.sin()))
                })
                .collect(),
        )
    }

    #[test]
    fn test_uniform_polyline_counts() {
        let curve = ring(CurveType::CatmullRom);
        let points = curve_to_polyline(&curve, 8);
        assert_eq!(points.len(), 6 * 8 + 1);
        assert_eq!(points.first(), points.last());
        assert!((points[8] - curve.points()[1].position).length() < 1e-12);
    }

    #[test]
    fn test_empty_curve() {
        let curve = Curve::new(CurveType::BSpline);
        assert!(curve_to_polyline(&curve, 8).is_empty());
        assert!(curve_to_adaptive_polyline(&curve, 0.01).is_empty());
    }

    #[test]
    fn test_adaptive_polyline_lines() {
        let curve = ring(CurveType::Line);
        let points = curve_to_adaptive_polyline(&curve, 0.01);
        // Straight segments stop at the minimum depth.
        assert_eq!(points.len(), 6 * 4 + 1);
        assert_eq!(points.first(), points.last());
    }

    #[test]
    fn test_adaptive_polyline_stays_near_curve() {
        let curve = ring(CurveType::CatmullRom);
        let points = curve_to_adaptive_polyline(&curve, 0.01);
        assert!(points.len() > 6 * 4 + 1);
        for p in &points {
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!((r - 10.0).abs() < 0.5, "point off ring: r={}", r);
        }
    }
}
