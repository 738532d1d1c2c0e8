// Integration tests for curve evaluation, editing, and arc-length lookups

use coaster_core::traits::{BoundingBox, Validate};
use coaster_core::CoasterError;
use coaster_curve::{ControlPoint, Curve, CurveType, ParameterMode, TrackAnimator};
use coaster_math::{DVec3, Point3};

const EPSILON: f64 = 1e-9;

fn square(kind: CurveType, radius: f64) -> Curve {
    Curve::from_points(
        kind,
        vec![
            ControlPoint::at(DVec3::new(radius, 0.0, 0.0)),
            ControlPoint::at(DVec3::new(0.0, 0.0, radius)),
            ControlPoint::at(DVec3::new(-radius, 0.0, 0.0)),
            ControlPoint::at(DVec3::new(0.0, 0.0, -radius)),
        ],
    )
}

fn wobbly(kind: CurveType) -> Curve {
    Curve::from_points(
        kind,
        vec![
            ControlPoint::new(DVec3::new(40.0, 2.0, 0.0), DVec3::new(0.0, 1.0, 0.0)),
            ControlPoint::new(DVec3::new(35.0, 12.0, 25.0), DVec3::new(0.3, 1.0, 0.0)),
            ControlPoint::new(DVec3::new(0.0, 5.0, 30.0), DVec3::new(0.0, 1.0, 0.2)),
            ControlPoint::new(DVec3::new(-10.0, 5.0, 31.0), DVec3::new(0.0, 1.0, 0.0)),
            ControlPoint::new(DVec3::new(-45.0, 0.0, -5.0), DVec3::new(-0.5, 1.0, 0.0)),
            ControlPoint::new(DVec3::new(0.0, 20.0, -40.0), DVec3::new(0.0, 1.0, 0.0)),
        ],
    )
}

fn all_types() -> [CurveType; 4] {
    CurveType::ALL
}

#[test]
fn integration_wrap_invariant() {
    for kind in all_types() {
        let curve = wobbly(kind);
        let n = curve.num_segments() as f64;
        for step in 0..24 {
            let t = step as f64 * 0.25;
            let base = curve.position(t).unwrap();
            let lapped = curve.position_wrapped(t + n).unwrap();
            let twice = curve.position_wrapped(t + 2.0 * n).unwrap();
            assert!((base - lapped).length() < 1e-7, "{kind} t={t}");
            assert!((base - twice).length() < 1e-7, "{kind} t={t}");
        }
    }
}

#[test]
fn integration_endpoint_continuity() {
    for kind in [CurveType::CatmullRom, CurveType::Cardinal, CurveType::BSpline] {
        let curve = wobbly(kind);
        let n = curve.num_segments();
        for i in 0..n {
            let end = curve.segment(i).unwrap().position(1.0, curve.tension());
            let start = curve.segment((i + 1) % n).unwrap().position(0.0, curve.tension());
            assert!((end - start).length() < EPSILON, "{kind} seam {i}");
        }
    }
}

#[test]
fn integration_table_is_monotone() {
    for kind in all_types() {
        let curve = wobbly(kind);
        let table = curve.arc_length_table();
        table.validate().unwrap();
        let entries = table.entries();
        assert_eq!(entries.len(), 1 + curve.num_segments() * (table.samples_per_segment() - 1));
        assert_eq!(entries[0].fraction, 0.0);
        assert!((entries[entries.len() - 1].fraction - 1.0).abs() < EPSILON);
        for pair in entries.windows(2) {
            assert!(pair[1].accumulated_length >= pair[0].accumulated_length);
            assert!(pair[1].fraction >= pair[0].fraction);
        }
    }
}

#[test]
fn integration_reparameterization_round_trip() {
    for kind in all_types() {
        let curve = wobbly(kind);
        for step in 0..=50 {
            let big_t = step as f64 / 50.0;
            let lookup = curve.map_fraction_to_local_t(big_t).unwrap();
            assert!(lookup.segment < curve.num_segments());
            assert!((0.0..=1.0).contains(&lookup.local_t));
            let back = curve
                .arc_length_table()
                .fraction_at(lookup.segment, lookup.local_t, curve.tolerance())
                .unwrap();
            assert!((back - big_t).abs() < 1e-6, "{kind}: {big_t} -> {back}");
        }
    }
}

#[test]
fn integration_arc_length_spacing_is_even() {
    let curve = square(CurveType::CatmullRom, 30.0);
    let total = curve.arc_length_table().total_length();
    let samples = 40;
    let positions: Vec<Point3> = (0..samples)
        .map(|i| curve.position_at_fraction(i as f64 / samples as f64).unwrap())
        .collect();
    let expected = total / samples as f64;
    for pair in positions.windows(2) {
        let gap = (pair[1] - pair[0]).length();
        assert!((gap - expected).abs() < expected * 0.02, "gap {gap} vs {expected}");
    }
}

#[test]
fn integration_minimum_point_deletion_guard() {
    let mut curve = square(CurveType::CatmullRom, 30.0);
    assert!(!curve.can_delete_point());
    curve.delete_control_point(3).unwrap();
    curve.regenerate_segments();
    assert_eq!(curve.num_control_points(), 3);
    assert_eq!(curve.num_segments(), 0);
    assert!(curve.arc_length_table().is_empty());
    assert!(matches!(curve.position(0.0), Err(CoasterError::NoSuchPoint(_))));
    curve.validate().unwrap();

    // Lines keep working down to two points.
    curve.set_curve_type(CurveType::Line);
    assert_eq!(curve.num_segments(), 3);
    curve.delete_control_point(0).unwrap();
    assert_eq!(curve.num_segments(), 2);
    assert!(curve.position(1.5).is_ok());
}

#[test]
fn integration_square_scenario() {
    for kind in [CurveType::CatmullRom, CurveType::Cardinal] {
        let curve = square(kind, 30.0);
        let first = curve.point(0).unwrap().position;
        assert_eq!(curve.position(0.0).unwrap(), first);

        let mid = curve.position(0.5).unwrap();
        let hull = curve.bounding_box().unwrap();
        assert!(hull.contains_point(mid, 0.0));
        // Catmull-Rom bulges past the polygon edges, but never past the box.
        assert!(mid.x.abs() < 30.0 && mid.z.abs() < 30.0);
        for p in curve.points() {
            assert!((p.position - mid).length() > 1.0);
        }

        for step in 0..40 {
            let t = step as f64 * 0.1;
            assert!(curve.direction(t).unwrap().length() > EPSILON, "{kind} t={t}");
        }
    }
}

#[test]
fn integration_insertion_reindexing() {
    let mut curve = wobbly(CurveType::CatmullRom);
    let mut anim = TrackAnimator::default();
    anim.set_parameter(&curve, 4.4).unwrap();
    let before = curve.position(anim.parameter()).unwrap();

    // Far from segment 4's neighbourhood (points 3..=5 and 0 are untouched).
    let inserted = ControlPoint::at(DVec3::new(38.0, 8.0, 14.0));
    curve.insert_control_point(inserted, 1).unwrap();
    anim.adjust_for_insertion(&curve, 1);

    assert!((anim.parameter() - 5.4).abs() < EPSILON);
    let after = curve.position(anim.parameter()).unwrap();
    assert!((after - before).length() < EPSILON, "{before} vs {after}");
}

#[test]
fn integration_insertion_after_parameter_leaves_it() {
    let mut curve = square(CurveType::Line, 30.0);
    let mut anim = TrackAnimator::default();
    anim.set_parameter(&curve, 0.5).unwrap();
    let before = curve.position(anim.parameter()).unwrap();

    curve
        .insert_control_point(ControlPoint::at(DVec3::new(-20.0, 0.0, -20.0)), 3)
        .unwrap();
    anim.adjust_for_insertion(&curve, 3);

    assert!((anim.parameter() - 0.5).abs() < EPSILON);
    assert!((curve.position(anim.parameter()).unwrap() - before).length() < EPSILON);
}

#[test]
fn integration_arc_length_animation_survives_edits() {
    let mut curve = wobbly(CurveType::BSpline);
    let mut anim = TrackAnimator::new(10.0, ParameterMode::ArcLength);
    for _ in 0..20 {
        anim.advance(&curve, std::time::Duration::from_millis(100)).unwrap();
    }
    let t = anim.parameter();
    curve
        .insert_control_point(ControlPoint::at(DVec3::new(45.0, 0.0, -20.0)), 0)
        .unwrap();
    anim.adjust_for_insertion(&curve, 0);
    assert!((anim.parameter() - (t + 1.0)).abs() < EPSILON);
    let frame = anim.current_frame(&curve).unwrap();
    assert!((frame.forward.length() - 1.0).abs() < 1e-9);
}
