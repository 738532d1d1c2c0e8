//! Cardinal (Hermite form) basis; Catmull-Rom is the `s = 0.5` member.
//!
//! With tangent scale `s` the segment tangents are `s * (end - control1)`
//! at the start and `s * (control2 - start)` at the end.

/// Tension at which the cardinal basis reduces to Catmull-Rom.
pub const CATMULL_ROM_TENSION: f64 = 0.5;

/// Weights for `[control1, start, end, control2]`.
pub(super) fn weights(t: f64, s: f64) -> [f64; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    [
        -s * t3 + 2.0 * s * t2 - s * t,
        (2.0 - s) * t3 + (s - 3.0) * t2 + 1.0,
        (s - 2.0) * t3 + (3.0 - 2.0 * s) * t2 + s * t,
        s * t3 - s * t2,
    ]
}

pub(super) fn derivative_weights(t: f64, s: f64) -> [f64; 4] {
    let t2 = t * t;
    [
        -3.0 * s * t2 + 4.0 * s * t - s,
        3.0 * (2.0 - s) * t2 + 2.0 * (s - 3.0) * t,
        3.0 * (s - 2.0) * t2 + 2.0 * (3.0 - 2.0 * s) * t + s,
        3.0 * s * t2 - 2.0 * s * t,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Catmull-Rom basis written out in its usual `0.5 * [...]` form.
    fn catmull_rom(t: f64) -> [f64; 4] {
        let t2 = t * t;
        let t3 = t2 * t;
        [
            0.5 * (-t3 + 2.0 * t2 - t),
            0.5 * (3.0 * t3 - 5.0 * t2 + 2.0),
            0.5 * (-3.0 * t3 + 4.0 * t2 + t),
            0.5 * (t3 - t2),
        ]
    }

    #[test]
    fn test_half_tension_is_catmull_rom() {
        for step in 0..=20 {
            let t = step as f64 / 20.0;
            let a = weights(t, CATMULL_ROM_TENSION);
            let b = catmull_rom(t);
            for k in 0..4 {
                approx::assert_abs_diff_eq!(a[k], b[k], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_partition_of_unity() {
        for s in [0.0, 0.25, 0.5, 1.0] {
            for step in 0..=10 {
                let t = step as f64 / 10.0;
                approx::assert_abs_diff_eq!(weights(t, s).iter().sum::<f64>(), 1.0, epsilon = 1e-12);
                approx::assert_abs_diff_eq!(derivative_weights(t, s).iter().sum::<f64>(), 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let h = 1e-6;
        for s in [0.2, 0.5, 0.8] {
            for t in [0.1, 0.4, 0.7] {
                let lo = weights(t - h, s);
                let hi = weights(t + h, s);
                let d = derivative_weights(t, s);
                for k in 0..4 {
                    approx::assert_abs_diff_eq!((hi[k] - lo[k]) / (2.0 * h), d[k], epsilon = 1e-6);
                }
            }
        }
    }

    #[test]
    fn test_interpolates_endpoints() {
        assert_eq!(weights(0.0, 0.7), [0.0, 1.0, 0.0, 0.0]);
        let end = weights(1.0, 0.7);
        approx::assert_abs_diff_eq!(end[2], 1.0, epsilon = 1e-12);
        approx::assert_abs_diff_eq!(end[0].abs() + end[1].abs() + end[3].abs(), 0.0, epsilon = 1e-12);
    }
}
