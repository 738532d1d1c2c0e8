//! Uniform cubic B-spline basis.

const SIXTH: f64 = 1.0 / 6.0;

/// Weights for `[control1, start, end, control2]`.
pub(super) fn weights(t: f64) -> [f64; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    [
        SIXTH * (-t3 + 3.0 * t2 - 3.0 * t + 1.0),
        SIXTH * (3.0 * t3 - 6.0 * t2 + 4.0),
        SIXTH * (-3.0 * t3 + 3.0 * t2 + 3.0 * t + 1.0),
        SIXTH * t3,
    ]
}

pub(super) fn derivative_weights(t: f64) -> [f64; 4] {
    let t2 = t * t;
    [
        SIXTH * (-3.0 * t2 + 6.0 * t - 3.0),
        SIXTH * (9.0 * t2 - 12.0 * t),
        SIXTH * (-9.0 * t2 + 6.0 * t + 3.0),
        SIXTH * 3.0 * t2,
    ]
}
