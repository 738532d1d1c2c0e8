/// Numeric tolerances for curve evaluation and table lookups.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Linear tolerance for lengths and vector comparisons (in track units)
    pub linear: f64,
    /// Tolerance on normalized parameters such as arc-length fractions
    pub parameter: f64,
}

impl Tolerance {
    pub const DEFAULT_LINEAR: f64 = 1e-9;
    pub const DEFAULT_PARAMETER: f64 = 1e-7;

    pub fn new(linear: f64, parameter: f64) -> Self {
        Self { linear, parameter }
    }

    pub fn default_precision() -> Self {
        Self {
            linear: Self::DEFAULT_LINEAR,
            parameter: Self::DEFAULT_PARAMETER,
        }
    }

    pub fn loose() -> Self {
        Self {
            linear: 1e-5,
            parameter: 1e-5,
        }
    }

    /// Check if two lengths are equal within linear tolerance
    pub fn linear_eq(self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.linear
    }

    /// Check if a length is zero within linear tolerance
    pub fn is_zero(self, v: f64) -> bool {
        v.abs() < self.linear
    }

    /// Check if two normalized parameters are equal within parameter tolerance
    pub fn parameter_eq(self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.parameter
    }

    pub fn is_valid(self) -> bool {
        self.linear.is_finite() && self.linear > 0.0 && self.parameter.is_finite() && self.parameter > 0.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_eq() {
        let tol = Tolerance::default();
        assert!(tol.parameter_eq(1.0, 1.0 + 1e-9));
        assert!(!tol.parameter_eq(1.0, 1.0 + 1e-5));
    }

    #[test]
    fn test_is_zero() {
        let tol = Tolerance::default();
        assert!(tol.is_zero(1e-12));
        assert!(!tol.is_zero(1e-3));
    }

    #[test]
    fn test_validity() {
        assert!(Tolerance::default().is_valid());
        assert!(!Tolerance::new(0.0, 1e-7).is_valid());
        assert!(!Tolerance::new(1e-9, f64::NAN).is_valid());
    }
}
