use coaster_core::traits::Validate;
use coaster_core::{CoasterError, Result, Tolerance};
use serde::{Deserialize, Serialize};

use crate::segment::{CurveType, CATMULL_ROM_TENSION};

/// Default arc-length samples taken per segment, including both ends.
pub const DEFAULT_SAMPLES_PER_SEGMENT: usize = 32;

/// Densest arc-length sampling accepted, per segment.
pub const MAX_SAMPLES_PER_SEGMENT: usize = 4096;

/// Curve-level parameters shared by every segment and the arc-length table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveSettings {
    pub curve_type: CurveType,
    /// Tangent scale of [`CurveType::Cardinal`] segments.
    pub tension: f64,
    pub samples_per_segment: usize,
    pub tolerance: Tolerance,
}

impl CurveSettings {
    pub fn new(curve_type: CurveType) -> Self {
        Self {
            curve_type,
            ..Self::default()
        }
    }

    pub fn with_tension(mut self, tension: f64) -> Self {
        self.tension = tension;
        self
    }

    pub fn with_samples_per_segment(mut self, samples: usize) -> Self {
        self.samples_per_segment = samples;
        self
    }
}

impl Default for CurveSettings {
    fn default() -> Self {
        Self {
            curve_type: CurveType::default(),
            tension: CATMULL_ROM_TENSION,
            samples_per_segment: DEFAULT_SAMPLES_PER_SEGMENT,
            tolerance: Tolerance::default(),
        }
    }
}

impl Validate for CurveSettings {
    fn validate(&self) -> Result<()> {
        if !self.tension.is_finite() {
            return Err(CoasterError::Settings(format!(
                "tension must be finite, got {}",
                self.tension
            )));
        }
        check_samples_per_segment(self.samples_per_segment)?;
        if !self.tolerance.is_valid() {
            return Err(CoasterError::Settings(format!(
                "tolerances must be positive and finite, got {:?}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// Samples per segment must lie in `2..=MAX_SAMPLES_PER_SEGMENT`.
pub(crate) fn check_samples_per_segment(samples: usize) -> Result<()> {
    if (2..=MAX_SAMPLES_PER_SEGMENT).contains(&samples) {
        Ok(())
    } else {
        Err(CoasterError::Settings(format!(
            "samples_per_segment must be in 2..={}, got {}",
            MAX_SAMPLES_PER_SEGMENT, samples
        )))
    }
}
