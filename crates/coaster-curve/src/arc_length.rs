//! Arc-length reparameterization of a closed track.
//!
//! Equal steps of the global parameter `segment + t` do not cover equal
//! distances, most visibly on tight corners. The table samples every
//! segment, accumulates chord lengths, and normalizes them to a fraction of
//! the whole loop so animation can advance at roughly constant speed.

use coaster_core::traits::Validate;
use coaster_core::{CoasterError, Result, Tolerance};
use serde::{Deserialize, Serialize};

use crate::curve::Curve;
use crate::segment::CurveSegment;
use crate::settings::{check_samples_per_segment, MAX_SAMPLES_PER_SEGMENT};

/// One sample of the table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableEntry {
    pub segment: usize,
    pub local_t: f64,
    pub accumulated_length: f64,
    pub fraction: f64,
}

/// A segment and local parameter resolved from an arc-length fraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableLookup {
    pub segment: usize,
    pub local_t: f64,
}

impl TableLookup {
    /// The global parameter `segment + local_t`.
    ///
    /// A lookup at fraction 1 yields the segment count itself; wrap it with
    /// [`Curve::wrap_parameter`] before evaluating globally.
    pub fn global_t(&self) -> f64 {
        self.segment as f64 + self.local_t
    }
}

/// Monotone sampled map between `(segment, t)` and fraction of total length.
///
/// Holds `1 + segments * (samples_per_segment - 1)` entries once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArcLengthTable {
    entries: Vec<TableEntry>,
    samples_per_segment: usize,
}

impl ArcLengthTable {
    /// Build a table for the current segments of `curve`.
    pub fn build(curve: &Curve, samples_per_segment: usize) -> Result<Self> {
        check_samples_per_segment(samples_per_segment)?;
        Ok(Self::from_segments(
            curve.segments(),
            curve.tension(),
            samples_per_segment,
            curve.tolerance(),
        ))
    }

    /// Sample `segments` in order.
    ///
    /// Segment seams use the exact seam position rather than a curve
    /// evaluation, so consecutive segments share one sample.
    pub(crate) fn from_segments(
        segments: &[CurveSegment],
        tension: f64,
        samples_per_segment: usize,
        tol: Tolerance,
    ) -> Self {
        let Some(first) = segments.first() else {
            return Self::default();
        };
        let samples = samples_per_segment.clamp(2, MAX_SAMPLES_PER_SEGMENT);
        let last = samples - 1;

        let capacity = segments
            .len()
            .checked_mul(last)
            .and_then(|n| n.checked_add(1))
            .unwrap_or(0);
        let mut entries = Vec::with_capacity(capacity);
        entries.push(TableEntry {
            segment: 0,
            local_t: 0.0,
            accumulated_length: 0.0,
            fraction: 0.0,
        });

        let mut previous = first.seam_start(tension);
        let mut accumulated = 0.0;
        for (index, segment) in segments.iter().enumerate() {
            for j in 1..samples {
                let local_t = j as f64 / last as f64;
                let sample = if j == last {
                    segment.seam_end(tension)
                } else {
                    segment.position(local_t, tension)
                };
                accumulated += (sample - previous).length();
                entries.push(TableEntry {
                    segment: index,
                    local_t,
                    accumulated_length: accumulated,
                    fraction: 0.0,
                });
                previous = sample;
            }
        }

        let count = entries.len();
        if accumulated.is_finite() && !tol.is_zero(accumulated) {
            for entry in &mut entries {
                entry.fraction = entry.accumulated_length / accumulated;
            }
        } else {
            // No measurable length: spread fractions evenly so lookups stay monotone.
            for (i, entry) in entries.iter_mut().enumerate() {
                entry.fraction = i as f64 / (count - 1) as f64;
            }
        }
        if let Some(end) = entries.last_mut() {
            end.fraction = 1.0;
        }

        log::debug!(
            "built arc-length table: {} entries over {} segments, length {:.4}",
            count,
            segments.len(),
            accumulated
        );

        Self {
            entries,
            samples_per_segment: samples,
        }
    }

    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn samples_per_segment(&self) -> usize {
        self.samples_per_segment
    }

    pub fn num_segments(&self) -> usize {
        if self.entries.is_empty() {
            0
        } else {
            (self.entries.len() - 1) / (self.samples_per_segment - 1)
        }
    }

    pub fn total_length(&self) -> f64 {
        self.entries
            .last()
            .map(|e| e.accumulated_length)
            .unwrap_or(0.0)
    }

    /// Resolve a fraction of total length `big_t` in `[0, 1]` to a segment and local `t`.
    ///
    /// The local parameter is interpolated linearly within the upper
    /// bracketing entry's segment: when the brackets straddle a seam the lower
    /// bound counts as `t = 0` of the upper segment.
    pub fn map_fraction_to_local_t(&self, big_t: f64, tol: Tolerance) -> Result<TableLookup> {
        let Some(end) = self.entries.last() else {
            return Err(CoasterError::ArcLengthLookup(
                "arc-length table is empty".to_string(),
            ));
        };
        if !big_t.is_finite() {
            return Err(CoasterError::ArcLengthLookup(format!(
                "fraction {} is not finite",
                big_t
            )));
        }
        if tol.parameter_eq(big_t, 0.0) {
            return Ok(TableLookup {
                segment: 0,
                local_t: 0.0,
            });
        }
        if tol.parameter_eq(big_t, 1.0) {
            return Ok(TableLookup {
                segment: end.segment,
                local_t: 1.0,
            });
        }

        // Entries are sorted by fraction, so this is the first one strictly above big_t.
        let index = self.entries.partition_point(|e| e.fraction <= big_t);
        if index == 0 || index >= self.entries.len() {
            return Err(CoasterError::ArcLengthLookup(format!(
                "fraction {} outside [0, 1]",
                big_t
            )));
        }

        let lower = &self.entries[index - 1];
        let upper = &self.entries[index];
        let lower_t = if lower.segment != upper.segment {
            0.0
        } else {
            lower.local_t
        };
        let alpha = (big_t - lower.fraction) / (upper.fraction - lower.fraction);
        let local_t = lower_t + alpha * (upper.local_t - lower_t);

        log::trace!(
            "fraction {} -> segment {} t {} (entries {}..={})",
            big_t,
            upper.segment,
            local_t,
            index - 1,
            index
        );

        Ok(TableLookup {
            segment: upper.segment,
            local_t,
        })
    }

    /// Fraction of total length at `local_t` of `segment`.
    ///
    /// Inverse of [`Self::map_fraction_to_local_t`] up to sampling resolution.
    pub fn fraction_at(&self, segment: usize, local_t: f64, tol: Tolerance) -> Result<f64> {
        let segments = self.num_segments();
        if segment >= segments {
            return Err(CoasterError::ArcLengthLookup(format!(
                "segment {} not in table of {} segments",
                segment, segments
            )));
        }
        if !(-tol.parameter..=1.0 + tol.parameter).contains(&local_t) {
            return Err(CoasterError::ArcLengthLookup(format!(
                "local parameter {} outside [0, 1]",
                local_t
            )));
        }

        let steps = self.samples_per_segment - 1;
        let local_t = local_t.clamp(0.0, 1.0);
        let step = ((local_t * steps as f64).floor() as usize).min(steps - 1);
        let lower = &self.entries[segment * steps + step];
        let upper = &self.entries[segment * steps + step + 1];
        let lower_t = if lower.segment != segment {
            0.0
        } else {
            lower.local_t
        };

        let span = upper.local_t - lower_t;
        let alpha = if span > 0.0 {
            (local_t - lower_t) / span
        } else {
            0.0
        };
        Ok(lower.fraction + alpha * (upper.fraction - lower.fraction))
    }
}

impl Validate for ArcLengthTable {
    fn validate(&self) -> Result<()> {
        let (Some(first), Some(last)) = (self.entries.first(), self.entries.last()) else {
            return Ok(());
        };
        if first.fraction != 0.0 || first.accumulated_length != 0.0 {
            return Err(CoasterError::InvalidOperation(
                "arc-length table must start at zero".to_string(),
            ));
        }
        if (last.fraction - 1.0).abs() > Tolerance::DEFAULT_PARAMETER {
            return Err(CoasterError::InvalidOperation(format!(
                "arc-length table must end at fraction 1, ends at {}",
                last.fraction
            )));
        }
        for (i, pair) in self.entries.windows(2).enumerate() {
            if pair[1].accumulated_length < pair[0].accumulated_length
                || pair[1].fraction < pair[0].fraction
            {
                return Err(CoasterError::InvalidOperation(format!(
                    "arc-length table decreases at entry {}",
                    i + 1
                )));
            }
        }
        Ok(())
    }
}
