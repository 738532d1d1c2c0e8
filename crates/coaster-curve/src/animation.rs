//! Driving an object around the track.
//!
//! The curve itself knows nothing about time. [`TrackAnimator`] owns the
//! current parameter and advances it by an explicit elapsed duration handed
//! in by the host's idle loop.

use std::time::Duration;

use coaster_core::{CoasterError, Result};
use coaster_math::Frame;
use serde::{Deserialize, Serialize};

use crate::curve::Curve;

/// How the animation parameter maps to distance along the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ParameterMode {
    /// Advance the global parameter directly; speed varies with point spacing.
    #[default]
    Raw,
    /// Advance by fraction of total arc length; approximately constant speed.
    ArcLength,
}

/// Animation state for one train.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackAnimator {
    /// Global parameter `segment + t`, kept in sync in both modes.
    t: f64,
    /// Fraction of total length, meaningful in [`ParameterMode::ArcLength`].
    fraction: f64,
    /// Segments per second in raw mode, track units per second in arc-length mode.
    pub speed: f64,
    mode: ParameterMode,
    pub playing: bool,
}

impl Default for TrackAnimator {
    fn default() -> Self {
        Self {
            t: 0.0,
            fraction: 0.0,
            speed: 1.0,
            mode: ParameterMode::Raw,
            playing: true,
        }
    }
}

impl TrackAnimator {
    pub fn new(speed: f64, mode: ParameterMode) -> Self {
        Self {
            speed,
            mode,
            ..Self::default()
        }
    }

    pub fn parameter(&self) -> f64 {
        self.t
    }

    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    pub fn mode(&self) -> ParameterMode {
        self.mode
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Put the train back at the start of the track.
    pub fn reset(&mut self) {
        self.t = 0.0;
        self.fraction = 0.0;
    }

    /// Jump to global parameter `t` on `curve`.
    pub fn set_parameter(&mut self, curve: &Curve, t: f64) -> Result<()> {
        self.t = curve.wrap_parameter(t)?;
        self.sync_fraction(curve);
        Ok(())
    }

    /// Switch modes without moving the train.
    pub fn set_mode(&mut self, curve: &Curve, mode: ParameterMode) {
        if self.mode != mode {
            self.mode = mode;
            self.sync_fraction(curve);
        }
    }

    /// Advance by `elapsed` (when playing) and return the new pose.
    ///
    /// On a lookup miss (e.g. the curve lost its segments) the parameter is
    /// reset to the start and the error returned, so the caller can skip the
    /// frame.
    pub fn advance(&mut self, curve: &Curve, elapsed: Duration) -> Result<Frame> {
        if self.playing {
            let step = self.speed * elapsed.as_secs_f64();
            match self.mode {
                ParameterMode::Raw => self.t += step,
                ParameterMode::ArcLength => {
                    let total = curve.arc_length_table().total_length();
                    if !curve.tolerance().is_zero(total) {
                        self.fraction = (self.fraction + step / total).rem_euclid(1.0);
                    }
                }
            }
        }
        self.current_frame(curve)
    }

    /// Pose at the current parameter without advancing.
    pub fn current_frame(&mut self, curve: &Curve) -> Result<Frame> {
        let result = self.resolve(curve);
        if let Err(err) = &result {
            if err.is_lookup_miss() {
                log::debug!("animation parameter reset: {}", err);
                self.reset();
            }
        }
        result
    }

    /// Keep the train on the same physical spot after a point was inserted before `at`.
    ///
    /// `curve` is the curve after the insertion.
    pub fn adjust_for_insertion(&mut self, curve: &Curve, at: usize) {
        let count = curve.num_control_points();
        if count == 0 {
            self.reset();
            return;
        }
        if self.t.floor() >= at as f64 {
            self.t = (self.t + 1.0).rem_euclid(count as f64);
        }
        self.sync_fraction(curve);
    }

    /// Mirror of [`Self::adjust_for_insertion`] for a point deleted at `at`.
    pub fn adjust_for_deletion(&mut self, curve: &Curve, at: usize) {
        if self.t.floor() > at as f64 {
            self.t -= 1.0;
        }
        match curve.wrap_parameter(self.t) {
            Ok(t) => {
                self.t = t;
                self.sync_fraction(curve);
            }
            Err(_) => self.reset(),
        }
    }

    /// Parameters of cars trailing the lead by each of `offsets`.
    pub fn car_parameters(&self, curve: &Curve, offsets: &[f64]) -> Result<Vec<f64>> {
        offsets
            .iter()
            .map(|offset| curve.wrap_parameter(self.t - offset))
            .collect()
    }

    fn resolve(&mut self, curve: &Curve) -> Result<Frame> {
        match self.mode {
            ParameterMode::Raw => {
                self.t = curve.wrap_parameter(self.t)?;
                curve.frame(self.t)
            }
            ParameterMode::ArcLength => {
                if curve.is_empty() {
                    return Err(CoasterError::NoSuchPoint(
                        "curve has no segments to follow".to_string(),
                    ));
                }
                let lookup = curve.map_fraction_to_local_t(self.fraction)?;
                self.t = curve.wrap_parameter(lookup.global_t())?;
                curve.frame_at_lookup(lookup)
            }
        }
    }

    fn sync_fraction(&mut self, curve: &Curve) {
        if self.mode != ParameterMode::ArcLength {
            return;
        }
        match curve.fraction_at(self.t) {
            Ok(fraction) => self.fraction = fraction,
            Err(err) => {
                log::debug!("cannot convert parameter {} to arc length: {}", self.t, err);
                self.reset();
            }
        }
    }
}
