//! The editable closed track.

use coaster_core::traits::{BoundingBox, Validate};
use coaster_core::{CoasterError, Result, Tolerance};
use coaster_math::{Bounds3, Frame, Point3, Vector3};

use crate::arc_length::{ArcLengthTable, TableLookup};
use crate::control_point::{normalize_orientation, ControlPoint};
use crate::segment::{build_segments, CurveSegment, CurveType};
use crate::settings::CurveSettings;

/// An ordered, cyclic list of control points and the segments derived from it.
///
/// Every mutation regenerates the segment list and the arc-length table
/// wholesale before returning, so evaluation never observes a stale or
/// partially built curve.
#[derive(Debug, Clone, Default)]
pub struct Curve {
    settings: CurveSettings,
    points: Vec<ControlPoint>,
    segments: Vec<CurveSegment>,
    selected_segment: Option<usize>,
    arc_length: ArcLengthTable,
}

impl Curve {
    pub fn new(curve_type: CurveType) -> Self {
        Self {
            settings: CurveSettings::new(curve_type),
            ..Self::default()
        }
    }

    pub fn with_settings(settings: CurveSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            ..Self::default()
        })
    }

    pub fn from_points(curve_type: CurveType, points: Vec<ControlPoint>) -> Self {
        let mut curve = Self::new(curve_type);
        curve.points = points.into_iter().map(admit).collect();
        curve.regenerate_segments();
        curve
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    pub fn settings(&self) -> &CurveSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: CurveSettings) -> Result<()> {
        settings.validate()?;
        self.settings = settings;
        self.regenerate_segments();
        Ok(())
    }

    pub fn curve_type(&self) -> CurveType {
        self.settings.curve_type
    }

    pub fn set_curve_type(&mut self, curve_type: CurveType) {
        self.settings.curve_type = curve_type;
        self.regenerate_segments();
    }

    pub fn tension(&self) -> f64 {
        self.settings.tension
    }

    pub fn set_tension(&mut self, tension: f64) -> Result<()> {
        self.set_settings(self.settings.with_tension(tension))
    }

    pub fn tolerance(&self) -> Tolerance {
        self.settings.tolerance
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Append a point and return its index.
    pub fn add_control_point(&mut self, point: ControlPoint) -> usize {
        self.points.push(admit(point));
        self.regenerate_segments();
        self.points.len() - 1
    }

    /// Insert `point` before `at`, shifting later indices up by one.
    ///
    /// `at == num_control_points()` appends. Callers animating along the
    /// curve re-index their parameter, see `TrackAnimator::adjust_for_insertion`.
    pub fn insert_control_point(&mut self, point: ControlPoint, at: usize) -> Result<usize> {
        if at > self.points.len() {
            return Err(CoasterError::NoSuchPoint(format!(
                "cannot insert at {} on a curve with {} points",
                at,
                self.points.len()
            )));
        }
        self.points.insert(at, admit(point));
        self.regenerate_segments();
        Ok(at)
    }

    /// Remove and return the point at `index`.
    ///
    /// The minimum point count of the curve type is not enforced here; check
    /// [`Self::can_delete_point`] first. Deleting below it leaves the curve
    /// without segments.
    pub fn delete_control_point(&mut self, index: usize) -> Result<ControlPoint> {
        self.check_index(index)?;
        let removed = self.points.remove(index);
        self.regenerate_segments();
        Ok(removed)
    }

    /// Whether deleting one point keeps the count at the type's minimum.
    pub fn can_delete_point(&self) -> bool {
        self.points.len() > self.settings.curve_type.min_points()
    }

    pub fn set_control_point(&mut self, index: usize, point: ControlPoint) -> Result<()> {
        self.check_index(index)?;
        self.points[index] = admit(point);
        self.regenerate_segments();
        Ok(())
    }

    pub fn move_control_point(&mut self, index: usize, position: Point3) -> Result<()> {
        self.check_index(index)?;
        self.points[index].position = position;
        self.regenerate_segments();
        Ok(())
    }

    pub fn reorient_control_point(&mut self, index: usize, orientation: Vector3) -> Result<()> {
        self.check_index(index)?;
        self.points[index].orientation = normalize_orientation(orientation);
        self.regenerate_segments();
        Ok(())
    }

    pub fn clear_points(&mut self) {
        self.points.clear();
        self.regenerate_segments();
    }

    /// Replace every point at once, e.g. after loading a track file.
    pub fn replace_points(&mut self, points: Vec<ControlPoint>) {
        self.points = points.into_iter().map(admit).collect();
        self.regenerate_segments();
    }

    /// Rebuild all segments and, with two or more points, the arc-length table.
    pub fn regenerate_segments(&mut self) {
        let kind = self.settings.curve_type;
        self.segments = build_segments(kind, &self.points);
        self.arc_length = if self.points.len() >= 2 {
            ArcLengthTable::from_segments(
                &self.segments,
                self.settings.tension,
                self.settings.samples_per_segment,
                self.settings.tolerance,
            )
        } else {
            ArcLengthTable::default()
        };
        if self.selected_segment.is_some_and(|s| s >= self.segments.len()) {
            self.selected_segment = None;
        }
        log::debug!(
            "regenerated {} {} segments from {} control points",
            self.segments.len(),
            kind,
            self.points.len()
        );
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn num_control_points(&self) -> usize {
        self.points.len()
    }

    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn segments(&self) -> &[CurveSegment] {
        &self.segments
    }

    pub fn point(&self, index: usize) -> Result<&ControlPoint> {
        self.check_index(index)?;
        Ok(&self.points[index])
    }

    /// Soft lookup; `None` when out of range.
    pub fn segment(&self, index: usize) -> Option<&CurveSegment> {
        self.segments.get(index)
    }

    pub fn selected_segment(&self) -> Option<usize> {
        self.selected_segment
    }

    /// Highlight the segment under global parameter `t`, or clear the highlight.
    pub fn select_segment_at(&mut self, t: f64) -> Option<usize> {
        self.selected_segment = self.locate(t).ok().map(|(segment, _)| segment.index);
        self.selected_segment
    }

    // ------------------------------------------------------------------
    // Evaluation at a global parameter `segment + t`
    // ------------------------------------------------------------------

    pub fn position(&self, t: f64) -> Result<Point3> {
        let (segment, local_t) = self.locate(t)?;
        Ok(segment.position(local_t, self.settings.tension))
    }

    /// Unnormalized tangent.
    pub fn direction(&self, t: f64) -> Result<Vector3> {
        let (segment, local_t) = self.locate(t)?;
        Ok(segment.direction(local_t, self.settings.tension))
    }

    /// Interpolated, unnormalized up vector.
    pub fn orientation(&self, t: f64) -> Result<Vector3> {
        let (segment, local_t) = self.locate(t)?;
        Ok(segment.orientation(local_t))
    }

    /// Banked pose at `t`, using the interpolated orientation as up.
    pub fn frame(&self, t: f64) -> Result<Frame> {
        let (segment, local_t) = self.locate(t)?;
        self.segment_frame(segment, local_t)
    }

    /// Reduce `t` into `[0, num_segments)`.
    pub fn wrap_parameter(&self, t: f64) -> Result<f64> {
        let count = self.segments.len();
        if count == 0 || !t.is_finite() {
            return Err(CoasterError::NoSuchPoint(format!(
                "cannot wrap parameter {} on a curve with {} segments",
                t, count
            )));
        }
        let wrapped = t.rem_euclid(count as f64);
        // rem_euclid can round up to the modulus itself for tiny negative inputs.
        Ok(if wrapped >= count as f64 { 0.0 } else { wrapped })
    }

    /// [`Self::position`] after wrapping `t` around the loop.
    pub fn position_wrapped(&self, t: f64) -> Result<Point3> {
        self.position(self.wrap_parameter(t)?)
    }

    // ------------------------------------------------------------------
    // Arc length
    // ------------------------------------------------------------------

    pub fn arc_length_table(&self) -> &ArcLengthTable {
        &self.arc_length
    }

    /// Rebuild the arc-length table with a different sample density.
    pub fn build_table(&mut self, samples_per_segment: usize) -> Result<()> {
        let settings = self
            .settings
            .with_samples_per_segment(samples_per_segment);
        settings.validate()?;
        self.settings = settings;
        self.arc_length = ArcLengthTable::build(self, samples_per_segment)?;
        Ok(())
    }

    pub fn map_fraction_to_local_t(&self, big_t: f64) -> Result<TableLookup> {
        self.arc_length
            .map_fraction_to_local_t(big_t, self.settings.tolerance)
    }

    /// Fraction of total length at global parameter `t`.
    pub fn fraction_at(&self, t: f64) -> Result<f64> {
        let (segment, local_t) = self.locate(t)?;
        self.arc_length
            .fraction_at(segment.index, local_t, self.settings.tolerance)
    }

    pub fn position_at_fraction(&self, big_t: f64) -> Result<Point3> {
        let lookup = self.map_fraction_to_local_t(big_t)?;
        let segment = self.lookup_segment(lookup)?;
        Ok(segment.position(lookup.local_t, self.settings.tension))
    }

    pub fn frame_at_fraction(&self, big_t: f64) -> Result<Frame> {
        let lookup = self.map_fraction_to_local_t(big_t)?;
        self.frame_at_lookup(lookup)
    }

    pub fn frame_at_lookup(&self, lookup: TableLookup) -> Result<Frame> {
        let segment = self.lookup_segment(lookup)?;
        self.segment_frame(segment, lookup.local_t)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.points.len() {
            Ok(())
        } else {
            Err(CoasterError::NoSuchPoint(format!(
                "no point on curve with id={} ({} points)",
                index,
                self.points.len()
            )))
        }
    }

    /// Split `t` into its segment and local parameter.
    ///
    /// Never clamps: a parameter past the last segment is an error so that
    /// animation can notice it walked off the end.
    fn locate(&self, t: f64) -> Result<(&CurveSegment, f64)> {
        let whole = t.floor();
        let segment = if whole >= 0.0 && whole.is_finite() {
            self.segments.get(whole as usize)
        } else {
            None
        };
        match segment {
            Some(segment) => Ok((segment, t - whole)),
            None => Err(CoasterError::NoSuchPoint(format!(
                "no segment for parameter {} ({} segments)",
                t,
                self.segments.len()
            ))),
        }
    }

    fn lookup_segment(&self, lookup: TableLookup) -> Result<&CurveSegment> {
        self.segments.get(lookup.segment).ok_or_else(|| {
            CoasterError::NoSuchPoint(format!(
                "arc-length table refers to segment {} of {}",
                lookup.segment,
                self.segments.len()
            ))
        })
    }

    fn segment_frame(&self, segment: &CurveSegment, local_t: f64) -> Result<Frame> {
        let tension = self.settings.tension;
        Frame::from_tangent(
            segment.position(local_t, tension),
            segment.direction(local_t, tension),
            segment.orientation(local_t),
            self.settings.tolerance,
        )
        .ok_or_else(|| {
            CoasterError::InvalidOperation(format!(
                "degenerate tangent on segment {} at t={}",
                segment.index, local_t
            ))
        })
    }
}

/// Every point entering the curve goes through here, since `ControlPoint`
/// fields are public and may hold an unnormalized orientation.
fn admit(point: ControlPoint) -> ControlPoint {
    ControlPoint {
        orientation: normalize_orientation(point.orientation),
        ..point
    }
}

impl BoundingBox for Curve {
    type Bounds = Bounds3;

    fn bounding_box(&self) -> Option<Bounds3> {
        Bounds3::from_points(self.points.iter().map(|p| p.position))
    }
}

impl Validate for Curve {
    fn validate(&self) -> Result<()> {
        let n = self.points.len();
        let kind = self.settings.curve_type;
        let expected = if n >= kind.min_points() { n } else { 0 };
        if self.segments.len() != expected {
            return Err(CoasterError::InvalidOperation(format!(
                "{} points of type {} should give {} segments, found {}",
                n,
                kind,
                expected,
                self.segments.len()
            )));
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if segment.index != i
                || segment.kind != kind
                || segment.start != self.points[i]
                || segment.end != self.points[(i + 1) % n]
            {
                return Err(CoasterError::InvalidOperation(format!(
                    "segment {} does not span points {} -> {}",
                    i,
                    i,
                    (i + 1) % n
                )));
            }
        }
        if self.arc_length.num_segments() != self.segments.len() {
            return Err(CoasterError::InvalidOperation(format!(
                "arc-length table covers {} segments, curve has {}",
                self.arc_length.num_segments(),
                self.segments.len()
            )));
        }
        self.arc_length.validate()
    }
}
