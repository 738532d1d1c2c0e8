//! Coaster track curves: oriented control points, spline segments,
//! arc-length reparameterization, and an animation driver.

pub mod animation;
pub mod arc_length;
pub mod control_point;
pub mod curve;
pub mod segment;
pub mod settings;
pub mod tessellate;

pub use animation::{ParameterMode, TrackAnimator};
pub use arc_length::{ArcLengthTable, TableEntry, TableLookup};
pub use control_point::ControlPoint;
pub use curve::Curve;
pub use segment::{CurveSegment, CurveType, CATMULL_ROM_TENSION};
pub use settings::{CurveSettings, DEFAULT_SAMPLES_PER_SEGMENT, MAX_SAMPLES_PER_SEGMENT};
