//! Track persistence: the plain-text control point format and JSON curve settings.

pub mod settings_file;
pub mod track_file;

pub use settings_file::{load_settings, save_settings};
pub use track_file::{
    default_points, format_track, load_or_default, parse_track, read_track_file, write_track,
    write_track_file, MAX_TRACK_POINTS, MIN_TRACK_POINTS,
};
