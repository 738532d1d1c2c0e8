//! Plain-text track point files.
//!
//! The first meaningful line holds the number of control points `N`; each of
//! the next `N` meaningful lines holds either `x y z` or `x y z ox oy oz`.
//! Blank lines are skipped and `#` starts a comment wherever a word could.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use coaster_core::{CoasterError, Result};
use coaster_curve::ControlPoint;
use coaster_math::{Point3, Vector3};

/// Fewest points a track file may declare.
pub const MIN_TRACK_POINTS: usize = 4;
/// Most points a track file may declare.
pub const MAX_TRACK_POINTS: usize = 65535;

/// The fallback layout: four upright points on a diamond of radius 50 at height 5.
pub fn default_points() -> Vec<ControlPoint> {
    [
        Point3::new(50.0, 5.0, 0.0),
        Point3::new(0.0, 5.0, 50.0),
        Point3::new(-50.0, 5.0, 0.0),
        Point3::new(0.0, 5.0, -50.0),
    ]
    .into_iter()
    .map(ControlPoint::at)
    .collect()
}

/// Parse the contents of a track file.
pub fn parse_track(text: &str) -> Result<Vec<ControlPoint>> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, words(line)))
        .filter(|(_, words)| !words.is_empty());

    let (count_line, count_words) = lines
        .next()
        .ok_or_else(|| CoasterError::MalformedTrack("file is empty".to_string()))?;
    let count = parse_count(count_line, &count_words)?;

    let mut points = Vec::with_capacity(count);
    for (line_no, words) in lines.by_ref().take(count) {
        points.push(parse_point_line(line_no, &words)?);
    }
    if points.len() < count {
        return Err(CoasterError::MalformedTrack(format!(
            "expected {} points, found {}",
            count,
            points.len()
        )));
    }

    let extra = lines.count();
    if extra > 0 {
        log::warn!("ignoring {} lines after the last of {} track points", extra, count);
    }
    Ok(points)
}

pub fn read_track_file(path: &Path) -> Result<Vec<ControlPoint>> {
    let text = std::fs::read_to_string(path)?;
    let points = parse_track(&text)
        .map_err(|e| match e {
            CoasterError::MalformedTrack(msg) => {
                CoasterError::MalformedTrack(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;
    log::info!("loaded {} track points from {}", points.len(), path.display());
    Ok(points)
}

/// Read `path`, falling back to [`default_points`] on any error.
pub fn load_or_default(path: &Path) -> Vec<ControlPoint> {
    match read_track_file(path) {
        Ok(points) => points,
        Err(err) => {
            log::warn!("using default track layout: {}", err);
            default_points()
        }
    }
}

/// Render `N` followed by one `x y z ox oy oz` line per point.
///
/// Fails with `InvalidOperation` when `N` is outside what [`parse_track`]
/// accepts, so every saved file can be loaded back.
pub fn format_track(points: &[ControlPoint]) -> Result<String> {
    if !(MIN_TRACK_POINTS..=MAX_TRACK_POINTS).contains(&points.len()) {
        return Err(CoasterError::InvalidOperation(format!(
            "cannot save {} points, track files hold {}..={}",
            points.len(),
            MIN_TRACK_POINTS,
            MAX_TRACK_POINTS
        )));
    }
    let mut text = format!("{}\n", points.len());
    for p in points {
        text.push_str(&format!(
            "{} {} {} {} {} {}\n",
            p.position.x,
            p.position.y,
            p.position.z,
            p.orientation.x,
            p.orientation.y,
            p.orientation.z
        ));
    }
    Ok(text)
}

pub fn write_track<W: Write>(writer: &mut W, points: &[ControlPoint]) -> Result<()> {
    writer.write_all(format_track(points)?.as_bytes())?;
    Ok(())
}

pub fn write_track_file(path: &Path, points: &[ControlPoint]) -> Result<()> {
    let text = format_track(points)?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    log::info!("saved {} track points to {}", points.len(), path.display());
    Ok(())
}

/// Whitespace-separated words up to the first word starting with `#`.
fn words(line: &str) -> Vec<&str> {
    line.split_whitespace()
        .take_while(|w| !w.starts_with('#'))
        .collect()
}

fn parse_count(line_no: usize, words: &[&str]) -> Result<usize> {
    let count = match words {
        [word] => word.parse::<usize>().map_err(|_| {
            CoasterError::MalformedTrack(format!(
                "line {}: point count '{}' is not a non-negative integer",
                line_no, word
            ))
        })?,
        _ => {
            return Err(CoasterError::MalformedTrack(format!(
                "line {}: expected a single point count, found {} words",
                line_no,
                words.len()
            )))
        }
    };
    if !(MIN_TRACK_POINTS..=MAX_TRACK_POINTS).contains(&count) {
        return Err(CoasterError::MalformedTrack(format!(
            "illegal number of points {} (must be {}..={})",
            count, MIN_TRACK_POINTS, MAX_TRACK_POINTS
        )));
    }
    Ok(count)
}

fn parse_point_line(line_no: usize, words: &[&str]) -> Result<ControlPoint> {
    if words.len() != 3 && words.len() != 6 {
        return Err(CoasterError::MalformedTrack(format!(
            "line {}: expected 3 or 6 numbers, found {}",
            line_no,
            words.len()
        )));
    }
    let mut values = [0.0f64; 6];
    for (slot, word) in values.iter_mut().zip(words) {
        *slot = word
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                CoasterError::MalformedTrack(format!(
                    "line {}: '{}' is not a finite number",
                    line_no, word
                ))
            })?;
    }
    let position = Point3::new(values[0], values[1], values[2]);
    Ok(if words.len() == 6 {
        ControlPoint::new(position, Vector3::new(values[3], values[4], values[5]))
    } else {
        ControlPoint::at(position)
    })
}
