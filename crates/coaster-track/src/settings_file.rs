//! JSON persistence for [`CurveSettings`].

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use coaster_core::traits::Validate;
use coaster_core::{CoasterError, Result};
use coaster_curve::CurveSettings;

/// Load and validate settings. Missing fields take their defaults.
pub fn load_settings(path: &Path) -> Result<CurveSettings> {
    let reader = BufReader::new(File::open(path)?);
    let settings: CurveSettings = serde_json::from_reader(reader)
        .map_err(|e| CoasterError::Settings(format!("{}: {}", path.display(), e)))?;
    settings.validate()?;
    log::debug!("loaded curve settings from {}: {:?}", path.display(), settings);
    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &CurveSettings) -> Result<()> {
    settings.validate()?;
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, settings)
        .map_err(|e| CoasterError::Settings(e.to_string()))?;
    writer.flush()?;
    Ok(())
}
