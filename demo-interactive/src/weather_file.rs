//! Weather records read from a JSON file
//!
//! The file holds one serialized [`WeatherData`] and is re-read on every fetch, so
//! an external script can update it while the animation runs.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use weather_fx_core::{WeatherData, WeatherProvider};

#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or is not a valid weather record.
    pub fn load(&self) -> Result<WeatherData, Box<dyn Error>> {
        let text = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl WeatherProvider for JsonFileProvider {
    fn fetch(&mut self) -> Option<WeatherData> {
        match self.load() {
            Ok(weather) => Some(weather),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Could not read weather file");
                None
            }
        }
    }
}
