//! Build settings, loaded from TOML.
//!
//! ```toml
//! [ramp]
//! fit_tolerance = 0.01
//! length_tolerance = 0.001
//!
//! [ramp.body]
//! kind = "box"
//! height = 25.0
//!
//! [ramp.cutter]
//! kind = "inner_right"
//!
//! [output]
//! file_name = "preview.scad"
//! ```
//!
//! Every key is optional.

use std::path::Path;

use pinbuilder_ramp::RampSettings;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PinbuilderError, Result};

/// Default name of the generated script.
pub const DEFAULT_OUTPUT_FILE: &str = "preview.scad";

/// Everything that controls a build.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    /// Ramp tolerances and profiles.
    pub ramp: RampSettings,
    /// Output file options.
    pub output: OutputSettings,
}

/// Output file options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Script file name inside the output directory.
    pub file_name: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_OUTPUT_FILE.to_string(),
        }
    }
}

impl BuildSettings {
    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading settings");
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        self.ramp.validate()?;
        let name = self.output.file_name.as_str();
        if name.is_empty() || name.contains(|c: char| c == '/' || c == '\\') {
            return Err(PinbuilderError::InvalidSettings(format!(
                "output file_name must be a plain file name, got {:?}",
                name
            )));
        }
        Ok(())
    }
}
