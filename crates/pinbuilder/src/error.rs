//! Error types for playfield builds.

use pinbuilder_ramp::RampError;
use pinbuilder_svg::SvgError;
use thiserror::Error;

/// Errors that can occur while loading a playfield or writing its script.
#[derive(Error, Debug)]
pub enum PinbuilderError {
    /// Drawing could not be read.
    #[error("drawing error: {0}")]
    Svg(#[from] SvgError),

    /// Ramp assembly or sweep failed.
    #[error("ramp error: {0}")]
    Ramp(#[from] RampError),

    /// Settings file is not valid TOML for [`BuildSettings`](crate::BuildSettings).
    #[error("settings parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Settings values out of range.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// I/O error reading settings or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for playfield builds.
pub type Result<T> = std::result::Result<T, PinbuilderError>;
