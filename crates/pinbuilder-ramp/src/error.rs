//! Error types for ramp assembly.

use pinbuilder_math::GeomError;
use thiserror::Error;

/// Errors that can occur while assembling or generating a ramp.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RampError {
    /// Underlying curve operation failed.
    #[error("geometry error: {0}")]
    Geometry(#[from] GeomError),

    /// Width markers do not match the centerline segments.
    #[error("ramp {id:?} has {actual} width markers, expected {expected}")]
    WidthCount {
        /// Ramp identifier.
        id: String,
        /// Centerline segments plus one.
        expected: usize,
        /// Markers supplied.
        actual: usize,
    },

    /// The height profile does not span the centerline length.
    #[error("ramp {id:?} centerline is {centerline} long but its height profile spans {height}")]
    LengthMismatch {
        /// Ramp identifier.
        id: String,
        /// Fitted centerline length.
        centerline: f64,
        /// Height profile x-length.
        height: f64,
    },

    /// The first width marker has zero width, so scales are undefined.
    #[error("ramp {id:?} starts with a zero width")]
    ZeroWidth {
        /// Ramp identifier.
        id: String,
    },

    /// No centerline was drawn for a ramp that has other parts.
    #[error("ramp {0:?} has no centerline")]
    MissingCenterline(String),

    /// No height profile was drawn for a ramp.
    #[error("ramp {0:?} has no height profile")]
    MissingHeightProfile(String),

    /// Invalid tolerance or profile settings.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result type for ramp operations.
pub type Result<T> = std::result::Result<T, RampError>;
