//! Error types for curve and path geometry.

use thiserror::Error;

/// Errors that can occur while building or querying curves.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeomError {
    /// A number in a text coordinate could not be parsed.
    #[error("invalid number: {0:?}")]
    InvalidNumber(String),

    /// A text vector had the wrong number of components.
    #[error("expected {expected} components, got {actual} in {raw:?}")]
    DimensionMismatch {
        /// Expected component count.
        expected: usize,
        /// Component count found.
        actual: usize,
        /// The offending text.
        raw: String,
    },

    /// A drawing path command is not one of `M L H V C Z`.
    #[error("unknown path command: {0:?}")]
    UnknownCommand(String),

    /// A drawing path command ran out of operands.
    #[error("path command {0} is missing an operand")]
    MissingOperand(char),

    /// A drawing path command needs a current point but none exists.
    #[error("path command {0} has no current point")]
    NoCurrentPoint(char),

    /// A control point array is not of the form `3n + 1` with `n >= 1`.
    #[error("control point array has {0} points, expected 3n + 1 with n >= 1")]
    ControlPointCount(usize),

    /// A control point array is not wrapped as `[[..],..,[..]]`.
    #[error("malformed control point array: {0:?}")]
    MalformedArray(String),

    /// A per-segment list does not match the number of segments.
    #[error("got {actual} entries for a chain of {expected} segments")]
    SampleCountMismatch {
        /// Number of entries expected.
        expected: usize,
        /// Number of entries supplied.
        actual: usize,
    },

    /// Segment `index` does not start where segment `index - 1` ends.
    #[error("segment {index} does not start where the previous segment ends")]
    Discontinuous {
        /// Index of the offending segment.
        index: usize,
    },

    /// A curve chain must contain at least one segment.
    #[error("curve chain has no segments")]
    EmptyChain,

    /// A path has zero length where a length ratio is needed.
    #[error("path has zero length")]
    ZeroLength,

    /// Adaptive sampling did not settle within the doubling cap.
    #[error("sample fitting did not converge at {samples} samples (last change {last_change})")]
    FitDidNotConverge {
        /// Sample count at the last probe.
        samples: usize,
        /// Length change between the last two probes.
        last_change: f64,
    },

    /// Inverse evaluation by x did not reach the threshold.
    #[error("inverse evaluation for x = {target} did not converge (u = {u}, residual = {residual})")]
    InverseDidNotConverge {
        /// Requested x coordinate.
        target: f64,
        /// Parameter at the last iterate.
        u: f64,
        /// x difference at the last iterate.
        residual: f64,
    },
}

/// Result type for geometry operations.
pub type Result<T> = std::result::Result<T, GeomError>;
