//! Error types for drawing import.

use pinbuilder_math::GeomError;
use thiserror::Error;

/// Errors that can occur while reading a drawing.
#[derive(Error, Debug)]
pub enum SvgError {
    /// The document is not well-formed XML.
    #[error("XML parse error: {0}")]
    Xml(String),

    /// A path or point attribute could not be turned into geometry.
    #[error("geometry error: {0}")]
    Geometry(#[from] GeomError),

    /// An element the reader does not know how to handle.
    #[error("unknown drawing tag: {0}")]
    UnknownTag(String),

    /// A `transform` attribute that is not a plain `translate(x,y)`.
    #[error("unsupported transform: {0:?}")]
    BadTransform(String),

    /// A `width` or `height` attribute that is not a number with a unit.
    #[error("invalid document dimension: {0:?}")]
    BadDimension(String),

    /// The document has no root element.
    #[error("document has no root element")]
    EmptyDocument,

    /// I/O error reading the drawing file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for drawing import.
pub type Result<T> = std::result::Result<T, SvgError>;
