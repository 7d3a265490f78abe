#![warn(missing_docs)]

//! Drawing import for pinbuilder.
//!
//! Reads an Inkscape drawing of a playfield and returns one [`Feature`] per
//! labeled `path` or `circle` element. The first word of an element's
//! `inkscape:label` selects its [`FeatureKind`]; the remaining words are kept
//! as label arguments (a ramp id, a marker index).
//!
//! Coordinates are converted from the drawing's y-down page space into
//! y-up model space while reading, with enclosing group translations applied.
//!
//! # Example
//!
//! ```
//! use pinbuilder_svg::{parse_str, FeatureKind};
//!
//! let drawing = r#"<svg xmlns="http://www.w3.org/2000/svg"
//!     xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape"
//!     width="100mm" height="100mm">
//!   <path inkscape:label="RampPath left" d="M 0,0 L 50,0"/>
//! </svg>"#;
//!
//! let features = parse_str(drawing).unwrap();
//! assert_eq!(features[1].kind, FeatureKind::RampPath);
//! assert_eq!(features[1].ramp_id(), Some("left"));
//! ```

pub mod error;
pub mod feature;
pub mod reader;
pub mod xml;

pub use error::{Result, SvgError};
pub use feature::{Feature, FeatureKind};
pub use reader::{parse_file, parse_str, DrawingReader};
