#![warn(missing_docs)]

//! Pinball playfield drawings to OpenSCAD ramp scripts.
//!
//! This crate ties the workspace together:
//!
//! - [`pinbuilder_svg`] reads labeled features from an Inkscape drawing
//! - [`collate_ramps`] groups ramp parts by id into [`Ramp`]s
//! - [`scad::render`] emits a BOSL2 script subtracting ramp cutters from
//!   ramp bodies
//!
//! # Example
//!
//! ```no_run
//! use pinbuilder::{BuildSettings, Playfield};
//!
//! let settings = BuildSettings::default();
//! let playfield = Playfield::load("table.svg", &settings)?;
//! for ramp in playfield.ramps() {
//!     println!("{}: valid = {}", ramp.id(), ramp.is_valid());
//! }
//! playfield.generate("output", &settings)?;
//! # Ok::<(), pinbuilder::PinbuilderError>(())
//! ```

pub mod error;
pub mod playfield;
pub mod scad;
pub mod settings;

pub use error::{PinbuilderError, Result};
pub use playfield::{
    collate_ramps, FeatureSummary, Playfield, PlayfieldReport, RampSet, RampSummary,
    RejectedRamp, RejectedSummary,
};
pub use settings::{BuildSettings, OutputSettings, DEFAULT_OUTPUT_FILE};

pub use pinbuilder_math as math;
pub use pinbuilder_ramp::{CrossSectionKind, CrossSectionSpec, Ramp, RampError, RampSettings};
pub use pinbuilder_svg::{Feature, FeatureKind, SvgError};
