#![warn(missing_docs)]

//! Ramp assembly for pinbuilder.
//!
//! Combines a ramp's centerline, width markers and height profile into
//! `path_sweep` calls for the solid-model kernel:
//!
//! 1. The centerline is sampled at fitted per-segment counts.
//! 2. The samples are lifted into 3D by looking up elevation at each
//!    point's distance along the centerline.
//! 3. Marker widths are interpolated to every sample and expressed as x
//!    scales relative to the first.
//! 4. A cross-section profile sized to the first width is swept along the
//!    lifted path with those scales.
//!
//! A ramp is only swept when its marker count and height profile length
//! agree with the centerline; see [`Ramp::validate`].

pub mod cross_section;
pub mod error;
pub mod ramp;
pub mod settings;
pub mod sweep;

pub use cross_section::{
    CrossSectionKind, CrossSectionSpec, DEFAULT_INNER_HEIGHT, DEFAULT_WALL_HEIGHT,
};
pub use error::{RampError, Result};
pub use ramp::Ramp;
pub use settings::{RampSettings, DEFAULT_LENGTH_TOLERANCE};
pub use sweep::SweepCall;
