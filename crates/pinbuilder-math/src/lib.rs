#![warn(missing_docs)]

//! Curve and path geometry for pinbuilder.
//!
//! Thin layer over nalgebra's fixed-size vectors providing the types needed
//! to turn drawing curves into sweep paths:
//!
//! - [`Bezier`]: one cubic segment with evaluation, adaptive fitting and
//!   inverse evaluation by x
//! - [`Path`]: a sampled polyline used for length and shape queries
//! - [`BezierPath`]: an endpoint-continuous chain of segments, read from
//!   drawing path commands or a kernel control-point array
//!
//! Dimensionality is a const generic, so mixing 2D and 3D geometry is a
//! compile-time error. Text parsing checks component counts at runtime.
//!
//! # Example
//!
//! ```
//! use pinbuilder_math::{BezierPath, DrawingFrame, Vec2};
//!
//! let frame = DrawingFrame::new(Vec2::new(0.0, 20.0), Vec2::zeros());
//! let square = BezierPath::from_svgd("M 0,0 L 10,0 L 10,10 L 0,10 Z", &frame).unwrap();
//! assert_eq!(square.len(), 4);
//! assert!((square.length_uniform(0) - 40.0).abs() < 1e-12);
//! ```

pub mod bezier;
pub mod bezier_path;
pub mod error;
pub mod path;
pub mod tolerance;
pub mod vector;

pub use bezier::Bezier;
pub use bezier_path::BezierPath;
pub use error::{GeomError, Result};
pub use path::Path;
pub use vector::{
    format_component, format_vector, parse_number, parse_vector, round_component, DrawingFrame,
    Vec2, Vec3, VecN,
};
