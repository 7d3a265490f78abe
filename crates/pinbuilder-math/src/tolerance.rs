//! Named tolerances and iteration limits.
//!
//! These values are empirical. They interact (the endpoint short-circuit of
//! [`Bezier::inverse_by_x`](crate::Bezier::inverse_by_x) is much looser than
//! its convergence threshold, for instance) and are kept here so they can be
//! reviewed together.

/// Component-wise tolerance on unit directions when deciding whether a
/// segment's control points lie on one ray from `p1`.
pub const LINE_DIRECTION_TOLERANCE: f64 = 1e-2;

/// Absolute coordinate tolerance for vertical/horizontal line detection.
pub const AXIS_ALIGNMENT_TOLERANCE: f64 = 1e-2;

/// Offsets shorter than this are treated as coincident with `p1`.
pub const COINCIDENT_POINT_TOLERANCE: f64 = 1e-12;

/// Default per-segment length change accepted by [`Bezier::fit`](crate::Bezier::fit).
pub const DEFAULT_SEGMENT_FIT_TOLERANCE: f64 = 1e-1;

/// Default per-segment length change accepted by
/// [`BezierPath::fits`](crate::BezierPath::fits).
pub const DEFAULT_CHAIN_FIT_TOLERANCE: f64 = 1e-2;

/// Interior sample count of the first fitting probe.
pub const INITIAL_FIT_SAMPLES: usize = 8;

/// Maximum number of sample-count doublings before fitting gives up.
pub const MAX_FIT_DOUBLINGS: u32 = 16;

/// Default x threshold for inverse evaluation.
pub const INVERSE_X_TOLERANCE: f64 = 1e-8;

/// Relative closeness at which inverse evaluation starts Newton from the
/// nearer endpoint.
pub const ENDPOINT_RELATIVE_TOLERANCE: f64 = 1e-3;

/// Absolute part of the endpoint closeness test in inverse evaluation.
pub const ENDPOINT_ABSOLUTE_TOLERANCE: f64 = 1e-8;

/// Forward finite-difference step for dx/du.
pub const DERIVATIVE_STEP: f64 = 1e-6;

/// Maximum number of Newton steps in inverse evaluation.
pub const MAX_NEWTON_ITERATIONS: usize = 64;

/// Decimal places kept when writing coordinates as text.
pub const TEXT_DECIMALS: i32 = 4;

/// `|a - b| <= atol + rtol * |b|`, the asymmetric closeness test used for
/// endpoint matching.
pub fn is_close(a: f64, b: f64, rtol: f64, atol: f64) -> bool {
    (a - b).abs() <= atol + rtol * b.abs()
}
