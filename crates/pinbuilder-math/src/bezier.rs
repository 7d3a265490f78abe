//! Cubic Bezier segments.

use crate::error::{GeomError, Result};
use crate::path::Path;
use crate::tolerance::{
    is_close, AXIS_ALIGNMENT_TOLERANCE, COINCIDENT_POINT_TOLERANCE, DERIVATIVE_STEP,
    ENDPOINT_ABSOLUTE_TOLERANCE, ENDPOINT_RELATIVE_TOLERANCE, INITIAL_FIT_SAMPLES,
    LINE_DIRECTION_TOLERANCE, MAX_FIT_DOUBLINGS, MAX_NEWTON_ITERATIONS,
};
use crate::vector::VecN;

/// A cubic Bezier segment `(p1, c1, c2, p2)` in `D` dimensions.
///
/// `p1` and `p2` are interpolated endpoints, `c1` and `c2` are off-curve
/// control points. The x-extent and the line classification are computed
/// once at construction; the segment is immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Bezier<const D: usize> {
    points: [VecN<D>; 4],
    x_extent: (f64, f64),
    is_line: bool,
    is_vline: bool,
    is_hline: bool,
}

impl<const D: usize> Bezier<D> {
    /// Create a segment from its endpoints and control points.
    pub fn new(p1: VecN<D>, c1: VecN<D>, c2: VecN<D>, p2: VecN<D>) -> Self {
        let points = [p1, c1, c2, p2];
        let x_extent = (p1[0].min(p2[0]), p1[0].max(p2[0]));
        let is_line = control_points_collinear(&points);
        let is_vline = is_line && axis_aligned(&points, 0);
        let is_hline = is_line && D > 1 && axis_aligned(&points, 1);
        Self {
            points,
            x_extent,
            is_line,
            is_vline,
            is_hline,
        }
    }

    /// A straight segment with control points at 1/4 and 3/4 of the chord.
    ///
    /// Tessellates as a straight line while sharing the cubic evaluation
    /// model with curved segments.
    pub fn line(p1: VecN<D>, p2: VecN<D>) -> Self {
        let (c1, c2) = linear_control_points(&p1, &p2);
        Self::new(p1, c1, c2, p2)
    }

    /// Start point.
    pub fn p1(&self) -> VecN<D> {
        self.points[0]
    }

    /// First control point.
    pub fn c1(&self) -> VecN<D> {
        self.points[1]
    }

    /// Second control point.
    pub fn c2(&self) -> VecN<D> {
        self.points[2]
    }

    /// End point.
    pub fn p2(&self) -> VecN<D> {
        self.points[3]
    }

    /// All four control vectors in order.
    pub fn points(&self) -> &[VecN<D>; 4] {
        &self.points
    }

    /// Interval of x covered by the endpoints, `(min, max)`.
    pub fn x_extent(&self) -> (f64, f64) {
        self.x_extent
    }

    /// Width of [`x_extent`](Self::x_extent).
    pub fn x_length(&self) -> f64 {
        self.x_extent.1 - self.x_extent.0
    }

    /// All control points lie on one ray from `p1`.
    pub fn is_line(&self) -> bool {
        self.is_line
    }

    /// A line whose control points share `p1.x`.
    pub fn is_vline(&self) -> bool {
        self.is_vline
    }

    /// A line whose control points share `p1.y`.
    pub fn is_hline(&self) -> bool {
        self.is_hline
    }

    /// Evaluate the segment at parameter `u ∈ [0, 1]` by de Casteljau
    /// reduction. Exact at both endpoints.
    pub fn evaluate(&self, u: f64) -> VecN<D> {
        let [p0, p1, p2, p3] = &self.points;
        let a0 = lerp(p0, p1, u);
        let a1 = lerp(p1, p2, u);
        let a2 = lerp(p2, p3, u);
        let b0 = lerp(&a0, &a1, u);
        let b1 = lerp(&a1, &a2, u);
        lerp(&b0, &b1, u)
    }

    /// Sample the segment at `samples` interior parameters.
    ///
    /// Returns `samples + 2` points at uniform parameter spacing; the first
    /// and last are exactly `p1` and `p2`.
    pub fn tessellate(&self, samples: usize) -> Path<D> {
        let steps = samples + 1;
        let points = (0..=steps)
            .map(|i| self.evaluate(i as f64 / steps as f64))
            .collect();
        Path::new(points)
    }

    /// Polyline length at `samples` interior samples.
    pub fn length(&self, samples: usize) -> f64 {
        self.tessellate(samples).length()
    }

    /// Smallest doubled sample count whose length differs from the previous
    /// probe by at most `threshold`.
    ///
    /// Probing starts at [`INITIAL_FIT_SAMPLES`] and never stops on the first
    /// probe. Smaller thresholds never yield smaller counts.
    ///
    /// # Errors
    ///
    /// [`GeomError::FitDidNotConverge`] after [`MAX_FIT_DOUBLINGS`] doublings.
    pub fn fit(&self, threshold: f64) -> Result<usize> {
        let mut samples = INITIAL_FIT_SAMPLES;
        let mut previous: Option<f64> = None;
        let mut last_change = f64::NAN;

        for _ in 0..=MAX_FIT_DOUBLINGS {
            let estimate = self.length(samples);
            if let Some(last) = previous {
                last_change = (estimate - last).abs();
                if last_change <= threshold {
                    return Ok(samples);
                }
            }
            previous = Some(estimate);
            samples *= 2;
        }

        Err(GeomError::FitDidNotConverge {
            samples: samples / 2,
            last_change,
        })
    }

    /// Find the point on the segment whose x coordinate is `x`.
    ///
    /// Returns an endpoint directly when `x` is within `threshold` of `p1.x`
    /// or `p2.x`. Otherwise runs Newton's method with a forward
    /// finite-difference derivative, clamping the parameter to `[0, 1]`,
    /// until the x residual is within `threshold`. Iteration starts at the
    /// nearer end when `x` is relatively close to an endpoint (see
    /// [`ENDPOINT_RELATIVE_TOLERANCE`]) and at `start_u` otherwise.
    ///
    /// Only segments monotonic in x have a unique answer. For other segments
    /// the root reached from `start_u` is returned and which one that is, is
    /// unspecified.
    ///
    /// # Errors
    ///
    /// [`GeomError::InverseDidNotConverge`] when the iteration cap is hit or
    /// the derivative vanishes.
    pub fn inverse_by_x(&self, x: f64, threshold: f64, start_u: f64) -> Result<VecN<D>> {
        let (start_x, end_x) = (self.points[0][0], self.points[3][0]);
        if (x - start_x).abs() <= threshold {
            return Ok(self.points[0]);
        }
        if (x - end_x).abs() <= threshold {
            return Ok(self.points[3]);
        }

        let near_end = |e: f64| {
            is_close(x, e, ENDPOINT_RELATIVE_TOLERANCE, ENDPOINT_ABSOLUTE_TOLERANCE)
        };
        let mut u = if near_end(start_x) {
            0.0
        } else if near_end(end_x) {
            1.0
        } else {
            start_u.clamp(0.0, 1.0)
        };
        let mut residual = f64::NAN;
        for _ in 0..MAX_NEWTON_ITERATIONS {
            let point = self.evaluate(u);
            residual = point[0] - x;
            if residual.abs() <= threshold {
                return Ok(point);
            }

            let ahead = self.evaluate(u + DERIVATIVE_STEP);
            let dxdu = (ahead[0] - point[0]) / DERIVATIVE_STEP;
            if dxdu == 0.0 || !dxdu.is_finite() {
                break;
            }
            u = (u - residual / dxdu).clamp(0.0, 1.0);
        }

        Err(GeomError::InverseDidNotConverge {
            target: x,
            u,
            residual,
        })
    }
}

fn lerp<const D: usize>(a: &VecN<D>, b: &VecN<D>, u: f64) -> VecN<D> {
    a * (1.0 - u) + b * u
}

/// Control points at 1/4 and 3/4 along the chord from `p1` to `p2`.
pub(crate) fn linear_control_points<const D: usize>(
    p1: &VecN<D>,
    p2: &VecN<D>,
) -> (VecN<D>, VecN<D>) {
    let quarter = (p2 - p1) / 4.0;
    (quarter + p1, quarter * 3.0 + p1)
}

/// Every control offset from `p1` points the same way as the longest one.
fn control_points_collinear<const D: usize>(points: &[VecN<D>; 4]) -> bool {
    let offsets: Vec<VecN<D>> = points[1..].iter().map(|p| p - points[0]).collect();
    let reference = offsets
        .iter()
        .copied()
        .max_by(|a, b| a.norm().total_cmp(&b.norm()));
    let reference = match reference {
        Some(r) if r.norm() > COINCIDENT_POINT_TOLERANCE => r / r.norm(),
        _ => return true,
    };

    offsets
        .iter()
        .filter(|o| o.norm() > COINCIDENT_POINT_TOLERANCE)
        .all(|o| {
            let unit = o / o.norm();
            (unit - reference)
                .iter()
                .all(|d| d.abs() <= LINE_DIRECTION_TOLERANCE)
        })
}

fn axis_aligned<const D: usize>(points: &[VecN<D>; 4], axis: usize) -> bool {
    let origin = points[0][axis];
    points
        .iter()
        .all(|p| (p[axis] - origin).abs() <= AXIS_ALIGNMENT_TOLERANCE)
}
