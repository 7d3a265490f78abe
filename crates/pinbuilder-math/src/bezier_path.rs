//! Chains of cubic Bezier segments.
//!
//! A [`BezierPath`] is read either from drawing path commands
//! ([`BezierPath::from_svgd`]) or from the kernel's flat control-point array
//! ([`BezierPath::from_scad`]). Drawing commands are always funnelled
//! through the control-point array form, so both constructors produce the
//! same internal structure.

use std::fmt;

use tracing::{debug, trace};

use crate::bezier::{linear_control_points, Bezier};
use crate::error::{GeomError, Result};
use crate::path::Path;
use crate::tolerance::INVERSE_X_TOLERANCE;
use crate::vector::{format_component, format_vector, parse_number, parse_vector, DrawingFrame};
use crate::vector::Vec2;

/// An ordered, endpoint-continuous sequence of cubic segments.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierPath<const D: usize> {
    segments: Vec<Bezier<D>>,
}

impl<const D: usize> BezierPath<D> {
    /// Create a chain from segments.
    ///
    /// # Errors
    ///
    /// [`GeomError::EmptyChain`] for no segments, [`GeomError::Discontinuous`]
    /// if a segment does not start exactly where the previous one ends.
    pub fn new(segments: Vec<Bezier<D>>) -> Result<Self> {
        if segments.is_empty() {
            return Err(GeomError::EmptyChain);
        }
        for (i, pair) in segments.windows(2).enumerate() {
            if pair[0].p2() != pair[1].p1() {
                return Err(GeomError::Discontinuous { index: i + 1 });
            }
        }
        Ok(Self { segments })
    }

    /// Parse a flat control-point array `[[x,y],[x,y],...]`.
    ///
    /// Points are grouped in fours with stride three: every segment after the
    /// first starts at the previous segment's end point. Whitespace is ignored.
    ///
    /// # Errors
    ///
    /// [`GeomError::MalformedArray`] for bad bracketing,
    /// [`GeomError::ControlPointCount`] unless there are `3n + 1` points, and
    /// the vector parse errors of [`parse_vector`].
    pub fn from_scad(scad: &str) -> Result<Self> {
        let compact: String = scad.split_whitespace().collect();
        let inner = compact
            .strip_prefix("[[")
            .and_then(|s| s.strip_suffix("]]"))
            .ok_or_else(|| GeomError::MalformedArray(scad.to_string()))?;

        let points = inner
            .split("],[")
            .map(parse_vector::<D>)
            .collect::<Result<Vec<_>>>()?;
        if points.len() < 4 || (points.len() - 1) % 3 != 0 {
            return Err(GeomError::ControlPointCount(points.len()));
        }

        let segments = points
            .windows(4)
            .step_by(3)
            .map(|w| Bezier::new(w[0], w[1], w[2], w[3]))
            .collect();
        Ok(Self { segments })
    }

    /// The segments of this chain.
    pub fn segments(&self) -> &[Bezier<D>] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false: a chain has at least one segment.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Tessellate each segment at its own interior sample count.
    ///
    /// # Errors
    ///
    /// [`GeomError::SampleCountMismatch`] unless there is one count per
    /// segment.
    pub fn tessellate(&self, samples: &[usize]) -> Result<Path<D>> {
        self.check_counts(samples.len())?;
        Ok(self
            .segments
            .iter()
            .zip(samples)
            .fold(Path::default(), |path, (segment, &n)| {
                path + segment.tessellate(n)
            }))
    }

    /// Tessellate every segment at the same interior sample count.
    pub fn tessellate_uniform(&self, samples: usize) -> Path<D> {
        self.segments
            .iter()
            .fold(Path::default(), |path, segment| path + segment.tessellate(samples))
    }

    /// Fitted sample count per segment (see [`Bezier::fit`]).
    pub fn fits(&self, threshold: f64) -> Result<Vec<usize>> {
        let samples = self
            .segments
            .iter()
            .map(|segment| segment.fit(threshold))
            .collect::<Result<Vec<_>>>()?;
        trace!(?samples, threshold, "fitted sample counts");
        Ok(samples)
    }

    /// Polyline length of each segment at its own sample count.
    pub fn segment_lengths(&self, samples: &[usize]) -> Result<Vec<f64>> {
        self.check_counts(samples.len())?;
        Ok(self
            .segments
            .iter()
            .zip(samples)
            .map(|(segment, &n)| segment.length(n))
            .collect())
    }

    /// Polyline length of each segment at a shared sample count.
    pub fn segment_lengths_uniform(&self, samples: usize) -> Vec<f64> {
        self.segments.iter().map(|s| s.length(samples)).collect()
    }

    /// Total polyline length at per-segment sample counts.
    pub fn length(&self, samples: &[usize]) -> Result<f64> {
        Ok(self.segment_lengths(samples)?.iter().sum())
    }

    /// Total polyline length at a shared sample count.
    pub fn length_uniform(&self, samples: usize) -> f64 {
        self.segment_lengths_uniform(samples).iter().sum()
    }

    /// Sum of the segments' x-lengths.
    pub fn x_length(&self) -> f64 {
        self.segments.iter().map(|s| s.x_length()).sum()
    }

    /// This chain as a flat control-point array, the inverse of
    /// [`from_scad`](Self::from_scad).
    pub fn to_scad(&self) -> String {
        let last = self.segments.len() - 1;
        let points: Vec<String> = self
            .segments
            .iter()
            .enumerate()
            .flat_map(|(i, segment)| {
                let take = if i == last { 4 } else { 3 };
                segment.points()[..take].iter().map(format_vector)
            })
            .collect();
        format!("[{}]", points.join(","))
    }

    fn check_counts(&self, actual: usize) -> Result<()> {
        if actual != self.segments.len() {
            return Err(GeomError::SampleCountMismatch {
                expected: self.segments.len(),
                actual,
            });
        }
        Ok(())
    }
}

impl BezierPath<2> {
    /// Build a chain from a drawing path `d` attribute.
    ///
    /// Supports the absolute commands `M`, `L`, `H`, `V`, `C` and `Z`,
    /// separated by whitespace with `x,y` coordinate pairs. Straight commands
    /// become cubics with control points at 1/4 and 3/4 of the chord; `Z`
    /// draws a line back to the first point. Coordinates are mapped into
    /// model space through `frame`.
    ///
    /// # Errors
    ///
    /// [`GeomError::UnknownCommand`], [`GeomError::MissingOperand`],
    /// [`GeomError::NoCurrentPoint`], number/vector parse errors, and
    /// [`GeomError::ControlPointCount`] when the commands do not describe a
    /// single connected chain.
    pub fn from_svgd(svgd: &str, frame: &DrawingFrame) -> Result<Self> {
        let mut tokens = svgd.split_whitespace();
        let mut points: Vec<Vec2> = Vec::new();

        while let Some(command) = tokens.next() {
            match command {
                "M" => {
                    let p1 = frame.parse_point(operand(&mut tokens, 'M')?)?;
                    points.push(p1);
                }
                "L" => {
                    let p1 = current_point(&mut points, 'L')?;
                    let p2 = frame.parse_point(operand(&mut tokens, 'L')?)?;
                    push_line(&mut points, p1, p2);
                }
                "V" => {
                    let p1 = current_point(&mut points, 'V')?;
                    let y = parse_number(operand(&mut tokens, 'V')?)?;
                    push_line(&mut points, p1, Vec2::new(p1.x, frame.y_to_model(y)));
                }
                "H" => {
                    let p1 = current_point(&mut points, 'H')?;
                    let x = parse_number(operand(&mut tokens, 'H')?)?;
                    push_line(&mut points, p1, Vec2::new(frame.x_to_model(x), p1.y));
                }
                "C" => {
                    if points.is_empty() {
                        return Err(GeomError::NoCurrentPoint('C'));
                    }
                    let c1 = frame.parse_point(operand(&mut tokens, 'C')?)?;
                    let c2 = frame.parse_point(operand(&mut tokens, 'C')?)?;
                    let p2 = frame.parse_point(operand(&mut tokens, 'C')?)?;
                    points.extend([c1, c2, p2]);
                }
                "Z" => {
                    let start = points.first().copied().ok_or(GeomError::NoCurrentPoint('Z'))?;
                    let p1 = current_point(&mut points, 'Z')?;
                    push_line(&mut points, p1, start);
                }
                other => return Err(GeomError::UnknownCommand(other.to_string())),
            }
        }

        if points.len() < 4 {
            return Err(GeomError::ControlPointCount(points.len()));
        }
        Self::from_scad(&Path::new(points).to_scad())
    }

    /// Re-emit this chain as a drawing path `d` attribute.
    ///
    /// Each segment is classified independently: a closing line on the last
    /// segment becomes `Z`, then vertical `V`, horizontal `H`, other lines
    /// `L`, and everything else `C`. This is a visual re-export; the input
    /// command sequence is not reproduced verbatim.
    pub fn to_svgd(&self, frame: &DrawingFrame) -> String {
        let start = self.segments[0].p1();
        let last = self.segments.len() - 1;
        let mut output = vec!["M".to_string(), frame.format_point(start)];

        for (i, segment) in self.segments.iter().enumerate() {
            let closes = i == last && segment.is_line() && segment.p2() == start;
            let end = frame.to_drawing(segment.p2());
            if closes {
                output.push("Z".to_string());
            } else if segment.is_vline() {
                output.extend(["V".to_string(), format_component(end.y)]);
            } else if segment.is_hline() {
                output.extend(["H".to_string(), format_component(end.x)]);
            } else if segment.is_line() {
                output.extend(["L".to_string(), frame.format_point(segment.p2())]);
            } else {
                output.extend([
                    "C".to_string(),
                    frame.format_point(segment.c1()),
                    frame.format_point(segment.c2()),
                    frame.format_point(segment.p2()),
                ]);
            }
        }

        output.join(" ")
    }

    /// Lift this chain into 3D using `height` as elevation over arc length,
    /// sampling at [`fits(threshold)`](Self::fits).
    pub fn with_height(&self, height: &BezierPath<2>, threshold: f64) -> Result<Path<3>> {
        let samples = self.fits(threshold)?;
        self.with_height_at(height, &samples)
    }

    /// Lift this chain into 3D at the given per-segment sample counts.
    ///
    /// The cumulative arc length of each tessellated point is scaled into
    /// the height chain's x domain (`height.x_length() / length`, starting
    /// at the height chain's first x). The height segment covering that x is
    /// found by leftmost binary search over segment x upper bounds, clamped
    /// to the last segment, and its y at that x becomes the point's z.
    ///
    /// # Errors
    ///
    /// [`GeomError::SampleCountMismatch`], [`GeomError::ZeroLength`] for a
    /// degenerate centerline, and [`GeomError::InverseDidNotConverge`] from
    /// the height lookup.
    pub fn with_height_at(&self, height: &BezierPath<2>, samples: &[usize]) -> Result<Path<3>> {
        let basepath = self.tessellate(samples)?;
        let length = basepath.length();
        if length <= 0.0 {
            return Err(GeomError::ZeroLength);
        }

        let scale = height.x_length() / length;
        let domain_start = height.segments[0].x_extent().0;
        let upper_bounds: Vec<f64> = height.segments.iter().map(|s| s.x_extent().1).collect();
        let last = height.segments.len() - 1;

        let z = basepath
            .point_distances()
            .iter()
            .map(|distance| {
                let x = domain_start + distance * scale;
                let index = upper_bounds.partition_point(|&bound| bound < x).min(last);
                height.segments[index]
                    .inverse_by_x(x, INVERSE_X_TOLERANCE, 0.5)
                    .map(|p| p.y)
            })
            .collect::<Result<Vec<f64>>>()?;

        debug!(
            points = basepath.len(),
            length,
            height_x_length = height.x_length(),
            "lifted centerline"
        );
        basepath.with_z(&z)
    }
}

impl<const D: usize> fmt::Display for BezierPath<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_scad())
    }
}

fn operand<'a>(tokens: &mut impl Iterator<Item = &'a str>, command: char) -> Result<&'a str> {
    tokens.next().ok_or(GeomError::MissingOperand(command))
}

fn current_point(points: &mut Vec<Vec2>, command: char) -> Result<Vec2> {
    points.pop().ok_or(GeomError::NoCurrentPoint(command))
}

fn push_line(points: &mut Vec<Vec2>, p1: Vec2, p2: Vec2) {
    let (c1, c2) = linear_control_points(&p1, &p2);
    points.extend([p1, c1, c2, p2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn frame(height: f64) -> DrawingFrame {
        DrawingFrame::new(Vec2::new(0.0, height), Vec2::zeros())
    }

    #[test]
    fn test_square_scenario() {
        let square = BezierPath::from_svgd("M 0,0 L 10,0 L 10,10 L 0,10 Z", &frame(20.0)).unwrap();
        assert_eq!(square.len(), 4);
        assert_eq!(square.segments()[3].p2(), square.segments()[0].p1());
        assert_relative_eq!(square.length_uniform(0), 40.0, epsilon = 1e-12);
        assert_eq!(square.segments()[0].p1(), Vec2::new(0.0, 20.0));
    }

    #[test]
    fn test_h_and_v_commands() {
        let chain = BezierPath::from_svgd("M 1,2 H 6 V 8", &frame(10.0)).unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.segments()[0].p2(), Vec2::new(6.0, 8.0));
        assert_eq!(chain.segments()[1].p2(), Vec2::new(6.0, 2.0));
        assert!(chain.segments()[0].is_hline());
        assert!(chain.segments()[1].is_vline());
    }

    #[test]
    fn test_offset_applies_to_all_commands() {
        let f = DrawingFrame::new(Vec2::new(0.0, 10.0), Vec2::new(100.0, 1.0));
        let chain = BezierPath::from_svgd("M 0,0 H 5 V 4", &f).unwrap();
        assert_eq!(chain.segments()[0].p1(), Vec2::new(100.0, 9.0));
        assert_eq!(chain.segments()[0].p2(), Vec2::new(105.0, 9.0));
        assert_eq!(chain.segments()[1].p2(), Vec2::new(105.0, 5.0));
    }

    #[test]
    fn test_curve_command() {
        let chain = BezierPath::from_svgd("M 0,0 C 0,5 10,5 10,0", &frame(0.0)).unwrap();
        assert_eq!(chain.len(), 1);
        let b = &chain.segments()[0];
        assert_eq!(b.c1(), Vec2::new(0.0, -5.0));
        assert!(!b.is_line());
    }

    #[test]
    fn test_unknown_command_is_error() {
        let result = BezierPath::from_svgd("M 0,0 Q 1,1 2,2", &frame(0.0));
        assert_eq!(result, Err(GeomError::UnknownCommand("Q".into())));
    }

    #[test]
    fn test_relative_commands_are_rejected() {
        let result = BezierPath::from_svgd("m 0,0 l 10,0", &frame(0.0));
        assert_eq!(result, Err(GeomError::UnknownCommand("m".into())));
        let result = BezierPath::from_svgd("M 0,0 l 10,0", &frame(0.0));
        assert_eq!(result, Err(GeomError::UnknownCommand("l".into())));
    }

    #[test]
    fn test_missing_operand_is_error() {
        let result = BezierPath::from_svgd("M 0,0 L", &frame(0.0));
        assert_eq!(result, Err(GeomError::MissingOperand('L')));
    }

    #[test]
    fn test_line_without_move_is_error() {
        let result = BezierPath::from_svgd("L 1,1", &frame(0.0));
        assert_eq!(result, Err(GeomError::NoCurrentPoint('L')));
    }

    #[test]
    fn test_second_move_is_rejected() {
        let result = BezierPath::from_svgd("M 0,0 L 1,0 M 5,5 L 6,5", &frame(0.0));
        assert!(matches!(result, Err(GeomError::ControlPointCount(_))));
    }

    #[test]
    fn test_move_only_is_rejected() {
        let result = BezierPath::from_svgd("M 0,0", &frame(0.0));
        assert_eq!(result, Err(GeomError::ControlPointCount(1)));
    }

    #[test]
    fn test_svgd_quantizes_like_scad() {
        let chain = BezierPath::from_svgd("M 0.123456,0 L 1,0", &frame(0.0)).unwrap();
        assert_eq!(chain.segments()[0].p1().x, 0.1235);
    }

    #[test]
    fn test_from_scad_stride_three() {
        let chain =
            BezierPath::<2>::from_scad("[[0,0],[1,0],[2,0],[3,0],[3,1],[3,2],[3,3]]").unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.segments()[1].p1(), Vec2::new(3.0, 0.0));
        assert_eq!(chain.to_scad(), "[[0.0,0.0],[1.0,0.0],[2.0,0.0],[3.0,0.0],[3.0,1.0],[3.0,2.0],[3.0,3.0]]");
    }

    #[test]
    fn test_from_scad_whitespace_and_3d() {
        let chain = BezierPath::<3>::from_scad("[ [0,0,0], [1,0,1],\n [2,0,2], [3,0,3] ]").unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.segments()[0].p2()[2], 3.0);
    }

    #[test]
    fn test_from_scad_errors() {
        assert!(matches!(
            BezierPath::<2>::from_scad("[[0,0],[1,0],[2,0]]"),
            Err(GeomError::ControlPointCount(3))
        ));
        assert!(matches!(
            BezierPath::<2>::from_scad("(0,0)"),
            Err(GeomError::MalformedArray(_))
        ));
        assert!(matches!(
            BezierPath::<2>::from_scad("[[0,0,0],[1,0,0],[2,0,0],[3,0,0]]"),
            Err(GeomError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_new_checks_continuity() {
        let a = Bezier::line(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0));
        let b = Bezier::line(Vec2::new(2.0, 0.0), Vec2::new(3.0, 0.0));
        assert_eq!(
            BezierPath::new(vec![a.clone(), b]),
            Err(GeomError::Discontinuous { index: 1 })
        );
        assert_eq!(BezierPath::<2>::new(vec![]), Err(GeomError::EmptyChain));
        assert!(BezierPath::new(vec![a]).is_ok());
    }

    #[test]
    fn test_tessellate_dedups_joints() {
        let square = BezierPath::from_svgd("M 0,0 L 10,0 L 10,10 L 0,10 Z", &frame(20.0)).unwrap();
        let path = square.tessellate(&[1, 2, 3, 4]).unwrap();
        assert_eq!(path.len(), (1 + 2 + 3 + 4) + 4 + 1);
        assert_eq!(square.tessellate_uniform(0).len(), 5);
    }

    #[test]
    fn test_sample_count_mismatch() {
        let square = BezierPath::from_svgd("M 0,0 L 10,0 L 10,10 L 0,10 Z", &frame(20.0)).unwrap();
        assert_eq!(
            square.tessellate(&[1, 2]),
            Err(GeomError::SampleCountMismatch {
                expected: 4,
                actual: 2
            })
        );
        assert!(square.length(&[0, 0, 0]).is_err());
    }

    #[test]
    fn test_x_length_sums_segments() {
        let chain = BezierPath::<2>::from_scad(
            "[[0,0],[1,1],[2,1],[3,0],[2,-1],[1,-1],[0,0]]",
        )
        .unwrap();
        assert_eq!(chain.x_length(), 6.0);
    }

    #[test]
    fn test_svgd_round_trip_lines() {
        let f = DrawingFrame::new(Vec2::new(50.0, 40.0), Vec2::new(2.0, 3.0));
        let original = "M 1,1 L 5,4 H 12 V 20 L 3,18 Z";
        let chain = BezierPath::from_svgd(original, &f).unwrap();
        let emitted = chain.to_svgd(&f);
        let reparsed = BezierPath::from_svgd(&emitted, &f).unwrap();

        let a = chain.tessellate_uniform(4);
        let b = reparsed.tessellate_uniform(4);
        assert_eq!(a.len(), b.len());
        for (p, q) in a.points().iter().zip(b.points()) {
            assert!((p - q).norm() < 1e-3);
        }
    }

    #[test]
    fn test_svgd_classification() {
        let f = frame(20.0);
        let chain = BezierPath::from_svgd("M 0,0 L 10,0 L 10,10 L 0,10 Z", &f).unwrap();
        assert_eq!(chain.to_svgd(&f), "M 0.0,0.0 H 10.0 V 10.0 H 0.0 Z");

        let vertical = BezierPath::from_svgd("M 3,0 L 3,7", &f).unwrap();
        assert!(vertical.segments()[0].is_vline());
        assert_eq!(vertical.to_svgd(&f), "M 3.0,0.0 V 7.0");

        let diagonal = BezierPath::from_svgd("M 0,0 L 4,3", &f).unwrap();
        assert_eq!(diagonal.to_svgd(&f), "M 0.0,0.0 L 4.0,3.0");

        let curve = BezierPath::from_svgd("M 0,0 C 0,5 10,5 10,0", &f).unwrap();
        assert_eq!(curve.to_svgd(&f), "M 0.0,0.0 C 0.0,5.0 10.0,5.0 10.0,0.0");
    }

    #[test]
    fn test_with_height_ramp_up() {
        let f = frame(0.0);
        let base = BezierPath::from_svgd("M 0,0 L 30,0 L 30,-40", &f).unwrap();
        // centerline length 70, height rises linearly 0 -> 14 over x 0..70
        let height = BezierPath::from_svgd("M 0,0 L 70,-14", &f).unwrap();
        let samples = base.fits(1e-2).unwrap();
        let lifted = base.with_height_at(&height, &samples).unwrap();

        let flat = base.tessellate(&samples).unwrap();
        assert_eq!(lifted.len(), flat.len());
        let distances = flat.point_distances();
        for ((p3, p2), d) in lifted.points().iter().zip(flat.points()).zip(&distances) {
            assert_eq!(p3.x, p2.x);
            assert_eq!(p3.y, p2.y);
            assert!((p3.z - d * 0.2).abs() < 1e-6, "z {} at distance {}", p3.z, d);
        }
    }

    #[test]
    fn test_with_height_multi_segment_profile() {
        let f = frame(0.0);
        let base = BezierPath::from_svgd("M 0,0 L 100,0", &f).unwrap();
        let height = BezierPath::from_svgd("M 0,0 L 40,-10 L 100,-10", &f).unwrap();
        let lifted = base.with_height(&height, 1e-2).unwrap();
        let last = lifted.last().unwrap();
        assert!((last.z - 10.0).abs() < 1e-9);
        for p in lifted.points() {
            let expected = if p.x <= 40.0 { p.x * 0.25 } else { 10.0 };
            assert!((p.z - expected).abs() < 1e-6, "z {} at x {}", p.z, p.x);
        }
    }

    #[test]
    fn test_with_height_offset_domain() {
        let f = frame(0.0);
        let base = BezierPath::from_svgd("M 0,0 L 50,0", &f).unwrap();
        let height = BezierPath::from_svgd("M 200,0 L 250,-5", &f).unwrap();
        let lifted = base.with_height(&height, 1e-2).unwrap();
        assert_eq!(lifted.first().unwrap().z, 0.0);
        assert!((lifted.last().unwrap().z - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_with_height_zero_length() {
        let f = frame(0.0);
        let base = BezierPath::from_svgd("M 1,1 L 1,1", &f).unwrap();
        let height = BezierPath::from_svgd("M 0,0 L 10,0", &f).unwrap();
        assert_eq!(base.with_height(&height, 1e-2), Err(GeomError::ZeroLength));
    }
}
