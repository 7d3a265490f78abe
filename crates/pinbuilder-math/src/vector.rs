//! Vector aliases, text (de)serialization and drawing-space mapping.

use nalgebra::SVector;

use crate::error::{GeomError, Result};
use crate::tolerance::TEXT_DECIMALS;

/// A vector with `D` components.
pub type VecN<const D: usize> = SVector<f64, D>;

/// A point or direction in the drawing plane.
pub type Vec2 = nalgebra::Vector2<f64>;

/// A point or direction in 3D model space.
pub type Vec3 = nalgebra::Vector3<f64>;

/// Round a component to the fixed text precision.
///
/// Negative zero is folded into positive zero.
pub fn round_component(value: f64) -> f64 {
    let scale = 10f64.powi(TEXT_DECIMALS);
    (value * scale).round() / scale + 0.0
}

/// Format a component at the fixed text precision (`3.0`, `12.3457`).
pub fn format_component(value: f64) -> String {
    format!("{:?}", round_component(value))
}

/// Format a vector as `[x,y]` / `[x,y,z]` in the kernel's array syntax.
pub fn format_vector<const D: usize>(v: &VecN<D>) -> String {
    let parts: Vec<String> = v.iter().map(|c| format_component(*c)).collect();
    format!("[{}]", parts.join(","))
}

/// Parse a single number, tolerating surrounding whitespace.
pub fn parse_number(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    trimmed
        .parse::<f64>()
        .map_err(|_| GeomError::InvalidNumber(trimmed.to_string()))
}

/// Parse comma-separated components (`"1.5,2"`) into a `D`-vector.
///
/// # Errors
///
/// Returns [`GeomError::InvalidNumber`] for a bad component and
/// [`GeomError::DimensionMismatch`] if the component count is not `D`.
pub fn parse_vector<const D: usize>(raw: &str) -> Result<VecN<D>> {
    let components = raw
        .split(',')
        .map(parse_number)
        .collect::<Result<Vec<f64>>>()?;
    if components.len() != D {
        return Err(GeomError::DimensionMismatch {
            expected: D,
            actual: components.len(),
            raw: raw.to_string(),
        });
    }
    Ok(VecN::<D>::from_column_slice(&components))
}

/// The coordinate frame a drawing element was read in.
///
/// Drawings use a y-down page space; model space is y-up with the origin at
/// the bottom of the page. `offset` is the translation accumulated from
/// enclosing groups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawingFrame {
    /// Document width and height.
    pub size: Vec2,
    /// Accumulated group translation.
    pub offset: Vec2,
}

impl DrawingFrame {
    /// Create a frame from a document size and accumulated translation.
    pub fn new(size: Vec2, offset: Vec2) -> Self {
        Self { size, offset }
    }

    /// The same document size with `extra` added to the translation.
    pub fn translated(&self, extra: Vec2) -> Self {
        Self {
            size: self.size,
            offset: self.offset + extra,
        }
    }

    /// Map a drawing-space point into model space.
    pub fn to_model(&self, p: Vec2) -> Vec2 {
        let shifted = p + self.offset;
        Vec2::new(shifted.x, self.size.y - shifted.y)
    }

    /// Map a model-space point back into drawing space.
    pub fn to_drawing(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x, self.size.y - p.y) - self.offset
    }

    /// Map a lone drawing x coordinate (an `H` operand).
    pub fn x_to_model(&self, x: f64) -> f64 {
        x + self.offset.x
    }

    /// Map a lone drawing y coordinate (a `V` operand).
    pub fn y_to_model(&self, y: f64) -> f64 {
        self.size.y - (y + self.offset.y)
    }

    /// Parse an `x,y` drawing coordinate into model space.
    pub fn parse_point(&self, raw: &str) -> Result<Vec2> {
        Ok(self.to_model(parse_vector::<2>(raw)?))
    }

    /// Format a model-space point as an `x,y` drawing coordinate.
    pub fn format_point(&self, p: Vec2) -> String {
        let q = self.to_drawing(p);
        format!("{},{}", format_component(q.x), format_component(q.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_vector_rounds() {
        let v = Vec3::new(1.0, 2.123456, -0.00001);
        assert_eq!(format_vector(&v), "[1.0,2.1235,0.0]");
    }

    #[test]
    fn test_parse_vector_2d() {
        let v: Vec2 = parse_vector(" 1.5, -2").unwrap();
        assert_eq!(v, Vec2::new(1.5, -2.0));
    }

    #[test]
    fn test_parse_vector_dimension_mismatch() {
        let result = parse_vector::<2>("1,2,3");
        assert!(matches!(
            result,
            Err(GeomError::DimensionMismatch {
                expected: 2,
                actual: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_parse_vector_bad_number() {
        let result = parse_vector::<2>("1,abc");
        assert_eq!(result, Err(GeomError::InvalidNumber("abc".into())));
    }

    #[test]
    fn test_frame_round_trip() {
        let frame = DrawingFrame::new(Vec2::new(300.0, 200.0), Vec2::new(5.0, -7.5));
        let p = Vec2::new(12.0, 34.0);
        let model = frame.to_model(p);
        assert_eq!(model, Vec2::new(17.0, 173.5));
        assert_eq!(frame.to_drawing(model), p);
    }

    #[test]
    fn test_frame_single_axis() {
        let frame = DrawingFrame::new(Vec2::new(0.0, 20.0), Vec2::new(1.0, 2.0));
        assert_eq!(frame.x_to_model(3.0), 4.0);
        assert_eq!(frame.y_to_model(3.0), 15.0);
        assert_eq!(frame.parse_point("3,3").unwrap(), Vec2::new(4.0, 15.0));
    }

    #[test]
    fn test_translated_accumulates() {
        let frame = DrawingFrame::new(Vec2::new(10.0, 10.0), Vec2::new(1.0, 1.0));
        let inner = frame.translated(Vec2::new(2.0, -3.0));
        assert_eq!(inner.offset, Vec2::new(3.0, -2.0));
        assert_eq!(inner.size, frame.size);
    }
}
