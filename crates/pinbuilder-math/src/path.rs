//! Sampled polylines.

use std::fmt;
use std::ops::Add;

use crate::error::{GeomError, Result};
use crate::vector::{format_vector, Vec3, VecN};

/// An ordered sequence of points joined by straight segments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path<const D: usize> {
    points: Vec<VecN<D>>,
}

impl<const D: usize> Path<D> {
    /// Create a path from points.
    pub fn new(points: Vec<VecN<D>>) -> Self {
        Self { points }
    }

    /// The points of this path.
    pub fn points(&self) -> &[VecN<D>] {
        &self.points
    }

    /// Consume the path, returning its points.
    pub fn into_points(self) -> Vec<VecN<D>> {
        self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First point, if any.
    pub fn first(&self) -> Option<&VecN<D>> {
        self.points.first()
    }

    /// Last point, if any.
    pub fn last(&self) -> Option<&VecN<D>> {
        self.points.last()
    }

    /// Append `other`, dropping its first point when it equals (exactly)
    /// this path's last point.
    pub fn concat(mut self, other: Path<D>) -> Self {
        let skip = match (self.points.last(), other.points.first()) {
            (Some(end), Some(start)) if end == start => 1,
            _ => 0,
        };
        self.points.extend(other.points.into_iter().skip(skip));
        self
    }

    /// Distance along the path from the start to each point.
    pub fn point_distances(&self) -> Vec<f64> {
        let mut total = 0.0;
        let mut distances = Vec::with_capacity(self.points.len());
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                total += (p - self.points[i - 1]).norm();
            }
            distances.push(total);
        }
        distances
    }

    /// Total length of all straight segments.
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }

    /// This path in the kernel's nested array syntax, `[[x,y],...]`.
    pub fn to_scad(&self) -> String {
        let points: Vec<String> = self.points.iter().map(format_vector).collect();
        format!("[{}]", points.join(","))
    }
}

impl Path<2> {
    /// Lift into 3D by appending one z value per point.
    ///
    /// # Errors
    ///
    /// [`GeomError::SampleCountMismatch`] if `z` does not have one entry per
    /// point.
    pub fn with_z(&self, z: &[f64]) -> Result<Path<3>> {
        if z.len() != self.points.len() {
            return Err(GeomError::SampleCountMismatch {
                expected: self.points.len(),
                actual: z.len(),
            });
        }
        Ok(Path::new(
            self.points
                .iter()
                .zip(z)
                .map(|(p, z)| Vec3::new(p.x, p.y, *z))
                .collect(),
        ))
    }
}

impl<const D: usize> Add for Path<D> {
    type Output = Path<D>;

    fn add(self, other: Path<D>) -> Path<D> {
        self.concat(other)
    }
}

impl<const D: usize> fmt::Display for Path<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_scad())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vec2;

    fn path(points: &[(f64, f64)]) -> Path<2> {
        Path::new(points.iter().map(|&(x, y)| Vec2::new(x, y)).collect())
    }

    #[test]
    fn test_concat_shared_endpoint() {
        let a = path(&[(0.0, 0.0), (1.0, 0.0)]);
        let b = path(&[(1.0, 0.0), (1.0, 1.0)]);
        let joined = a + b;
        assert_eq!(joined, path(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]));
    }

    #[test]
    fn test_concat_disjoint_keeps_all() {
        let a = path(&[(0.0, 0.0), (1.0, 0.0)]);
        let b = path(&[(2.0, 0.0), (3.0, 0.0)]);
        assert_eq!((a + b).len(), 4);
    }

    #[test]
    fn test_concat_with_empty() {
        let a = path(&[(0.0, 0.0), (1.0, 0.0)]);
        assert_eq!(Path::default() + a.clone(), a);
        assert_eq!(a.clone() + Path::default(), a);
    }

    #[test]
    fn test_point_distances() {
        let p = path(&[(0.0, 0.0), (3.0, 4.0), (3.0, 10.0)]);
        assert_eq!(p.point_distances(), vec![0.0, 5.0, 11.0]);
        assert!((p.length() - 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_path_queries() {
        let p: Path<2> = Path::default();
        assert_eq!(p.length(), 0.0);
        assert!(p.point_distances().is_empty());
        assert_eq!(p.to_scad(), "[]");
    }

    #[test]
    fn test_to_scad() {
        let p = path(&[(0.0, 1.5), (2.25, -3.0)]);
        assert_eq!(p.to_scad(), "[[0.0,1.5],[2.25,-3.0]]");
        assert_eq!(p.to_string(), p.to_scad());
    }

    #[test]
    fn test_with_z() {
        let p = path(&[(0.0, 0.0), (1.0, 2.0)]);
        let lifted = p.with_z(&[5.0, 6.0]).unwrap();
        assert_eq!(lifted.points()[1], Vec3::new(1.0, 2.0, 6.0));
        assert_eq!(lifted.to_scad(), "[[0.0,0.0,5.0],[1.0,2.0,6.0]]");
    }

    #[test]
    fn test_with_z_count_mismatch() {
        let p = path(&[(0.0, 0.0), (1.0, 2.0)]);
        assert_eq!(
            p.with_z(&[1.0]),
            Err(GeomError::SampleCountMismatch {
                expected: 2,
                actual: 1
            })
        );
    }
}
