//! Node storage for N-dimensional wireframes
//!
//! Nodes are kept as rows of one flat buffer, each `dims + 1` wide with a
//! trailing homogeneous 1. Transforms are applied to every row at once.

use crate::HMatrix;

/// Row-major matrix of homogeneous node coordinates, shape `(len, dims + 1)`
#[derive(Clone, Debug, PartialEq)]
pub struct NodeMatrix {
    dims: usize,
    data: Vec<f64>,
}

impl NodeMatrix {
    /// Create an empty node matrix for `dims` spatial dimensions
    pub fn new(dims: usize) -> Self {
        Self {
            dims,
            data: Vec::new(),
        }
    }

    /// Create an empty node matrix with room for `capacity` nodes
    pub fn with_capacity(dims: usize, capacity: usize) -> Self {
        Self {
            dims,
            data: Vec::with_capacity(capacity * (dims + 1)),
        }
    }

    /// Build from spatial coordinates, appending the homogeneous 1 to each point
    pub fn from_points<P: AsRef<[f64]>>(dims: usize, points: &[P]) -> Self {
        let mut nodes = Self::with_capacity(dims, points.len());
        for point in points {
            nodes.push_point(point.as_ref());
        }
        nodes
    }

    /// Append one spatial point (without the homogeneous component)
    pub fn push_point(&mut self, point: &[f64]) {
        assert_eq!(
            point.len(),
            self.dims,
            "point has {} coordinates, expected {}",
            point.len(),
            self.dims
        );
        self.data.extend_from_slice(point);
        self.data.push(1.0);
    }

    /// Number of spatial dimensions
    #[inline]
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Width of each row (`dims + 1`)
    #[inline]
    pub fn width(&self) -> usize {
        self.dims + 1
    }

    /// Number of nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len() / self.width()
    }

    /// Whether there are no nodes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Homogeneous coordinates of node `index`
    #[inline]
    pub fn row(&self, index: usize) -> &[f64] {
        let w = self.width();
        &self.data[index * w..(index + 1) * w]
    }

    /// Iterate over all node rows
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.width())
    }

    /// One coordinate of one node
    #[inline]
    pub fn coord(&self, index: usize, dim: usize) -> f64 {
        self.data[index * self.width() + dim]
    }

    /// Apply a transform to every node: `nodes = nodes · matrix`
    pub fn transform(&mut self, matrix: &HMatrix) {
        let w = self.width();
        assert_eq!(
            matrix.size(),
            w,
            "a {}x{} matrix cannot transform {}-dimensional nodes",
            matrix.size(),
            matrix.size(),
            self.dims
        );

        let mut scratch = vec![0.0; w];
        for row in self.data.chunks_exact_mut(w) {
            for (j, out) in scratch.iter_mut().enumerate() {
                *out = (0..w).map(|k| row[k] * matrix[(k, j)]).sum();
            }
            row.copy_from_slice(&scratch);
        }
    }

    /// Largest absolute difference between matching coordinates
    ///
    /// Returns `f64::INFINITY` when the shapes differ.
    pub fn max_abs_diff(&self, other: &NodeMatrix) -> f64 {
        if self.dims != other.dims || self.data.len() != other.data.len() {
            return f64::INFINITY;
        }
        self.data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> NodeMatrix {
        NodeMatrix::from_points(2, &[[0.0, 0.0], [2.0, 0.0], [0.0, 2.0], [2.0, 2.0]])
    }

    #[test]
    fn test_push_appends_homogeneous_one() {
        let nodes = square();
        assert_eq!(nodes.len(), 4);
        assert_eq!(nodes.width(), 3);
        assert_eq!(nodes.row(3), &[2.0, 2.0, 1.0]);
        assert!(nodes.rows().all(|r| r[2] == 1.0));
    }

    #[test]
    fn test_transform_translation() {
        let mut nodes = square();
        nodes.transform(&HMatrix::translation(&[5.0, -1.0]));
        assert_eq!(nodes.row(0), &[5.0, -1.0, 1.0]);
        assert_eq!(nodes.row(3), &[7.0, 1.0, 1.0]);
    }

    #[test]
    fn test_transform_round_trip() {
        let original = square();
        let mut nodes = original.clone();
        nodes.transform(&HMatrix::rotation(2, 0, 1, 0.4));
        nodes.transform(&HMatrix::rotation(2, 0, 1, -0.4));
        assert!(nodes.max_abs_diff(&original) < 1e-12);
    }

    #[test]
    fn test_max_abs_diff_shape_mismatch() {
        let a = square();
        let b = NodeMatrix::new(2);
        assert_eq!(a.max_abs_diff(&b), f64::INFINITY);
    }

    #[test]
    #[should_panic(expected = "cannot transform")]
    fn test_transform_rejects_wrong_size() {
        let mut nodes = square();
        nodes.transform(&HMatrix::identity(5));
    }

    #[test]
    fn test_empty() {
        let nodes = NodeMatrix::new(4);
        assert!(nodes.is_empty());
        assert_eq!(nodes.len(), 0);
    }
}
