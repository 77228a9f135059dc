//! Homogeneous transform matrices for N-dimensional space
//!
//! Matrices are square with `dims + 1` rows and are applied to row vectors by
//! right-multiplication (`p' = p · M`). With that convention:
//!
//! - a rotation in the plane `(d1, d2)` lives in the 2x2 block at rows/cols `d1, d2`
//! - a uniform scale is the diagonal of the top-left `dims x dims` block
//! - a translation is the last row's first `dims` entries

use std::ops::{Index, IndexMut};

/// Square homogeneous matrix, stored row-major
#[derive(Clone, Debug, PartialEq)]
pub struct HMatrix {
    size: usize,
    data: Vec<f64>,
}

impl HMatrix {
    /// Identity matrix with `size` rows and columns
    pub fn identity(size: usize) -> Self {
        let mut data = vec![0.0; size * size];
        for i in 0..size {
            data[i * size + i] = 1.0;
        }
        Self { size, data }
    }

    /// Number of rows (and columns)
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of spatial dimensions this matrix transforms
    #[inline]
    pub fn dims(&self) -> usize {
        self.size - 1
    }

    /// Create a rotation matrix in the plane spanned by `dim1` and `dim2`.
    ///
    /// # Arguments
    /// * `dims` - Number of spatial dimensions (the matrix is `dims + 1` square)
    /// * `dim1`, `dim2` - Axis indices forming the rotation plane
    /// * `angle` - Rotation angle in radians
    ///
    /// # Example
    /// ```
    /// use hypercube_math::HMatrix;
    /// // XW rotation in a tesseract
    /// let m = HMatrix::rotation(4, 0, 3, 0.25);
    /// assert_eq!(m.size(), 5);
    /// ```
    pub fn rotation(dims: usize, dim1: usize, dim2: usize, angle: f64) -> Self {
        Self::identity(dims + 1).with_rotation(dim1, dim2, angle)
    }

    /// Overwrite the `(dim1, dim2)` block of this matrix with a plane rotation.
    ///
    /// Used to compose a second plane into the same matrix for a simultaneous
    /// dual-plane rotation. The two planes may share at most one axis; the
    /// shared diagonal entry ends up holding the second plane's cosine.
    pub fn with_rotation(mut self, dim1: usize, dim2: usize, angle: f64) -> Self {
        let dims = self.dims();
        assert!(
            dim1 < dims && dim2 < dims,
            "rotation plane ({}, {}) out of range for {} dimensions",
            dim1,
            dim2,
            dims
        );
        assert_ne!(dim1, dim2, "rotation plane needs two distinct axes");

        let (sn, cs) = angle.sin_cos();
        self[(dim1, dim1)] = cs;
        self[(dim1, dim2)] = -sn;
        self[(dim2, dim1)] = sn;
        self[(dim2, dim2)] = cs;
        self
    }

    /// Uniform scale along every spatial axis; the homogeneous entry stays 1.
    pub fn scale(dims: usize, factor: f64) -> Self {
        let mut m = Self::identity(dims + 1);
        for d in 0..dims {
            m[(d, d)] = factor;
        }
        m
    }

    /// Translation by `vector` (one entry per spatial axis)
    pub fn translation(vector: &[f64]) -> Self {
        let dims = vector.len();
        let mut m = Self::identity(dims + 1);
        m.data[dims * (dims + 1)..dims * (dims + 1) + dims].copy_from_slice(vector);
        m
    }

    /// Multiply two matrices: `self · other`
    ///
    /// With row vectors this applies `self` first, then `other`.
    pub fn mul(&self, other: &HMatrix) -> HMatrix {
        assert_eq!(self.size, other.size, "matrix size mismatch");
        let n = self.size;
        let mut result = HMatrix {
            size: n,
            data: vec![0.0; n * n],
        };
        for i in 0..n {
            for k in 0..n {
                let a = self.data[i * n + k];
                if a == 0.0 {
                    continue;
                }
                for j in 0..n {
                    result.data[i * n + j] += a * other.data[k * n + j];
                }
            }
        }
        result
    }

    /// Transform a single homogeneous row vector: `p · M`
    pub fn apply(&self, point: &[f64]) -> Vec<f64> {
        assert_eq!(point.len(), self.size, "point width does not match matrix");
        let n = self.size;
        (0..n)
            .map(|j| (0..n).map(|k| point[k] * self.data[k * n + j]).sum())
            .collect()
    }

    /// Borrow one row of the matrix
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.size..(row + 1) * self.size]
    }
}

impl Index<(usize, usize)> for HMatrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.data[row * self.size + col]
    }
}

impl IndexMut<(usize, usize)> for HMatrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.data[row * self.size + col]
    }
}
