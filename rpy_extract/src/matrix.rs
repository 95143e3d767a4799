//! Matrix inputs accepted by the extractor.
//!
//! [`RotationMatrix`] and [`HomogeneousTransform`] fix their shape in the
//! type. [`Matrix`] is the dynamic entry point: it is built from nested rows
//! (for instance decoded from JSON) and rejects anything that is not 3x3 or
//! 4x4 with [`RpyError::InvalidArgument`].
//!
//! All matrices are row-major, `m[r][c]` holding the entry at row `r + 1`,
//! column `c + 1`.

use std::ops::Mul;

use serde::{Deserialize, Serialize};

use crate::RpyError;

/// A 3x3 rotation matrix.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(transparent)]
pub struct RotationMatrix(pub [[f64; 3]; 3]);

/// A 4x4 homogeneous transform. Only the top-left 3x3 block is used for
/// angle extraction.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(transparent)]
pub struct HomogeneousTransform(pub [[f64; 4]; 4]);

impl RotationMatrix {
    pub const fn new(rows: [[f64; 3]; 3]) -> Self {
        Self(rows)
    }

    pub const fn identity() -> Self {
        Self([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Rotation about X by `theta` radians.
    pub fn rot_x(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self([[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]])
    }

    /// Rotation about Y by `theta` radians.
    pub fn rot_y(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self([[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]])
    }

    /// Rotation about Z by `theta` radians.
    pub fn rot_z(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
    }

    pub fn rows(&self) -> &[[f64; 3]; 3] {
        &self.0
    }

    pub fn transpose(&self) -> Self {
        let m = &self.0;
        Self([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    pub fn determinant(&self) -> f64 {
        let m = &self.0;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Largest absolute entry-wise difference to `other`.
    pub fn max_abs_diff(&self, other: &RotationMatrix) -> f64 {
        self.0
            .iter()
            .flatten()
            .zip(other.0.iter().flatten())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }

    /// True when the matrix is orthonormal and right-handed within `tolerance`.
    pub fn is_rotation(&self, tolerance: f64) -> bool {
        if !self.0.iter().flatten().all(|v| v.is_finite()) {
            return false;
        }
        let gram = *self * self.transpose();
        gram.max_abs_diff(&Self::identity()) <= tolerance
            && (self.determinant() - 1.0).abs() <= tolerance
    }
}

impl Mul for RotationMatrix {
    type Output = RotationMatrix;

    fn mul(self, rhs: RotationMatrix) -> RotationMatrix {
        let mut result = [[0.0; 3]; 3];
        for (i, row) in result.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.0[i][k] * rhs.0[k][j]).sum();
            }
        }
        RotationMatrix(result)
    }
}

impl Default for HomogeneousTransform {
    fn default() -> Self {
        Self::from_parts(RotationMatrix::identity(), [0.0; 3])
    }
}

impl HomogeneousTransform {
    pub const fn new(rows: [[f64; 4]; 4]) -> Self {
        Self(rows)
    }

    pub fn from_parts(rotation: RotationMatrix, translation: [f64; 3]) -> Self {
        let r = rotation.0;
        Self([
            [r[0][0], r[0][1], r[0][2], translation[0]],
            [r[1][0], r[1][1], r[1][2], translation[1]],
            [r[2][0], r[2][1], r[2][2], translation[2]],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Top-left 3x3 block.
    pub fn rotation(&self) -> RotationMatrix {
        let t = &self.0;
        RotationMatrix([
            [t[0][0], t[0][1], t[0][2]],
            [t[1][0], t[1][1], t[1][2]],
            [t[2][0], t[2][1], t[2][2]],
        ])
    }

    pub fn translation(&self) -> [f64; 3] {
        [self.0[0][3], self.0[1][3], self.0[2][3]]
    }

    /// True when the rotation block is a rotation, the translation is finite
    /// and the bottom row is `[0, 0, 0, 1]`, all within `tolerance`.
    pub fn is_homogeneous(&self, tolerance: f64) -> bool {
        let bottom_ok = self.0[3]
            .iter()
            .zip([0.0, 0.0, 0.0, 1.0])
            .all(|(v, expected)| (v - expected).abs() <= tolerance);
        bottom_ok
            && self.translation().iter().all(|v| v.is_finite())
            && self.rotation().is_rotation(tolerance)
    }
}

/// A single matrix of either accepted shape.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub enum Matrix {
    Rotation(RotationMatrix),
    Homogeneous(HomogeneousTransform),
}

impl Matrix {
    /// Builds a matrix from nested rows, accepting 3x3 and 4x4 only.
    ///
    /// ```
    /// use rpy_extract::Matrix;
    ///
    /// let m = Matrix::from_rows(&[
    ///     vec![1.0, 0.0, 0.0],
    ///     vec![0.0, 1.0, 0.0],
    ///     vec![0.0, 0.0, 1.0],
    /// ]).unwrap();
    /// assert!(matches!(m, Matrix::Rotation(_)));
    ///
    /// assert!(Matrix::from_rows(&[vec![1.0, 0.0], vec![0.0, 1.0]]).is_err());
    /// ```
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, RpyError> {
        let n = rows.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.as_ref().len() != n) {
            return Err(RpyError::invalid(format!(
                "matrix must be 3x3 or 4x4, row {} has {} columns but there are {} rows",
                i + 1,
                row.as_ref().len(),
                n
            )));
        }
        match n {
            3 => {
                let mut m = [[0.0; 3]; 3];
                for (dst, src) in m.iter_mut().zip(rows) {
                    dst.copy_from_slice(src.as_ref());
                }
                Ok(Matrix::Rotation(RotationMatrix(m)))
            }
            4 => {
                let mut m = [[0.0; 4]; 4];
                for (dst, src) in m.iter_mut().zip(rows) {
                    dst.copy_from_slice(src.as_ref());
                }
                Ok(Matrix::Homogeneous(HomogeneousTransform(m)))
            }
            _ => Err(RpyError::invalid(format!(
                "matrix must be 3x3 or 4x4, got {}x{}",
                n, n
            ))),
        }
    }

    /// The rotation block used for extraction.
    pub fn rotation(&self) -> RotationMatrix {
        match self {
            Matrix::Rotation(r) => *r,
            Matrix::Homogeneous(t) => t.rotation(),
        }
    }

    /// Dispatches to [`RotationMatrix::is_rotation`] or
    /// [`HomogeneousTransform::is_homogeneous`].
    pub fn is_valid(&self, tolerance: f64) -> bool {
        match self {
            Matrix::Rotation(r) => r.is_rotation(tolerance),
            Matrix::Homogeneous(t) => t.is_homogeneous(tolerance),
        }
    }
}

impl From<RotationMatrix> for Matrix {
    fn from(value: RotationMatrix) -> Self {
        Matrix::Rotation(value)
    }
}

impl From<HomogeneousTransform> for Matrix {
    fn from(value: HomogeneousTransform) -> Self {
        Matrix::Homogeneous(value)
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = RpyError;

    fn try_from(value: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Matrix::from_rows(&value)
    }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(value: Matrix) -> Self {
        match value {
            Matrix::Rotation(r) => r.0.iter().map(|row| row.to_vec()).collect(),
            Matrix::Homogeneous(t) => t.0.iter().map(|row| row.to_vec()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_elementary_rotations_are_valid() {
        for theta in [-2.5, -FRAC_PI_2, 0.0, 0.3, 1.0, 3.0] {
            assert!(RotationMatrix::rot_x(theta).is_rotation(1e-12));
            assert!(RotationMatrix::rot_y(theta).is_rotation(1e-12));
            assert!(RotationMatrix::rot_z(theta).is_rotation(1e-12));
        }
    }

    #[test]
    fn test_reflection_is_not_a_rotation() {
        let reflection = RotationMatrix([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, -1.0]]);
        assert!(!reflection.is_rotation(1e-6));

        let scaled = RotationMatrix([[2.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.5]]);
        assert!(!scaled.is_rotation(1e-6));

        let nan = RotationMatrix([[f64::NAN, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        assert!(!nan.is_rotation(1e-6));
    }

    #[test]
    fn test_homogeneous_rotation_block() {
        let r = RotationMatrix::rot_z(0.7);
        let t = HomogeneousTransform::from_parts(r, [100.0, -20.0, 5.5]);
        assert_eq!(t.rotation(), r);
        assert_eq!(t.translation(), [100.0, -20.0, 5.5]);
        assert!(t.is_homogeneous(1e-9));

        let mut bad = t;
        bad.0[3][0] = 0.25;
        assert!(!bad.is_homogeneous(1e-9));
    }

    #[test]
    fn test_from_rows_shapes() {
        let four = vec![vec![0.0; 4]; 4];
        assert!(matches!(Matrix::from_rows(&four), Ok(Matrix::Homogeneous(_))));

        let ragged = vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0], vec![0.0, 0.0, 1.0]];
        assert!(matches!(Matrix::from_rows(&ragged), Err(RpyError::InvalidArgument(_))));

        let wide = vec![vec![0.0; 4]; 3];
        assert!(Matrix::from_rows(&wide).is_err());

        let empty: Vec<Vec<f64>> = Vec::new();
        assert!(Matrix::from_rows(&empty).is_err());
    }

    #[test]
    fn test_matrix_json_is_nested_rows() {
        let m: Matrix = serde_json::from_str("[[1,0,0],[0,1,0],[0,0,1]]").unwrap();
        assert_eq!(m, Matrix::Rotation(RotationMatrix::identity()));

        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "[[1.0,0.0,0.0],[0.0,1.0,0.0],[0.0,0.0,1.0]]");

        assert!(serde_json::from_str::<Matrix>("[[1,0],[0,1]]").is_err());
    }
}
