//! Conversions between the extractor's matrix types and nalgebra.
//!
//! Enabled with the `nalgebra-support` feature:
//!
//! ```toml
//! [dependencies]
//! rpy_extract = { version = "0.1", features = ["nalgebra-support"] }
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use nalgebra::{Isometry3, Translation3, UnitQuaternion};
//! use rpy_extract::{rotation_to_rpy, HomogeneousTransform, RpyOptions};
//!
//! let iso = Isometry3::from_parts(
//!     Translation3::new(100.0, 200.0, 300.0),
//!     UnitQuaternion::from_euler_angles(0.1, 0.2, 0.3),
//! );
//! let t: HomogeneousTransform = iso.into();
//! let (angles, _) = rotation_to_rpy(&t.into(), &RpyOptions::default()).unwrap();
//! ```
//!
//! # Notes
//!
//! - nalgebra's `euler_angles()` is the ZYX sequence: `(roll, pitch, yaw)`
//!   maps to `(angle1, angle2, angle3)`.
//! - `Rotation3` built from a [`RotationMatrix`] is not re-orthonormalized.

use nalgebra::{Isometry3, Matrix3, Matrix4, Rotation3, UnitQuaternion};

use crate::{EulerAngles, HomogeneousTransform, RotationMatrix};

impl From<Matrix3<f64>> for RotationMatrix {
    fn from(m: Matrix3<f64>) -> Self {
        let mut rows = [[0.0; 3]; 3];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = m[(r, c)];
            }
        }
        RotationMatrix(rows)
    }
}

impl From<&Rotation3<f64>> for RotationMatrix {
    fn from(rot: &Rotation3<f64>) -> Self {
        (*rot.matrix()).into()
    }
}

impl From<Rotation3<f64>> for RotationMatrix {
    fn from(rot: Rotation3<f64>) -> Self {
        (&rot).into()
    }
}

impl From<UnitQuaternion<f64>> for RotationMatrix {
    fn from(q: UnitQuaternion<f64>) -> Self {
        q.to_rotation_matrix().into()
    }
}

impl From<RotationMatrix> for Matrix3<f64> {
    fn from(r: RotationMatrix) -> Self {
        let m = r.0;
        Matrix3::new(
            m[0][0], m[0][1], m[0][2],
            m[1][0], m[1][1], m[1][2],
            m[2][0], m[2][1], m[2][2],
        )
    }
}

impl From<RotationMatrix> for Rotation3<f64> {
    fn from(r: RotationMatrix) -> Self {
        Rotation3::from_matrix_unchecked(r.into())
    }
}

impl From<Matrix4<f64>> for HomogeneousTransform {
    fn from(m: Matrix4<f64>) -> Self {
        let mut rows = [[0.0; 4]; 4];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = m[(r, c)];
            }
        }
        HomogeneousTransform(rows)
    }
}

impl From<Isometry3<f64>> for HomogeneousTransform {
    fn from(iso: Isometry3<f64>) -> Self {
        iso.to_homogeneous().into()
    }
}

impl From<&Isometry3<f64>> for HomogeneousTransform {
    fn from(iso: &Isometry3<f64>) -> Self {
        iso.to_homogeneous().into()
    }
}

impl EulerAngles {
    /// nalgebra's roll/pitch/yaw, i.e. the ZYX sequence in radians.
    pub fn from_nalgebra(rot: &Rotation3<f64>) -> Self {
        let (roll, pitch, yaw) = rot.euler_angles();
        Self::new(roll, pitch, yaw)
    }
}
