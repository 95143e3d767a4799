//! Roll-pitch-yaw angles from rotation matrices.
//!
//! The crate decomposes a 3x3 rotation (or the rotation block of a 4x4
//! homogeneous transform) into three angles for one of three rotation
//! orders: ZYX (`vehicle`, the default), XYZ (`arm`) and YXZ (`camera`).
//! Gimbal lock is detected and resolved deterministically, and the middle
//! angle is always computed from the best conditioned of four equivalent
//! formulas.
//!
//! # Examples
//!
//! ```
//! use rpy_extract::{rotation_to_rpy, Matrix, RotationMatrix, RotationSequence, RpyOptions};
//!
//! let m = Matrix::from(RotationMatrix::rot_y(0.25));
//! let opts = RpyOptions::default().with_sequence("arm".parse().unwrap());
//!
//! let (angles, sequence) = rotation_to_rpy(&m, &opts).unwrap();
//! assert_eq!(sequence, RotationSequence::Xyz);
//! assert!((angles.angle2 - 0.25).abs() < 1e-12);
//! ```

use tracing::{trace, warn};

pub mod errors;
pub use errors::*;

pub mod sequence;
pub use sequence::RotationSequence;

pub mod matrix;
pub use matrix::{HomogeneousTransform, Matrix, RotationMatrix};

pub mod extract;
pub use extract::{extract, EulerAngles};

pub mod compose;
pub use compose::{compose, compose_transform};

pub mod options;
pub use options::RpyOptions;

/// Conversions to and from `nalgebra` types.
#[cfg(feature = "nalgebra-support")]
pub mod transforms;

/// Extracts the angles of a single matrix.
///
/// Returns the angles together with the sequence that was used, already in
/// canonical form. Fails with [`RpyError::InvalidArgument`] when the options
/// are invalid or, with `check_validity` set, when the matrix is not a proper
/// rotation or homogeneous transform.
pub fn rotation_to_rpy(
    matrix: &Matrix,
    options: &RpyOptions,
) -> Result<(EulerAngles, RotationSequence), RpyError> {
    options.validate()?;
    let angles = extract_checked(matrix, options)?;
    Ok((angles, options.sequence))
}

/// Extracts the angles of every matrix in `matrices`.
///
/// Row `i` of the result belongs to `matrices[i]` and is identical to what
/// [`rotation_to_rpy`] returns for that matrix alone. With the `parallel`
/// feature the matrices are processed on the rayon thread pool; ordering and
/// values are unchanged.
pub fn rotation_to_rpy_batch(
    matrices: &[Matrix],
    options: &RpyOptions,
) -> Result<(Vec<EulerAngles>, RotationSequence), RpyError> {
    options.validate()?;
    trace!(count = matrices.len(), sequence = %options.sequence, "extracting batch");

    let at = |i: usize, err: RpyError| match err {
        RpyError::InvalidArgument(msg) => RpyError::InvalidArgument(format!("matrix {}: {}", i, msg)),
    };

    #[cfg(feature = "parallel")]
    let angles = {
        use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};
        matrices
            .par_iter()
            .enumerate()
            .map(|(i, m)| extract_checked(m, options).map_err(|e| at(i, e)))
            .collect::<Result<Vec<_>, _>>()?
    };

    #[cfg(not(feature = "parallel"))]
    let angles = matrices
        .iter()
        .enumerate()
        .map(|(i, m)| extract_checked(m, options).map_err(|e| at(i, e)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok((angles, options.sequence))
}

/// Builds the rotation for `angles`, reading them in degrees when
/// `options.degrees` is set.
pub fn rpy_to_rotation(angles: &EulerAngles, options: &RpyOptions) -> RotationMatrix {
    let radians = if options.degrees { angles.to_radians() } else { *angles };
    compose(&radians, options.sequence)
}

/// Like [`rpy_to_rotation`] with a translation, as a homogeneous transform.
pub fn rpy_to_transform(
    angles: &EulerAngles,
    translation: [f64; 3],
    options: &RpyOptions,
) -> HomogeneousTransform {
    HomogeneousTransform::from_parts(rpy_to_rotation(angles, options), translation)
}

fn extract_checked(matrix: &Matrix, options: &RpyOptions) -> Result<EulerAngles, RpyError> {
    if options.check_validity && !matrix.is_valid(options.tolerance) {
        let kind = match matrix {
            Matrix::Rotation(_) => "rotation matrix",
            Matrix::Homogeneous(_) => "homogeneous transform",
        };
        warn!(tolerance = options.tolerance, "rejecting input that is not a valid {}", kind);
        return Err(RpyError::invalid(format!(
            "not a valid {} (tolerance {})",
            kind, options.tolerance
        )));
    }

    let angles = extract(&matrix.rotation(), options.sequence);
    Ok(if options.degrees { angles.to_degrees() } else { angles })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_homogeneous_ignores_translation() {
        let r = compose(&EulerAngles::new(0.2, -0.3, 0.4), RotationSequence::Zyx);
        let t = HomogeneousTransform::from_parts(r, [500.0, -12.0, 3.0]);

        let opts = RpyOptions::default();
        let (from_r, _) = rotation_to_rpy(&r.into(), &opts).unwrap();
        let (from_t, _) = rotation_to_rpy(&t.into(), &opts).unwrap();
        assert_eq!(from_r, from_t);
    }

    #[test]
    fn test_validity_check_rejects_non_rotation() {
        let skewed = RotationMatrix::new([[1.0, 0.2, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        let opts = RpyOptions::default().with_validity_check(1e-6);

        let err = rotation_to_rpy(&skewed.into(), &opts).unwrap_err();
        assert!(matches!(err, RpyError::InvalidArgument(_)));

        // unchecked extraction still produces angles
        assert!(rotation_to_rpy(&skewed.into(), &RpyOptions::default()).is_ok());
    }

    #[test]
    fn test_validity_check_rejects_bad_bottom_row() {
        let mut t = HomogeneousTransform::default();
        t.0[3][3] = 2.0;
        let opts = RpyOptions::default().with_validity_check(1e-6);
        assert!(rotation_to_rpy(&t.into(), &opts).is_err());
    }

    #[test]
    fn test_batch_error_names_the_matrix() {
        let good = Matrix::from(RotationMatrix::identity());
        let bad = Matrix::from(RotationMatrix::new([[2.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]));
        let opts = RpyOptions::default().with_validity_check(1e-6);

        let err = rotation_to_rpy_batch(&[good, good, bad], &opts).unwrap_err();
        assert!(err.to_string().contains("matrix 2"), "{}", err);
    }

    #[test]
    fn test_invalid_options_fail_before_extraction() {
        let opts = RpyOptions {
            check_validity: true,
            tolerance: -1.0,
            ..RpyOptions::default()
        };
        assert!(rotation_to_rpy(&RotationMatrix::identity().into(), &opts).is_err());
        assert!(rotation_to_rpy_batch(&[], &opts).is_err());
    }

    #[test]
    fn test_unused_tolerance_does_not_block_extraction() {
        let opts = RpyOptions {
            tolerance: 0.0,
            ..RpyOptions::default()
        };
        let (angles, _) = rotation_to_rpy(&RotationMatrix::rot_x(0.5).into(), &opts).unwrap();
        assert!((angles.angle1 - 0.5).abs() < 1e-12);
        assert!(rotation_to_rpy_batch(&[], &opts).unwrap().0.is_empty());
    }

    #[test]
    fn test_empty_batch() {
        let (angles, seq) = rotation_to_rpy_batch(&[], &RpyOptions::default()).unwrap();
        assert!(angles.is_empty());
        assert_eq!(seq, RotationSequence::Zyx);
    }

    #[test]
    fn test_rpy_to_rotation_reads_degrees() {
        let opts = RpyOptions::new(true, RotationSequence::Yxz);
        let r = rpy_to_rotation(&EulerAngles::new(0.0, 0.0, 90.0), &opts);
        assert!(r.max_abs_diff(&RotationMatrix::rot_y(std::f64::consts::FRAC_PI_2)) < 1e-15);

        let t = rpy_to_transform(&EulerAngles::new(10.0, 20.0, 30.0), [1.0, 1.0, 1.0], &opts);
        let (angles, _) = rotation_to_rpy(&t.into(), &opts).unwrap();
        assert!((angles.angle1 - 10.0).abs() < 1e-9);
        assert!((angles.angle2 - 20.0).abs() < 1e-9);
        assert!((angles.angle3 - 30.0).abs() < 1e-9);
    }
}
