//! Angles back to matrices, the inverse of [`crate::extract`].

use crate::{EulerAngles, HomogeneousTransform, RotationMatrix, RotationSequence};

/// Builds the rotation described by `angles` (radians) in `sequence` order.
///
/// * `Zyx` - `Rz(angle3) * Ry(angle2) * Rx(angle1)`
/// * `Xyz` - `Rx(angle3) * Ry(angle2) * Rz(angle1)`
/// * `Yxz` - `Ry(angle3) * Rx(angle2) * Rz(angle1)`
pub fn compose(angles: &EulerAngles, sequence: RotationSequence) -> RotationMatrix {
    let EulerAngles { angle1, angle2, angle3 } = *angles;
    match sequence {
        RotationSequence::Zyx => {
            RotationMatrix::rot_z(angle3) * RotationMatrix::rot_y(angle2) * RotationMatrix::rot_x(angle1)
        }
        RotationSequence::Xyz => {
            RotationMatrix::rot_x(angle3) * RotationMatrix::rot_y(angle2) * RotationMatrix::rot_z(angle1)
        }
        RotationSequence::Yxz => {
            RotationMatrix::rot_y(angle3) * RotationMatrix::rot_x(angle2) * RotationMatrix::rot_z(angle1)
        }
    }
}

/// Same as [`compose`], embedded in a transform with the given translation.
pub fn compose_transform(
    angles: &EulerAngles,
    sequence: RotationSequence,
    translation: [f64; 3],
) -> HomogeneousTransform {
    HomogeneousTransform::from_parts(compose(angles, sequence), translation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zyx_matches_cardan_closed_form() {
        // W about X, P about Y, R about Z
        let (w, p, r): (f64, f64, f64) = (0.3, -0.5, 1.1);
        let (sw, cw) = w.sin_cos();
        let (sp, cp) = p.sin_cos();
        let (sr, cr) = r.sin_cos();
        let expected = RotationMatrix::new([
            [cr * cp, cr * sp * sw - sr * cw, cr * sp * cw + sr * sw],
            [sr * cp, sr * sp * sw + cr * cw, sr * sp * cw - cr * sw],
            [-sp, cp * sw, cp * cw],
        ]);

        let actual = compose(&EulerAngles::new(w, p, r), RotationSequence::Zyx);
        assert!(actual.max_abs_diff(&expected) < 1e-14);
    }

    #[test]
    fn test_single_axis_sequences() {
        let angles = EulerAngles::new(0.0, 0.0, 0.25);
        assert_eq!(compose(&angles, RotationSequence::Zyx), RotationMatrix::rot_z(0.25));
        assert_eq!(compose(&angles, RotationSequence::Xyz), RotationMatrix::rot_x(0.25));
        assert_eq!(compose(&angles, RotationSequence::Yxz), RotationMatrix::rot_y(0.25));
    }

    #[test]
    fn test_composed_matrices_are_rotations() {
        let angles = EulerAngles::new(-2.0, 1.3, 0.4);
        for seq in RotationSequence::ALL {
            assert!(compose(&angles, seq).is_rotation(1e-12));
        }
    }

    #[test]
    fn test_transform_keeps_translation() {
        let t = compose_transform(&EulerAngles::new(0.1, 0.2, 0.3), RotationSequence::Xyz, [1.0, 2.0, 3.0]);
        assert_eq!(t.translation(), [1.0, 2.0, 3.0]);
        assert!(t.is_homogeneous(1e-12));
    }
}
