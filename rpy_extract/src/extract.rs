//! Closed-form roll-pitch-yaw extraction.
//!
//! For every sequence the middle angle is the restricted one. Its sine sits
//! in a single "critical" entry of the matrix:
//!
//! Sequence | Critical entry | Middle angle
//! ---------|----------------|-------------
//! XYZ      | R13            | `asin(R13)`
//! ZYX      | R31            | `-asin(R31)`
//! YXZ      | R23            | `-asin(R23)`
//!
//! When `| |c| - 1 | < f64::EPSILON` the first and third axes line up (gimbal
//! lock). Only their combined rotation is observable, so the first angle is
//! pinned to zero and the third angle takes the whole rotation.
//!
//! Otherwise the first and third angles come from one `atan2` each and the
//! middle angle from one of four equivalent `atan` formulas. The formula whose
//! denominator has the largest magnitude is used, which keeps the division
//! well conditioned.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{RotationMatrix, RotationSequence};

/// Three angles in the order of a [`RotationSequence`].
///
/// `angle1` and `angle3` lie in `[-PI, PI)`, `angle2` in `[-PI/2, PI/2]`.
/// The unit (radians or degrees) is decided by whoever produced the value.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerAngles {
    pub angle1: f64,
    pub angle2: f64,
    pub angle3: f64,
}

impl EulerAngles {
    pub const fn new(angle1: f64, angle2: f64, angle3: f64) -> Self {
        Self { angle1, angle2, angle3 }
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.angle1, self.angle2, self.angle3]
    }

    /// Scales every component by `180 / PI`.
    pub fn to_degrees(&self) -> Self {
        Self::new(
            self.angle1.to_degrees(),
            self.angle2.to_degrees(),
            self.angle3.to_degrees(),
        )
    }

    /// Scales every component by `PI / 180`.
    pub fn to_radians(&self) -> Self {
        Self::new(
            self.angle1.to_radians(),
            self.angle2.to_radians(),
            self.angle3.to_radians(),
        )
    }
}

impl From<[f64; 3]> for EulerAngles {
    fn from(value: [f64; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

impl From<EulerAngles> for [f64; 3] {
    fn from(value: EulerAngles) -> Self {
        value.to_array()
    }
}

/// Decomposes `rotation` into radians for `sequence`.
///
/// The matrix is assumed to be a proper rotation; nothing is checked here.
///
/// # Examples
///
/// ```
/// use rpy_extract::{extract, RotationMatrix, RotationSequence};
///
/// let r = RotationMatrix::rot_z(0.5) * RotationMatrix::rot_y(0.2) * RotationMatrix::rot_x(-0.1);
/// let angles = extract(&r, RotationSequence::Zyx);
///
/// assert!((angles.angle1 + 0.1).abs() < 1e-12);
/// assert!((angles.angle2 - 0.2).abs() < 1e-12);
/// assert!((angles.angle3 - 0.5).abs() < 1e-12);
/// ```
pub fn extract(rotation: &RotationMatrix, sequence: RotationSequence) -> EulerAngles {
    let m = rotation.rows();
    match sequence {
        RotationSequence::Xyz => extract_xyz(m),
        RotationSequence::Zyx => extract_zyx(m),
        RotationSequence::Yxz => extract_yxz(m),
    }
}

impl RotationMatrix {
    /// Shorthand for [`extract`].
    pub fn to_rpy(&self, sequence: RotationSequence) -> EulerAngles {
        extract(self, sequence)
    }
}

fn is_singular(critical: f64) -> bool {
    (critical.abs() - 1.0).abs() < f64::EPSILON
}

/// Index of the entry with the largest magnitude, first one on ties.
fn largest_magnitude(candidates: [f64; 4]) -> usize {
    let mut best = 0;
    for (i, v) in candidates.iter().enumerate().skip(1) {
        if v.abs() > candidates[best].abs() {
            best = i;
        }
    }
    best
}

/// `atan2` may return exactly `PI`; fold it onto `-PI`.
fn wrap(angle: f64) -> f64 {
    if angle >= PI {
        angle - 2.0 * PI
    } else {
        angle
    }
}

// R = Rx(a3) * Ry(a2) * Rz(a1)
fn extract_xyz(m: &[[f64; 3]; 3]) -> EulerAngles {
    let c = m[0][2];

    if is_singular(c) {
        debug!(r13 = c, "XYZ decomposition is singular, roll pinned to zero");
        let a3 = if c > 0.0 {
            m[2][1].atan2(m[1][1])
        } else {
            (-m[1][0]).atan2(m[2][0])
        };
        return EulerAngles::new(0.0, c.asin(), wrap(a3));
    }

    let a1 = (-m[0][1]).atan2(m[0][0]);
    let a3 = (-m[1][2]).atan2(m[2][2]);

    let a2 = match largest_magnitude([m[0][0], m[0][1], m[1][2], m[2][2]]) {
        0 => (c * a1.cos() / m[0][0]).atan(),
        1 => -(c * a1.sin() / m[0][1]).atan(),
        2 => -(c * a3.sin() / m[1][2]).atan(),
        _ => (c * a3.cos() / m[2][2]).atan(),
    };

    EulerAngles::new(wrap(a1), a2, wrap(a3))
}

// R = Rz(a3) * Ry(a2) * Rx(a1)
fn extract_zyx(m: &[[f64; 3]; 3]) -> EulerAngles {
    let c = m[2][0];

    if is_singular(c) {
        debug!(r31 = c, "ZYX decomposition is singular, roll pinned to zero");
        let a3 = if c < 0.0 {
            (-m[0][1]).atan2(m[0][2])
        } else {
            (-m[0][1]).atan2(-m[0][2])
        };
        return EulerAngles::new(0.0, -c.asin(), wrap(a3));
    }

    let a1 = m[2][1].atan2(m[2][2]);
    let a3 = m[1][0].atan2(m[0][0]);

    let a2 = match largest_magnitude([m[0][0], m[1][0], m[2][1], m[2][2]]) {
        0 => -(c * a3.cos() / m[0][0]).atan(),
        1 => -(c * a3.sin() / m[1][0]).atan(),
        2 => -(c * a1.sin() / m[2][1]).atan(),
        _ => -(c * a1.cos() / m[2][2]).atan(),
    };

    EulerAngles::new(wrap(a1), a2, wrap(a3))
}

// R = Ry(a3) * Rx(a2) * Rz(a1)
fn extract_yxz(m: &[[f64; 3]; 3]) -> EulerAngles {
    let c = m[1][2];

    if is_singular(c) {
        debug!(r23 = c, "YXZ decomposition is singular, roll pinned to zero");
        let a3 = if c < 0.0 {
            (-m[2][0]).atan2(m[0][0])
        } else {
            (-m[2][0]).atan2(-m[2][1])
        };
        return EulerAngles::new(0.0, -c.asin(), wrap(a3));
    }

    let a1 = m[1][0].atan2(m[1][1]);
    let a3 = m[0][2].atan2(m[2][2]);

    let a2 = match largest_magnitude([m[1][1], m[1][0], m[0][2], m[2][2]]) {
        0 => -(c * a1.cos() / m[1][1]).atan(),
        1 => -(c * a1.sin() / m[1][0]).atan(),
        2 => -(c * a3.sin() / m[0][2]).atan(),
        _ => -(c * a3.cos() / m[2][2]).atan(),
    };

    EulerAngles::new(wrap(a1), a2, wrap(a3))
}
