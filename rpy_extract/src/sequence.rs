use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::RpyError;

/// Rotation order used to decompose a matrix into three angles.
///
/// Each variant names the axes of the composed rotation from left to right,
/// so the last letter is the axis of the first angle:
///
/// * `Zyx` - `R = Rz(a3) * Ry(a2) * Rx(a1)`, the vehicle convention (default)
/// * `Xyz` - `R = Rx(a3) * Ry(a2) * Rz(a1)`, the arm convention
/// * `Yxz` - `R = Ry(a3) * Rx(a2) * Rz(a1)`, the camera convention
///
/// Names are parsed case-insensitively and the aliases `vehicle`, `arm` and
/// `camera` resolve to their canonical variant, both through [`FromStr`] and
/// when deserializing.
///
/// # Examples
///
/// ```
/// use rpy_extract::RotationSequence;
///
/// let seq: RotationSequence = "arm".parse().unwrap();
/// assert_eq!(seq, RotationSequence::Xyz);
/// assert_eq!(seq.canonical_name(), "XYZ");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(try_from = "String", into = "String")]
pub enum RotationSequence {
    #[default]
    Zyx,
    Xyz,
    Yxz,
}

impl RotationSequence {
    pub const ALL: [RotationSequence; 3] = [
        RotationSequence::Zyx,
        RotationSequence::Xyz,
        RotationSequence::Yxz,
    ];

    /// Canonical upper-case label, also used on the wire.
    pub fn canonical_name(&self) -> &'static str {
        match self {
            RotationSequence::Zyx => "ZYX",
            RotationSequence::Xyz => "XYZ",
            RotationSequence::Yxz => "YXZ",
        }
    }

    /// Domain alias for the sequence.
    pub fn alias(&self) -> &'static str {
        match self {
            RotationSequence::Zyx => "vehicle",
            RotationSequence::Xyz => "arm",
            RotationSequence::Yxz => "camera",
        }
    }
}

impl fmt::Display for RotationSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

impl FromStr for RotationSequence {
    type Err = RpyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zyx" | "vehicle" => Ok(RotationSequence::Zyx),
            "xyz" | "arm" => Ok(RotationSequence::Xyz),
            "yxz" | "camera" => Ok(RotationSequence::Yxz),
            other => Err(RpyError::invalid(format!(
                "unknown rotation sequence '{}', expected one of zyx/vehicle, xyz/arm, yxz/camera",
                other
            ))),
        }
    }
}

impl From<RotationSequence> for String {
    fn from(value: RotationSequence) -> Self {
        value.canonical_name().to_string()
    }
}

impl TryFrom<String> for RotationSequence {
    type Error = RpyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
