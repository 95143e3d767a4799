use serde::{Deserialize, Serialize};

use crate::{RotationSequence, RpyError};

/// Options for [`crate::rotation_to_rpy`] and friends.
///
/// ```rust
/// use rpy_extract::{RpyOptions, RotationSequence};
///
/// // Degrees, camera convention
/// let opts = RpyOptions::new(true, RotationSequence::Yxz);
///
/// // Reject anything that is not a proper rotation before extracting
/// let checked = RpyOptions::default().with_validity_check(1e-9);
/// assert!(checked.validate().is_ok());
///
/// // Options also load from JSON, aliases included
/// let from_json: RpyOptions = serde_json::from_str(r#"{"degrees":true,"sequence":"camera"}"#).unwrap();
/// assert_eq!(from_json, opts);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RpyOptions {
    /// Report angles in degrees instead of radians.
    pub degrees: bool,
    pub sequence: RotationSequence,
    /// Run the orthonormality check on every input first.
    pub check_validity: bool,
    /// Tolerance used by the validity check. Ignored while `check_validity`
    /// is off.
    pub tolerance: f64,
}

impl RpyOptions {
    pub const DEFAULT_TOLERANCE: f64 = 1e-6;

    pub fn new(degrees: bool, sequence: RotationSequence) -> Self {
        Self {
            degrees,
            sequence,
            ..Self::default()
        }
    }

    pub fn with_degrees(mut self, degrees: bool) -> Self {
        self.degrees = degrees;
        self
    }

    pub fn with_sequence(mut self, sequence: RotationSequence) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn with_validity_check(mut self, tolerance: f64) -> Self {
        self.check_validity = true;
        self.tolerance = tolerance;
        self
    }

    /// Rejects a tolerance that is not a positive finite number, but only when
    /// the validity check will actually use it.
    pub fn validate(&self) -> Result<(), RpyError> {
        if self.check_validity && (!self.tolerance.is_finite() || self.tolerance <= 0.0) {
            return Err(RpyError::invalid(format!(
                "tolerance must be a positive finite number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

impl Default for RpyOptions {
    fn default() -> Self {
        Self {
            degrees: false,
            sequence: RotationSequence::Zyx,
            check_validity: false,
            tolerance: Self::DEFAULT_TOLERANCE,
        }
    }
}
