use std::error::Error;
use std::fmt;
use serde::{Deserialize, Serialize};

/// Errors surfaced by the extractor.
///
/// Every failure is a caller mistake (wrong shape, a matrix that is not a
/// rotation, an unknown sequence name or bad options), so there is a single
/// kind carrying a human readable reason.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum RpyError {
    InvalidArgument(String),
}

impl RpyError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        RpyError::InvalidArgument(msg.into())
    }
}

impl Error for RpyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}

impl fmt::Display for RpyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            RpyError::InvalidArgument(ref msg) => write!(f, "Invalid argument: {}", msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_reason() {
        let err = RpyError::invalid("matrix must be 3x3 or 4x4, got 2x2");
        assert_eq!(err.to_string(), "Invalid argument: matrix must be 3x3 or 4x4, got 2x2");
    }

    #[test]
    fn test_json_shape() {
        let err = RpyError::invalid("bad");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"InvalidArgument":"bad"}"#);
    }
}
