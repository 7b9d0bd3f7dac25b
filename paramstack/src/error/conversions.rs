//! Trait-based conversions between external error types and `ParamError`.

use super::ParamError;

/// Convert JSON encoding or decoding failures into [`ParamError::Record`].
///
/// JSON conversions only happen when resolved values are reshaped, so a
/// failure always means the values did not fit the requested shape.
impl From<serde_json::Error> for ParamError {
    fn from(e: serde_json::Error) -> Self {
        Self::Record {
            message: e.to_string(),
        }
    }
}
