//! Extension for mapping errors to `ParamResult` concisely.
//!
//! Reduces repetitive `.map_err(|e| Arc::new(e.into()))` when converting
//! external error types into the crate's `ParamResult<T>` alias
//! (`Result<T, Arc<ParamError>>`).
//!
//! # Examples
//!
//! ```
//! use paramstack::{ParamResult, ParamResultExt};
//!
//! fn decode(text: &str) -> ParamResult<u16> {
//!     // serde_json::Error implements Into<ParamError>
//!     serde_json::from_str(text).into_param()
//! }
//!
//! assert_eq!(decode("8080").ok(), Some(8080));
//! assert!(decode("\"http\"").is_err());
//! ```

use crate::{ParamError, ParamResult};
use std::sync::Arc;

/// Generic extension for mapping any `Result<T, E>` with `E: Into<ParamError>`
/// into a `ParamResult<T>`.
pub trait ParamResultExt<T, E> {
    /// Convert `Result<T, E>` into `ParamResult<T>` using `Into<ParamError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<ParamError>`.
    fn into_param(self) -> ParamResult<T>;
}

impl<T, E> ParamResultExt<T, E> for Result<T, E>
where
    E: Into<ParamError>,
{
    fn into_param(self) -> ParamResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}
