//! Error constructors shared by file loading helpers.

use crate::ParamError;

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

/// Construct a [`ParamError::File`] for a configuration path.
pub(super) fn file_error(
    path: &Path,
    err: impl Into<Box<dyn Error + Send + Sync>>,
) -> Arc<ParamError> {
    Arc::new(ParamError::File {
        path: path.to_path_buf(),
        source: err.into(),
    })
}

/// Report a format whose parser was compiled out.
#[cfg_attr(
    all(feature = "toml", feature = "yaml", feature = "json5"),
    expect(dead_code, reason = "every format feature is enabled")
)]
pub(super) fn feature_disabled(path: &Path, feature: &str) -> Arc<ParamError> {
    file_error(
        path,
        std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            format!("{feature} feature disabled: enable the '{feature}' feature to read this file"),
        ),
    )
}
