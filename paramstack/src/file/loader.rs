//! Loading configuration documents from disk or memory.

use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;
use tracing::debug;

use super::error::file_error;
use super::parser::parse_document;
use crate::ParamResult;

/// Where the file channel reads its document from.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FileSource {
    /// No configuration file; the channel contributes nothing.
    #[default]
    None,
    /// Read and parse the file at this path, selecting the format by extension.
    Path(PathBuf),
    /// Use an already parsed document.
    Document(JsonValue),
}

impl FileSource {
    /// Produce the document for this source.
    ///
    /// [`FileSource::None`] yields `null`, which contributes no values.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::ParamError::File`] when the path cannot be read or
    /// parsed. A path that does not exist is an error because it was
    /// supplied explicitly.
    pub fn load(&self) -> ParamResult<JsonValue> {
        match self {
            Self::None => Ok(JsonValue::Null),
            Self::Path(path) => load_document(path),
            Self::Document(document) => Ok(document.clone()),
        }
    }
}

impl From<PathBuf> for FileSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for FileSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<JsonValue> for FileSource {
    fn from(document: JsonValue) -> Self {
        Self::Document(document)
    }
}

/// Read `path` and parse it into a generic document.
///
/// # Examples
///
/// ```rust,no_run
/// use paramstack::file::load_document;
/// use std::path::Path;
///
/// # fn run() -> paramstack::ParamResult<()> {
/// let document = load_document(Path::new("config.toml"))?;
/// assert!(document.is_object() || document.is_null());
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns a [`crate::ParamError::File`] if reading or parsing the file fails.
pub fn load_document(path: &Path) -> ParamResult<JsonValue> {
    let data = std::fs::read_to_string(path).map_err(|e| file_error(path, e))?;
    let document = parse_document(path, &data)?;
    debug!(path = %path.display(), "loaded configuration document");
    Ok(document)
}
