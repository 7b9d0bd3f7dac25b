//! Format-specific parsing of configuration text into generic documents.

use crate::ParamResult;

#[cfg(feature = "json5")]
use figment::providers::Format;
#[cfg(feature = "json5")]
use figment_json5::Json5;
use serde_json::Value as JsonValue;

use std::path::Path;

#[cfg(not(all(feature = "toml", feature = "yaml", feature = "json5")))]
use super::error::feature_disabled;
use super::error::file_error;
#[cfg(feature = "yaml")]
use super::yaml::parse_yaml;

/// Parse configuration text according to the file extension.
///
/// `.json` is always understood, and is read leniently as JSON5 when the
/// `json5` feature is enabled. `.json5` and `.yaml`/`.yml` files need the
/// `json5` and `yaml` features; anything else is parsed as TOML. Blank text is a `null`
/// document regardless of format.
///
/// # Errors
///
/// Returns a [`crate::ParamError::File`] naming `path` when the text fails to
/// parse or the format's feature is disabled.
pub(super) fn parse_document(path: &Path, data: &str) -> ParamResult<JsonValue> {
    if data.trim().is_empty() {
        return Ok(JsonValue::Null);
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("json") => {
            #[cfg(feature = "json5")]
            {
                Json5::from_str(data).map_err(|e| file_error(path, e))
            }
            #[cfg(not(feature = "json5"))]
            {
                serde_json::from_str(data).map_err(|e| file_error(path, e))
            }
        }
        Some("json5") => {
            #[cfg(feature = "json5")]
            {
                Json5::from_str(data).map_err(|e| file_error(path, e))
            }
            #[cfg(not(feature = "json5"))]
            {
                Err(feature_disabled(path, "json5"))
            }
        }
        Some("yaml" | "yml") => {
            #[cfg(feature = "yaml")]
            {
                parse_yaml(data).map_err(|e| file_error(path, e))
            }
            #[cfg(not(feature = "yaml"))]
            {
                Err(feature_disabled(path, "yaml"))
            }
        }
        _ => {
            #[cfg(feature = "toml")]
            {
                toml::from_str(data).map_err(|e| file_error(path, e))
            }
            #[cfg(not(feature = "toml"))]
            {
                Err(feature_disabled(path, "toml"))
            }
        }
    }
}
