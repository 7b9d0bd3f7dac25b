//! YAML parsing backed by `serde-saphyr`.

use serde_json::Value as JsonValue;
use serde_saphyr::Options;

/// Parse YAML text into a generic document using strict boolean semantics.
///
/// Only `true` and `false` are booleans; YAML 1.1 words such as `yes` stay
/// strings so that the declared parameter type decides what they mean.
pub(super) fn parse_yaml(contents: &str) -> Result<JsonValue, serde_saphyr::Error> {
    serde_saphyr::from_str_with_options(
        contents,
        Options {
            strict_booleans: true,
            ..Options::default()
        },
    )
}
