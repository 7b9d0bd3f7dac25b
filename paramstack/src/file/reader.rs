//! Resolution of parameter values from a parsed configuration document.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::value::{Channel, ParamValue, json_kind};
use crate::{ParamError, ParamResult, ParamSpec, ParamSpecSet};

/// Resolve every file-enabled parameter whose name appears in `document`.
///
/// Values keep their native kind: the document must already hold booleans
/// and numbers where the schema declares them. `null` is accepted for every
/// type. A multi parameter given a sequence validates each element; given a
/// bare scalar it passes that scalar through unwrapped. Keys that name no
/// parameter are ignored.
///
/// # Errors
///
/// Returns [`ParamError::InvalidDocument`] when `document` is neither `null`
/// nor a mapping, and [`ParamError::TypeMismatch`] for the first parameter
/// (in name order) whose value has the wrong kind.
pub fn read_file_values(
    specs: &ParamSpecSet,
    document: &JsonValue,
) -> ParamResult<BTreeMap<String, ParamValue>> {
    let entries = match document {
        JsonValue::Null => return Ok(BTreeMap::new()),
        JsonValue::Object(entries) => entries,
        other => {
            return Err(Arc::new(ParamError::InvalidDocument {
                actual: json_kind(other),
            }));
        }
    };
    specs
        .iter()
        .filter(|spec| spec.accepts(Channel::File))
        .filter_map(|spec| entries.get(spec.name()).map(|raw| (spec, raw)))
        .map(|(spec, raw)| -> ParamResult<(String, ParamValue)> {
            Ok((spec.name().to_owned(), native_value(spec, raw)?))
        })
        .collect()
}

fn native_value(spec: &ParamSpec, raw: &JsonValue) -> ParamResult<ParamValue> {
    match raw {
        JsonValue::Array(items) if spec.is_multi() => items
            .iter()
            .map(|item| scalar_value(spec, item))
            .collect::<ParamResult<Vec<_>>>()
            .map(ParamValue::List),
        other => scalar_value(spec, other),
    }
}

fn scalar_value(spec: &ParamSpec, raw: &JsonValue) -> ParamResult<ParamValue> {
    if raw.is_null() {
        return Ok(ParamValue::Null);
    }
    spec.param_type().accept_native(raw).ok_or_else(|| {
        Arc::new(ParamError::TypeMismatch {
            param: spec.name().to_owned(),
            expected: spec.param_type(),
            actual: json_kind(raw),
        })
    })
}
