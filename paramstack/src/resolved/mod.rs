//! The resolved parameter mapping and its output shapes.

mod output;

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue};

use crate::merge::Provenance;
use crate::value::ParamValue;
use crate::{ParamResult, ParamResultExt};

pub use output::OutputFormat;

/// Final `name → value` mapping of one resolution.
///
/// Every declared parameter is present, since defaults form the lowest
/// layer. Each entry remembers which layer supplied it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedParams {
    values: BTreeMap<String, ParamValue>,
    provenance: BTreeMap<String, Provenance>,
}

impl ResolvedParams {
    pub(crate) fn insert(&mut self, name: String, value: ParamValue, provenance: Provenance) {
        self.provenance.insert(name.clone(), provenance);
        self.values.insert(name, value);
    }

    /// Value of the parameter `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Layer that supplied the winning value of `name`.
    #[must_use]
    pub fn provenance(&self, name: &str) -> Option<Provenance> {
        self.provenance.get(name).copied()
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of resolved parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when nothing was resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The open mapping as a JSON object.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(
            self.values
                .iter()
                .map(|(name, value)| (name.clone(), value.to_json()))
                .collect::<Map<_, _>>(),
        )
    }

    /// Shape the mapping into a fixed-field record.
    ///
    /// # Examples
    ///
    /// ```
    /// use paramstack::{ArgvSource, EnvSource, FileSource, Resolution, resolve};
    /// use serde::Deserialize;
    /// use serde_json::json;
    ///
    /// #[derive(Deserialize)]
    /// struct Settings {
    ///     port: i64,
    /// }
    ///
    /// let schema = json!({"params": {
    ///     "port": {"type": "integer", "default": 80, "description": "Listen port"}
    /// }});
    /// let resolution = resolve(
    ///     &schema,
    ///     ArgvSource::from_tokens(["--port", "8080"]),
    ///     EnvSource::Disabled,
    ///     FileSource::None,
    /// )
    /// .expect("resolves");
    /// let Resolution::Resolved(params) = resolution else {
    ///     panic!("no help requested");
    /// };
    /// let settings: Settings = params.to_record().expect("fits");
    /// assert_eq!(settings.port, 8080);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`crate::ParamError::Record`] when the resolved names or values
    /// do not fit `T`, for example a field with no matching parameter or a
    /// `null` value for a non-optional field.
    pub fn to_record<T: DeserializeOwned>(&self) -> ParamResult<T> {
        serde_json::from_value(self.to_json()).into_param()
    }
}

impl<'a> IntoIterator for &'a ResolvedParams {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
