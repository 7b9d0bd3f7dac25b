//! A validated collection of parameter definitions.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::debug;

use super::ParamSpec;
use crate::error::{ParamError, SchemaField, collect_errors};
use crate::value::{Channel, ParamType};
use crate::{ParamResult, file};

/// Validated set of parameters with unique identifiers across every channel.
///
/// Parameters are kept in name order, which is also the order of the help
/// text and of the resolved mapping.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParamSpecSet {
    banner: Option<String>,
    specs: Vec<ParamSpec>,
}

impl ParamSpecSet {
    /// Build a set from already validated parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::Schema`] (or an aggregate of them) when two
    /// parameters share a name, long flag, short flag or environment variable,
    /// or when a long flag collides with a boolean parameter's `no-` form.
    pub fn new(banner: Option<String>, mut specs: Vec<ParamSpec>) -> ParamResult<Self> {
        specs.sort_by(|left, right| left.name().cmp(right.name()));
        check_unique(&specs)?;
        debug!(params = specs.len(), "validated parameter schema");
        Ok(Self { banner, specs })
    }

    /// Validate a schema mapping with an optional `banner` and a `params`
    /// mapping of parameter name to attributes.
    ///
    /// # Examples
    ///
    /// ```
    /// use paramstack::ParamSpecSet;
    /// use serde_json::json;
    ///
    /// let set = ParamSpecSet::from_value(&json!({
    ///     "banner": "Usage: demo [options]",
    ///     "params": {
    ///         "verbose": {"type": "boolean", "default": false, "description": "Chatty output"}
    ///     }
    /// }))
    /// .expect("valid schema");
    /// assert_eq!(set.len(), 1);
    /// assert_eq!(set.banner(), Some("Usage: demo [options]"));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::Schema`] when the schema is not shaped as
    /// described, every violation of every parameter aggregated together, or
    /// the errors of [`ParamSpecSet::new`].
    pub fn from_value(schema: &JsonValue) -> ParamResult<Self> {
        let Some(root) = schema.as_object() else {
            return Err(Arc::new(ParamError::schema_set(
                SchemaField::Params,
                "Schema must be a mapping",
            )));
        };
        let banner = match root.get("banner") {
            None | Some(JsonValue::Null) => None,
            Some(JsonValue::String(text)) => Some(text.clone()),
            Some(_) => {
                return Err(Arc::new(ParamError::schema_set(
                    SchemaField::Banner,
                    "Banner must be a string",
                )));
            }
        };
        let Some(params) = root.get("params").and_then(JsonValue::as_object) else {
            return Err(Arc::new(ParamError::schema_set(
                SchemaField::Params,
                "Schema must supply params as a mapping",
            )));
        };

        let mut specs = Vec::with_capacity(params.len());
        let mut errors = Vec::new();
        for (name, definition) in params {
            match ParamSpec::from_value(name, definition) {
                Ok(spec) => specs.push(spec),
                Err(err) => errors.push(err),
            }
        }
        collect_errors(errors)?;
        Self::new(banner, specs)
    }

    /// Load and validate a schema file; the format is chosen by extension as
    /// for configuration files.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::File`] when the file cannot be read or parsed,
    /// otherwise the errors of [`ParamSpecSet::from_value`].
    pub fn from_path(path: &Path) -> ParamResult<Self> {
        Self::from_value(&file::load_document(path)?)
    }

    /// Help banner printed above the flag list.
    #[must_use]
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Iterate over the parameters in name order.
    pub fn iter(&self) -> std::slice::Iter<'_, ParamSpec> {
        self.specs.iter()
    }

    /// Look up a parameter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.specs
            .binary_search_by(|spec| spec.name().cmp(name))
            .ok()
            .and_then(|index| self.specs.get(index))
    }

    /// Number of parameters.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns `true` when the schema declares no parameters.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl<'a> IntoIterator for &'a ParamSpecSet {
    type Item = &'a ParamSpec;
    type IntoIter = std::slice::Iter<'a, ParamSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Values that occur more than once, sorted and listed once each.
fn repeats(values: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }
    counts
        .into_iter()
        .filter_map(|(value, count)| (count > 1).then_some(value))
        .collect()
}

fn check_unique(specs: &[ParamSpec]) -> ParamResult<()> {
    let checks: [(SchemaField, &str, Vec<String>); 4] = [
        (
            SchemaField::Name,
            "Duplicate parameter names",
            repeats(specs.iter().map(|spec| spec.name().to_owned())),
        ),
        (
            SchemaField::Long,
            "Duplicate long-flags",
            repeats(specs.iter().map(|spec| spec.long().to_owned())),
        ),
        (
            SchemaField::Short,
            "Duplicate short-flags",
            repeats(specs.iter().map(|spec| spec.short().to_string())),
        ),
        (
            SchemaField::Env,
            "Duplicate env-names",
            repeats(specs.iter().map(|spec| spec.env().to_owned())),
        ),
    ];
    let mut errors: Vec<Arc<ParamError>> = checks
        .into_iter()
        .filter(|(_, _, duplicates)| !duplicates.is_empty())
        .map(|(field, label, duplicates)| {
            Arc::new(ParamError::schema_set(
                field,
                format!("{label}: {}", duplicates.join(", ")),
            ))
        })
        .collect();

    let collisions = negation_collisions(specs);
    if !collisions.is_empty() {
        errors.push(Arc::new(ParamError::schema_set(
            SchemaField::Long,
            format!(
                "Long flags collide with negated boolean flags: {}",
                collisions.join(", ")
            ),
        )));
    }
    collect_errors(errors)
}

/// Long flags equal to the `no-` form of some boolean parameter's long flag.
fn negation_collisions(specs: &[ParamSpec]) -> Vec<String> {
    let mut collisions: Vec<String> = specs
        .iter()
        .filter(|spec| spec.param_type() == ParamType::Boolean && spec.accepts(Channel::Long))
        .map(|spec| format!("no-{}", spec.long()))
        .filter(|negated| {
            specs
                .iter()
                .any(|other| other.accepts(Channel::Long) && other.long() == negated)
        })
        .collect();
    collisions.sort();
    collisions.dedup();
    collisions
}
