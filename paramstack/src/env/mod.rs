//! The environment channel.
//!
//! The process environment is captured once through
//! `figment::providers::Env` so every parameter reads from the same
//! snapshot; tests and embedders pass an explicit mapping instead.

use std::collections::BTreeMap;

use figment::providers::Env;
use tracing::trace;

use crate::cast::cast_text;
use crate::value::{Channel, ParamValue};
use crate::{ParamResult, ParamSpec, ParamSpecSet};

/// Number of numbered siblings (`NAME_0` to `NAME_9`) consulted for a multi
/// parameter in addition to the bare name.
pub const MULTI_ENV_SLOTS: usize = 10;

/// Where the environment channel reads variables from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EnvSource {
    /// Snapshot of the current process environment, keys kept case-sensitive.
    #[default]
    Process,
    /// An explicit variable mapping.
    Map(BTreeMap<String, String>),
    /// The channel contributes nothing.
    Disabled,
}

impl EnvSource {
    /// Build a source from variable name and value pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use paramstack::EnvSource;
    ///
    /// let source = EnvSource::from_pairs([("PORT", "8080")]);
    /// assert_eq!(source.snapshot().get("PORT").map(String::as_str), Some("8080"));
    /// ```
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Map(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Capture the variables this source provides.
    ///
    /// Process variables whose name or value is not valid Unicode are
    /// skipped.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        match self {
            Self::Process => Env::raw()
                .lowercase(false)
                .iter()
                .map(|(key, value)| (key.as_str().to_owned(), value))
                .collect(),
            Self::Map(vars) => vars.clone(),
            Self::Disabled => BTreeMap::new(),
        }
    }
}

impl From<BTreeMap<String, String>> for EnvSource {
    fn from(vars: BTreeMap<String, String>) -> Self {
        Self::Map(vars)
    }
}

/// Reads one parameter from an environment snapshot.
#[derive(Clone, Copy, Debug)]
pub struct EnvReader<'a> {
    spec: &'a ParamSpec,
    vars: &'a BTreeMap<String, String>,
}

impl<'a> EnvReader<'a> {
    /// Create a reader for `spec` over `vars`.
    #[must_use]
    pub const fn new(spec: &'a ParamSpec, vars: &'a BTreeMap<String, String>) -> Self {
        Self { spec, vars }
    }

    /// Variable names consulted, in the order their values are collected.
    ///
    /// A single-valued parameter uses only its `env` name. A multi parameter
    /// checks the bare name first and then `NAME_0` through `NAME_9`.
    #[must_use]
    pub fn candidate_keys(&self) -> Vec<String> {
        let base = self.spec.env();
        let mut keys = vec![base.to_owned()];
        if self.spec.is_multi() {
            keys.extend((0..MULTI_ENV_SLOTS).map(|slot| format!("{base}_{slot}")));
        }
        keys
    }

    /// Returns `true` when the channel is enabled for the parameter and any
    /// candidate variable is present.
    #[must_use]
    pub fn is_supplied(&self) -> bool {
        self.spec.accepts(Channel::Env)
            && self
                .candidate_keys()
                .iter()
                .any(|key| self.vars.contains_key(key))
    }

    /// Resolve the parameter's value, or `None` when it is not supplied.
    ///
    /// Multi parameters always resolve to a sequence with one entry per
    /// present candidate variable.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ParamError::Cast`] naming the variable whose text does
    /// not fit the declared type.
    pub fn value(&self) -> ParamResult<Option<ParamValue>> {
        if !self.spec.accepts(Channel::Env) {
            return Ok(None);
        }
        let mut found = Vec::new();
        for key in self.candidate_keys() {
            trace!(param = self.spec.name(), key = %key, "checking environment variable");
            if let Some(text) = self.vars.get(&key) {
                found.push(cast_text(self.spec.param_type(), Channel::Env, &key, text)?);
            }
        }
        if found.is_empty() {
            return Ok(None);
        }
        if self.spec.is_multi() {
            return Ok(Some(ParamValue::List(found)));
        }
        Ok(found.pop())
    }
}

/// Resolve every env-enabled parameter present in `vars`.
///
/// # Errors
///
/// Returns the first cast failure, in parameter name order.
pub fn read_env_values(
    specs: &ParamSpecSet,
    vars: &BTreeMap<String, String>,
) -> ParamResult<BTreeMap<String, ParamValue>> {
    let mut values = BTreeMap::new();
    for spec in specs {
        if let Some(value) = EnvReader::new(spec, vars).value()? {
            values.insert(spec.name().to_owned(), value);
        }
    }
    Ok(values)
}
