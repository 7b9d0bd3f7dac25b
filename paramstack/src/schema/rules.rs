//! Field-level validation rules for a single parameter definition.
//!
//! Each rule inspects one attribute of the raw definition and either yields
//! the validated value or a message describing the first constraint it
//! violates. [`Checker`] runs the rules and collects every failure so a
//! definition with several problems reports all of them at once.

use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::error::{ParamError, SchemaField};
use crate::value::{Channel, EnabledChannels, ParamType, ParamValue};

/// Maximum length of a parameter name.
pub const MAX_NAME: usize = 64;
/// Maximum length of a long flag.
pub const MAX_LONG_FLAG: usize = 64;
/// Maximum length of an environment variable name.
pub const MAX_ENV_LENGTH: usize = 64;

type Rule<T> = Result<T, String>;

/// Collects violations for one parameter.
pub(super) struct Checker<'a> {
    param: &'a str,
    errors: Vec<Arc<ParamError>>,
}

impl<'a> Checker<'a> {
    pub(super) const fn new(param: &'a str) -> Self {
        Self {
            param,
            errors: Vec::new(),
        }
    }

    /// Record the outcome of a rule, returning the validated value on success.
    pub(super) fn field<T>(&mut self, field: SchemaField, outcome: Rule<T>) -> Option<T> {
        match outcome {
            Ok(value) => Some(value),
            Err(message) => {
                self.errors
                    .push(Arc::new(ParamError::schema(self.param, field, message)));
                None
            }
        }
    }

    pub(super) fn into_errors(self) -> Vec<Arc<ParamError>> {
        self.errors
    }
}

const fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

pub(super) fn name(name: &str) -> Rule<()> {
    if name.is_empty() {
        Err(String::from("Name must not be empty"))
    } else if !name.bytes().all(is_word_byte) {
        Err(String::from(
            "Name may contain only alphanumerics and underscores",
        ))
    } else if name.len() > MAX_NAME {
        Err(format!("Name contains more than {MAX_NAME} characters"))
    } else {
        Ok(())
    }
}

pub(super) fn description(value: Option<&JsonValue>) -> Rule<String> {
    let Some(value) = value else {
        return Err(String::from("Description must be supplied"));
    };
    let Some(text) = value.as_str() else {
        return Err(String::from("Description must be supplied as a string"));
    };
    if text.trim().is_empty() {
        Err(String::from("Description must not be blank"))
    } else if text.contains('\n') {
        Err(String::from("Description may not include newlines"))
    } else {
        Ok(text.to_owned())
    }
}

pub(super) fn param_type(value: Option<&JsonValue>) -> Rule<ParamType> {
    let Some(value) = value else {
        return Err(String::from("Type was not supplied"));
    };
    let Some(text) = value.as_str() else {
        return Err(String::from("Type must be supplied as a string"));
    };
    ParamType::from_name(text).ok_or_else(|| {
        let known: Vec<&str> = ParamType::ALL.iter().map(|ty| ty.name()).collect();
        format!(
            "Type '{text}' not recognized - expected one of: {}",
            known.join(", ")
        )
    })
}

pub(super) fn multi(value: Option<&JsonValue>) -> Rule<bool> {
    match value {
        None => Ok(false),
        Some(JsonValue::Bool(flag)) => Ok(*flag),
        Some(_) => Err(String::from("Multi must be a boolean")),
    }
}

pub(super) fn enabled(value: Option<&JsonValue>) -> Rule<EnabledChannels> {
    let Some(value) = value else {
        return Ok(EnabledChannels::all());
    };
    let Some(entries) = value.as_array() else {
        return Err(String::from("Enabled must be an array"));
    };
    if entries.is_empty() {
        return Err(String::from("Enabled must not be empty"));
    }
    let mut unrecognized = Vec::new();
    let mut channels = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry.as_str().and_then(Channel::from_name) {
            Some(channel) => channels.push(channel),
            None => unrecognized.push(
                entry
                    .as_str()
                    .map_or_else(|| entry.to_string(), str::to_owned),
            ),
        }
    }
    if unrecognized.is_empty() {
        Ok(channels.into_iter().collect())
    } else {
        unrecognized.sort();
        Err(format!(
            "Enabled includes unrecognized values: {}",
            unrecognized.join(", ")
        ))
    }
}

pub(super) fn default(value: Option<&JsonValue>, ty: ParamType, multi: bool) -> Rule<ParamValue> {
    match value {
        None => Err(String::from("Default not supplied")),
        Some(JsonValue::Null) => Ok(ParamValue::Null),
        Some(JsonValue::Array(items)) if multi => items
            .iter()
            .map(|item| ty.accept_native(item))
            .collect::<Option<Vec<_>>>()
            .map(ParamValue::List)
            .ok_or_else(|| format!("Default includes non-{ty} values")),
        Some(_) if multi => Err(String::from(
            "Multi-valued, but default is not an array",
        )),
        Some(other) => ty
            .accept_native(other)
            .ok_or_else(|| format!("Default is not {ty:#}")),
    }
}

/// Validate an identifier that is either supplied explicitly or derived from
/// the parameter name.
///
/// Derived identifiers are only checked when the name itself is valid, since
/// a bad name has already been reported and would only produce echoes.
pub(super) fn identifier<T>(
    explicit: Option<&JsonValue>,
    label: &str,
    derived: Option<String>,
    check: fn(&str) -> Rule<T>,
) -> Rule<Option<T>> {
    match (explicit, derived) {
        (Some(JsonValue::String(text)), _) => check(text).map(Some),
        (Some(_), _) => Err(format!("{label} is not a string")),
        (None, Some(text)) => check(&text)
            .map(Some)
            .map_err(|message| format!("{message} (derived from the name; supply it explicitly)")),
        (None, None) => Ok(None),
    }
}

pub(super) fn long(text: &str) -> Rule<String> {
    if text.is_empty() {
        Err(String::from("Long flag must not be empty"))
    } else if text.chars().any(char::is_whitespace) {
        Err(String::from("Long flag includes whitespace"))
    } else if text.starts_with('-') {
        Err(String::from("Long flag must not begin with '-'"))
    } else if text.contains('=') {
        Err(String::from("Long flag must not contain '='"))
    } else if text.chars().count() > MAX_LONG_FLAG {
        Err(format!("Long flag is over {MAX_LONG_FLAG} characters"))
    } else {
        Ok(text.to_owned())
    }
}

pub(super) fn short(text: &str) -> Rule<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(flag), None) if flag.is_ascii_alphanumeric() => Ok(flag),
        _ => Err(String::from("Short flag must be a single letter or digit")),
    }
}

pub(super) fn env(text: &str) -> Rule<String> {
    if text.is_empty() || !text.bytes().all(is_word_byte) {
        Err(String::from(
            "ENV name may only contain alphanumerics and underscores",
        ))
    } else if !text.starts_with(|c: char| c.is_ascii_alphabetic()) {
        Err(String::from("ENV name must begin with a letter"))
    } else if text.len() > MAX_ENV_LENGTH {
        Err(format!("ENV name is over {MAX_ENV_LENGTH} characters"))
    } else {
        Ok(text.to_owned())
    }
}

pub(super) fn derive_long(name: &str) -> String {
    name.replace('_', "-").to_ascii_lowercase()
}

pub(super) fn derive_short(name: &str) -> String {
    name.chars().take(1).collect()
}

pub(super) fn derive_env(name: &str) -> String {
    name.to_ascii_uppercase()
}
