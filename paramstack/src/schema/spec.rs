//! A single validated parameter definition.

use std::sync::Arc;

use serde_json::Value as JsonValue;

use super::rules::{self, Checker};
use crate::ParamResult;
use crate::error::{ParamError, SchemaField};
use crate::value::{Channel, EnabledChannels, ParamType, ParamValue};

/// Validated description of one parameter.
///
/// Instances are only produced by [`ParamSpec::from_value`], so every
/// accessor returns data that already satisfies the schema rules. Channel
/// identifiers that were not supplied explicitly are derived from the name:
/// `foo_bar` yields the long flag `foo-bar`, the short flag `f` and the
/// environment variable `FOO_BAR`.
#[derive(Clone, Debug, PartialEq)]
pub struct ParamSpec {
    name: String,
    param_type: ParamType,
    multi: bool,
    default: ParamValue,
    description: String,
    enabled: EnabledChannels,
    long: String,
    short: char,
    env: String,
}

impl ParamSpec {
    /// Validate the attribute mapping `definition` for the parameter `name`.
    ///
    /// Every independent rule runs before failing, so the error lists each
    /// offending attribute. Checks that depend on another attribute are
    /// skipped when that attribute is itself invalid: the default is only
    /// checked against a valid type and multi flag, and derived identifiers
    /// only against a valid name.
    ///
    /// # Examples
    ///
    /// ```
    /// use paramstack::{ParamSpec, ParamType};
    /// use serde_json::json;
    ///
    /// let spec = ParamSpec::from_value(
    ///     "foo_bar",
    ///     &json!({"type": "integer", "default": 3, "description": "Foo bar"}),
    /// )
    /// .expect("valid definition");
    /// assert_eq!(spec.param_type(), ParamType::Integer);
    /// assert_eq!(spec.long(), "foo-bar");
    /// assert_eq!(spec.short(), 'f');
    /// assert_eq!(spec.env(), "FOO_BAR");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::Schema`] for a single violation, or
    /// [`ParamError::Aggregate`] of schema violations when several attributes
    /// are invalid.
    pub fn from_value(name: &str, definition: &JsonValue) -> ParamResult<Self> {
        let Some(attrs) = definition.as_object() else {
            return Err(Arc::new(ParamError::schema(
                name,
                SchemaField::Params,
                "Definition must be a mapping of attributes",
            )));
        };

        let mut checker = Checker::new(name);
        let name_ok = checker.field(SchemaField::Name, rules::name(name)).is_some();
        let description = checker.field(
            SchemaField::Description,
            rules::description(attrs.get("description")),
        );
        let param_type = checker.field(SchemaField::Type, rules::param_type(attrs.get("type")));
        let multi = checker.field(SchemaField::Multi, rules::multi(attrs.get("multi")));
        let enabled = checker.field(SchemaField::Enabled, rules::enabled(attrs.get("enabled")));
        let default = match (param_type, multi) {
            (Some(ty), Some(is_multi)) => checker.field(
                SchemaField::Default,
                rules::default(attrs.get("default"), ty, is_multi),
            ),
            _ => None,
        };
        let derive = |derived: fn(&str) -> String| name_ok.then(|| derived(name));
        let long = checker
            .field(
                SchemaField::Long,
                rules::identifier(
                    attrs.get("long"),
                    "Long flag",
                    derive(rules::derive_long),
                    rules::long,
                ),
            )
            .flatten();
        let short = checker
            .field(
                SchemaField::Short,
                rules::identifier(
                    attrs.get("short"),
                    "Short flag",
                    derive(rules::derive_short),
                    rules::short,
                ),
            )
            .flatten();
        let env = checker
            .field(
                SchemaField::Env,
                rules::identifier(
                    attrs.get("env"),
                    "ENV name",
                    derive(rules::derive_env),
                    rules::env,
                ),
            )
            .flatten();

        let errors = checker.into_errors();
        match (description, param_type, multi, enabled, default, long, short, env) {
            (
                Some(description),
                Some(param_type),
                Some(multi),
                Some(enabled),
                Some(default),
                Some(long),
                Some(short),
                Some(env),
            ) if name_ok && errors.is_empty() => Ok(Self {
                name: name.to_owned(),
                param_type,
                multi,
                default,
                description,
                enabled,
                long,
                short,
                env,
            }),
            _ => Err(Arc::new(ParamError::try_aggregate(errors).unwrap_or_else(
                || ParamError::schema(name, SchemaField::Name, "Definition is invalid"),
            ))),
        }
    }

    /// Parameter name; also the key used by the file channel and the result.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared value type.
    #[must_use]
    pub const fn param_type(&self) -> ParamType {
        self.param_type
    }

    /// Returns `true` when the parameter resolves to a sequence.
    #[must_use]
    pub const fn is_multi(&self) -> bool {
        self.multi
    }

    /// Declared default; [`ParamValue::Null`] when the schema gave `null`.
    #[must_use]
    pub const fn default(&self) -> &ParamValue {
        &self.default
    }

    /// Single-line help text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Channels this parameter may be supplied through.
    #[must_use]
    pub const fn enabled(&self) -> EnabledChannels {
        self.enabled
    }

    /// Returns `true` when `channel` may supply this parameter.
    #[must_use]
    pub const fn accepts(&self, channel: Channel) -> bool {
        self.enabled.contains(channel)
    }

    /// Long flag identifier, without the leading `--`.
    #[must_use]
    pub fn long(&self) -> &str {
        &self.long
    }

    /// Short flag character, without the leading `-`.
    #[must_use]
    pub const fn short(&self) -> char {
        self.short
    }

    /// Environment variable name.
    #[must_use]
    pub fn env(&self) -> &str {
        &self.env
    }
}
