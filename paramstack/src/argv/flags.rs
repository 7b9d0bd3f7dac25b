//! Flag definitions handed to the argument parser.
//!
//! Each parameter with a command-line channel becomes one
//! [`FlagDefinition`]: its long and short forms, whether it takes a value,
//! and whether a `--no-` form exists. The definition is the only thing the
//! rest of the crate knows about `clap`.

use clap::{Arg, ArgAction, ArgMatches, value_parser};

use thiserror::Error;

use crate::ParamSpec;
use crate::value::{Channel, ParamType, ParamValue};

// Process arguments cannot contain NUL, so no user token matches these.
const TOGGLE_ON: &str = "\0on";
const TOGGLE_OFF: &str = "\0off";

/// A toggle was written with an inline value, as in `--verbose=yes`.
#[derive(Debug, Error)]
#[error("boolean flags do not take a value")]
pub(crate) struct ToggleValueError;

/// A float flag was given text that is not a finite number.
#[derive(Debug, Error)]
enum FloatValueError {
    #[error(transparent)]
    Unparsable(#[from] std::num::ParseFloatError),
    #[error("'{0}' is not a finite number")]
    NotFinite(String),
}

fn finite_float(text: &str) -> Result<f64, FloatValueError> {
    let number: f64 = text.parse()?;
    if number.is_finite() {
        Ok(number)
    } else {
        Err(FloatValueError::NotFinite(text.to_owned()))
    }
}

fn toggle_state(text: &str) -> Result<bool, ToggleValueError> {
    match text {
        TOGGLE_ON => Ok(true),
        TOGGLE_OFF => Ok(false),
        _ => Err(ToggleValueError),
    }
}

/// Value kind accepted by a flag.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FlagValueKind {
    /// Arbitrary text.
    Text,
    /// Present or negated; takes no value.
    Toggle,
    /// Signed integer.
    Integer,
    /// Any number; integers are widened.
    Numeric,
}

impl FlagValueKind {
    /// Value kind used for parameters of type `ty`.
    #[must_use]
    pub const fn for_type(ty: ParamType) -> Self {
        match ty {
            ParamType::String => Self::Text,
            ParamType::Boolean => Self::Toggle,
            ParamType::Integer => Self::Integer,
            ParamType::Float => Self::Numeric,
        }
    }

    /// Returns `true` when the flag is followed by a value.
    #[must_use]
    pub const fn takes_value(self) -> bool {
        !matches!(self, Self::Toggle)
    }
}

/// Command-line grammar of one parameter.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FlagDefinition {
    param: String,
    description: String,
    long: Option<String>,
    short: Option<char>,
    kind: FlagValueKind,
}

impl FlagDefinition {
    /// Definition for `spec`, or `None` when neither flag channel is enabled.
    #[must_use]
    pub fn from_spec(spec: &ParamSpec) -> Option<Self> {
        let long = spec.accepts(Channel::Long).then(|| spec.long().to_owned());
        let short = spec.accepts(Channel::Short).then(|| spec.short());
        if long.is_none() && short.is_none() {
            return None;
        }
        Some(Self {
            param: spec.name().to_owned(),
            description: spec.description().to_owned(),
            long,
            short,
            kind: FlagValueKind::for_type(spec.param_type()),
        })
    }

    /// Parameter the flag supplies.
    #[must_use]
    pub fn param(&self) -> &str {
        &self.param
    }

    /// Long form, without `--`.
    #[must_use]
    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    /// Short form, without `-`.
    #[must_use]
    pub const fn short(&self) -> Option<char> {
        self.short
    }

    /// Value kind accepted by the flag.
    #[must_use]
    pub const fn kind(&self) -> FlagValueKind {
        self.kind
    }

    /// Long form of the negation, present for toggles with a long flag.
    #[must_use]
    pub fn negated_long(&self) -> Option<String> {
        match (self.kind, &self.long) {
            (FlagValueKind::Toggle, Some(long)) => Some(format!("no-{long}")),
            _ => None,
        }
    }

    fn negation_id(&self) -> String {
        format!("no-{}", self.param)
    }

    /// Parser arguments for this flag: the flag itself and, for toggles with
    /// a long form, its negation.
    pub(super) fn args(&self) -> Vec<Arg> {
        let mut primary = self.configure(Arg::new(self.param.clone()), TOGGLE_ON);
        primary = primary.help(self.description.clone());
        if let Some(long) = &self.long {
            primary = primary.long(long.clone());
        }
        if let Some(short) = self.short {
            primary = primary.short(short);
        }
        let mut args = vec![primary];
        if let Some(negated) = self.negated_long() {
            let long = self.long.as_deref().unwrap_or_default();
            args.push(
                self.configure(Arg::new(self.negation_id()), TOGGLE_OFF)
                    .long(negated)
                    .help(format!("Turn off --{long}")),
            );
        }
        args
    }

    fn configure(&self, base: Arg, toggle_value: &'static str) -> Arg {
        let arg = base.action(ArgAction::Append);
        match self.kind {
            FlagValueKind::Toggle => arg
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value(toggle_value)
                .value_parser(toggle_state),
            FlagValueKind::Text => arg
                .num_args(1)
                .value_name(self.value_name())
                .allow_hyphen_values(true)
                .value_parser(value_parser!(String)),
            FlagValueKind::Integer => arg
                .num_args(1)
                .value_name(self.value_name())
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i64)),
            FlagValueKind::Numeric => arg
                .num_args(1)
                .value_name(self.value_name())
                .allow_negative_numbers(true)
                .value_parser(finite_float),
        }
    }

    fn value_name(&self) -> String {
        self.param.to_ascii_uppercase()
    }

    /// Every occurrence of this flag and its negation, in command-line order.
    pub(super) fn occurrences(&self, matches: &ArgMatches) -> Vec<ParamValue> {
        let mut found = match self.kind {
            FlagValueKind::Toggle => {
                let mut toggles = indexed::<bool>(matches, &self.param);
                toggles.extend(indexed::<bool>(matches, &self.negation_id()));
                toggles
            }
            FlagValueKind::Text => indexed::<String>(matches, &self.param),
            FlagValueKind::Integer => indexed::<i64>(matches, &self.param),
            FlagValueKind::Numeric => indexed::<f64>(matches, &self.param),
        };
        found.sort_by_key(|(index, _)| *index);
        found.into_iter().map(|(_, value)| value).collect()
    }
}

/// Values of `id` paired with their command-line positions.
///
/// An id that was never registered (the negation of a short-only toggle)
/// yields nothing.
fn indexed<T>(matches: &ArgMatches, id: &str) -> Vec<(usize, ParamValue)>
where
    T: Clone + Send + Sync + Into<ParamValue> + 'static,
{
    let Ok(Some(values)) = matches.try_get_many::<T>(id) else {
        return Vec::new();
    };
    let Some(indices) = matches.indices_of(id) else {
        return Vec::new();
    };
    indices.zip(values.cloned().map(Into::into)).collect()
}
