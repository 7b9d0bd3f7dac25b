//! Value model shared by the schema, the channel readers and the resolver.
//!
//! [`ParamType`] is the closed set of declarable types; every cast and
//! validation routine dispatches on it with a single `match`. [`ParamValue`]
//! carries resolved values, and [`Channel`]/[`EnabledChannels`] describe the
//! input mechanisms a parameter may be supplied through.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value as JsonValue;

/// Declared type of a parameter.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum ParamType {
    /// Free text; never cast.
    String,
    /// `true` or `false`.
    Boolean,
    /// Signed 64-bit integer.
    Integer,
    /// 64-bit float; integer input is widened.
    Float,
}

impl ParamType {
    /// Every declarable type, sorted by name.
    pub const ALL: [Self; 4] = [Self::Boolean, Self::Float, Self::Integer, Self::String];

    /// Look up a type by its schema name.
    ///
    /// # Examples
    ///
    /// ```
    /// use paramstack::ParamType;
    /// assert_eq!(ParamType::from_name("integer"), Some(ParamType::Integer));
    /// assert_eq!(ParamType::from_name("decimal"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.name() == name)
    }

    /// Schema name of the type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
        }
    }

    /// Convert a non-null native document value of this type.
    ///
    /// Returns `None` when the value has the wrong kind. Integer values are
    /// widened for [`ParamType::Float`]; integers beyond the signed 64-bit
    /// range are not integers.
    #[must_use]
    pub fn accept_native(self, value: &JsonValue) -> Option<ParamValue> {
        match (self, value) {
            (Self::String, JsonValue::String(text)) => Some(ParamValue::Text(text.clone())),
            (Self::Boolean, JsonValue::Bool(flag)) => Some(ParamValue::Bool(*flag)),
            (Self::Integer, JsonValue::Number(number)) => number.as_i64().map(ParamValue::Integer),
            (Self::Float, JsonValue::Number(number)) => number.as_f64().map(ParamValue::Float),
            _ => None,
        }
    }
}

/// Normal form prints the schema name; the alternate form (`{:#}`) adds the
/// indefinite article used in diagnostics ("an integer").
impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            let article = if matches!(self, Self::Integer) { "an" } else { "a" };
            write!(f, "{article} {}", self.name())
        } else {
            f.write_str(self.name())
        }
    }
}

impl FromStr for ParamType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown parameter type '{s}'"))
    }
}

/// Mechanism through which a parameter value may be supplied.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Channel {
    /// `--long` command-line flag.
    Long,
    /// `-s` command-line flag.
    Short,
    /// Environment variable.
    Env,
    /// Configuration file entry.
    File,
}

impl Channel {
    /// Every channel, sorted by name.
    pub const ALL: [Self; 4] = [Self::Env, Self::File, Self::Long, Self::Short];

    /// Look up a channel by its schema name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|channel| channel.name() == name)
    }

    /// Schema name of the channel.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Long => "long",
            Self::Short => "short",
            Self::Env => "env",
            Self::File => "file",
        }
    }

    /// Describe how `key` is written for this channel in diagnostics.
    #[must_use]
    pub fn describe_key(self, key: &str) -> String {
        match self {
            Self::Long => format!("--{key}"),
            Self::Short => format!("-{key}"),
            Self::Env => format!("ENV['{key}']"),
            Self::File => format!("file entry '{key}'"),
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Long => 0b0001,
            Self::Short => 0b0010,
            Self::Env => 0b0100,
            Self::File => 0b1000,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown channel '{s}'"))
    }
}

/// Set of channels a parameter accepts.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct EnabledChannels(u8);

impl EnabledChannels {
    /// All four channels.
    #[must_use]
    pub const fn all() -> Self {
        Self(0b1111)
    }

    /// Returns `true` when `channel` is enabled.
    #[must_use]
    pub const fn contains(self, channel: Channel) -> bool {
        self.0 & channel.bit() != 0
    }

    /// Returns `true` when no channel is enabled.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` when either command-line channel is enabled.
    #[must_use]
    pub const fn any_flag(self) -> bool {
        self.contains(Channel::Long) || self.contains(Channel::Short)
    }

    /// Iterate over the enabled channels in name order.
    pub fn iter(self) -> impl Iterator<Item = Channel> {
        Channel::ALL
            .into_iter()
            .filter(move |channel| self.contains(*channel))
    }
}

impl FromIterator<Channel> for EnabledChannels {
    fn from_iter<I: IntoIterator<Item = Channel>>(iter: I) -> Self {
        Self(iter.into_iter().fold(0, |bits, channel| bits | channel.bit()))
    }
}

impl Default for EnabledChannels {
    fn default() -> Self {
        Self::all()
    }
}

/// A resolved parameter value.
///
/// Scalars carry the declared type; multi parameters resolve to
/// [`ParamValue::List`]. `Null` represents an explicit "no value", such as a
/// `null` default.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Explicitly absent value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Integer(i64),
    /// Floating-point value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Ordered sequence of values.
    List(Vec<ParamValue>),
}

impl ParamValue {
    /// Returns `true` for [`ParamValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean value, if this is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Returns the integer value, if this is one.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the float value, if this is one.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the text value, if this is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Returns the sequence, if this is one.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Name of the value's kind, as used in diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "string",
            Self::List(_) => "sequence",
        }
    }

    /// Convert into a generic JSON value.
    ///
    /// Non-finite floats have no JSON form and become `null`.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Bool(flag) => JsonValue::Bool(*flag),
            Self::Integer(number) => JsonValue::from(*number),
            Self::Float(number) => {
                serde_json::Number::from_f64(*number).map_or(JsonValue::Null, JsonValue::Number)
            }
            Self::Text(text) => JsonValue::String(text.clone()),
            Self::List(items) => JsonValue::Array(items.iter().map(Self::to_json).collect()),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// Name of a generic document value's kind, as used in diagnostics.
pub(crate) fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(number) => {
            if number.is_f64() {
                "float"
            } else {
                "integer"
            }
        }
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "sequence",
        JsonValue::Object(_) => "mapping",
    }
}
