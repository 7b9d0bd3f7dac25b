//! Primary error enum for schema validation and value resolution.

use std::fmt;

use thiserror::Error;

use super::aggregate::AggregatedErrors;
use crate::value::{Channel, ParamType};

/// Errors that can occur while validating a schema or resolving values.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParamError {
    /// The declared parameter schema is invalid.
    #[error("{}", schema_message(.param, .message))]
    Schema {
        /// Parameter the violation belongs to; `None` for set-level checks.
        param: Option<String>,
        /// Schema attribute that failed validation.
        field: SchemaField,
        /// Human-readable explanation of the violation.
        message: String,
    },

    /// Text supplied through a channel could not be cast to the declared type.
    #[error("{}", cast_message(.channel, .key, .expected, .text))]
    Cast {
        /// Channel the text arrived through.
        channel: Channel,
        /// Channel-specific identifier, such as the environment variable name.
        key: String,
        /// Type the text was expected to hold.
        expected: ParamType,
        /// The offending text, untrimmed.
        text: String,
    },

    /// A configuration file value had the wrong native kind.
    #[error("expected {expected:#} for '{param}' in the configuration file, but got {actual}")]
    TypeMismatch {
        /// Parameter whose value was rejected.
        param: String,
        /// Declared type of the parameter.
        expected: ParamType,
        /// Kind of value the document actually held.
        actual: &'static str,
    },

    /// A single-valued parameter was supplied more than once on the command line.
    #[error("cannot supply '{param}' more than once on the command line")]
    DuplicateFlag {
        /// Parameter that was repeated.
        param: String,
    },

    /// The command line could not be parsed.
    #[error("invalid command-line arguments: {message}")]
    Argv {
        /// Broad classification of the failure.
        kind: ArgvErrorKind,
        /// Parser diagnostic naming the offending token.
        message: String,
    },

    /// Error originating from a configuration file.
    #[error("configuration file error in '{path}': {source}")]
    File {
        /// Path that triggered the failure.
        path: std::path::PathBuf,
        /// Underlying error reported by the file loader.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A configuration document was not a mapping of parameter names.
    #[error("configuration document must be a mapping of parameter names, found {actual}")]
    InvalidDocument {
        /// Kind of value found at the document root.
        actual: &'static str,
    },

    /// An unsupported output format was requested.
    #[error("cannot render resolved parameters in the format '{format}'")]
    UnknownFormat {
        /// The requested format name.
        format: String,
    },

    /// Resolved parameters could not be shaped into the requested record.
    #[error("resolved parameters do not fit the requested record: {message}")]
    Record {
        /// Deserialisation diagnostic.
        message: String,
    },

    /// Multiple errors occurred while validating or resolving.
    #[error("multiple configuration errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}

fn schema_message(param: &Option<String>, message: &str) -> String {
    param.as_deref().map_or_else(
        || message.to_owned(),
        |name| format!("Param '{name}': {message}"),
    )
}

fn cast_message(channel: &Channel, key: &str, expected: &ParamType, text: &str) -> String {
    format!(
        "{} had unexpected content for {expected:#}: '{text}'",
        channel.describe_key(key)
    )
}

/// Schema attribute named by a [`ParamError::Schema`] violation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum SchemaField {
    /// The schema root or its `params` mapping.
    Params,
    /// The optional help banner.
    Banner,
    /// Parameter name.
    Name,
    /// Parameter description.
    Description,
    /// Declared value type.
    Type,
    /// Declared default value.
    Default,
    /// Multi-value flag.
    Multi,
    /// Enabled input channels.
    Enabled,
    /// Long command-line flag.
    Long,
    /// Short command-line flag.
    Short,
    /// Environment variable name.
    Env,
}

impl fmt::Display for SchemaField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Params => "params",
            Self::Banner => "banner",
            Self::Name => "name",
            Self::Description => "description",
            Self::Type => "type",
            Self::Default => "default",
            Self::Multi => "multi",
            Self::Enabled => "enabled",
            Self::Long => "long",
            Self::Short => "short",
            Self::Env => "env",
        };
        f.write_str(label)
    }
}

/// Classification of command-line parse failures.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ArgvErrorKind {
    /// A flag that no parameter defines, or a stray positional token.
    UnknownFlag,
    /// A typed flag was given without its value.
    MissingValue,
    /// A value was attached to a flag that takes none.
    UnexpectedValue,
    /// A value could not be parsed into the flag's type.
    InvalidValue,
    /// Any other parser failure.
    Other,
}
