//! Error types produced by schema validation and value resolution.

mod aggregate;
mod constructors;
mod conversions;
mod helpers;
mod types;

pub use aggregate::AggregatedErrors;
pub use types::{ArgvErrorKind, ParamError, SchemaField};

pub(crate) use constructors::collect_errors;
pub(crate) use helpers::{argv_error, is_display_request};
