//! Declarative parameter schemas resolved from the command line, the
//! environment and a configuration file.
//!
//! A caller declares named parameters (type, default, description and the
//! channels allowed to supply them). [`ParamSpecSet`] validates the whole
//! declaration once, and [`Resolver`] reads each channel and merges the
//! results with a fixed precedence: defaults, then file, then environment,
//! then command line.
//!
//! ```
//! use paramstack::{ArgvSource, EnvSource, FileSource, ParamValue, Provenance, resolve};
//! use serde_json::json;
//!
//! let schema = json!({
//!     "banner": "Usage: serve [options]",
//!     "params": {
//!         "port": {"type": "integer", "default": 8080, "description": "Listen port"},
//!         "host": {"type": "string", "default": "localhost", "description": "Bind address"}
//!     }
//! });
//! let params = resolve(
//!     &schema,
//!     ArgvSource::from_tokens(["--port", "9000"]),
//!     EnvSource::from_pairs([("HOST", "0.0.0.0")]),
//!     FileSource::Document(json!({"port": 8000})),
//! )?
//! .into_params()
//! .expect("help was not requested");
//!
//! assert_eq!(params.get("port"), Some(&ParamValue::Integer(9000)));
//! assert_eq!(params.provenance("host"), Some(Provenance::Environment));
//! # Ok::<_, std::sync::Arc<paramstack::ParamError>>(())
//! ```

use std::sync::Arc;

mod argv;
pub mod cast;
mod env;
mod error;
pub mod file;
mod merge;
mod resolved;
mod resolver;
mod result_ext;
mod schema;
mod value;

pub use argv::{ArgvOutcome, ArgvReader, ArgvSource, FlagDefinition, FlagValueKind};
pub use env::{EnvReader, EnvSource, MULTI_ENV_SLOTS, read_env_values};
pub use error::{AggregatedErrors, ArgvErrorKind, ParamError, SchemaField};
pub use file::{FileSource, read_file_values};
pub use merge::{MergeComposer, MergeLayer, Provenance};
pub use resolved::{OutputFormat, ResolvedParams};
pub use resolver::{Resolution, Resolver, resolve};
pub use result_ext::ParamResultExt;
pub use schema::{MAX_ENV_LENGTH, MAX_LONG_FLAG, MAX_NAME, ParamSpec, ParamSpecSet};
pub use value::{Channel, EnabledChannels, ParamType, ParamValue};

/// Result type used throughout the crate.
///
/// Errors are shared behind [`Arc`] so they can be collected into
/// [`ParamError::Aggregate`] and cloned into several reports.
pub type ParamResult<T> = Result<T, Arc<ParamError>>;
