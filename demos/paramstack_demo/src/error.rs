//! Errors reported by the demo binary.

use std::io;
use std::sync::Arc;

use thiserror::Error;

/// Failures surfaced to the user by `paramstack-demo`.
#[derive(Debug, Error)]
pub enum DemoError {
    /// The schema location was not given.
    #[error("set {0} to the path of a parameter schema")]
    MissingSchema(&'static str),
    /// Schema validation or value resolution failed.
    #[error("failed to resolve parameters: {0}")]
    Params(#[from] Arc<paramstack::ParamError>),
    /// Writing to standard output failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result alias for the demo binary.
pub type Result<T> = std::result::Result<T, DemoError>;
