//! Helpers for classifying and routing external errors.

use clap::{
    Error as ClapError,
    error::{ContextKind, ContextValue, ErrorKind},
};

use super::{ArgvErrorKind, ParamError};
use crate::argv::ToggleValueError;

/// Returns `true` when a [`clap::Error`] corresponds to `--help`.
///
/// Clap surfaces help requests through a specialised [`ErrorKind`] so the
/// command-line reader can turn them into a control signal instead of a
/// failure.
#[must_use]
pub(crate) fn is_display_request(err: &ClapError) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    )
}

/// Translate a `clap` parse failure into [`ParamError::Argv`].
///
/// Only the first rendered line is kept, minus clap's `error: ` prefix, so the
/// message names the offending token without clap's usage tail.
pub(crate) fn argv_error(err: &ClapError) -> ParamError {
    let kind = match err.kind() {
        ErrorKind::UnknownArgument => ArgvErrorKind::UnknownFlag,
        // clap reports an absent value as an invalid empty one
        ErrorKind::InvalidValue if has_rejected_value(err) => ArgvErrorKind::InvalidValue,
        ErrorKind::InvalidValue | ErrorKind::TooFewValues | ErrorKind::WrongNumberOfValues => {
            ArgvErrorKind::MissingValue
        }
        ErrorKind::ValueValidation if is_toggle_value(err) => ArgvErrorKind::UnexpectedValue,
        ErrorKind::TooManyValues | ErrorKind::NoEquals => ArgvErrorKind::UnexpectedValue,
        ErrorKind::ValueValidation => ArgvErrorKind::InvalidValue,
        _ => ArgvErrorKind::Other,
    };
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or_default();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .trim()
        .to_owned();
    ParamError::Argv { kind, message }
}

fn has_rejected_value(err: &ClapError) -> bool {
    matches!(
        err.get(ContextKind::InvalidValue),
        Some(ContextValue::String(value)) if !value.is_empty()
    )
}

fn is_toggle_value(err: &ClapError) -> bool {
    std::error::Error::source(err).is_some_and(|source| source.is::<ToggleValueError>())
}
