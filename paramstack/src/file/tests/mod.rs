//! Shared helpers for file module tests along with focused submodules.

use anyhow::{Result, anyhow};

pub(super) mod loader_tests;

pub(super) fn with_jail<F>(f: F) -> Result<()>
where
    F: FnOnce(&mut figment::Jail) -> Result<()>,
{
    figment::Jail::try_with(|j| {
        f(j).map_err(|err| {
            // figment::Error currently only implements `From<String>`, so stringify the source.
            figment::Error::from(err.to_string())
        })
    })
    .map_err(|err| anyhow!(err.to_string()))
}

pub(super) fn to_anyhow<T>(result: crate::ParamResult<T>) -> Result<T> {
    result.map_err(|err| anyhow!(err.to_string()))
}
