//! Declarative parameter schemas.
//!
//! A schema is validated once, eagerly, into a [`ParamSpecSet`]. Nothing
//! downstream re-checks a definition: readers and the resolver trust the
//! accessors of [`ParamSpec`].

mod rules;
mod set;
mod spec;

pub use rules::{MAX_ENV_LENGTH, MAX_LONG_FLAG, MAX_NAME};
pub use set::ParamSpecSet;
pub use spec::ParamSpec;

#[cfg(test)]
mod tests;
