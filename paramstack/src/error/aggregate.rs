//! A batch of violations reported together.

use std::collections::BTreeSet;
use std::{error::Error, fmt, sync::Arc};

use super::ParamError;

/// Every violation found by one validation or resolution pass.
///
/// Schema validation runs all of its rules before failing, so a schema with
/// several problems surfaces as one of these rather than the first problem
/// alone.
///
/// # Examples
///
/// ```
/// use paramstack::{ParamError, SchemaField};
///
/// let err = ParamError::aggregate(vec![
///     ParamError::schema("port", SchemaField::Type, "Type was not supplied"),
///     ParamError::schema("host", SchemaField::Default, "Default not supplied"),
/// ]);
/// let ParamError::Aggregate(batch) = err else {
///     unreachable!("two errors aggregate");
/// };
/// assert_eq!(batch.len(), 2);
/// assert_eq!(batch.params().into_iter().collect::<Vec<_>>(), ["host", "port"]);
/// ```
#[derive(Debug, Default)]
pub struct AggregatedErrors(Vec<Arc<ParamError>>);

impl AggregatedErrors {
    /// Wrap `errors`, keeping their order.
    #[must_use]
    pub const fn new(errors: Vec<Arc<ParamError>>) -> Self {
        Self(errors)
    }

    /// The violations, in the order they were found.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> impl Iterator<Item = &ParamError> {
        self.0.iter().map(Arc::as_ref)
    }

    /// The shared handles, for re-collecting into another batch.
    #[must_use]
    pub fn as_slice(&self) -> &[Arc<ParamError>] {
        &self.0
    }

    /// Names of the parameters that schema violations point at.
    #[must_use]
    pub fn params(&self) -> BTreeSet<&str> {
        self.iter()
            .filter_map(|err| match err {
                ParamError::Schema {
                    param: Some(param), ..
                } => Some(param.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of violations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when nothing was collected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One numbered line per violation: `1: …`, `2: …`.
impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut separator = "";
        for (number, err) in (1..).zip(self.iter()) {
            write!(f, "{separator}{number}: {err}")?;
            separator = "\n";
        }
        Ok(())
    }
}

impl Error for AggregatedErrors {}

impl IntoIterator for AggregatedErrors {
    type Item = Arc<ParamError>;
    type IntoIter = std::vec::IntoIter<Arc<ParamError>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
