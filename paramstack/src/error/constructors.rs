//! Constructors and aggregation helpers for `ParamError`.

use std::sync::Arc;

use super::{AggregatedErrors, ParamError, SchemaField};

impl ParamError {
    /// Tries to build a [`ParamError`] from an iterator of errors.
    ///
    /// The iterator is consumed eagerly. It returns:
    /// * `None` when no errors are supplied;
    /// * the inner error when a single [`Arc`] is uniquely owned;
    /// * [`Self::Aggregate`] containing that single [`Arc`] when the error is already shared; and
    /// * [`Self::Aggregate`] combining every error for two or more inputs.
    #[must_use]
    pub fn try_aggregate<I, E>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        let mut arcs: Vec<Arc<Self>> = errors.into_iter().map(Into::into).collect();
        if arcs.is_empty() {
            return None;
        }
        Some(if arcs.len() == 1 {
            let last = arcs.pop()?;
            match Arc::try_unwrap(last) {
                Ok(err) => err,
                Err(shared) => Self::Aggregate(Box::new(AggregatedErrors::new(vec![shared]))),
            }
        } else {
            Self::Aggregate(Box::new(AggregatedErrors::new(arcs)))
        })
    }

    /// Build a [`ParamError`] from at least one error.
    ///
    /// # Panics
    ///
    /// Panics if `errors` is empty. Use [`ParamError::try_aggregate`] when the
    /// error list may be empty.
    #[must_use]
    #[track_caller]
    pub fn aggregate<I, E>(errors: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        Self::try_aggregate(errors).map_or_else(
            || panic!("aggregate requires at least one error"),
            |err| err,
        )
    }

    /// Construct a schema violation attributed to parameter `param`.
    ///
    /// # Examples
    ///
    /// ```
    /// use paramstack::{ParamError, SchemaField};
    /// let e = ParamError::schema("port", SchemaField::Short, "Short flag is not a string");
    /// assert_eq!(e.to_string(), "Param 'port': Short flag is not a string");
    /// ```
    #[must_use]
    pub fn schema(param: impl Into<String>, field: SchemaField, message: impl Into<String>) -> Self {
        Self::Schema {
            param: Some(param.into()),
            field,
            message: message.into(),
        }
    }

    /// Construct a schema violation that spans the whole parameter set.
    #[must_use]
    pub fn schema_set(field: SchemaField, message: impl Into<String>) -> Self {
        Self::Schema {
            param: None,
            field,
            message: message.into(),
        }
    }

    /// Returns the schema field named by a [`ParamError::Schema`] violation.
    ///
    /// Aggregates report the field of their first entry.
    #[must_use]
    pub fn schema_field(&self) -> Option<SchemaField> {
        match self {
            Self::Schema { field, .. } => Some(*field),
            Self::Aggregate(errors) => errors.iter().next().and_then(Self::schema_field),
            _ => None,
        }
    }
}

/// Collapse collected errors into a single shared error.
///
/// Nested aggregates are flattened so every violation is reported at the same
/// level. Returns `Ok(())` when `errors` is empty.
pub(crate) fn collect_errors(errors: Vec<Arc<ParamError>>) -> Result<(), Arc<ParamError>> {
    let flat: Vec<Arc<ParamError>> = errors.into_iter().flat_map(flatten).collect();
    ParamError::try_aggregate(flat).map_or(Ok(()), |err| Err(Arc::new(err)))
}

fn flatten(err: Arc<ParamError>) -> Vec<Arc<ParamError>> {
    match &*err {
        ParamError::Aggregate(inner) => inner.as_slice().to_vec(),
        _ => vec![err],
    }
}
