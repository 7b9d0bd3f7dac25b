//! Layer metadata and the values each layer carries.

use std::collections::BTreeMap;
use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};

use crate::value::ParamValue;

/// Where a merge layer's values came from.
///
/// Variants are ordered by precedence: later variants override earlier ones.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum Provenance {
    /// Defaults declared in the schema.
    Defaults,
    /// Values read from the configuration file.
    File,
    /// Values read from environment variables.
    Environment,
    /// Values supplied on the command line.
    Cli,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Defaults => "defaults",
            Self::File => "file",
            Self::Environment => "environment",
            Self::Cli => "cli",
        };
        f.write_str(label)
    }
}

/// Values contributed by one source.
#[derive(Clone, Debug, PartialEq)]
pub struct MergeLayer {
    provenance: Provenance,
    values: BTreeMap<String, ParamValue>,
    path: Option<Utf8PathBuf>,
}

impl MergeLayer {
    /// Construct a layer of schema defaults.
    #[must_use]
    pub const fn defaults(values: BTreeMap<String, ParamValue>) -> Self {
        Self {
            provenance: Provenance::Defaults,
            values,
            path: None,
        }
    }

    /// Construct a layer read from a configuration file.
    #[must_use]
    pub const fn file(values: BTreeMap<String, ParamValue>, path: Option<Utf8PathBuf>) -> Self {
        Self {
            provenance: Provenance::File,
            values,
            path,
        }
    }

    /// Construct a layer read from environment variables.
    #[must_use]
    pub const fn environment(values: BTreeMap<String, ParamValue>) -> Self {
        Self {
            provenance: Provenance::Environment,
            values,
            path: None,
        }
    }

    /// Construct a layer read from the command line.
    #[must_use]
    pub const fn cli(values: BTreeMap<String, ParamValue>) -> Self {
        Self {
            provenance: Provenance::Cli,
            values,
            path: None,
        }
    }

    /// Returns the provenance of the layer.
    #[must_use]
    pub const fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// Returns the associated path if this layer was read from a file.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8Path> {
        self.path.as_deref()
    }

    /// Values carried by the layer, keyed by parameter name.
    #[must_use]
    pub const fn values(&self) -> &BTreeMap<String, ParamValue> {
        &self.values
    }

    /// Consume the layer and return its values.
    #[must_use]
    pub fn into_values(self) -> BTreeMap<String, ParamValue> {
        self.values
    }
}
