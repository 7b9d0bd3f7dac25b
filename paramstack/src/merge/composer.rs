//! Layer composition and the precedence fold.

use tracing::debug;

use camino::Utf8PathBuf;

use std::collections::BTreeMap;

use super::{MergeLayer, Provenance};
use crate::resolved::ResolvedParams;
use crate::value::ParamValue;

/// Builder that accumulates [`MergeLayer`] instances and folds them.
///
/// Layers are applied in precedence order (defaults, file, environment,
/// command line) whatever order they were pushed in; layers of equal
/// provenance apply in push order. A key present in a later layer replaces
/// the earlier value entirely, sequences included.
///
/// ```rust
/// use paramstack::{MergeComposer, ParamValue, Provenance};
/// use std::collections::BTreeMap;
///
/// let layer = |value: i64| BTreeMap::from([(String::from("a"), ParamValue::from(value))]);
///
/// let mut composer = MergeComposer::new();
/// composer.push_cli(layer(4));
/// composer.push_defaults(layer(1));
/// composer.push_environment(layer(3));
///
/// let resolved = composer.merge();
/// assert_eq!(resolved.get("a"), Some(&ParamValue::Integer(4)));
/// assert_eq!(resolved.provenance("a"), Some(Provenance::Cli));
/// ```
#[derive(Debug, Default)]
pub struct MergeComposer {
    layers: Vec<MergeLayer>,
}

impl MergeComposer {
    /// Create an empty composer.
    #[must_use]
    pub const fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Create a composer with preallocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            layers: Vec::with_capacity(capacity),
        }
    }

    /// Push a defaults layer.
    pub fn push_defaults(&mut self, values: BTreeMap<String, ParamValue>) {
        self.push_layer(MergeLayer::defaults(values));
    }

    /// Push a configuration file layer.
    pub fn push_file(&mut self, values: BTreeMap<String, ParamValue>, path: Option<Utf8PathBuf>) {
        self.push_layer(MergeLayer::file(values, path));
    }

    /// Push an environment layer.
    pub fn push_environment(&mut self, values: BTreeMap<String, ParamValue>) {
        self.push_layer(MergeLayer::environment(values));
    }

    /// Push a CLI layer.
    pub fn push_cli(&mut self, values: BTreeMap<String, ParamValue>) {
        self.push_layer(MergeLayer::cli(values));
    }

    /// Push an arbitrary layer.
    pub fn push_layer(&mut self, layer: MergeLayer) {
        self.layers.push(layer);
    }

    /// Layers accumulated so far, in push order.
    #[must_use]
    pub fn layers(&self) -> &[MergeLayer] {
        &self.layers
    }

    /// Fold the layers into the resolved mapping.
    #[must_use]
    pub fn merge(mut self) -> ResolvedParams {
        self.layers.sort_by_key(MergeLayer::provenance);
        let mut resolved = ResolvedParams::default();
        for layer in self.layers {
            let provenance: Provenance = layer.provenance();
            debug!(
                %provenance,
                path = layer.path().map(camino::Utf8Path::as_str),
                keys = layer.values().len(),
                "merging layer"
            );
            for (name, value) in layer.into_values() {
                resolved.insert(name, value, provenance);
            }
        }
        resolved
    }
}
