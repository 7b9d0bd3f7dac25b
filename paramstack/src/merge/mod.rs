//! Precedence merge of the per-channel results.

mod composer;
mod layer;

pub use composer::MergeComposer;
pub use layer::{MergeLayer, Provenance};
