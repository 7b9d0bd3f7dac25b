//! The file channel: loading configuration documents and reading parameter
//! values from them.

mod error;
mod loader;
mod parser;
mod reader;
#[cfg(feature = "yaml")]
mod yaml;

pub use loader::{FileSource, load_document};
pub use reader::read_file_values;

#[cfg(test)]
mod tests;
