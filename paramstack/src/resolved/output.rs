//! Textual renderings of the resolved mapping.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::ResolvedParams;
use crate::{ParamError, ParamResult, ParamResultExt};

/// Supported textual output shapes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OutputFormat {
    /// Pretty-printed JSON object.
    #[default]
    Json,
    /// One `name = value` line per parameter, values in JSON notation.
    Text,
}

impl FromStr for OutputFormat {
    type Err = Arc<ParamError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            _ => Err(Arc::new(ParamError::UnknownFormat {
                format: s.to_owned(),
            })),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Text => "text",
        })
    }
}

impl ResolvedParams {
    /// Render the mapping in `format`.
    ///
    /// # Examples
    ///
    /// ```
    /// use paramstack::{MergeComposer, OutputFormat, ParamValue};
    /// use std::collections::BTreeMap;
    ///
    /// let mut composer = MergeComposer::new();
    /// composer.push_defaults(BTreeMap::from([
    ///     (String::from("name"), ParamValue::from("ada")),
    ///     (String::from("tags"), ParamValue::from(vec!["a", "b"])),
    /// ]));
    /// let text = composer.merge().render(OutputFormat::Text).expect("renders");
    /// assert_eq!(text, "name = \"ada\"\ntags = [\"a\",\"b\"]\n");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::Record`] if JSON encoding fails.
    pub fn render(&self, format: OutputFormat) -> ParamResult<String> {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(&self.to_json()).into_param(),
            OutputFormat::Text => {
                let mut out = String::new();
                for (name, value) in self.iter() {
                    let encoded = serde_json::to_string(&value.to_json()).into_param()?;
                    out.push_str(&format!("{name} = {encoded}\n"));
                }
                Ok(out)
            }
        }
    }
}
