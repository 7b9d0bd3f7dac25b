//! The resolution pipeline: defaults, file, environment and command line,
//! merged in that order of increasing precedence.

use std::collections::BTreeMap;
use std::path::Path;

use camino::Utf8PathBuf;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::argv::{ArgvOutcome, ArgvReader, ArgvSource};
use crate::env::{EnvSource, read_env_values};
use crate::file::{FileSource, read_file_values};
use crate::merge::MergeComposer;
use crate::resolved::ResolvedParams;
use crate::value::ParamValue;
use crate::{ParamResult, ParamSpecSet};

/// Outcome of a resolution.
///
/// A help request is a normal outcome, not an error: callers print the text
/// and exit successfully.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    /// Every parameter resolved.
    Resolved(ResolvedParams),
    /// The help flag was given; carries the usage text.
    HelpRequested(String),
}

impl Resolution {
    /// The resolved mapping, or `None` when help was requested.
    #[must_use]
    pub fn into_params(self) -> Option<ResolvedParams> {
        match self {
            Self::Resolved(params) => Some(params),
            Self::HelpRequested(_) => None,
        }
    }

    /// The usage text when help was requested.
    #[must_use]
    pub fn help_text(&self) -> Option<&str> {
        match self {
            Self::Resolved(_) => None,
            Self::HelpRequested(text) => Some(text),
        }
    }
}

/// Resolves a validated schema against its three input channels.
///
/// Defaults read the process command line and environment and no
/// configuration file.
///
/// # Examples
///
/// ```
/// use paramstack::{ArgvSource, EnvSource, ParamSpecSet, ParamValue, Resolution, Resolver};
/// use serde_json::json;
///
/// let specs = ParamSpecSet::from_value(&json!({"params": {
///     "level": {"type": "integer", "default": 1, "description": "Level"}
/// }}))
/// .expect("valid schema");
/// let resolution = Resolver::new(&specs)
///     .argv(ArgvSource::from_tokens(["--level", "3"]))
///     .env(EnvSource::from_pairs([("LEVEL", "2")]))
///     .resolve()
///     .expect("resolves");
/// let Resolution::Resolved(params) = resolution else {
///     panic!("no help requested");
/// };
/// assert_eq!(params.get("level"), Some(&ParamValue::Integer(3)));
/// ```
#[derive(Clone, Debug)]
pub struct Resolver<'a> {
    specs: &'a ParamSpecSet,
    argv: ArgvSource,
    env: EnvSource,
    file: FileSource,
    program_name: Option<String>,
}

impl<'a> Resolver<'a> {
    /// Create a resolver for `specs`.
    #[must_use]
    pub fn new(specs: &'a ParamSpecSet) -> Self {
        Self {
            specs,
            argv: ArgvSource::default(),
            env: EnvSource::default(),
            file: FileSource::default(),
            program_name: None,
        }
    }

    /// Set the command-line source.
    #[must_use]
    pub fn argv(mut self, argv: ArgvSource) -> Self {
        self.argv = argv;
        self
    }

    /// Set the environment source.
    #[must_use]
    pub fn env(mut self, env: EnvSource) -> Self {
        self.env = env;
        self
    }

    /// Set the configuration file source.
    #[must_use]
    pub fn file(mut self, file: impl Into<FileSource>) -> Self {
        self.file = file.into();
        self
    }

    /// Set the program name used in the usage line of the help text.
    ///
    /// Without one, the name of the running executable is used for the
    /// process command line and `program` otherwise.
    #[must_use]
    pub fn program_name(mut self, name: impl Into<String>) -> Self {
        self.program_name = Some(name.into());
        self
    }

    /// Every parameter's declared default, `null` included.
    #[must_use]
    pub fn defaults(&self) -> BTreeMap<String, ParamValue> {
        self.specs
            .iter()
            .map(|spec| (spec.name().to_owned(), spec.default().clone()))
            .collect()
    }

    fn reader(&self) -> ArgvReader<'a> {
        let reader = ArgvReader::new(self.specs);
        let name = self.program_name.clone().or_else(|| match self.argv {
            ArgvSource::Process => process_name(),
            ArgvSource::Tokens(_) | ArgvSource::Disabled => None,
        });
        match name {
            Some(program) => reader.program_name(program),
            None => reader,
        }
    }

    /// Run the pipeline.
    ///
    /// The command line is parsed first so a help request returns before
    /// any file or environment input is read.
    ///
    /// # Errors
    ///
    /// Returns the first channel error: command-line parse failures and
    /// duplicate flags, then file loading and type mismatches, then
    /// environment cast failures.
    pub fn resolve(&self) -> ParamResult<Resolution> {
        let cli_values = match self.argv.tokens() {
            Some(tokens) => match self.reader().read(tokens)? {
                ArgvOutcome::HelpRequested(text) => {
                    return Ok(Resolution::HelpRequested(text));
                }
                ArgvOutcome::Values(values) => values,
            },
            None => BTreeMap::new(),
        };

        let document = self.file.load()?;
        let file_values = read_file_values(self.specs, &document)?;
        let env_values = read_env_values(self.specs, &self.env.snapshot())?;
        debug!(
            file = file_values.len(),
            env = env_values.len(),
            cli = cli_values.len(),
            "channel values read"
        );

        let mut composer = MergeComposer::with_capacity(4);
        composer.push_defaults(self.defaults());
        composer.push_file(file_values, self.file_path());
        composer.push_environment(env_values);
        composer.push_cli(cli_values);
        Ok(Resolution::Resolved(composer.merge()))
    }

    fn file_path(&self) -> Option<Utf8PathBuf> {
        match &self.file {
            FileSource::Path(path) => Utf8PathBuf::from_path_buf(path.clone()).ok(),
            FileSource::None | FileSource::Document(_) => None,
        }
    }
}

fn process_name() -> Option<String> {
    let first = std::env::args_os().next()?;
    Path::new(&first)
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_owned)
}

/// Validate `schema` and resolve it against the given sources.
///
/// # Examples
///
/// ```
/// use paramstack::{ArgvSource, EnvSource, FileSource, ParamValue, resolve};
/// use serde_json::json;
///
/// let schema = json!({"params": {
///     "foo": {"type": "boolean", "default": false, "description": "Foo"},
///     "bar": {"type": "string", "multi": true, "default": [], "description": "Bar"},
///     "baz": {"type": "integer", "default": 21, "description": "Baz", "env": "BAZ", "short": "z"}
/// }});
/// let params = resolve(
///     &schema,
///     ArgvSource::from_tokens(["--foo"]),
///     EnvSource::from_pairs([("BAZ", "59")]),
///     FileSource::None,
/// )
/// .expect("resolves")
/// .into_params()
/// .expect("no help requested");
/// assert_eq!(params.get("foo"), Some(&ParamValue::Bool(true)));
/// assert_eq!(params.get("bar"), Some(&ParamValue::List(vec![])));
/// assert_eq!(params.get("baz"), Some(&ParamValue::Integer(59)));
/// ```
///
/// # Errors
///
/// Returns schema errors before reading any input, then the errors of
/// [`Resolver::resolve`].
pub fn resolve(
    schema: &JsonValue,
    argv: ArgvSource,
    env: EnvSource,
    file: FileSource,
) -> ParamResult<Resolution> {
    let specs = ParamSpecSet::from_value(schema)?;
    Resolver::new(&specs).argv(argv).env(env).file(file).resolve()
}
