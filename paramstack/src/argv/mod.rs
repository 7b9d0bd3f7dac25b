//! The command-line channel.
//!
//! Token grammar is delegated to `clap`'s builder API; this module decides
//! which flags exist, counts occurrences and turns the parse into parameter
//! values. `clap` errors never leave the module: they are translated into
//! [`crate::ParamError::Argv`], and a help request becomes
//! [`ArgvOutcome::HelpRequested`].

mod flags;

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::sync::Arc;

use clap::{Arg, ArgAction, ColorChoice, Command};
use tracing::debug;

pub use flags::{FlagDefinition, FlagValueKind};
pub(crate) use flags::ToggleValueError;

use crate::error::{argv_error, is_display_request};
use crate::value::{Channel, ParamValue};
use crate::{ParamError, ParamResult, ParamSpecSet};

const HELP_ID: &str = "paramstack-help";
const DEFAULT_PROGRAM_NAME: &str = "program";

/// Where the command-line channel reads tokens from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ArgvSource {
    /// Arguments of the current process, without the program name.
    #[default]
    Process,
    /// An explicit token list, without a program name.
    Tokens(Vec<OsString>),
    /// The channel contributes nothing and help is unavailable.
    Disabled,
}

impl ArgvSource {
    /// Build a source from explicit tokens.
    ///
    /// # Examples
    ///
    /// ```
    /// use paramstack::ArgvSource;
    ///
    /// let source = ArgvSource::from_tokens(["--port", "8080"]);
    /// assert_eq!(source.tokens().map(|tokens| tokens.len()), Some(2));
    /// ```
    pub fn from_tokens<T: Into<OsString>>(tokens: impl IntoIterator<Item = T>) -> Self {
        Self::Tokens(tokens.into_iter().map(Into::into).collect())
    }

    /// The tokens to parse, or `None` when the channel is disabled.
    #[must_use]
    pub fn tokens(&self) -> Option<Vec<OsString>> {
        match self {
            Self::Process => Some(std::env::args_os().skip(1).collect()),
            Self::Tokens(tokens) => Some(tokens.clone()),
            Self::Disabled => None,
        }
    }
}

/// Result of reading the command line.
#[derive(Clone, Debug, PartialEq)]
pub enum ArgvOutcome {
    /// Values of every parameter that was supplied.
    Values(BTreeMap<String, ParamValue>),
    /// The help flag was given; carries the rendered usage text.
    HelpRequested(String),
}

/// Reads parameter values from command-line tokens.
#[derive(Clone, Debug)]
pub struct ArgvReader<'a> {
    specs: &'a ParamSpecSet,
    program_name: String,
}

impl<'a> ArgvReader<'a> {
    /// Create a reader for every flag-enabled parameter of `specs`.
    #[must_use]
    pub fn new(specs: &'a ParamSpecSet) -> Self {
        Self {
            specs,
            program_name: String::from(DEFAULT_PROGRAM_NAME),
        }
    }

    /// Set the program name shown in the usage line.
    #[must_use]
    pub fn program_name(mut self, name: impl Into<String>) -> Self {
        self.program_name = name.into();
        self
    }

    /// Flag definitions in parameter name order.
    pub fn definitions(&self) -> impl Iterator<Item = FlagDefinition> + 'a {
        self.specs.iter().filter_map(FlagDefinition::from_spec)
    }

    /// Build the parser definition.
    ///
    /// The help flag keeps `-h` and `--help` unless a parameter claims them;
    /// a claimed form belongs to the parameter.
    #[must_use]
    pub fn command(&self) -> Command {
        let mut command = Command::new(self.program_name.clone())
            .no_binary_name(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .color(ColorChoice::Never);
        if let Some(banner) = self.specs.banner() {
            command = command.before_help(banner.to_owned());
        }
        for definition in self.definitions() {
            command = command.args(definition.args());
        }
        match self.help_arg() {
            Some(help) => command.arg(help),
            None => command,
        }
    }

    fn help_arg(&self) -> Option<Arg> {
        let claims_long = self
            .specs
            .iter()
            .any(|spec| spec.accepts(Channel::Long) && spec.long() == "help");
        let claims_short = self
            .specs
            .iter()
            .any(|spec| spec.accepts(Channel::Short) && spec.short() == 'h');
        let help = Arg::new(HELP_ID)
            .action(ArgAction::Help)
            .help("Print help");
        match (claims_long, claims_short) {
            (false, false) => Some(help.long("help").short('h')),
            (false, true) => Some(help.long("help")),
            (true, false) => Some(help.short('h')),
            (true, true) => None,
        }
    }

    /// Render the usage text: banner, usage line and one entry per flag.
    #[must_use]
    pub fn help(&self) -> String {
        self.command().render_help().to_string()
    }

    /// Parse `tokens` and resolve every supplied parameter.
    ///
    /// Multi parameters collect one entry per occurrence in command-line
    /// order; `--no-` forms count as occurrences of their parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::Argv`] for unknown flags, positional tokens,
    /// missing or unparsable values, and [`ParamError::DuplicateFlag`] when a
    /// single-valued parameter occurs more than once.
    pub fn read<I, T>(&self, tokens: I) -> ParamResult<ArgvOutcome>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = match self.command().try_get_matches_from(tokens) {
            Ok(matches) => matches,
            Err(err) if is_display_request(&err) => {
                debug!("help requested on the command line");
                return Ok(ArgvOutcome::HelpRequested(err.to_string()));
            }
            Err(err) => return Err(Arc::new(argv_error(&err))),
        };

        let mut values = BTreeMap::new();
        for definition in self.definitions() {
            let mut found = definition.occurrences(&matches);
            let Some(spec) = self.specs.get(definition.param()) else {
                continue;
            };
            if spec.is_multi() {
                if !found.is_empty() {
                    values.insert(definition.param().to_owned(), ParamValue::List(found));
                }
            } else if found.len() > 1 {
                return Err(Arc::new(ParamError::DuplicateFlag {
                    param: definition.param().to_owned(),
                }));
            } else if let Some(value) = found.pop() {
                values.insert(definition.param().to_owned(), value);
            }
        }
        Ok(ArgvOutcome::Values(values))
    }
}
