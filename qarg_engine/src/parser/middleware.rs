use std::env;

use crate::matcher::OffsetValue;
use crate::model::Namespace;
use crate::parser::base::*;
use crate::parser::interface::UserInterface;
use crate::parser::printer::{ErrorContext, Printer};

/// The configured command line parser.
/// Built via [`CommandLineParser::build`](crate::CommandLineParser::build) or [`CommandLineParser::build_parser`](crate::CommandLineParser::build_parser).
///
/// A `GeneralParser` may be run against any number of token vectors.
pub struct GeneralParser {
    program: String,
    parser: Parser,
    printer: Printer,
    user_interface: Box<dyn UserInterface>,
}

impl std::fmt::Debug for GeneralParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneralParser")
            .field("program", &self.program)
            .finish_non_exhaustive()
    }
}

impl GeneralParser {
    pub(crate) fn new(
        program: impl Into<String>,
        parser: Parser,
        printer: Printer,
        user_interface: Box<dyn UserInterface>,
    ) -> Self {
        Self {
            program: program.into(),
            parser,
            printer,
            user_interface,
        }
    }

    /// The program name, as shown in the usage line.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The about message, if one was configured.
    pub fn description(&self) -> Option<&str> {
        self.printer.description()
    }

    /// Render the help message.
    pub fn format_help(&self) -> String {
        self.printer.format_help(&self.program)
    }

    /// Print the help message to the console.
    pub fn print_help(&self) {
        self.printer
            .print_help(&self.program, self.user_interface.as_ref());
    }

    /// Run the command line parser against the input tokens, requiring every token to be recognized.
    ///
    /// Values are written into `namespace` (or a fresh [`Namespace`]); defaults never overwrite a destination already present.
    ///
    /// If at any point the parser encounters an error (ex: a missing value, an inconvertible value, an unrecognized token), it prints the error and returns [`ParseError::Rejected`].
    ///
    /// If the help switch (`-h` or `--help`) is encountered, the parser prints the help message and returns [`ParseError::HelpRequested`].
    pub fn parse_args(
        &self,
        tokens: &[&str],
        namespace: Option<Namespace>,
    ) -> Result<Namespace, ParseError> {
        let (namespace, unrecognized) = self.consume(tokens, namespace)?;

        if let Some((offset, _)) = unrecognized.first() {
            let error = ParseError::Rejected(format!(
                "unrecognized arguments: {}",
                unrecognized
                    .iter()
                    .map(|(_, value)| value.as_str())
                    .collect::<Vec<&str>>()
                    .join(" ")
            ));
            self.report(tokens, *offset, &error);
            return Err(error);
        }

        Ok(namespace)
    }

    /// Run the command line parser against the input tokens, returning the unrecognized tokens (in order) alongside the [`Namespace`].
    ///
    /// Errors and help behave as in [`GeneralParser::parse_args`].
    pub fn parse_known_args(
        &self,
        tokens: &[&str],
        namespace: Option<Namespace>,
    ) -> Result<(Namespace, Vec<String>), ParseError> {
        let (namespace, unrecognized) = self.consume(tokens, namespace)?;
        Ok((
            namespace,
            unrecognized.into_iter().map(|(_, value)| value).collect(),
        ))
    }

    /// Run the command line parser against the Cli [`env::args`].
    ///
    /// If the help switch is encountered, exits with error code `0` (via [`std::process::exit`]).
    /// If the parser encounters an error, exits with error code `1`.
    pub fn parse(&self) -> Namespace {
        let command_input: Vec<String> = env::args().skip(1).collect();
        let tokens: Vec<&str> = command_input.iter().map(AsRef::as_ref).collect();

        match self.parse_args(tokens.as_slice(), None) {
            Ok(namespace) => namespace,
            Err(ParseError::HelpRequested) => std::process::exit(0),
            Err(ParseError::Rejected(_)) => std::process::exit(1),
        }
    }

    fn consume(
        &self,
        tokens: &[&str],
        namespace: Option<Namespace>,
    ) -> Result<(Namespace, Vec<OffsetValue>), ParseError> {
        match self
            .parser
            .consume(tokens, namespace.unwrap_or_default())
        {
            Ok(Consumed::Complete {
                namespace,
                unrecognized,
            }) => Ok((namespace, unrecognized)),
            Ok(Consumed::PrintHelp) => {
                self.print_help();
                Err(ParseError::HelpRequested)
            }
            Err((offset, error)) => {
                self.report(tokens, offset, &error);
                Err(error)
            }
        }
    }

    fn report(&self, tokens: &[&str], offset: usize, error: &ParseError) {
        self.user_interface.print_error(error);
        self.user_interface
            .print_error_context(ErrorContext::new(offset, tokens));
    }
}
