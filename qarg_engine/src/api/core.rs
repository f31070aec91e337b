use crate::api::ArgumentOptions;
use crate::parser::{
    ConfigError, ConsoleInterface, GeneralParser, OptionSpec, Parser, Printer, UserInterface,
};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The base command line parser.
///
/// ### Example
/// ```
/// use qarg_engine::{ArgumentOptions, CommandLineParser, Value};
///
/// let parser = CommandLineParser::new("program")
///     .add(["-v", "--verbose"], ArgumentOptions {
///         action: Some("store_true".to_string()),
///         ..ArgumentOptions::default()
///     })
///     .build();
///
/// let namespace = parser.parse_args(&["-v"], None).unwrap();
/// assert_eq!(namespace.get("verbose"), Some(&Value::Bool(true)));
/// ```
pub struct CommandLineParser {
    program: String,
    about: Option<String>,
    entries: Vec<(Vec<String>, ArgumentOptions)>,
}

impl CommandLineParser {
    /// Create a command line parser.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            about: None,
            entries: Vec::default(),
        }
    }

    /// Document the about message for this command line parser.
    /// If repeated, only the final message will apply.
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.about.replace(description.into());
        self
    }

    /// Add an option to the command line parser.
    ///
    /// `option_strings` are the flags of the option (ex: `["-f", "--foo"]`).
    /// Registration order is preserved: conflicts are reported against the first registered option, and the help message lists options in this order.
    ///
    /// ### Example
    /// ```
    /// use qarg_engine::{ArgumentOptions, CommandLineParser, Nargs, Value};
    ///
    /// let parser = CommandLineParser::new("program")
    ///     .add(["-i", "--item"], ArgumentOptions {
    ///         nargs: Some(Nargs::AtLeastOne),
    ///         ..ArgumentOptions::default()
    ///     })
    ///     .build();
    ///
    /// let namespace = parser.parse_args(&["--item", "a", "b"], None).unwrap();
    /// assert_eq!(namespace.get("item"), Some(&Value::from(vec!["a", "b"])));
    /// ```
    pub fn add<S: Into<String>>(
        mut self,
        option_strings: impl IntoIterator<Item = S>,
        options: ArgumentOptions,
    ) -> Self {
        self.entries.push((
            option_strings.into_iter().map(Into::into).collect(),
            options,
        ));
        self
    }

    pub(crate) fn build_with_interface(
        self,
        user_interface: Box<dyn UserInterface>,
    ) -> Result<GeneralParser, ConfigError> {
        let CommandLineParser {
            program,
            about,
            entries,
        } = self;
        let mut specs = Vec::with_capacity(entries.len());

        for (option_strings, options) in entries {
            let spec = OptionSpec::new(option_strings, options)?;
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Registered option {spec:?}.");
            }
            specs.push(spec);
        }

        let parser = Parser::new(specs)?;
        let printer = Printer::terminal(about, parser.specs());
        Ok(GeneralParser::new(program, parser, printer, user_interface))
    }

    /// Build the command line parser as a Result.
    /// This finalizes the configuration and checks for errors (ex: a repeated option string).
    pub fn build_parser(self) -> Result<GeneralParser, ConfigError> {
        self.build_with_interface(Box::new(ConsoleInterface::default()))
    }

    /// Build the command line parser.
    /// This finalizes the configuration and checks for errors (ex: a repeated option string).
    /// If an error is encountered, exits with error code `1` (via [`std::process::exit`]).
    pub fn build(self) -> GeneralParser {
        match self.build_parser() {
            Ok(gp) => gp,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InvalidConversion, Nargs, Namespace, Value, ValueType};
    use crate::parser::util::channel_interface;
    use crate::parser::ParseError;
    use crate::test::assert_contains;
    use rstest::rstest;

    fn integer(token: &str) -> Result<Value, InvalidConversion> {
        token
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| InvalidConversion::new(token, "int"))
    }

    fn action(name: &str) -> ArgumentOptions {
        ArgumentOptions {
            action: Some(name.to_string()),
            ..ArgumentOptions::default()
        }
    }

    #[test]
    fn empty_build() {
        // Setup
        let clp = CommandLineParser::new("program");

        // Execute
        let parser = clp.build_parser().unwrap();

        // Verify
        assert_eq!(parser.program(), "program");
        assert_eq!(parser.description(), None);
        assert_eq!(parser.parse_args(&[], None).unwrap(), Namespace::new());
    }

    #[rstest]
    #[case(vec![], None, false)]
    #[case(vec!["-n", "3"], Some(3), false)]
    #[case(vec!["--number=4", "--flag"], Some(4), true)]
    #[case(vec!["-fn", "5"], Some(5), true)]
    #[case(vec!["-fn5"], Some(5), true)]
    fn build(
        #[case] tokens: Vec<&str>,
        #[case] expected_number: Option<i64>,
        #[case] expected_flag: bool,
    ) {
        // Setup
        let clp = CommandLineParser::new("program")
            .about("abc def")
            .add(
                ["-n", "--number"],
                ArgumentOptions {
                    value_type: Some(ValueType::new("int", integer)),
                    ..ArgumentOptions::default()
                },
            )
            .add(["-f", "--flag"], action("store_true"));

        // Execute
        let parser = clp.build_parser().unwrap();

        // Verify
        assert_eq!(parser.description(), Some("abc def"));
        let namespace = parser.parse_args(tokens.as_slice(), None).unwrap();
        assert_eq!(
            namespace.get("number"),
            Some(&expected_number.map(Value::Int).unwrap_or(Value::None))
        );
        assert_eq!(namespace.get("flag"), Some(&Value::Bool(expected_flag)));
    }

    #[rstest]
    #[case(vec![("-h", "--h")], "conflicting option string: -h")]
    #[case(vec![("-x", "--help")], "conflicting option string: --help")]
    #[case(vec![("-a", "--apple"), ("-a", "--avocado")], "conflicting option string: -a")]
    #[case(vec![("-a", "--apple"), ("-b", "--apple")], "conflicting option string: --apple")]
    #[case(vec![("a", "--apple")], "invalid option string 'a'")]
    #[case(vec![("-a", "--")], "invalid option string '--'")]
    fn build_invalid_option_strings(
        #[case] entries: Vec<(&str, &str)>,
        #[case] expected: &str,
    ) {
        // Setup
        let mut clp = CommandLineParser::new("program");

        for (short, long) in entries {
            clp = clp.add([short, long], ArgumentOptions::default());
        }

        // Execute
        let error = clp.build_parser().unwrap_err();

        // Verify
        assert_contains!(error.to_string(), "Config error");
        assert_contains!(error.to_string(), expected);
    }

    #[rstest]
    #[case(action("bogus"), "unknown action 'bogus'")]
    #[case(ArgumentOptions { nargs: Some(Nargs::Precisely(0)), ..ArgumentOptions::default() }, "nargs for store actions must be != 0")]
    #[case(ArgumentOptions { constant: Some(Value::Int(1)), ..ArgumentOptions::default() }, "nargs must be '?' to supply const")]
    #[case(ArgumentOptions { nargs: Some(Nargs::Any), constant: Some(Value::Int(1)), ..ArgumentOptions::default() }, "nargs must be '?' to supply const")]
    #[case(ArgumentOptions { nargs: Some(Nargs::Any), ..action("store_const") }, "'store_const' does not accept nargs")]
    #[case(ArgumentOptions { value_type: Some(ValueType::new("int", integer)), ..action("append_const") }, "'append_const' does not accept type")]
    #[case(ArgumentOptions { constant: Some(Value::Int(1)), ..action("store_true") }, "'store_true' does not accept const")]
    #[case(ArgumentOptions { nargs: Some(Nargs::Optional), ..action("count") }, "'count' does not accept nargs")]
    fn build_invalid_options(#[case] options: ArgumentOptions, #[case] expected: &str) {
        // Setup
        let clp = CommandLineParser::new("program").add(["-f", "--foo"], options);

        // Execute
        let error = clp.build_parser().unwrap_err();

        // Verify
        assert_contains!(error.to_string(), "argument -f/--foo");
        assert_contains!(error.to_string(), expected);
    }

    #[test]
    fn build_optional_const() {
        // Setup
        let clp = CommandLineParser::new("program").add(
            ["-f", "--foo"],
            ArgumentOptions {
                nargs: Some(Nargs::Optional),
                constant: Some(Value::Int(7)),
                value_type: Some(ValueType::new("int", integer)),
                ..ArgumentOptions::default()
            },
        );

        // Execute
        let parser = clp.build_parser().unwrap();

        // Verify
        let namespace = parser.parse_args(&["-f"], None).unwrap();
        assert_eq!(namespace.get("foo"), Some(&Value::Int(7)));
        let namespace = parser.parse_args(&["-f", "8"], None).unwrap();
        assert_eq!(namespace.get("foo"), Some(&Value::Int(8)));
        let namespace = parser.parse_args(&[], None).unwrap();
        assert_eq!(namespace.get("foo"), Some(&Value::None));
    }

    #[test]
    fn build_help() {
        // Setup
        let (sender, receiver) = channel_interface();
        let parser = CommandLineParser::new("program")
            .about("The program.")
            .add(["-f", "--foo"], ArgumentOptions::default())
            .build_with_interface(Box::new(sender))
            .unwrap();

        // Execute
        let error = parser.parse_args(&["--help"], None).unwrap_err();

        // Verify
        assert_eq!(error, ParseError::HelpRequested);
        drop(parser);
        let message = receiver.consume_message();
        assert_contains!(message, "usage: program [-h] [-f FOO]");
        assert_contains!(message, "The program.");
        assert_contains!(message, "-f FOO, --foo FOO");
    }
}
