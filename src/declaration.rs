use std::env;
use std::path::Path;

use crate::error::{Error, TranslateError};
use crate::notation::{parse_token, Flags};
use crate::types::TypeRegistry;
use qarg_engine::{ArgumentOptions, CommandLineParser, GeneralParser, Namespace};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The separator between the tokens of a declaration.
pub const SEPARATOR: char = ',';

const FALLBACK_PROGRAM: &str = "program";

/// Translate each token of the comma separated `declaration`, in order.
///
/// The first token which fails to translate aborts the whole declaration.
pub fn translate(
    declaration: &str,
    registry: &TypeRegistry,
) -> Result<Vec<(Flags, ArgumentOptions)>, TranslateError> {
    declaration
        .split(SEPARATOR)
        .map(|token| parse_token(token, registry))
        .collect()
}

/// Build a parser for `declaration`, resolving type names through the standard [`TypeRegistry`].
///
/// Without a `description`, the help message reads `Autogenerated parser from string: <declaration>`.
///
/// ### Example
/// ```
/// use qarg::{build_parser, Value};
///
/// let parser = build_parser("f(foo[int=1,v(verbose@store_true", None).unwrap();
/// let namespace = parser.parse_args(&["-v", "--foo", "2"], None).unwrap();
/// assert_eq!(namespace.get("foo"), Some(&Value::Int(2)));
/// assert_eq!(namespace.get("verbose"), Some(&Value::Bool(true)));
/// ```
pub fn build_parser(declaration: &str, description: Option<&str>) -> Result<GeneralParser, Error> {
    build_parser_with(TypeRegistry::standard(), declaration, description)
}

/// Build a parser for `declaration`, resolving type names through `registry`.
pub fn build_parser_with(
    registry: &TypeRegistry,
    declaration: &str,
    description: Option<&str>,
) -> Result<GeneralParser, Error> {
    configure(registry, declaration, description, program_name())
}

/// Parse `args` against `declaration`, requiring every argument to be recognized.
///
/// ### Example
/// ```
/// use qarg::{resolve, Value};
///
/// let namespace = resolve("f(foo[int=1", &[]).unwrap();
/// assert_eq!(namespace.get("foo"), Some(&Value::Int(1)));
/// ```
pub fn resolve(declaration: &str, args: &[&str]) -> Result<Namespace, Error> {
    Resolver::new(declaration)
        .args(args.iter().copied())
        .run()
        .map(|resolved| resolved.namespace)
}

fn configure(
    registry: &TypeRegistry,
    declaration: &str,
    description: Option<&str>,
    program: String,
) -> Result<GeneralParser, Error> {
    let description = match description {
        Some(description) => description.to_string(),
        None => format!("Autogenerated parser from string: {declaration}"),
    };
    let mut clp = CommandLineParser::new(program).about(description);

    for (flags, options) in translate(declaration, registry)? {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Adding {flags:?} to the parser.");
        }
        clp = clp.add(flags, options);
    }

    Ok(clp.build_parser()?)
}

/// The name of the running executable, or `program` if it can't be determined.
pub fn program_name() -> String {
    env::args()
        .next()
        .as_deref()
        .and_then(|path| Path::new(path).file_name())
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| FALLBACK_PROGRAM.to_string())
}

/// The outcome of [`Resolver::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// The parsed values.
    pub namespace: Namespace,
    /// The unrecognized arguments, present only for a partial parse which asked for them.
    pub leftover: Option<Vec<String>>,
}

/// Configure a one-off parse of a declaration.
///
/// ### Example
/// ```
/// use qarg::{Resolver, Value};
///
/// let resolved = Resolver::new("f(foo")
///     .args(["-f", "abc", "--other"])
///     .partial(true)
///     .return_leftover(true)
///     .run()
///     .unwrap();
/// assert_eq!(resolved.namespace.get("foo"), Some(&Value::from("abc")));
/// assert_eq!(resolved.leftover, Some(vec!["--other".to_string()]));
/// ```
pub struct Resolver<'a> {
    declaration: &'a str,
    args: Option<Vec<String>>,
    namespace: Option<Namespace>,
    partial: bool,
    return_leftover: bool,
    registry: &'a TypeRegistry,
    program: Option<String>,
    description: Option<String>,
}

impl<'a> Resolver<'a> {
    /// Create a resolver for `declaration`.
    /// By default it parses the Cli [`env::args`] exactly, with the standard [`TypeRegistry`].
    pub fn new(declaration: &'a str) -> Self {
        Self {
            declaration,
            args: None,
            namespace: None,
            partial: false,
            return_leftover: false,
            registry: TypeRegistry::standard(),
            program: None,
            description: None,
        }
    }

    /// Parse these arguments instead of [`env::args`].
    pub fn args<S: Into<String>>(mut self, args: impl IntoIterator<Item = S>) -> Self {
        self.args
            .replace(args.into_iter().map(Into::into).collect());
        self
    }

    /// Write the parsed values into `namespace`.
    pub fn namespace(mut self, namespace: Namespace) -> Self {
        self.namespace.replace(namespace);
        self
    }

    /// Tolerate unrecognized arguments rather than rejecting them.
    pub fn partial(mut self, partial: bool) -> Self {
        self.partial = partial;
        self
    }

    /// Report the unrecognized arguments of a partial parse in [`Resolved::leftover`].
    pub fn return_leftover(mut self, return_leftover: bool) -> Self {
        self.return_leftover = return_leftover;
        self
    }

    /// Resolve type names through `registry`.
    pub fn registry(mut self, registry: &'a TypeRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// The program name shown in the usage line.
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program.replace(program.into());
        self
    }

    /// The about message shown in the help.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description.replace(description.into());
        self
    }

    /// Build the parser and run it.
    pub fn run(self) -> Result<Resolved, Error> {
        let Resolver {
            declaration,
            args,
            namespace,
            partial,
            return_leftover,
            registry,
            program,
            description,
        } = self;
        let parser = configure(
            registry,
            declaration,
            description.as_deref(),
            program.unwrap_or_else(program_name),
        )?;
        let args = args.unwrap_or_else(|| env::args().skip(1).collect());
        let tokens: Vec<&str> = args.iter().map(AsRef::as_ref).collect();

        if partial {
            let (namespace, leftover) = parser.parse_known_args(&tokens, namespace)?;
            Ok(Resolved {
                namespace,
                leftover: if return_leftover { Some(leftover) } else { None },
            })
        } else {
            Ok(Resolved {
                namespace: parser.parse_args(&tokens, namespace)?,
                leftover: None,
            })
        }
    }
}
