use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use thiserror::Error;

use crate::api::{Action, ArgumentOptions};
use crate::constant::*;
use crate::matcher::*;
use crate::model::{Namespace, Nargs, Value, ValueType};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The failure to build a command line parser from its configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Config error: {0}")]
pub struct ConfigError(pub(crate) String);

impl ConfigError {
    /// The reason the configuration was rejected.
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// The failure to parse the Cli tokens.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The tokens were rejected, carrying the engine's diagnostic.
    #[error("Parse error: {0}")]
    Rejected(String),
    /// The help switch was specified, and the help message has been printed.
    #[error("Help requested.")]
    HelpRequested,
}

impl From<MatchError> for ParseError {
    fn from(error: MatchError) -> Self {
        ParseError::Rejected(error.to_string())
    }
}

// The help option is always registered first.
pub(crate) const HELP_INDEX: usize = 0;

/// A validated option: the result of checking an `ArgumentOptions` against its option strings.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OptionSpec {
    option_strings: Vec<String>,
    dest: String,
    action: Action,
    nargs: Option<Nargs>,
    constant: Option<Value>,
    default: Option<Value>,
    value_type: Option<ValueType>,
    required: bool,
}

impl OptionSpec {
    pub(crate) fn help() -> Self {
        Self {
            option_strings: vec![format!("-{HELP_SHORT}"), format!("--{HELP_NAME}")],
            dest: HELP_NAME.to_string(),
            action: Action::Help,
            nargs: None,
            constant: None,
            default: None,
            value_type: None,
            required: false,
        }
    }

    pub(crate) fn new(
        option_strings: Vec<String>,
        options: ArgumentOptions,
    ) -> Result<Self, ConfigError> {
        if option_strings.is_empty() {
            return Err(ConfigError(
                "an option requires at least one option string.".to_string(),
            ));
        }

        for option_string in &option_strings {
            if !option_string.starts_with('-') {
                return Err(ConfigError(format!(
                    "invalid option string '{option_string}': must start with a character '-'."
                )));
            }

            if option_string.trim_start_matches('-').is_empty() {
                return Err(ConfigError(format!(
                    "invalid option string '{option_string}': must name an option."
                )));
            }
        }

        let display = option_strings.join("/");
        let ArgumentOptions {
            action,
            nargs,
            constant,
            default,
            value_type,
            required,
            dest,
        } = options;
        let action = match action {
            Some(name) => Action::from_str(&name)
                .map_err(|error| ConfigError(format!("argument {display}: {error}.")))?,
            None => Action::Store,
        };
        let reject = |field: &str| {
            ConfigError(format!(
                "argument {display}: '{action}' does not accept {field}."
            ))
        };

        if action.takes_values() {
            if nargs == Some(Nargs::Precisely(0)) {
                return Err(ConfigError(format!(
                    "argument {display}: nargs for {action} actions must be != 0."
                )));
            }

            // Argparse semantics: const is only reachable for a value taking option via '?'.
            if constant.is_some() && nargs != Some(Nargs::Optional) {
                return Err(ConfigError(format!(
                    "argument {display}: nargs must be '?' to supply const."
                )));
            }
        } else {
            if nargs.is_some() {
                return Err(reject("nargs"));
            }

            if value_type.is_some() {
                return Err(reject("type"));
            }

            if constant.is_some() && !action.uses_const() {
                return Err(reject("const"));
            }
        }

        let dest = match dest {
            Some(dest) => dest,
            None => derive_dest(&option_strings),
        };

        Ok(Self {
            option_strings,
            dest,
            action,
            nargs,
            constant,
            default,
            value_type,
            required,
        })
    }

    pub(crate) fn option_strings(&self) -> &[String] {
        &self.option_strings
    }

    pub(crate) fn display(&self) -> String {
        self.option_strings.join("/")
    }

    pub(crate) fn dest(&self) -> &str {
        &self.dest
    }

    pub(crate) fn action(&self) -> Action {
        self.action
    }

    pub(crate) fn nargs(&self) -> Option<Nargs> {
        self.nargs
    }

    pub(crate) fn value_type(&self) -> Option<&ValueType> {
        self.value_type.as_ref()
    }

    pub(crate) fn required(&self) -> bool {
        self.required
    }

    pub(crate) fn bound(&self) -> Bound {
        if self.action.takes_values() {
            self.nargs.map(Bound::from).unwrap_or(Bound::Range(1, 1))
        } else {
            Bound::Range(0, 0)
        }
    }

    /// The value the destination starts with, before any Cli tokens are applied.
    pub(crate) fn initial(&self) -> Option<Value> {
        match self.action {
            Action::Help => None,
            Action::StoreTrue => Some(self.default.clone().unwrap_or(Value::Bool(false))),
            Action::StoreFalse => Some(self.default.clone().unwrap_or(Value::Bool(true))),
            _ => Some(self.default.clone().unwrap_or(Value::None)),
        }
    }

    fn apply(
        &self,
        namespace: &mut Namespace,
        values: &[OffsetValue],
    ) -> Result<(), (usize, ParseError)> {
        let value = match self.action {
            Action::Store => self.collect(values)?,
            Action::StoreConst => self.constant.clone().unwrap_or(Value::None),
            Action::StoreTrue => Value::Bool(true),
            Action::StoreFalse => Value::Bool(false),
            Action::Append => {
                let mut items = self.existing_items(namespace);
                items.push(self.collect(values)?);
                Value::List(items)
            }
            Action::AppendConst => {
                let mut items = self.existing_items(namespace);
                items.push(self.constant.clone().unwrap_or(Value::None));
                Value::List(items)
            }
            Action::Extend => {
                let mut items = self.existing_items(namespace);
                match self.collect(values)? {
                    Value::List(extension) => items.extend(extension),
                    single => items.push(single),
                }
                Value::List(items)
            }
            Action::Count => {
                let count = namespace
                    .get(&self.dest)
                    .and_then(Value::as_int)
                    .unwrap_or(0);
                Value::Int(count + 1)
            }
            Action::Help => {
                unreachable!("internal error - help must be handled before applying options")
            }
        };

        namespace.set(self.dest.clone(), value);
        Ok(())
    }

    fn existing_items(&self, namespace: &Namespace) -> Vec<Value> {
        match namespace.get(&self.dest) {
            Some(Value::List(items)) => items.clone(),
            _ => Vec::default(),
        }
    }

    fn collect(&self, values: &[OffsetValue]) -> Result<Value, (usize, ParseError)> {
        match (self.nargs, values) {
            (None, [(offset, value)]) => self.convert(*offset, value),
            (None, _) => {
                unreachable!("internal error - a single value option must match precisely 1 token")
            }
            (Some(Nargs::Optional), []) => Ok(self.constant.clone().unwrap_or(Value::None)),
            (Some(Nargs::Optional), [(offset, value)]) => self.convert(*offset, value),
            (Some(Nargs::Optional), _) => {
                unreachable!("internal error - an optional value must match at most 1 token")
            }
            (Some(_), values) => values
                .iter()
                .map(|(offset, value)| self.convert(*offset, value))
                .collect::<Result<Vec<Value>, _>>()
                .map(Value::List),
        }
    }

    fn convert(&self, offset: usize, token: &str) -> Result<Value, (usize, ParseError)> {
        match &self.value_type {
            Some(value_type) => value_type.convert(token).map_err(|error| {
                (
                    offset,
                    ParseError::Rejected(format!("argument {}: {error}", self.display())),
                )
            }),
            None => Ok(Value::Str(token.to_string())),
        }
    }

    // Argparse semantics: a string default is converted by the type, but only when the option isn't specified.
    fn convert_default(&self, namespace: &mut Namespace) -> Result<(), ParseError> {
        if let (Some(value_type), Some(Value::Str(default))) = (&self.value_type, &self.default) {
            if namespace.get(&self.dest) == self.default.as_ref() {
                let value = value_type.convert(default).map_err(|error| {
                    ParseError::Rejected(format!("argument {}: {error}", self.display()))
                })?;
                namespace.set(self.dest.clone(), value);
            }
        }

        Ok(())
    }
}

fn derive_dest(option_strings: &[String]) -> String {
    option_strings
        .iter()
        .find_map(|option_string| option_string.strip_prefix("--"))
        .or_else(|| {
            option_strings
                .first()
                .map(|option_string| option_string.trim_start_matches('-'))
        })
        .unwrap_or_default()
        .replace('-', "_")
}

pub(crate) struct Parser {
    specs: Vec<OptionSpec>,
    options: HashMap<String, OptionConfig>,
    negative_number_options: bool,
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser{..}").finish()
    }
}

impl Parser {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new(Vec::default()).unwrap()
    }

    pub(crate) fn new(registered: Vec<OptionSpec>) -> Result<Self, ConfigError> {
        let mut specs = vec![OptionSpec::help()];
        specs.extend(registered);
        let mut options: HashMap<String, OptionConfig> = HashMap::default();

        for (index, spec) in specs.iter().enumerate() {
            let config = OptionConfig::new(index, spec.display(), spec.bound());

            for option_string in spec.option_strings() {
                if options
                    .insert(option_string.clone(), config.clone())
                    .is_some()
                {
                    return Err(ConfigError(format!(
                        "argument {}: conflicting option string: {option_string}.",
                        spec.display()
                    )));
                }
            }
        }

        let negative_number_options = options
            .keys()
            .any(|option_string| looks_like_negative_number(option_string));

        Ok(Self {
            specs,
            options,
            negative_number_options,
        })
    }

    pub(crate) fn specs(&self) -> &[OptionSpec] {
        &self.specs
    }

    pub(crate) fn consume(
        &self,
        tokens: &[&str],
        mut namespace: Namespace,
    ) -> Result<Consumed, (usize, ParseError)> {
        let mut token_matcher = TokenMatcher::new(&self.options, self.negative_number_options);
        // 1. Feed the raw token strings to the matcher.
        let mut fed = 0;

        for token in tokens {
            if let Err(error) = token_matcher.feed(token) {
                // Help matched before the error still wins.
                if token_matcher.contains(HELP_INDEX) {
                    return Ok(Consumed::PrintHelp);
                }

                return Err((fed, ParseError::from(error)));
            }
            fed += token.len();
        }

        let Matched {
            values: matches,
            unrecognized,
        } = match token_matcher.close() {
            Ok(matched) | Err((_, _, matched)) if matched.contains(HELP_INDEX) => {
                return Ok(Consumed::PrintHelp);
            }
            Ok(matched) => matched,
            Err((offset, error, _)) => return Err((offset, ParseError::from(error))),
        };

        // 2. Fill in the defaults, without overwriting anything the caller supplied.
        for spec in &self.specs {
            if let Some(initial) = spec.initial() {
                if !namespace.contains(spec.dest()) {
                    namespace.set(spec.dest(), initial);
                }
            }
        }

        // 3. Apply each match, in the order it appeared on the Cli.
        let mut seen = HashSet::new();

        for MatchTokens { index, values } in matches {
            let spec = &self.specs[index];
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Applying {} to {values:?}.", spec.display());
            }
            spec.apply(&mut namespace, &values)?;
            seen.insert(index);
        }

        for (index, spec) in self.specs.iter().enumerate() {
            if !seen.contains(&index) {
                spec.convert_default(&mut namespace)
                    .map_err(|error| (fed, error))?;
            }
        }

        // 4. Check that every required option was seen.
        let missing: Vec<String> = self
            .specs
            .iter()
            .enumerate()
            .filter(|(index, spec)| spec.required() && !seen.contains(index))
            .map(|(_, spec)| spec.display())
            .collect();

        if !missing.is_empty() {
            return Err((
                fed,
                ParseError::Rejected(format!(
                    "the following arguments are required: {}",
                    missing.join(", ")
                )),
            ));
        }

        Ok(Consumed::Complete {
            namespace,
            unrecognized,
        })
    }
}

#[derive(Debug, PartialEq)]
pub(crate) enum Consumed {
    Complete {
        namespace: Namespace,
        unrecognized: Vec<OffsetValue>,
    },
    PrintHelp,
}
