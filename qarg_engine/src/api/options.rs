use std::str::FromStr;
use thiserror::Error;

use crate::model::{Nargs, Value, ValueType};

/// The behaviour triggered when an option is matched on the Cli.
///
/// Inspired by argparse: <https://docs.python.org/3/library/argparse.html#action>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// `store`: Store the option's value(s).
    Store,
    /// `store_const`: Store the `const`.
    StoreConst,
    /// `store_true`: Store `True` (defaults to `False`).
    StoreTrue,
    /// `store_false`: Store `False` (defaults to `True`).
    StoreFalse,
    /// `append`: Append the option's value(s) to a list.
    Append,
    /// `append_const`: Append the `const` to a list.
    AppendConst,
    /// `extend`: Extend a list with each of the option's values.
    Extend,
    /// `count`: Count the number of times the option is matched.
    Count,
    /// `help`: Print the help message and stop parsing.
    Help,
}

impl Action {
    /// Whether this action consumes values from the Cli.
    pub fn takes_values(&self) -> bool {
        matches!(self, Action::Store | Action::Append | Action::Extend)
    }

    /// Whether this action stores a `const` rather than a value.
    pub fn uses_const(&self) -> bool {
        matches!(self, Action::StoreConst | Action::AppendConst)
    }
}

/// The failure to interpret an action name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown action '{0}'")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "store" => Ok(Action::Store),
            "store_const" => Ok(Action::StoreConst),
            "store_true" => Ok(Action::StoreTrue),
            "store_false" => Ok(Action::StoreFalse),
            "append" => Ok(Action::Append),
            "append_const" => Ok(Action::AppendConst),
            "extend" => Ok(Action::Extend),
            "count" => Ok(Action::Count),
            "help" => Ok(Action::Help),
            _ => Err(UnknownAction(value.to_string())),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Action::Store => "store",
            Action::StoreConst => "store_const",
            Action::StoreTrue => "store_true",
            Action::StoreFalse => "store_false",
            Action::Append => "append",
            Action::AppendConst => "append_const",
            Action::Extend => "extend",
            Action::Count => "count",
            Action::Help => "help",
        };
        write!(f, "{name}")
    }
}

/// The keyword options of a single [`CommandLineParser::add`](crate::CommandLineParser::add).
///
/// Mirrors the keyword arguments of argparse's `add_argument`.
/// Every field is optional; the combination is validated when the parser is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgumentOptions {
    /// The [`Action`] name (`store` when absent).
    pub action: Option<String>,
    /// The cardinality of values taken by the option.
    pub nargs: Option<Nargs>,
    /// The `const` value used by `store_const`, `append_const`, and `nargs='?'`.
    pub constant: Option<Value>,
    /// The value assigned when the option is not specified.
    pub default: Option<Value>,
    /// The type each Cli value is converted into (otherwise [`Value::Str`]).
    pub value_type: Option<ValueType>,
    /// Whether the option must be specified.
    pub required: bool,
    /// The [`Namespace`](crate::Namespace) destination (otherwise derived from the option strings).
    pub dest: Option<String>,
}
