use thiserror::Error;

use crate::notation::Marker;
use qarg_engine::{ConfigError, InvalidConversion, ParseError};

/// The failure to translate a declaration token into an option.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TranslateError {
    /// The type fragment doesn't name a type in the [`TypeRegistry`](crate::TypeRegistry).
    #[error("Unknown type string: '{0}'.")]
    UnknownType(String),

    /// A naming fragment (long name, dest, or action) captured nothing.
    #[error("Malformed token '{token}': the '{marker}' fragment is empty.")]
    MalformedToken {
        /// The offending token.
        token: String,
        /// The marker whose capture was empty.
        marker: Marker,
    },

    /// Nothing remains of the token to serve as the short name.
    #[error("Malformed token '{0}': missing a short name.")]
    MissingShortName(String),

    /// The nargs fragment is neither a count nor one of `?`, `*`, `+`, `R`.
    #[error("Invalid nargs '{nargs}' in token '{token}'.")]
    InvalidNargs {
        /// The offending token.
        token: String,
        /// The captured nargs.
        nargs: String,
    },

    /// The default or const doesn't convert to the declared type.
    #[error("Invalid {field} in token '{token}': {source}.")]
    InvalidValue {
        /// The offending token.
        token: String,
        /// The field being converted (`default` or `const`).
        field: &'static str,
        /// The conversion failure.
        source: InvalidConversion,
    },
}

/// Any failure of the declaration entry points.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// A token of the declaration failed to translate.
    #[error(transparent)]
    Translate(#[from] TranslateError),

    /// The engine rejected the translated options.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The engine rejected the Cli tokens (or the help switch was specified).
    #[error(transparent)]
    Parse(#[from] ParseError),
}
