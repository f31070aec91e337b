use std::collections::HashMap;

use crate::error::TranslateError;
use crate::notation::marker::*;
use crate::types::TypeRegistry;
use qarg_engine::{ArgumentOptions, Nargs, Value, ValueType};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The option strings of a translated token: `-<sname>` and `--<lname>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Flags {
    /// The short option string (ex: `-f`).
    pub short: String,
    /// The long option string (ex: `--foo`).
    pub long: String,
}

impl IntoIterator for Flags {
    type Item = String;
    type IntoIter = std::array::IntoIter<String, 2>;

    fn into_iter(self) -> Self::IntoIter {
        [self.short, self.long].into_iter()
    }
}

/// Translate a single declaration token into its option strings and options.
///
/// The token is `<sname>` followed by any of the fragments `(<lname>`, `{<dest>`, `[<type>`, `=<default>`, `@<action>`, `#<nargs>`, `$<const>`, and `!` (required), in any order.
/// Once every fragment is removed, `sname` is the first remaining character.
/// Without a `(` fragment the long name is everything that remains.
///
/// ### Example
/// ```
/// use qarg::{parse_token, Flags, Nargs, TypeRegistry, Value};
///
/// let (flags, options) = parse_token("v(verbose@count", TypeRegistry::standard()).unwrap();
/// assert_eq!(flags, Flags { short: "-v".to_string(), long: "--verbose".to_string() });
/// assert_eq!(options.action.as_deref(), Some("count"));
///
/// let (flags, options) = parse_token("size[int=3#?$1", TypeRegistry::standard()).unwrap();
/// assert_eq!(flags, Flags { short: "-s".to_string(), long: "--size".to_string() });
/// assert_eq!(options.nargs, Some(Nargs::Optional));
/// assert_eq!(options.default, Some(Value::Int(3)));
/// assert_eq!(options.constant, Some(Value::Int(1)));
/// ```
pub fn parse_token(
    token: &str,
    registry: &TypeRegistry,
) -> Result<(Flags, ArgumentOptions), TranslateError> {
    let original = token.trim();
    let mut token = original.to_string();
    let mut required = false;

    // 1. The required flag goes first, so it never lands inside a capture.
    if token.contains(REQUIRED) {
        token = token.replace(REQUIRED, "");
        required = true;
    }

    // 2. Pull out every fragment, each pass working on what the previous left behind.
    let mut fragments: HashMap<Marker, String> = HashMap::default();

    for marker in Marker::ALL {
        let Extraction {
            remaining,
            captured,
        } = extract(&token, marker);
        token = remaining;

        if let Some(value) = captured {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Extracted '{marker}' fragment '{value}' from '{original}'.");
            }
            fragments.insert(marker, value);
        }
    }

    // 3. Nargs.
    let nargs = fragments
        .remove(&Marker::Nargs)
        .map(|nargs| parse_nargs(original, nargs))
        .transpose()?;

    // 4. Type, and the values it converts.
    let default = fragments.remove(&Marker::Default);
    let constant = fragments.remove(&Marker::Const);
    let (value_type, default, constant) = match fragments.remove(&Marker::Type) {
        Some(type_name) => {
            let value_type = registry.lookup(&type_name)?;
            let default = default
                .map(|raw| convert(original, "default", &value_type, &raw))
                .transpose()?;
            let constant = constant
                .map(|raw| convert(original, "const", &value_type, &raw))
                .transpose()?;

            // Only nargs '?' may carry a type beside a const.
            if constant.is_some() && nargs != Some(Nargs::Optional) {
                (None, default, constant)
            } else {
                (Some(value_type), default, constant)
            }
        }
        None => (None, default.map(Value::Str), constant.map(Value::Str)),
    };

    // 5. Names.
    let long_name = take_name(&mut fragments, Marker::LongName, original)?;
    let dest = take_name(&mut fragments, Marker::Dest, original)?;
    let action = take_name(&mut fragments, Marker::Action, original)?;
    let short_name = token
        .chars()
        .next()
        .ok_or_else(|| TranslateError::MissingShortName(original.to_string()))?;
    let flags = Flags {
        short: format!("-{short_name}"),
        long: format!("--{}", long_name.unwrap_or(token)),
    };
    let options = ArgumentOptions {
        action,
        nargs,
        constant,
        default,
        value_type,
        required,
        dest,
    };

    #[cfg(feature = "tracing_debug")]
    {
        debug!("Translated '{original}' into {flags:?} {options:?}.");
    }

    Ok((flags, options))
}

fn parse_nargs(token: &str, nargs: String) -> Result<Nargs, TranslateError> {
    match nargs.as_str() {
        "?" => Ok(Nargs::Optional),
        "*" => Ok(Nargs::Any),
        "+" => Ok(Nargs::AtLeastOne),
        "R" => Ok(Nargs::Remainder),
        count => count
            .parse::<usize>()
            .map(Nargs::Precisely)
            .map_err(|_| TranslateError::InvalidNargs {
                token: token.to_string(),
                nargs,
            }),
    }
}

fn convert(
    token: &str,
    field: &'static str,
    value_type: &ValueType,
    raw: &str,
) -> Result<Value, TranslateError> {
    value_type
        .convert(raw)
        .map_err(|source| TranslateError::InvalidValue {
            token: token.to_string(),
            field,
            source,
        })
}

fn take_name(
    fragments: &mut HashMap<Marker, String>,
    marker: Marker,
    token: &str,
) -> Result<Option<String>, TranslateError> {
    match fragments.remove(&marker) {
        Some(name) if name.is_empty() => Err(TranslateError::MalformedToken {
            token: token.to_string(),
            marker,
        }),
        name => Ok(name),
    }
}
