use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::error::TranslateError;
use qarg_engine::{Coercion, InvalidConversion, Value, ValueType};

/// The type names a declaration may reference via the `[` fragment.
///
/// The standard registry knows: `int`, `long`, `float`, `str`, `unicode`, `bool`, `list`, `tuple`, `set`, `frozenset`, `dict`, `bytes`, `bytearray`, `buffer`, and `memoryview`.
///
/// ### Example
/// ```
/// use qarg::{InvalidConversion, TypeRegistry, Value};
///
/// fn percent(token: &str) -> Result<Value, InvalidConversion> {
///     match token.trim_end_matches('%').parse::<i64>() {
///         Ok(value) if (0..=100).contains(&value) => Ok(Value::Int(value)),
///         _ => Err(InvalidConversion::new(token, "percent")),
///     }
/// }
///
/// let mut registry = TypeRegistry::default();
/// registry.register("percent", percent);
/// let value_type = registry.lookup("percent").unwrap();
/// assert_eq!(value_type.convert("42%"), Ok(Value::Int(42)));
/// ```
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: BTreeMap<String, ValueType>,
}

impl TypeRegistry {
    /// The process-wide standard registry.
    pub fn standard() -> &'static TypeRegistry {
        static STANDARD: OnceLock<TypeRegistry> = OnceLock::new();
        STANDARD.get_or_init(TypeRegistry::default)
    }

    /// A registry without any types.
    pub fn empty() -> Self {
        Self {
            types: BTreeMap::default(),
        }
    }

    /// Register `coercion` under `name`, replacing any type already registered under it.
    pub fn register(&mut self, name: impl Into<String>, coercion: Coercion) -> &mut Self {
        let name = name.into();
        self.types
            .insert(name.clone(), ValueType::new(name, coercion));
        self
    }

    /// Look up the type registered under `name`.
    pub fn lookup(&self, name: &str) -> Result<ValueType, TranslateError> {
        self.types
            .get(name)
            .cloned()
            .ok_or_else(|| TranslateError::UnknownType(name.to_string()))
    }

    /// Whether a type is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// The registered type names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        let mut registry = TypeRegistry::empty();
        registry
            .register("int", integer)
            .register("long", integer)
            .register("float", float)
            .register("str", string)
            .register("unicode", string)
            .register("bool", boolean)
            .register("list", list)
            .register("tuple", tuple)
            .register("set", set)
            .register("frozenset", set)
            .register("dict", dict)
            .register("bytes", bytes)
            .register("bytearray", bytes)
            .register("buffer", bytes)
            .register("memoryview", bytes);
        registry
    }
}

fn integer(token: &str) -> Result<Value, InvalidConversion> {
    token
        .trim()
        .parse::<i64>()
        .map(Value::Int)
        .map_err(|_| InvalidConversion::new(token, "int"))
}

fn float(token: &str) -> Result<Value, InvalidConversion> {
    token
        .trim()
        .parse::<f64>()
        .map(Value::Float)
        .map_err(|_| InvalidConversion::new(token, "float"))
}

fn string(token: &str) -> Result<Value, InvalidConversion> {
    Ok(Value::from(token))
}

fn boolean(token: &str) -> Result<Value, InvalidConversion> {
    match token.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(Value::Bool(true)),
        "false" | "no" | "off" | "0" => Ok(Value::Bool(false)),
        _ => Err(InvalidConversion::new(token, "bool")),
    }
}

fn characters(token: &str) -> Vec<Value> {
    token.chars().map(|c| Value::Str(c.to_string())).collect()
}

fn list(token: &str) -> Result<Value, InvalidConversion> {
    Ok(Value::List(characters(token)))
}

fn tuple(token: &str) -> Result<Value, InvalidConversion> {
    Ok(Value::Tuple(characters(token)))
}

fn set(token: &str) -> Result<Value, InvalidConversion> {
    let mut items: Vec<char> = token.chars().collect();
    items.sort_unstable();
    items.dedup();
    Ok(Value::Set(
        items
            .into_iter()
            .map(|c| Value::Str(c.to_string()))
            .collect(),
    ))
}

fn dict(token: &str) -> Result<Value, InvalidConversion> {
    token
        .split_whitespace()
        .map(|pair| match pair.split_once(':') {
            Some((key, value)) => Ok((Value::from(key), Value::from(value))),
            None => Err(InvalidConversion::new(token, "dict")),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Map)
}

fn bytes(token: &str) -> Result<Value, InvalidConversion> {
    Ok(Value::Bytes(token.as_bytes().to_vec()))
}
