use thiserror::Error;

/// A conversion from a raw Cli token into a typed [`Value`].
pub type Coercion = fn(&str) -> Result<Value, InvalidConversion>;

/// The failure to convert a raw token via a [`Coercion`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid {type_name} value: '{token}'")]
pub struct InvalidConversion {
    /// The token which could not be converted.
    pub token: String,
    /// The name of the target type.
    pub type_name: String,
}

impl InvalidConversion {
    /// Create a conversion failure for `token` into the type `type_name`.
    pub fn new(token: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            type_name: type_name.into(),
        }
    }
}

/// A dynamically typed value held by a [`Namespace`](crate::Namespace).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absence of a value (an option which was neither specified nor defaulted).
    None,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Str(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// An ordered, growable sequence.
    List(Vec<Value>),
    /// An ordered, fixed sequence.
    Tuple(Vec<Value>),
    /// A sorted sequence without duplicates.
    Set(Vec<Value>),
    /// Key-value pairs, in insertion order.
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Whether this is [`Value::None`].
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// The boolean, if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// The integer, if this is a [`Value::Int`].
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// The float, if this is a [`Value::Float`].
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// The string, if this is a [`Value::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// The bytes, if this is a [`Value::Bytes`].
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(value) => Some(value.as_slice()),
            _ => None,
        }
    }

    /// The items, if this is a [`Value::List`], [`Value::Tuple`], or [`Value::Set`].
    pub fn as_items(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

fn join(f: &mut std::fmt::Formatter<'_>, items: &[Value]) -> std::fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }

        write!(f, "{item}")?;
    }

    Ok(())
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value:?}"),
            Value::Str(value) => write!(f, "'{value}'"),
            Value::Bytes(value) => write!(f, "b'{}'", value.escape_ascii()),
            Value::List(items) => {
                write!(f, "[")?;
                join(f, items)?;
                write!(f, "]")
            }
            Value::Tuple(items) => {
                write!(f, "(")?;
                join(f, items)?;

                if items.len() == 1 {
                    write!(f, ",")?;
                }

                write!(f, ")")
            }
            Value::Set(items) if items.is_empty() => write!(f, "set()"),
            Value::Set(items) => {
                write!(f, "{{")?;
                join(f, items)?;
                write!(f, "}}")
            }
            Value::Map(pairs) => {
                write!(f, "{{")?;

                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{key}: {value}")?;
                }

                write!(f, "}}")
            }
        }
    }
}

/// A named [`Coercion`], applied to every value an option receives from the Cli.
#[derive(Clone)]
pub struct ValueType {
    name: String,
    coercion: Coercion,
}

impl ValueType {
    /// Create a value type.
    pub fn new(name: impl Into<String>, coercion: Coercion) -> Self {
        Self {
            name: name.into(),
            coercion,
        }
    }

    /// The name this type was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Convert a raw token into this type.
    pub fn convert(&self, token: &str) -> Result<Value, InvalidConversion> {
        (self.coercion)(token)
    }
}

impl std::fmt::Debug for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueType")
            .field("name", &self.name)
            .finish()
    }
}

// Function pointers do not compare reliably, so types are identified by name.
impl PartialEq for ValueType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn integer(token: &str) -> Result<Value, InvalidConversion> {
        token
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| InvalidConversion::new(token, "int"))
    }

    #[rstest]
    #[case(Value::None, "None")]
    #[case(Value::Bool(true), "True")]
    #[case(Value::Bool(false), "False")]
    #[case(Value::Int(-3), "-3")]
    #[case(Value::Float(1.0), "1.0")]
    #[case(Value::Float(2.5), "2.5")]
    #[case(Value::from("abc"), "'abc'")]
    #[case(Value::Bytes(b"a\n".to_vec()), "b'a\\n'")]
    #[case(Value::from(vec![1i64, 2]), "[1, 2]")]
    #[case(Value::List(vec![]), "[]")]
    #[case(Value::Tuple(vec![Value::Int(1)]), "(1,)")]
    #[case(Value::Tuple(vec![Value::Int(1), Value::Int(2)]), "(1, 2)")]
    #[case(Value::Set(vec![]), "set()")]
    #[case(Value::Set(vec![Value::from("a")]), "{'a'}")]
    #[case(Value::Map(vec![(Value::from("k"), Value::from("v"))]), "{'k': 'v'}")]
    fn display(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[test]
    fn accessors() {
        assert!(Value::None.is_none());
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Int(1).as_int(), Some(1));
        assert_eq!(Value::Int(1).as_bool(), None);
        assert_eq!(Value::Float(0.5).as_float(), Some(0.5));
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert_eq!(Value::Bytes(vec![1]).as_bytes(), Some([1u8].as_slice()));
        assert_eq!(
            Value::Tuple(vec![Value::Int(1)]).as_items(),
            Some([Value::Int(1)].as_slice())
        );
        assert_eq!(Value::from("x").as_items(), None);
    }

    #[test]
    fn value_type_convert() {
        let value_type = ValueType::new("int", integer);

        assert_eq!(value_type.name(), "int");
        assert_eq!(value_type.convert("12").unwrap(), Value::Int(12));
        assert_eq!(
            value_type.convert("x").unwrap_err(),
            InvalidConversion::new("x", "int")
        );
        assert_eq!(
            value_type.convert("x").unwrap_err().to_string(),
            "invalid int value: 'x'"
        );
    }

    #[test]
    fn value_type_equality() {
        assert_eq!(ValueType::new("int", integer), ValueType::new("int", integer));
        assert_ne!(ValueType::new("int", integer), ValueType::new("long", integer));
        assert_eq!(
            format!("{:?}", ValueType::new("int", integer)),
            "ValueType { name: \"int\" }"
        );
    }
}
