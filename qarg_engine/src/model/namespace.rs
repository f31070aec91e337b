use std::collections::BTreeMap;

use crate::model::Value;

/// The result of parsing: every option destination mapped to its [`Value`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Namespace {
    values: BTreeMap<String, Value>,
}

impl Namespace {
    /// Create an empty namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `dest` and return `self`, for pre-populating a namespace before parsing.
    ///
    /// ### Example
    /// ```
    /// # use qarg_engine::{Namespace, Value};
    /// let namespace = Namespace::new().with("verbose", true);
    /// assert_eq!(namespace.get("verbose"), Some(&Value::Bool(true)));
    /// ```
    pub fn with(mut self, dest: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(dest, value.into());
        self
    }

    /// The value for `dest`, if present.
    pub fn get(&self, dest: &str) -> Option<&Value> {
        self.values.get(dest)
    }

    /// Whether `dest` is present (even if it holds [`Value::None`]).
    pub fn contains(&self, dest: &str) -> bool {
        self.values.contains_key(dest)
    }

    /// Set `dest`, returning the previous value.
    pub fn set(&mut self, dest: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(dest.into(), value)
    }

    /// Remove `dest`, returning its value.
    pub fn remove(&mut self, dest: &str) -> Option<Value> {
        self.values.remove(dest)
    }

    /// The number of destinations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no destinations.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate the destinations in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(dest, value)| (dest.as_str(), value))
    }
}

impl FromIterator<(String, Value)> for Namespace {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Namespace(")?;

        for (i, (dest, value)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }

            write!(f, "{dest}={value}")?;
        }

        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        let namespace = Namespace::new();
        assert!(namespace.is_empty());
        assert_eq!(namespace.len(), 0);
        assert_eq!(namespace.get("x"), None);
        assert_eq!(namespace.to_string(), "Namespace()");
    }

    #[test]
    fn set_get_remove() {
        let mut namespace = Namespace::new();
        assert_eq!(namespace.set("a", Value::Int(1)), None);
        assert_eq!(namespace.set("a", Value::Int(2)), Some(Value::Int(1)));
        namespace.set("b", Value::None);

        assert!(namespace.contains("b"));
        assert_eq!(namespace.get("a"), Some(&Value::Int(2)));
        assert_eq!(namespace.remove("a"), Some(Value::Int(2)));
        assert!(!namespace.contains("a"));
    }

    #[test]
    fn display_sorted() {
        let namespace = Namespace::new()
            .with("foo", "x")
            .with("bar", true)
            .with("baz", 3i64);

        assert_eq!(
            namespace.to_string(),
            "Namespace(bar=True, baz=3, foo='x')"
        );
        assert_eq!(
            namespace.iter().map(|(dest, _)| dest).collect::<Vec<&str>>(),
            vec!["bar", "baz", "foo"]
        );
    }

    #[test]
    fn from_iter() {
        let namespace: Namespace = vec![("a".to_string(), Value::Int(1))].into_iter().collect();
        assert_eq!(namespace, Namespace::new().with("a", 1i64));
    }
}
