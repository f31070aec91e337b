mod namespace;
mod value;

pub use namespace::Namespace;
pub use value::*;

/// The cardinality of inputs to match for an option.
///
/// Inspired by argparse: <https://docs.python.org/3/library/argparse.html#nargs>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nargs {
    /// `N`: Precisely `N` values.
    Precisely(usize),
    /// `?`: Zero or one value.
    /// When zero values are specified, the option takes its `const`.
    Optional,
    /// `*`: May be any number of values, including `0`.
    Any,
    /// `+`: At least one value must be specified.
    AtLeastOne,
    /// `...`: Every remaining token, including those that look like options.
    Remainder,
}

impl std::fmt::Display for Nargs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Nargs::Precisely(n) => write!(f, "{n}"),
            Nargs::Optional => write!(f, "?"),
            Nargs::Any => write!(f, "*"),
            Nargs::AtLeastOne => write!(f, "+"),
            Nargs::Remainder => write!(f, "..."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Nargs::Precisely(0), "0")]
    #[case(Nargs::Precisely(12), "12")]
    #[case(Nargs::Precisely(300), "300")]
    #[case(Nargs::Optional, "?")]
    #[case(Nargs::Any, "*")]
    #[case(Nargs::AtLeastOne, "+")]
    #[case(Nargs::Remainder, "...")]
    fn display(#[case] nargs: Nargs, #[case] expected: &str) {
        assert_eq!(nargs.to_string(), expected);
    }
}
