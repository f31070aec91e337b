use thiserror::Error;

use crate::model::Nargs;

pub(crate) type OffsetValue = (usize, String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Bound {
    Range(usize, usize),
    Lower(usize),
    // Takes every remaining token, options included.
    Rest,
}

impl From<Nargs> for Bound {
    fn from(value: Nargs) -> Self {
        match value {
            Nargs::Precisely(n) => Bound::Range(n, n),
            Nargs::Optional => Bound::Range(0, 1),
            Nargs::Any => Bound::Lower(0),
            Nargs::AtLeastOne => Bound::Lower(1),
            Nargs::Remainder => Bound::Rest,
        }
    }
}

impl Bound {
    pub(crate) fn accepts_values(&self) -> bool {
        !matches!(self, Bound::Range(_, 0))
    }

    fn minimum(&self) -> usize {
        match self {
            Bound::Range(n, _) | Bound::Lower(n) => *n,
            Bound::Rest => 0,
        }
    }
}

#[cfg(test)]
impl rand::distributions::Distribution<Bound> for rand::distributions::Standard {
    fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Bound {
        match rng.gen_range(0..3) {
            0 => {
                let upper: usize = rng.gen_range(0..8);
                Bound::Range(rng.gen_range(0..=upper), upper)
            }
            1 => Bound::Lower(rng.gen_range(0..8)),
            2 => Bound::Rest,
            _ => unreachable!("internal error - impossible gen_range()"),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub(crate) enum MatchError {
    #[error("argument {0}: expected one argument")]
    ExpectedOne(String),

    #[error("argument {0}: expected {1} arguments")]
    ExpectedPrecisely(String, usize),

    #[error("argument {0}: expected at least one argument")]
    ExpectedAtLeastOne(String),

    #[error("argument {0}: expected at least {1} arguments")]
    ExpectedAtLeast(String, usize),

    #[error("argument {0}: ignored explicit argument '{1}'")]
    IgnoredExplicit(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OptionConfig {
    index: usize,
    display: String,
    bound: Bound,
}

impl OptionConfig {
    pub(crate) fn new(index: usize, display: impl Into<String>, bound: Bound) -> Self {
        Self {
            index,
            display: display.into(),
            bound,
        }
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn display(&self) -> &str {
        &self.display
    }

    pub(crate) fn bound(&self) -> Bound {
        self.bound
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MatchTokens {
    pub index: usize,
    pub values: Vec<OffsetValue>,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Matched {
    pub values: Vec<MatchTokens>,
    pub unrecognized: Vec<OffsetValue>,
}

impl Matched {
    pub(crate) fn contains(&self, index: usize) -> bool {
        self.values.iter().any(|mt| mt.index == index)
    }
}

#[derive(Debug)]
pub(super) struct MatchBuffer {
    index: usize,
    display: String,
    bound: Bound,
    values: Vec<OffsetValue>,
}

impl MatchBuffer {
    pub(super) fn new(config: &OptionConfig) -> Self {
        Self {
            index: config.index(),
            display: config.display().to_string(),
            bound: config.bound(),
            values: Vec::default(),
        }
    }

    pub(super) fn index(&self) -> usize {
        self.index
    }

    pub(super) fn push(&mut self, offset: usize, value: String) {
        self.values.push((offset, value));
    }

    pub(super) fn is_open(&self) -> bool {
        match self.bound {
            Bound::Range(_, n) => self.values.len() < n,
            Bound::Lower(_) | Bound::Rest => true,
        }
    }

    pub(super) fn is_rest(&self) -> bool {
        self.bound == Bound::Rest
    }

    pub(super) fn can_close(&self) -> bool {
        self.values.len() >= self.bound.minimum()
    }

    pub(super) fn close(self) -> Result<MatchTokens, MatchError> {
        if !self.can_close() {
            return Err(match self.bound {
                Bound::Range(1, 1) => MatchError::ExpectedOne(self.display),
                Bound::Range(i, j) if i == j => MatchError::ExpectedPrecisely(self.display, i),
                Bound::Range(1, _) | Bound::Lower(1) => MatchError::ExpectedAtLeastOne(self.display),
                Bound::Range(n, _) | Bound::Lower(n) => MatchError::ExpectedAtLeast(self.display, n),
                Bound::Rest => {
                    unreachable!("internal error - a remainder buffer can always close")
                }
            });
        }

        Ok(MatchTokens {
            index: self.index,
            values: self.values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    fn buffer(bound: Bound) -> MatchBuffer {
        MatchBuffer::new(&OptionConfig::new(0, "-f/--foo", bound))
    }

    #[test]
    fn from_nargs() {
        assert_eq!(Bound::from(Nargs::Precisely(1)), Bound::Range(1, 1));
        assert_eq!(Bound::from(Nargs::Precisely(3)), Bound::Range(3, 3));
        assert_eq!(Bound::from(Nargs::Precisely(300)), Bound::Range(300, 300));
        assert_eq!(Bound::from(Nargs::Optional), Bound::Range(0, 1));
        assert_eq!(Bound::from(Nargs::Any), Bound::Lower(0));
        assert_eq!(Bound::from(Nargs::AtLeastOne), Bound::Lower(1));
        assert_eq!(Bound::from(Nargs::Remainder), Bound::Rest);
    }

    #[rstest]
    #[case(Bound::Range(0, 0), false)]
    #[case(Bound::Range(0, 1), true)]
    #[case(Bound::Range(2, 2), true)]
    #[case(Bound::Lower(0), true)]
    #[case(Bound::Rest, true)]
    fn bound_accepts_values(#[case] bound: Bound, #[case] expected: bool) {
        assert_eq!(bound.accepts_values(), expected);
    }

    #[test]
    fn buffer_random() {
        let mut rng = thread_rng();

        for _ in 0..100 {
            // Setup
            let bound: Bound = rng.gen();
            let mut match_buffer = buffer(bound);
            let mut fed = 0;

            // Execute
            while match_buffer.is_open() && fed < 10 {
                match_buffer.push(fed, fed.to_string());
                fed += 1;
            }

            // Verify
            match bound {
                Bound::Range(_, j) => assert_eq!(fed, j),
                Bound::Lower(_) | Bound::Rest => assert_eq!(fed, 10),
            }
            assert!(match_buffer.can_close());
            assert_eq!(match_buffer.close().unwrap().values.len(), fed);
        }
    }

    #[rstest]
    #[case(Bound::Range(1, 1), MatchError::ExpectedOne("-f/--foo".to_string()))]
    #[case(Bound::Range(3, 3), MatchError::ExpectedPrecisely("-f/--foo".to_string(), 3))]
    #[case(Bound::Lower(1), MatchError::ExpectedAtLeastOne("-f/--foo".to_string()))]
    #[case(Bound::Range(2, 4), MatchError::ExpectedAtLeast("-f/--foo".to_string(), 2))]
    fn buffer_close_empty(#[case] bound: Bound, #[case] expected: MatchError) {
        let match_buffer = buffer(bound);
        assert!(!match_buffer.can_close());
        assert_eq!(match_buffer.close().unwrap_err(), expected);
    }

    #[rstest]
    #[case(MatchError::ExpectedOne("-f".to_string()), "argument -f: expected one argument")]
    #[case(MatchError::ExpectedPrecisely("-f".to_string(), 2), "argument -f: expected 2 arguments")]
    #[case(MatchError::ExpectedAtLeastOne("-f".to_string()), "argument -f: expected at least one argument")]
    #[case(MatchError::IgnoredExplicit("-f".to_string(), "x".to_string()), "argument -f: ignored explicit argument 'x'")]
    fn match_error_display(#[case] error: MatchError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn matched_contains() {
        let matched = Matched {
            values: vec![MatchTokens {
                index: 2,
                values: vec![],
            }],
            unrecognized: vec![(0, "x".to_string())],
        };
        assert!(matched.contains(2));
        assert!(!matched.contains(0));
    }
}
