//! Engine module for `qarg`.
//!
//! An argparse-style command line parser over dynamically typed [`Value`]s.
//! Options are registered via [`CommandLineParser::add`] with a set of [`ArgumentOptions`] (the equivalent of argparse's `add_argument` keyword arguments).
//! Parsing produces a [`Namespace`], mapping each option's destination to its value.
//!
//! See [documentation root](https://docs.rs/qarg/latest/qarg/index.html) for the declaration notation built on top of this engine.
#![deny(missing_docs)]
mod api;
mod constant;
mod matcher;
mod model;
mod parser;

pub use api::*;
pub use model::*;
pub use parser::{ConfigError, GeneralParser, ParseError};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
