//! `qarg` is a one-line notation for declaring argparse-style command line options.
//!
//! A declaration is a comma separated list of tokens.
//! Each token describes a single option: a short name followed by any number of fragments, each introduced by a marker character.
//! ```text
//! <sname>(<lname>{<dest>[<type>=<default>@<action>#<nargs>$<const>!
//! ```
//!
//! | Marker | Fragment | Example |
//! |--------|----------|---------|
//! | `(` | long name (otherwise the whole token) | `f(foo` |
//! | `{` | destination | `f{target` |
//! | `[` | type name (see [`TypeRegistry`]) | `f[int` |
//! | `=` | default | `f[int=10` |
//! | `@` | action | `v@store_true` |
//! | `#` | nargs: a count, `?`, `*`, `+`, or `R` (remainder) | `f#+` |
//! | `$` | const | `f#?$1` |
//! | `!` | required | `f!` |
//!
//! Fragments may appear in any order.
//! There is no escaping: a marker character always ends the fragment before it.
//!
//! # Usage
//! ```
//! use qarg::{resolve, Value};
//!
//! let namespace = resolve("f(foo[int=1,v(verbose@store_true", &["--foo", "2", "-v"]).unwrap();
//! assert_eq!(namespace.get("foo"), Some(&Value::Int(2)));
//! assert_eq!(namespace.get("verbose"), Some(&Value::Bool(true)));
//! ```
//!
//! For anything beyond a one-off parse, build the parser once via [`build_parser`] or configure the parse via [`Resolver`].
//! The translated options run on the argparse-style engine from [`qarg_engine`], re-exported here.
//!
//! # Features
//! * `tracing_debug`: emits `tracing` debug events while translating tokens and matching Cli arguments.
#![deny(missing_docs)]
mod declaration;
mod error;
mod notation;
mod types;

pub use declaration::*;
pub use error::*;
pub use notation::*;
pub use types::TypeRegistry;

pub use qarg_engine::*;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
