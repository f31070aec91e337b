mod marker;
mod token;

pub use marker::*;
pub use token::*;
