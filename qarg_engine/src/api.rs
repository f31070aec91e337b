mod core;
mod options;

pub use self::core::*;
pub use options::*;
