///wrapper function above envsubst to handle default values in form of ${VAR:-default}
pub mod envsubst;
mod error;
mod kubeless;
pub use kubeless::*;

pub use error::*;

/// label every kubeless resource of a function carries
pub const FUNCTION_LABEL: &str = "function";

pub fn is_default<T: Default + PartialEq>(t: &T) -> bool {
    *t == Default::default()
}
