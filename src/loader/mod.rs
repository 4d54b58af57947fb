//! YAML Loader module
//!
//! Load profiles by built-in name or from YAML files, with `${VAR}`
//! environment interpolation applied before the definition is validated.

mod parser;

pub use parser::{load_profile, load_profile_from_str, load_profile_with, parse_profile_raw};
