//! Shared CLI argument types

mod common;
mod global;

pub use common::{OutputFormat, parse_key_val};
pub use global::GlobalOptions;
