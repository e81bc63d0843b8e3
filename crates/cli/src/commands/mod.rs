//! CLI command implementations.

mod build;
mod inspect;

pub use build::{build, verify};
pub use inspect::{check, coverage, lookup};
