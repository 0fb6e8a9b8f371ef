//! Build glue for WebModule style JavaScript packages.
//!
//! Sources are concatenated, blocks marked with `{@label ... }@label` are
//! removed for every configured label, and the result is optionally minified
//! by Closure Compiler before being written out.

pub mod cli;
pub mod compiler;
pub mod config;
pub mod error;
pub mod labels;
pub mod pipeline;
pub mod strip;

pub use error::{Error, Result};
pub use labels::LabelSet;
pub use strip::strip;
