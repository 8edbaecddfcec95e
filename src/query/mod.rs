//! Query specifications for rowsift
//!
//! Criteria and filter specs are plain data. The host translates user-facing
//! parameters into them, either directly or through the JSON decoders here.

mod ast;
mod parse;

pub use ast::{Criterion, FilterSpec, SortOrder};
pub use parse::{parse_criteria, parse_filters};
