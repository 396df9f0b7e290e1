//! Domain services - Pure dice logic shared by the roll pipeline

mod formula_parser;
mod result_source;

pub use formula_parser::parse_formula;
#[cfg(test)]
pub use result_source::MockResultSource;
pub use result_source::{ForcedSource, ResultSource};
