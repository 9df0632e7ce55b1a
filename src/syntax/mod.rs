//! Front end: grammar and parser for annotated source files.

pub mod parser;

pub use parser::parse;
