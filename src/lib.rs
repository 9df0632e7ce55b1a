//! # paramtest
//!
//! Expands `@ParameterizedTest([...])` annotations on test functions into one
//! zero-argument test function per element of the array argument.
//!
//! ```rust
//! use paramtest::{macros::{MacroExpander, MacroRegistry}, render::Renderer, syntax};
//!
//! let source = "@ParameterizedTest([1, 2])\nfunc f(a: Int) {\n    print(a)\n}\n";
//! let file = syntax::parse(source, "Sample.swift").unwrap();
//! let registry = MacroRegistry::standard();
//! let outcome = MacroExpander::new(&registry).expand(&file);
//! assert_eq!(outcome.generated, vec!["testF_0", "testF_1"]);
//!
//! let text = Renderer::default().file(&outcome.file);
//! assert!(text.contains("let a: Int = 2"));
//! ```

pub use crate::diagnostics::{print_error, ExpansionError, ParamTestError};

pub mod ast;
pub mod cli;
pub mod diagnostics;
pub mod discovery;
pub mod logging;
pub mod macros;
pub mod render;
pub mod syntax;
