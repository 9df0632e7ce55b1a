//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use paramtest::ast::{Decl, FunctionDecl, SourceFile};
use paramtest::macros::{ExpansionOutcome, MacroExpander, MacroRegistry};
use paramtest::render::Renderer;
use paramtest::syntax;

/// Parses `source`, panicking with the diagnostic on failure.
pub fn parse(source: &str) -> SourceFile {
    paramtest::logging::init_test();
    syntax::parse(source, "Test.swift").unwrap_or_else(|e| panic!("parse failed: {e}"))
}

/// Parses and expands `source` with the standard registry.
pub fn expand(source: &str) -> ExpansionOutcome {
    let file = parse(source);
    let registry = MacroRegistry::standard();
    MacroExpander::new(&registry).expand(&file)
}

/// Parses, expands and renders `source` with the default indent.
pub fn expand_to_text(source: &str) -> String {
    let outcome = expand(source);
    assert!(
        outcome.is_success(),
        "unexpected failures: {:?}",
        outcome.failures
    );
    Renderer::default().file(&outcome.file)
}

/// The function declarations at the top level of `file`, in order.
pub fn functions(file: &SourceFile) -> Vec<&FunctionDecl> {
    file.items
        .iter()
        .filter_map(|d| match d {
            Decl::Function(f) => Some(f),
            _ => None,
        })
        .collect()
}

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
