//! File-level expansion.
//!
//! Walks every declaration of a [`SourceFile`] (recursing into type members),
//! runs each registered attached macro, and inserts the generated peers right
//! after the declaration they came from. The triggering attribute is removed
//! from the original declaration in the output.
//!
//! A failing declaration contributes no peers and is recorded as an
//! [`ExpansionFailure`]; its siblings still expand. Generated declarations are
//! never expanded again.

use serde::Serialize;

use crate::ast::{Decl, SourceFile, Span, TypeDecl};
use crate::diagnostics::{ExpansionError, ParamTestError, SourceArc};
use crate::macros::MacroRegistry;

/// One declaration whose expansion failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpansionFailure {
    pub macro_name: String,
    /// Name of the annotated declaration, when it has one.
    pub declaration: Option<String>,
    /// Span of the triggering attribute.
    pub span: Span,
    pub error: ExpansionError,
}

impl ExpansionFailure {
    /// Converts the failure into a diagnostic that renders against `source`.
    pub fn to_diagnostic(&self, source: &SourceArc) -> ParamTestError {
        ParamTestError::expansion(self.error.clone(), &self.macro_name, source, self.span)
    }
}

/// Result of expanding a whole file.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpansionOutcome {
    pub file: SourceFile,
    /// Names of every generated declaration, in output order.
    pub generated: Vec<String>,
    pub failures: Vec<ExpansionFailure>,
}

impl ExpansionOutcome {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives registered macros over source files.
#[derive(Debug, Clone, Copy)]
pub struct MacroExpander<'r> {
    registry: &'r MacroRegistry,
}

impl<'r> MacroExpander<'r> {
    pub fn new(registry: &'r MacroRegistry) -> Self {
        Self { registry }
    }

    pub fn expand(&self, file: &SourceFile) -> ExpansionOutcome {
        let mut generated = Vec::new();
        let mut failures = Vec::new();
        let items = self.expand_items(&file.items, &mut generated, &mut failures);

        log::debug!(
            "expanded {}: {} generated, {} failed",
            file.name,
            generated.len(),
            failures.len()
        );

        ExpansionOutcome {
            file: SourceFile {
                name: file.name.clone(),
                items,
            },
            generated,
            failures,
        }
    }

    fn expand_items(
        &self,
        items: &[Decl],
        generated: &mut Vec<String>,
        failures: &mut Vec<ExpansionFailure>,
    ) -> Vec<Decl> {
        let mut output = Vec::with_capacity(items.len());
        for decl in items {
            let decl = match decl {
                Decl::Type(ty) => Decl::Type(TypeDecl {
                    members: self.expand_items(&ty.members, generated, failures),
                    ..ty.clone()
                }),
                other => other.clone(),
            };
            let peers = self.expand_decl(&decl, generated, failures);

            let kept = decl
                .attributes()
                .iter()
                .filter(|a| !self.registry.contains(&a.name))
                .cloned()
                .collect();
            output.push(decl.with_attributes(kept));
            output.extend(peers);
        }
        output
    }

    fn expand_decl(
        &self,
        decl: &Decl,
        generated: &mut Vec<String>,
        failures: &mut Vec<ExpansionFailure>,
    ) -> Vec<Decl> {
        let mut peers = Vec::new();
        for attribute in decl.attributes() {
            let Some(expansion) = self.registry.lookup(&attribute.name) else {
                continue;
            };
            log::debug!(
                "expanding @{} on {}",
                attribute.name,
                decl.name().unwrap_or("<declaration>")
            );
            match expansion(attribute, decl) {
                Ok(decls) => {
                    generated.extend(decls.iter().filter_map(|d| d.name().map(String::from)));
                    peers.extend(decls);
                }
                Err(error) => {
                    log::warn!("@{} failed: {}", attribute.name, error);
                    failures.push(ExpansionFailure {
                        macro_name: attribute.name.clone(),
                        declaration: decl.name().map(String::from),
                        span: attribute.span,
                        error,
                    });
                }
            }
        }
        peers
    }
}
