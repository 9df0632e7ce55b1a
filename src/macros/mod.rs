//! # Peer Macro Expansion
//!
//! Attached macros turn one annotated declaration into a list of new
//! declarations that are placed next to it ("peers"). The only macro shipped
//! is `@ParameterizedTest`, which expands a template function plus a literal
//! array of parameter sets into one zero-argument function per set.
//!
//! ## Core Principles
//!
//! - **Syntactic Only**: expansion reads syntax values and builds new ones.
//!   Parameter values are opaque source text and are never evaluated.
//! - **Pure Transformation**: a macro is a plain function
//!   `(&Attribute, &Decl) -> Result<Vec<Decl>, ExpansionError>`.
//! - **Fail Fast**: one bad element aborts the whole declaration's expansion;
//!   there is no partial output for that declaration.
//!
//! ## Pipeline for `@ParameterizedTest`
//!
//! [`validator`] → for each element: [`binder`] → [`naming`] + [`synth`].

use serde::{Deserialize, Serialize};

use crate::ast::{Attribute, Decl};
use crate::diagnostics::ExpansionError;

pub mod binder;
pub mod expander;
pub mod naming;
pub mod parameterized;
pub mod registry;
pub mod synth;
pub mod validator;

pub use binder::bind_element;
pub use expander::{ExpansionFailure, ExpansionOutcome, MacroExpander};
pub use naming::generated_name;
pub use registry::MacroRegistry;
pub use synth::{filter_attributes, synthesize};
pub use validator::{validate, ValidatedTemplate};

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// A peer macro: given the triggering attribute and the declaration it is
/// attached to, produce the declarations to insert after it.
pub type PeerMacroFn = fn(&Attribute, &Decl) -> Result<Vec<Decl>, ExpansionError>;

/// One declared parameter of a template, as seen by the binder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: String,
    pub ty: String,
    pub position: usize,
}

/// One injected local binding: `let name: ty = value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub name: String,
    pub ty: String,
    /// Verbatim source text of the bound value.
    pub value: String,
}

impl Binding {
    pub fn new(spec: &ParameterSpec, value: impl Into<String>) -> Self {
        Self {
            name: spec.name.clone(),
            ty: spec.ty.clone(),
            value: value.into(),
        }
    }
}

impl crate::ast::FunctionDecl {
    /// The ordered parameter list in binder form.
    pub fn parameter_specs(&self) -> Vec<ParameterSpec> {
        self.params
            .iter()
            .enumerate()
            .map(|(position, param)| ParameterSpec {
                name: param.name.clone(),
                ty: param.ty.clone(),
                position,
            })
            .collect()
    }
}
