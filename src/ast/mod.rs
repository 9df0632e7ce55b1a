//! Syntax model for annotated source files.
//!
//! Every node is an immutable value. Macro expansion never edits a node in
//! place; it builds new declarations from parts of the old ones.

// ============================================================================
// IMPORTS
// ============================================================================

use serde::{Deserialize, Serialize};

// ============================================================================
// SPANS
// ============================================================================

/// Represents a byte span in the source text.
///
/// # Examples
///
/// ```rust
/// use paramtest::ast::Span;
/// let span = Span { start: 0, end: 5 };
/// assert_eq!(span.len(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::from(span.start..span.end)
    }
}

// ============================================================================
// DECLARATIONS
// ============================================================================

/// A parsed source file: an ordered list of top-level declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceFile {
    pub name: String,
    pub items: Vec<Decl>,
}

/// The closed set of declaration kinds the expander distinguishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Decl {
    Function(FunctionDecl),
    Type(TypeDecl),
    /// Anything else (`let`, `var`, `init`, top-level statements), kept as text.
    Other(OtherDecl),
}

impl Decl {
    pub fn attributes(&self) -> &[Attribute] {
        match self {
            Decl::Function(f) => &f.attributes,
            Decl::Type(t) => &t.attributes,
            Decl::Other(o) => &o.attributes,
        }
    }

    /// Returns a copy of this declaration carrying `attributes` instead of its own.
    pub fn with_attributes(&self, attributes: Vec<Attribute>) -> Decl {
        match self {
            Decl::Function(f) => Decl::Function(FunctionDecl {
                attributes,
                ..f.clone()
            }),
            Decl::Type(t) => Decl::Type(TypeDecl {
                attributes,
                ..t.clone()
            }),
            Decl::Other(o) => Decl::Other(OtherDecl {
                attributes,
                ..o.clone()
            }),
        }
    }

    /// Declared name, when the declaration kind has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Decl::Function(f) => Some(&f.name),
            Decl::Type(t) => Some(&t.name),
            Decl::Other(_) => None,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Decl::Function(f) => f.span,
            Decl::Type(t) => t.span,
            Decl::Other(o) => o.span,
        }
    }
}

/// A function declaration: the template a parameterized test expands from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<String>,
    pub name: String,
    /// Generic parameter clause text, e.g. `<T: Equatable>`.
    pub generics: Option<String>,
    pub params: Vec<Param>,
    /// Effect specifiers in source order (`async`, `throws`, `rethrows`).
    pub effects: Vec<String>,
    pub return_type: Option<String>,
    pub where_clause: Option<String>,
    /// `None` for a bodiless requirement (protocol members).
    pub body: Option<Block>,
    pub span: Span,
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    /// External argument label when it differs from the local name (`_` included).
    pub label: Option<String>,
    /// Local name used inside the body.
    pub name: String,
    pub ty: String,
    pub default: Option<String>,
}

/// A function body.
///
/// `prelude` holds the injected bindings of a generated function; it is
/// empty for anything that came from source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Block {
    pub prelude: Vec<crate::macros::Binding>,
    pub statements: Vec<Statement>,
}

/// One body statement, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub text: String,
    /// 0-based column the statement started at; continuation lines are
    /// re-indented relative to it.
    pub column: usize,
}

impl Statement {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            column: 0,
        }
    }
}

/// `class`, `struct`, `enum`, `extension`, `actor` or `protocol` with members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<String>,
    pub keyword: String,
    pub name: String,
    /// Generics, inheritance and where-clause text between the name and `{`.
    pub header: Option<String>,
    pub members: Vec<Decl>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherDecl {
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<String>,
    pub text: String,
    /// 0-based column of the first modifier or of the text.
    pub column: usize,
    pub span: Span,
}

// ============================================================================
// ATTRIBUTES AND EXPRESSIONS
// ============================================================================

/// An attribute such as `@MainActor` or `@ParameterizedTest([1, 2])`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    /// `None` when the attribute has no parenthesized argument clause.
    pub arguments: Option<Vec<Argument>>,
    /// Verbatim source text, `@` included.
    pub text: String,
    pub span: Span,
}

impl Attribute {
    /// The first argument of the argument clause, if any.
    pub fn first_argument(&self) -> Option<&Argument> {
        self.arguments.as_ref().and_then(|args| args.first())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub label: Option<String>,
    pub value: Expr,
}

/// An expression, classified only as far as expansion needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    pub kind: ExprKind,
    /// Verbatim source text of the whole expression.
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprKind {
    /// `[a, b, c]`
    Array(Vec<Expr>),
    /// `(a, b)` or `(x: a, y: b)`; labels are not kept. `(a)` is a
    /// one-component tuple.
    Tuple(Vec<Expr>),
    /// Any other bare expression; its value is `Expr::text`.
    Scalar,
    /// An element the binder does not interpret. The parser never produces
    /// it; hosts that build elements directly may.
    Other,
}

impl Expr {
    pub fn scalar(text: impl Into<String>) -> Self {
        Self {
            kind: ExprKind::Scalar,
            text: text.into(),
            span: Span::default(),
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self.kind, ExprKind::Array(_))
    }
}
