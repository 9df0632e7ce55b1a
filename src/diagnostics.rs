//! # Diagnostics
//!
//! Two layers of errors live here:
//!
//! - [`ExpansionError`] is the closed taxonomy of terminal outcomes of a single
//!   expansion attempt. Each kind maps to one fixed message, which is part of
//!   the public contract and must not change.
//! - [`ParamTestError`] is the `miette`-based diagnostic that the front end and
//!   CLI surface to users. It wraps parse failures, expansion failures, I/O
//!   and registry misuse, together with the source and span they point at.
//!
//! # Error Construction Macros
//!
//! - `err_msg!(Io, "cannot read {}", path)` for message-only errors.
//! - `err_ctx!(Parse, message, src, span)` or
//!   `err_ctx!(Parse, message, src, span, help)` when a source is available.

use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};
use serde::Serialize;
use thiserror::Error;

use crate::ast::Span;

pub type SourceArc = Arc<NamedSource<String>>;

// ============================================================================
// EXPANSION ERRORS
// ============================================================================

/// Why one annotated declaration could not be expanded.
///
/// The `Display` text of every variant except `Message` is fixed.
///
/// ```rust
/// use paramtest::ExpansionError;
/// assert_eq!(
///     ExpansionError::NotArrayArgument.to_string(),
///     "@ParameterizedTest only works with array argument"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum ExpansionError {
    #[error("{0}")]
    Message(String),
    #[error("@ParameterizedTest only works on function declaration")]
    NotFunctionDecl,
    #[error("@ParameterizedTest only works with array argument")]
    NotArrayArgument,
    #[error("@ParameterizedTest only works with array argument contains at least one element")]
    NoElementsInArrayArgument,
    #[error("@ParameterizedTest only works with that the number of inputs is the same as the number of tuple's elements")]
    DifferentTupleElementCount { parameters: usize, components: usize },
    #[error("@ParameterizedTest only works with scalar elements on a function that declares at least one parameter")]
    NoParameterForScalarElement,
}

impl ExpansionError {
    /// Stable code suffix used in diagnostic codes.
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::Message(_) => "message",
            Self::NotFunctionDecl => "not_function_decl",
            Self::NotArrayArgument => "not_array_argument",
            Self::NoElementsInArrayArgument => "no_elements_in_array_argument",
            Self::DifferentTupleElementCount { .. } => "different_tuple_element_count",
            Self::NoParameterForScalarElement => "no_parameter_for_scalar_element",
        }
    }

    /// Extra guidance shown under the diagnostic, when there is any.
    pub fn help(&self) -> Option<String> {
        match self {
            Self::DifferentTupleElementCount {
                parameters,
                components,
            } => Some(format!(
                "the function declares {} parameter(s) but a tuple has {} element(s)",
                parameters, components
            )),
            Self::NotArrayArgument => {
                Some("pass a literal array, e.g. @ParameterizedTest([1, 2, 3])".to_string())
            }
            Self::NoParameterForScalarElement => {
                Some("add a parameter to receive each scalar value".to_string())
            }
            _ => None,
        }
    }
}

// ============================================================================
// USER-FACING DIAGNOSTICS
// ============================================================================

/// Source, span and help attached to a [`ParamTestError`].
#[derive(Debug, Default)]
pub struct ErrorContext {
    pub source: Option<SourceArc>,
    pub span: Option<Span>,
    pub help: Option<String>,
}

impl ErrorContext {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_source_and_span(source: SourceArc, span: Span) -> Self {
        Self {
            source: Some(source),
            span: Some(span),
            help: None,
        }
    }
}

/// Unified error type for every paramtest failure mode.
#[derive(Debug, Error)]
pub enum ParamTestError {
    #[error("Parse error: {message}")]
    Parse { message: String, ctx: ErrorContext },
    #[error("{error}")]
    Expansion {
        error: ExpansionError,
        macro_name: String,
        ctx: ErrorContext,
    },
    #[error("Validation error: {message}")]
    Validation { message: String, ctx: ErrorContext },
    #[error("I/O error: {message}")]
    Io { message: String, ctx: ErrorContext },
}

impl ParamTestError {
    fn ctx(&self) -> &ErrorContext {
        match self {
            ParamTestError::Parse { ctx, .. }
            | ParamTestError::Expansion { ctx, .. }
            | ParamTestError::Validation { ctx, .. }
            | ParamTestError::Io { ctx, .. } => ctx,
        }
    }

    /// Wraps an expansion failure so it renders against its source.
    pub fn expansion(
        error: ExpansionError,
        macro_name: impl Into<String>,
        source: &SourceArc,
        span: Span,
    ) -> Self {
        let help = error.help();
        ParamTestError::Expansion {
            error,
            macro_name: macro_name.into(),
            ctx: ErrorContext {
                source: Some(Arc::clone(source)),
                span: Some(span),
                help,
            },
        }
    }

    /// The expansion error kind, when this diagnostic carries one.
    pub fn expansion_error(&self) -> Option<&ExpansionError> {
        match self {
            ParamTestError::Expansion { error, .. } => Some(error),
            _ => None,
        }
    }

    fn label(&self) -> String {
        match self {
            ParamTestError::Parse { message, .. }
            | ParamTestError::Validation { message, .. }
            | ParamTestError::Io { message, .. } => message.clone(),
            ParamTestError::Expansion { macro_name, .. } => {
                format!("@{} expansion failed here", macro_name)
            }
        }
    }
}

impl Diagnostic for ParamTestError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let code = match self {
            ParamTestError::Parse { .. } => "paramtest::parse".to_string(),
            ParamTestError::Expansion { error, .. } => {
                format!("paramtest::expand::{}", error.code_suffix())
            }
            ParamTestError::Validation { .. } => "paramtest::validation".to_string(),
            ParamTestError::Io { .. } => "paramtest::io".to_string(),
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.ctx()
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn std::fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.ctx()
            .source
            .as_ref()
            .map(|s| s.as_ref() as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.ctx().span?;
        let len = if span.end > span.start {
            span.end - span.start
        } else {
            1
        };
        let label = LabeledSpan::new(Some(self.label()), span.start, len);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Converts source text into a shareable named source for error contexts.
pub fn to_error_source(name: impl AsRef<str>, source: impl AsRef<str>) -> SourceArc {
    Arc::new(NamedSource::new(
        name.as_ref(),
        source.as_ref().to_string(),
    ))
}

/// Prints an error with full miette diagnostics to stderr.
pub fn print_error(error: ParamTestError) {
    let report = miette::Report::new(error);
    eprintln!("{report:?}");
}

/// Constructs a `ParamTestError` variant with a formatted message and no context.
#[macro_export]
macro_rules! err_msg {
    ($variant:ident, $($arg:tt)+) => {
        $crate::ParamTestError::$variant {
            message: format!($($arg)+),
            ctx: $crate::diagnostics::ErrorContext::none(),
        }
    };
}

/// Constructs a `ParamTestError` variant pointing at a span of a named source.
#[macro_export]
macro_rules! err_ctx {
    ($variant:ident, $msg:expr, $src:expr, $span:expr, $help:expr) => {
        $crate::ParamTestError::$variant {
            message: $msg.to_string(),
            ctx: $crate::diagnostics::ErrorContext {
                source: Some($crate::diagnostics::SourceArc::clone($src)),
                span: Some($span),
                help: Some(format!("{}", $help)),
            },
        }
    };
    ($variant:ident, $msg:expr, $src:expr, $span:expr) => {
        $crate::ParamTestError::$variant {
            message: $msg.to_string(),
            ctx: $crate::diagnostics::ErrorContext::with_source_and_span(
                $crate::diagnostics::SourceArc::clone($src),
                $span,
            ),
        }
    };
}
