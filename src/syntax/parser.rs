//! Source parser.
//!
//! Converts source text into the immutable syntax model of [`crate::ast`].
//! The parser is purely syntactic: expressions and statements are kept as
//! verbatim text, classified only as far as expansion needs.

use crate::ast::{
    Argument, Attribute, Block, Decl, Expr, ExprKind, FunctionDecl, OtherDecl, Param,
    SourceFile, Span, Statement, TypeDecl,
};
use crate::diagnostics::{to_error_source, SourceArc};
use crate::{err_ctx, ParamTestError};
use pest::error::InputLocation;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
struct SourceParser;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parses source text into a [`SourceFile`].
///
/// `name` is used for diagnostics only.
///
/// ```rust
/// use paramtest::syntax::parse;
/// let file = parse("func f(value: Int) {\n    print(value)\n}\n", "F.swift").unwrap();
/// assert_eq!(file.items.len(), 1);
/// ```
pub fn parse(source_text: &str, name: &str) -> Result<SourceFile, ParamTestError> {
    let ctx = BuildContext {
        source: to_error_source(name, source_text),
    };

    let mut pairs = SourceParser::parse(Rule::file, source_text)
        .map_err(|e| convert_parse_error(e, &ctx.source))?;

    let Some(file) = pairs.next() else {
        return Ok(SourceFile {
            name: name.to_string(),
            items: Vec::new(),
        });
    };

    let items = file
        .into_inner()
        .filter(|p| p.as_rule() == Rule::item)
        .map(|p| ctx.build_item(p))
        .collect::<Result<Vec<_>, _>>()?;

    log::trace!("parsed {} top-level declaration(s) from {}", items.len(), name);

    Ok(SourceFile {
        name: name.to_string(),
        items,
    })
}

// ============================================================================
// AST BUILDERS
// ============================================================================

struct BuildContext {
    source: SourceArc,
}

impl BuildContext {
    fn malformed(&self, what: &str, pair: &Pair<Rule>) -> ParamTestError {
        err_ctx!(
            Parse,
            format!("malformed {}", what),
            &self.source,
            span_of(pair)
        )
    }

    fn build_item(&self, pair: Pair<Rule>) -> Result<Decl, ParamTestError> {
        let span = span_of(&pair);
        let mut attributes = Vec::new();
        let mut modifiers = Vec::new();
        let mut modifier_column = None;

        for inner in pair.clone().into_inner() {
            match inner.as_rule() {
                Rule::attribute => attributes.push(self.build_attribute(inner)?),
                Rule::modifier => {
                    modifier_column.get_or_insert_with(|| column_of(&inner));
                    modifiers.push(inner.as_str().trim().to_string());
                }
                Rule::function_decl => {
                    let function = self.build_function(inner, attributes, modifiers, span)?;
                    return Ok(Decl::Function(function));
                }
                Rule::type_decl => {
                    let ty = self.build_type(inner, attributes, modifiers, span)?;
                    return Ok(Decl::Type(ty));
                }
                Rule::other_decl => {
                    return Ok(Decl::Other(OtherDecl {
                        attributes,
                        modifiers,
                        text: inner.as_str().trim_end().to_string(),
                        column: modifier_column.unwrap_or_else(|| column_of(&inner)),
                        span,
                    }));
                }
                _ => {}
            }
        }

        Err(self.malformed("declaration", &pair))
    }

    fn build_function(
        &self,
        pair: Pair<Rule>,
        attributes: Vec<Attribute>,
        modifiers: Vec<String>,
        span: Span,
    ) -> Result<FunctionDecl, ParamTestError> {
        let mut name = None;
        let mut generics = None;
        let mut params = Vec::new();
        let mut effects = Vec::new();
        let mut return_type = None;
        let mut where_clause = None;
        let mut body = None;

        for inner in pair.clone().into_inner() {
            match inner.as_rule() {
                Rule::ident => name = Some(inner.as_str().to_string()),
                Rule::generic_clause => generics = Some(inner.as_str().to_string()),
                Rule::parameter_clause => {
                    params = inner
                        .into_inner()
                        .map(|p| self.build_parameter(p))
                        .collect::<Result<_, _>>()?;
                }
                Rule::effect => effects.push(inner.as_str().to_string()),
                Rule::return_clause => {
                    return_type = inner
                        .into_inner()
                        .next()
                        .map(|t| t.as_str().trim().to_string());
                }
                Rule::where_clause => where_clause = Some(inner.as_str().trim().to_string()),
                Rule::code_block => body = Some(build_block(inner)),
                _ => {}
            }
        }

        let name = name.ok_or_else(|| self.malformed("function name", &pair))?;
        Ok(FunctionDecl {
            attributes,
            modifiers,
            name,
            generics,
            params,
            effects,
            return_type,
            where_clause,
            body,
            span,
        })
    }

    fn build_parameter(&self, pair: Pair<Rule>) -> Result<Param, ParamTestError> {
        let mut label = None;
        let mut name = None;
        let mut ty = None;
        let mut default = None;

        for inner in pair.clone().into_inner() {
            match inner.as_rule() {
                Rule::parameter_label => label = Some(inner.as_str().to_string()),
                Rule::ident => name = Some(inner.as_str().to_string()),
                Rule::parameter_type => ty = Some(inner.as_str().trim().to_string()),
                Rule::default_value => {
                    default = inner.into_inner().next().map(|e| e.as_str().trim().to_string());
                }
                _ => {}
            }
        }

        match (name, ty) {
            (Some(name), Some(ty)) => Ok(Param {
                label,
                name,
                ty,
                default,
            }),
            _ => Err(self.malformed("parameter", &pair)),
        }
    }

    fn build_type(
        &self,
        pair: Pair<Rule>,
        attributes: Vec<Attribute>,
        modifiers: Vec<String>,
        span: Span,
    ) -> Result<TypeDecl, ParamTestError> {
        let mut keyword = None;
        let mut name = None;
        let mut header = None;
        let mut members = Vec::new();

        for inner in pair.clone().into_inner() {
            match inner.as_rule() {
                Rule::type_keyword => keyword = Some(inner.as_str().to_string()),
                Rule::ident => name = Some(inner.as_str().to_string()),
                Rule::type_header => header = Some(inner.as_str().trim().to_string()),
                Rule::item => members.push(self.build_item(inner)?),
                _ => {}
            }
        }

        match (keyword, name) {
            (Some(keyword), Some(name)) => Ok(TypeDecl {
                attributes,
                modifiers,
                keyword,
                name,
                header,
                members,
                span,
            }),
            _ => Err(self.malformed("type declaration", &pair)),
        }
    }

    fn build_attribute(&self, pair: Pair<Rule>) -> Result<Attribute, ParamTestError> {
        let text = pair.as_str().to_string();
        let span = span_of(&pair);
        let mut name = None;
        let mut arguments = None;

        for inner in pair.clone().into_inner() {
            match inner.as_rule() {
                Rule::attribute_name => name = Some(inner.as_str().to_string()),
                Rule::attribute_arguments => {
                    arguments = Some(inner.into_inner().map(build_argument).collect());
                }
                _ => {}
            }
        }

        let name = name.ok_or_else(|| self.malformed("attribute", &pair))?;
        Ok(Attribute {
            name,
            arguments,
            text,
            span,
        })
    }
}

fn build_argument(pair: Pair<Rule>) -> Argument {
    let mut label = None;
    let mut value = None;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::argument_label => label = Some(inner.as_str().to_string()),
            Rule::expr => value = Some(build_expr(inner)),
            _ => {}
        }
    }
    Argument {
        label,
        // grammar requires an expression in every argument
        value: value.unwrap_or_else(|| Expr::scalar("")),
    }
}

/// Classifies an expression: array literal, tuple or scalar.
/// Only a group that spans the whole expression counts; `(1, 2).0` is a scalar.
///
/// pest's implicit whitespace can follow the last piece of an expression
/// (`(3, 4)\n]`), so text and span are trimmed before classifying.
fn build_expr(pair: Pair<Rule>) -> Expr {
    let raw = pair.as_str();
    let text = raw.trim();
    let start = pair.as_span().start() + (raw.len() - raw.trim_start().len());
    let span = Span::new(start, start + text.len());
    let mut inner = pair.into_inner();

    let kind = match (inner.next(), inner.next()) {
        (Some(only), None) if only.as_str().trim() == text => match only.as_rule() {
            Rule::array_literal => ExprKind::Array(only.into_inner().map(build_expr).collect()),
            Rule::paren_group => ExprKind::Tuple(build_components(only)),
            _ => ExprKind::Scalar,
        },
        _ => ExprKind::Scalar,
    };

    Expr {
        kind,
        text: text.to_string(),
        span,
    }
}

/// Tuple components in order. Labels are dropped; components bind by position.
fn build_components(pair: Pair<Rule>) -> Vec<Expr> {
    pair.into_inner()
        .flat_map(|component| component.into_inner())
        .filter(|inner| inner.as_rule() == Rule::expr)
        .map(build_expr)
        .collect()
}

fn build_block(pair: Pair<Rule>) -> Block {
    let statements = pair
        .into_inner()
        .filter(|p| p.as_rule() == Rule::statement)
        .map(|p| {
            Statement {
                text: p.as_str().trim_end().to_string(),
                column: column_of(&p),
            }
        })
        .collect();
    Block {
        prelude: Vec::new(),
        statements,
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn span_of(pair: &Pair<Rule>) -> Span {
    let span = pair.as_span();
    Span::new(span.start(), span.end())
}

fn column_of(pair: &Pair<Rule>) -> usize {
    let (_, column) = pair.as_span().start_pos().line_col();
    column.saturating_sub(1)
}

fn convert_parse_error(error: pest::error::Error<Rule>, source: &SourceArc) -> ParamTestError {
    let span = match error.location {
        InputLocation::Pos(pos) => Span::new(pos, pos),
        InputLocation::Span((start, end)) => Span::new(start, end),
    };
    err_ctx!(Parse, error.variant.message(), source, span)
}
