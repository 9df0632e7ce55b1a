//! Shape validation for `@ParameterizedTest`.

use crate::ast::{Attribute, Decl, Expr, ExprKind, FunctionDecl};
use crate::diagnostics::ExpansionError;

/// A template that passed shape validation.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedTemplate<'a> {
    pub function: &'a FunctionDecl,
    /// The array argument's elements; never empty.
    pub elements: &'a [Expr],
}

/// Checks that `decl` is a function and that the attribute's first argument
/// is a non-empty array literal.
///
/// The declaration kind is checked before the argument, so a non-function
/// with a bad argument reports `NotFunctionDecl`.
pub fn validate<'a>(
    attribute: &'a Attribute,
    decl: &'a Decl,
) -> Result<ValidatedTemplate<'a>, ExpansionError> {
    let Decl::Function(function) = decl else {
        return Err(ExpansionError::NotFunctionDecl);
    };

    let Some(argument) = attribute.first_argument() else {
        return Err(ExpansionError::NotArrayArgument);
    };

    let ExprKind::Array(elements) = &argument.value.kind else {
        return Err(ExpansionError::NotArrayArgument);
    };

    if elements.is_empty() {
        return Err(ExpansionError::NoElementsInArrayArgument);
    }

    Ok(ValidatedTemplate { function, elements })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse;

    fn first_decl(source: &str) -> Decl {
        parse(source, "test.swift").unwrap().items.remove(0)
    }

    fn check(source: &str) -> Result<usize, ExpansionError> {
        let decl = first_decl(source);
        let attribute = decl.attributes()[0].clone();
        validate(&attribute, &decl).map(|t| t.elements.len())
    }

    #[test]
    fn accepts_array_on_function() {
        assert_eq!(check("@ParameterizedTest([1, 2])\nfunc f(a: Int) {}"), Ok(2));
    }

    #[test]
    fn rejects_non_function() {
        assert_eq!(
            check("@ParameterizedTest([1])\nvar x = 1"),
            Err(ExpansionError::NotFunctionDecl)
        );
        assert_eq!(
            check("@ParameterizedTest(1)\nstruct S {}"),
            Err(ExpansionError::NotFunctionDecl)
        );
    }

    #[test]
    fn rejects_missing_or_non_array_argument() {
        for source in [
            "@ParameterizedTest\nfunc f(a: Int) {}",
            "@ParameterizedTest()\nfunc f(a: Int) {}",
            "@ParameterizedTest(1)\nfunc f(a: Int) {}",
            "@ParameterizedTest((1, 2))\nfunc f(a: Int) {}",
            "@ParameterizedTest([1] + [2])\nfunc f(a: Int) {}",
        ] {
            assert_eq!(check(source), Err(ExpansionError::NotArrayArgument), "{}", source);
        }
    }

    #[test]
    fn rejects_empty_array() {
        assert_eq!(
            check("@ParameterizedTest([])\nfunc f(a: Int) {}"),
            Err(ExpansionError::NoElementsInArrayArgument)
        );
    }
}
