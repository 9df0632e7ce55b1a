//! Element binding: one array element against the template's parameters.

use crate::ast::{Expr, ExprKind};
use crate::diagnostics::ExpansionError;
use crate::macros::{Binding, ParameterSpec};

/// Produces the ordered bindings for one array element.
///
/// - A tuple binds every parameter by position and must have exactly as many
///   components as there are parameters. Component labels play no part.
/// - Anything scalar (including a nested array literal) binds only the first
///   parameter, with the element's full source text.
/// - An uninterpreted element yields no bindings and is not an error.
///
/// ```rust
/// use paramtest::ast::Expr;
/// use paramtest::macros::{bind_element, ParameterSpec};
/// let params = vec![ParameterSpec { name: "a".into(), ty: "Int".into(), position: 0 }];
/// let bindings = bind_element(&Expr::scalar("42"), &params).unwrap();
/// assert_eq!(bindings[0].value, "42");
/// ```
pub fn bind_element(
    element: &Expr,
    params: &[ParameterSpec],
) -> Result<Vec<Binding>, ExpansionError> {
    match &element.kind {
        ExprKind::Tuple(components) => {
            if components.len() != params.len() {
                return Err(ExpansionError::DifferentTupleElementCount {
                    parameters: params.len(),
                    components: components.len(),
                });
            }
            Ok(components
                .iter()
                .zip(params)
                .map(|(component, spec)| Binding::new(spec, component.text.as_str()))
                .collect())
        }
        ExprKind::Scalar | ExprKind::Array(_) => {
            let first = params
                .first()
                .ok_or(ExpansionError::NoParameterForScalarElement)?;
            Ok(vec![Binding::new(first, element.text.as_str())])
        }
        ExprKind::Other => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs(names: &[&str]) -> Vec<ParameterSpec> {
        names
            .iter()
            .enumerate()
            .map(|(position, name)| ParameterSpec {
                name: name.to_string(),
                ty: "Int".to_string(),
                position,
            })
            .collect()
    }

    fn tuple(components: &[&str]) -> Expr {
        Expr {
            kind: ExprKind::Tuple(components.iter().map(|c| Expr::scalar(*c)).collect()),
            text: format!("({})", components.join(", ")),
            span: Default::default(),
        }
    }

    #[test]
    fn tuple_binds_every_parameter_in_order() {
        let bindings = bind_element(&tuple(&["1", "2", "3"]), &specs(&["a", "b", "c"])).unwrap();
        let pairs: Vec<_> = bindings
            .iter()
            .map(|b| (b.name.as_str(), b.value.as_str()))
            .collect();
        assert_eq!(pairs, vec![("a", "1"), ("b", "2"), ("c", "3")]);
    }

    #[test]
    fn tuple_arity_mismatch_fails() {
        let err = bind_element(&tuple(&["1", "2"]), &specs(&["a", "b", "c"])).unwrap_err();
        assert_eq!(
            err,
            ExpansionError::DifferentTupleElementCount {
                parameters: 3,
                components: 2
            }
        );
    }

    #[test]
    fn scalar_binds_only_first_parameter() {
        let bindings = bind_element(&Expr::scalar("-1 * x"), &specs(&["a", "b"])).unwrap();
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].name, "a");
        assert_eq!(bindings[0].value, "-1 * x");
    }

    #[test]
    fn scalar_without_parameters_fails() {
        assert_eq!(
            bind_element(&Expr::scalar("1"), &[]),
            Err(ExpansionError::NoParameterForScalarElement)
        );
    }

    #[test]
    fn empty_tuple_matches_zero_parameters() {
        assert_eq!(bind_element(&tuple(&[]), &[]), Ok(Vec::new()));
    }

    #[test]
    fn labels_do_not_reorder_components() {
        // `(b: 2, a: 1)` still binds by position.
        let labeled = Expr {
            kind: ExprKind::Tuple(vec![Expr::scalar("2"), Expr::scalar("1")]),
            text: "(b: 2, a: 1)".to_string(),
            span: Default::default(),
        };
        let bindings = bind_element(&labeled, &specs(&["a", "b"])).unwrap();
        assert_eq!(bindings[0].value, "2");
        assert_eq!(bindings[1].value, "1");
    }

    #[test]
    fn uninterpreted_element_binds_nothing() {
        let other = Expr {
            kind: ExprKind::Other,
            text: "#placeholder".to_string(),
            span: Default::default(),
        };
        assert_eq!(bind_element(&other, &specs(&["x"])), Ok(Vec::new()));
    }
}
