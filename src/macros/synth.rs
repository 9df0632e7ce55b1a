//! Declaration synthesis: builds one generated function from a template.

use crate::ast::{Attribute, Block, FunctionDecl, Statement};
use crate::macros::Binding;

/// The template's attributes minus every attribute named like `trigger`,
/// in their original order.
pub fn filter_attributes(attributes: &[Attribute], trigger: &Attribute) -> Vec<Attribute> {
    attributes
        .iter()
        .filter(|attribute| attribute.name != trigger.name)
        .cloned()
        .collect()
}

/// Builds a zero-argument function named `name` whose body is `bindings`
/// followed by the template's statements.
///
/// Modifiers, effects and the generic clause are copied; parameters, return
/// type and where clause are dropped. The template is not modified.
pub fn synthesize(
    template: &FunctionDecl,
    attributes: Vec<Attribute>,
    name: String,
    bindings: Vec<Binding>,
) -> FunctionDecl {
    let statements = template
        .body
        .as_ref()
        .map(|body| body.statements.iter().map(strip_leading_formatting).collect())
        .unwrap_or_default();

    FunctionDecl {
        attributes,
        modifiers: template.modifiers.clone(),
        name,
        generics: template.generics.clone(),
        params: Vec::new(),
        effects: template.effects.clone(),
        return_type: None,
        where_clause: None,
        body: Some(Block {
            prelude: bindings,
            statements,
        }),
        span: template.span,
    }
}

fn strip_leading_formatting(statement: &Statement) -> Statement {
    let trimmed = statement.text.trim_start();
    Statement {
        column: statement.column + (statement.text.len() - trimmed.len()),
        text: trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Decl, Span};
    use crate::syntax::parse;

    fn template(source: &str) -> FunctionDecl {
        match parse(source, "test.swift").unwrap().items.remove(0) {
            Decl::Function(f) => f,
            other => panic!("expected function, got {:?}", other),
        }
    }

    fn attribute(name: &str) -> Attribute {
        Attribute {
            name: name.to_string(),
            arguments: None,
            text: format!("@{}", name),
            span: Span::default(),
        }
    }

    #[test]
    fn filter_keeps_other_attributes_in_order() {
        let attrs = vec![attribute("MainActor"), attribute("ParameterizedTest"), attribute("available")];
        let names: Vec<_> = filter_attributes(&attrs, &attribute("ParameterizedTest"))
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["MainActor", "available"]);
    }

    #[test]
    fn generated_function_shape() {
        let f = template("public static func f<T>(value: Int) async throws -> Int where T: P {\n    print(value)\n}");
        let binding = Binding {
            name: "value".into(),
            ty: "Int".into(),
            value: "1".into(),
        };
        let generated = synthesize(&f, Vec::new(), "testF_0".into(), vec![binding.clone()]);

        assert_eq!(generated.name, "testF_0");
        assert_eq!(generated.modifiers, vec!["public", "static"]);
        assert_eq!(generated.generics.as_deref(), Some("<T>"));
        assert_eq!(generated.effects, vec!["async", "throws"]);
        assert!(generated.params.is_empty());
        assert!(generated.return_type.is_none());
        assert!(generated.where_clause.is_none());

        let body = generated.body.unwrap();
        assert_eq!(body.prelude, vec![binding]);
        assert_eq!(body.statements, f.body.unwrap().statements);
    }

    #[test]
    fn bodiless_template_yields_bindings_only() {
        let f = template("func requirement(a: Int)");
        let generated = synthesize(&f, Vec::new(), "testRequirement_0".into(), Vec::new());
        assert_eq!(generated.body, Some(Block::default()));
    }
}
