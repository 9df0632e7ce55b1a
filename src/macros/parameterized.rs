//! `@ParameterizedTest`: one zero-argument function per array element.
//!
//! ```text
//! @ParameterizedTest([(1, 2, 3), (1, 3, 3)])
//! func assertWithTuple(a: Int, b: Int, c: Int) {
//!     assert(a + b == c)
//! }
//! ```
//!
//! expands to `testAssertWithTuple_0` and `testAssertWithTuple_1`, each
//! binding `a`, `b` and `c` before `assert(a + b == c)`.

use crate::ast::{Attribute, Decl};
use crate::diagnostics::ExpansionError;
use crate::macros::{bind_element, filter_attributes, generated_name, synthesize, validate};

/// Annotation name this macro is registered under.
pub const NAME: &str = "ParameterizedTest";

/// Expands one annotated declaration.
///
/// Returns the generated functions in array order, or the first error
/// encountered; there is never partial output.
pub fn expansion(attribute: &Attribute, decl: &Decl) -> Result<Vec<Decl>, ExpansionError> {
    let template = validate(attribute, decl)?;
    let function = template.function;
    let params = function.parameter_specs();
    let attributes = filter_attributes(&function.attributes, attribute);

    template
        .elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            let bindings = bind_element(element, &params)?;
            let name = generated_name(&function.name, index);
            Ok(Decl::Function(synthesize(
                function,
                attributes.clone(),
                name,
                bindings,
            )))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse;

    fn expand(source: &str) -> Result<Vec<Decl>, ExpansionError> {
        let decl = parse(source, "test.swift").unwrap().items.remove(0);
        let attribute = decl.attributes()[0].clone();
        expansion(&attribute, &decl)
    }

    #[test]
    fn names_follow_array_order() {
        let decls = expand("@ParameterizedTest([1, 2, 3])\nfunc f(value: Int) {\n    print(value)\n}").unwrap();
        let names: Vec<_> = decls.iter().filter_map(|d| d.name()).collect();
        assert_eq!(names, vec!["testF_0", "testF_1", "testF_2"]);
    }

    #[test]
    fn first_bad_element_aborts_everything() {
        let err = expand("@ParameterizedTest([(1, 2, 3), (1, 2)])\nfunc f(a: Int, b: Int, c: Int) {}").unwrap_err();
        assert!(matches!(err, ExpansionError::DifferentTupleElementCount { .. }));
    }

    #[test]
    fn trigger_is_removed_from_generated_functions() {
        let decls = expand("@ParameterizedTest([1])\n@MainActor\nfunc f(a: Int) {}").unwrap();
        let attrs: Vec<_> = decls[0].attributes().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(attrs, vec!["MainActor"]);
    }
}
