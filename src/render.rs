//! Renders the syntax model back to source text.
//!
//! This is the only place bindings become text: the binder hands over
//! structured `(name, type, value)` triples and the renderer writes them as
//! `let name: Type = value`.

use crate::ast::{Attribute, Block, Decl, FunctionDecl, OtherDecl, Param, SourceFile, Statement, TypeDecl};
use crate::macros::Binding;

pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Source renderer.
///
/// ```rust
/// use paramtest::render::Renderer;
/// use paramtest::macros::Binding;
/// let binding = Binding { name: "a".into(), ty: "Int".into(), value: "1".into() };
/// assert_eq!(Renderer::default().binding(&binding), "let a: Int = 1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    pub indent_width: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }
}

impl Renderer {
    pub fn new(indent_width: usize) -> Self {
        Self { indent_width }
    }

    /// Renders a whole file, ending with a single newline.
    pub fn file(&self, file: &SourceFile) -> String {
        let mut out = String::new();
        self.decls(&file.items, 0, &mut out);
        out
    }

    pub fn binding(&self, binding: &Binding) -> String {
        format!("let {}: {} = {}", binding.name, binding.ty, binding.value)
    }

    // ========================================================================
    // DECLARATIONS
    // ========================================================================

    fn decls(&self, decls: &[Decl], depth: usize, out: &mut String) {
        for (i, decl) in decls.iter().enumerate() {
            if i > 0 && (is_block_decl(decl) || is_block_decl(&decls[i - 1])) {
                out.push('\n');
            }
            self.decl_into(decl, depth, out);
        }
    }

    fn decl_into(&self, decl: &Decl, depth: usize, out: &mut String) {
        match decl {
            Decl::Function(function) => self.function(function, depth, out),
            Decl::Type(ty) => self.type_decl(ty, depth, out),
            Decl::Other(other) => self.other(other, depth, out),
        }
    }

    fn function(&self, function: &FunctionDecl, depth: usize, out: &mut String) {
        self.attributes(&function.attributes, depth, out);
        let indent = self.indent(depth);

        let mut header = format!("{}{}func {}", indent, modifiers(&function.modifiers), function.name);
        if let Some(generics) = &function.generics {
            header.push_str(generics);
        }
        let params: Vec<String> = function.params.iter().map(param).collect();
        header.push_str(&format!("({})", params.join(", ")));
        for effect in &function.effects {
            header.push(' ');
            header.push_str(effect);
        }
        if let Some(return_type) = &function.return_type {
            header.push_str(" -> ");
            header.push_str(return_type);
        }
        if let Some(where_clause) = &function.where_clause {
            header.push(' ');
            header.push_str(where_clause);
        }
        out.push_str(&header);

        match &function.body {
            Some(body) => {
                out.push_str(" {\n");
                self.block(body, depth + 1, out);
                out.push_str(&indent);
                out.push_str("}\n");
            }
            None => out.push('\n'),
        }
    }

    fn type_decl(&self, ty: &TypeDecl, depth: usize, out: &mut String) {
        self.attributes(&ty.attributes, depth, out);
        let indent = self.indent(depth);
        out.push_str(&format!("{}{}{} {}", indent, modifiers(&ty.modifiers), ty.keyword, ty.name));
        if let Some(header) = &ty.header {
            if !header.starts_with([':', '<', '.']) {
                out.push(' ');
            }
            out.push_str(header);
        }
        out.push_str(" {\n");
        self.decls(&ty.members, depth + 1, out);
        out.push_str(&indent);
        out.push_str("}\n");
    }

    fn other(&self, other: &OtherDecl, depth: usize, out: &mut String) {
        self.attributes(&other.attributes, depth, out);
        let line = format!("{}{}", modifiers(&other.modifiers), other.text);
        let statement = Statement {
            text: line,
            column: other.column,
        };
        self.statement(&statement, depth, out);
    }

    fn attributes(&self, attributes: &[Attribute], depth: usize, out: &mut String) {
        let indent = self.indent(depth);
        for attribute in attributes {
            out.push_str(&indent);
            out.push_str(&attribute.text);
            out.push('\n');
        }
    }

    // ========================================================================
    // BODIES
    // ========================================================================

    fn block(&self, block: &Block, depth: usize, out: &mut String) {
        let indent = self.indent(depth);
        for binding in &block.prelude {
            out.push_str(&indent);
            out.push_str(&self.binding(binding));
            out.push('\n');
        }
        for statement in &block.statements {
            self.statement(statement, depth, out);
        }
    }

    /// Writes a statement at `depth`; continuation lines keep their offset
    /// relative to the column the statement started at.
    fn statement(&self, statement: &Statement, depth: usize, out: &mut String) {
        let indent = self.indent(depth);
        for (i, line) in statement.text.lines().enumerate() {
            if i > 0 && line.trim().is_empty() {
                out.push('\n');
                continue;
            }
            out.push_str(&indent);
            if i == 0 {
                out.push_str(line);
            } else {
                out.push_str(strip_columns(line, statement.column));
            }
            out.push('\n');
        }
    }

    fn indent(&self, depth: usize) -> String {
        " ".repeat(depth * self.indent_width)
    }
}

fn is_block_decl(decl: &Decl) -> bool {
    matches!(decl, Decl::Function(_) | Decl::Type(_))
}

fn modifiers(modifiers: &[String]) -> String {
    modifiers.iter().map(|m| format!("{} ", m)).collect()
}

fn param(param: &Param) -> String {
    let mut text = String::new();
    if let Some(label) = &param.label {
        text.push_str(label);
        text.push(' ');
    }
    text.push_str(&param.name);
    text.push_str(": ");
    text.push_str(&param.ty);
    if let Some(default) = &param.default {
        text.push_str(" = ");
        text.push_str(default);
    }
    text
}

/// Removes up to `columns` leading whitespace characters.
fn strip_columns(line: &str, columns: usize) -> &str {
    let mut rest = line;
    for _ in 0..columns {
        match rest.strip_prefix([' ', '\t']) {
            Some(stripped) => rest = stripped,
            None => break,
        }
    }
    rest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse;

    fn roundtrip(source: &str) -> String {
        Renderer::default().file(&parse(source, "test.swift").unwrap())
    }

    #[test]
    fn empty_body_renders_on_two_lines() {
        assert_eq!(roundtrip("func assertNumber(a: Int) {}"), "func assertNumber(a: Int) {\n}\n");
    }

    #[test]
    fn nested_statements_are_reindented() {
        let source = "func f() {\n  if x {\n    print(x)\n  }\n}\n";
        assert_eq!(
            roundtrip(source),
            "func f() {\n    if x {\n      print(x)\n    }\n}\n"
        );
    }

    #[test]
    fn custom_indent_width() {
        let file = parse("struct S {\n    func f() {\n        g()\n    }\n}", "test.swift").unwrap();
        assert_eq!(
            Renderer::new(2).file(&file),
            "struct S {\n  func f() {\n    g()\n  }\n}\n"
        );
    }

    #[test]
    fn top_level_statements_are_not_separated() {
        assert_eq!(roundtrip("let p = P()\np.testF_0()\n"), "let p = P()\np.testF_0()\n");
    }

    #[test]
    fn type_header_spacing() {
        assert_eq!(roundtrip("final class P: Base {\n}"), "final class P: Base {\n}\n");
        assert_eq!(roundtrip("extension P where T == Int {}"), "extension P where T == Int {\n}\n");
    }
}
