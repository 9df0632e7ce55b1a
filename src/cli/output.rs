//! Handles all user-facing output for the CLI.
//!
//! Pretty-printing, colorized diffs and JSON reports live here so every
//! command presents results the same way.

use std::io::Write;
use std::path::Path;

use difference::{Changeset, Difference};
use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::macros::{ExpansionFailure, ExpansionOutcome};
use crate::{err_msg, ParamTestError};

// ============================================================================
// JSON REPORTS
// ============================================================================

/// Machine-readable summary of one expanded file.
#[derive(Debug, Serialize)]
pub struct ExpansionReport<'a> {
    pub path: String,
    pub generated: &'a [String],
    pub failures: Vec<FailureReport<'a>>,
    /// Rendered expansion; absent when any declaration failed.
    pub expanded: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FailureReport<'a> {
    pub macro_name: &'a str,
    pub declaration: Option<&'a str>,
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl<'a> ExpansionReport<'a> {
    pub fn new(path: &Path, source: &str, outcome: &'a ExpansionOutcome, expanded: Option<String>) -> Self {
        Self {
            path: path.display().to_string(),
            generated: &outcome.generated,
            failures: outcome
                .failures
                .iter()
                .map(|f| FailureReport::new(f, source))
                .collect(),
            expanded,
        }
    }
}

impl<'a> FailureReport<'a> {
    fn new(failure: &'a ExpansionFailure, source: &str) -> Self {
        let (line, column) = line_col(source, failure.span.start);
        Self {
            macro_name: &failure.macro_name,
            declaration: failure.declaration.as_deref(),
            message: failure.error.to_string(),
            line,
            column,
        }
    }
}

/// 1-based line and column of a byte offset.
fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let prefix = &source[..offset.min(source.len())];
    let line = prefix.matches('\n').count() + 1;
    let column = prefix
        .rsplit('\n')
        .next()
        .map_or(0, |l| l.chars().count())
        + 1;
    (line, column)
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), ParamTestError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| err_msg!(Io, "failed to serialize report: {}", e))?;
    println!("{}", json);
    Ok(())
}

// ============================================================================
// TEXT OUTPUT
// ============================================================================

/// Prints a file header when more than one file is being shown.
pub fn print_header(path: &Path, color: ColorChoice) {
    let mut stdout = StandardStream::stdout(color);
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true));
    let _ = writeln!(stdout, "// --- {} ---", path.display());
    let _ = stdout.reset();
}

/// Prints a line diff between `before` and `after` with colored markers.
pub fn print_diff(before: &str, after: &str, color: ColorChoice) {
    let mut stdout = StandardStream::stdout(color);
    let changeset = Changeset::new(before, after, "\n");
    for diff in &changeset.diffs {
        let (marker, fg, text) = match diff {
            Difference::Same(x) => (' ', None, x),
            Difference::Add(x) => ('+', Some(Color::Green), x),
            Difference::Rem(x) => ('-', Some(Color::Red), x),
        };
        let _ = stdout.set_color(ColorSpec::new().set_fg(fg));
        for line in text.lines() {
            let _ = writeln!(stdout, "{}{}", marker, line);
        }
    }
    let _ = stdout.reset();
}

/// Prints the generated names of one file.
pub fn print_generated(path: &Path, generated: &[String]) {
    println!("{}:", path.display());
    for name in generated {
        println!("    {}", name);
    }
}

/// Prints the closing summary line of `check`.
pub fn print_summary(files: usize, generated: usize, failures: usize, color: ColorChoice) {
    let mut stdout = StandardStream::stdout(color);
    let fg = if failures == 0 { Color::Green } else { Color::Red };
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(fg)).set_bold(true));
    let _ = writeln!(
        stdout,
        "checked {} file(s): {} test(s) generated, {} failure(s)",
        files, generated, failures
    );
    let _ = stdout.reset();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_is_one_based() {
        let source = "@A\nfunc f() {}\n  @B";
        assert_eq!(line_col(source, 0), (1, 1));
        assert_eq!(line_col(source, 3), (2, 1));
        assert_eq!(line_col(source, source.len() - 2), (3, 3));
    }
}
