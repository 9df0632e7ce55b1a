//! The paramtest command-line interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions: discovery, parsing, expansion and rendering.

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use termcolor::ColorChoice;

use crate::cli::args::{Command, ParamTestArgs};
use crate::diagnostics::{print_error, to_error_source, SourceArc};
use crate::discovery::{discover_sources, read_source};
use crate::macros::{ExpansionOutcome, MacroExpander, MacroRegistry};
use crate::render::Renderer;
use crate::{err_msg, logging, syntax, ParamTestError};

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = ParamTestArgs::parse();
    logging::init_with_level(logging::level_for_verbosity(args.verbose));

    let session = Session {
        registry: MacroRegistry::standard(),
        renderer: Renderer::new(args.indent),
        color: args.color.choice(),
    };

    // Dispatch to the appropriate subcommand handler.
    let result = match args.command {
        Command::Expand { path, json, diff } => session.expand(&path, json, diff),
        Command::Check { path } => session.check(&path),
        Command::List { path } => session.list(&path),
        Command::ListMacros => session.list_macros(),
        Command::Ast { file } => session.ast(&file),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            print_error(e);
            process::exit(1);
        }
    }
}

// ============================================================================
// PER-FILE PIPELINE
// ============================================================================

/// One file after parse and expansion.
struct ExpandedSource {
    path: PathBuf,
    text: String,
    source: SourceArc,
    original: crate::ast::SourceFile,
    outcome: ExpansionOutcome,
}

impl ExpandedSource {
    /// Prints every expansion failure as a diagnostic.
    fn report_failures(&self) {
        for failure in &self.outcome.failures {
            print_error(failure.to_diagnostic(&self.source));
        }
    }
}

struct Session {
    registry: MacroRegistry,
    renderer: Renderer,
    color: ColorChoice,
}

impl Session {
    fn load(&self, path: &Path) -> Result<ExpandedSource, ParamTestError> {
        log::info!("expanding {}", path.display());
        let name = path.display().to_string();
        let text = read_source(path)?;
        let original = syntax::parse(&text, &name)?;
        let outcome = MacroExpander::new(&self.registry).expand(&original);
        let source = to_error_source(&name, &text);
        Ok(ExpandedSource {
            path: path.to_path_buf(),
            text,
            source,
            original,
            outcome,
        })
    }

    fn sources(&self, path: &Path) -> Result<Vec<PathBuf>, ParamTestError> {
        let files = discover_sources(path)?;
        if files.is_empty() {
            return Err(err_msg!(
                Io,
                "no .{} files found under '{}'",
                crate::discovery::SOURCE_EXTENSION,
                path.display()
            ));
        }
        Ok(files)
    }

    /// Loads every file, printing the error of each one that fails to load.
    /// The flag is false when any file failed.
    fn load_all(&self, files: &[PathBuf]) -> (Vec<ExpandedSource>, bool) {
        let mut loaded = Vec::with_capacity(files.len());
        let mut ok = true;
        for file in files {
            match self.load(file) {
                Ok(e) => loaded.push(e),
                Err(err) => {
                    print_error(err);
                    ok = false;
                }
            }
        }
        (loaded, ok)
    }

    /// Handles the `expand` subcommand. Parse errors are reported per file.
    fn expand(&self, path: &Path, json: bool, diff: bool) -> Result<bool, ParamTestError> {
        let files = self.sources(path)?;
        let (expanded, mut ok) = self.load_all(&files);

        if json {
            let reports: Vec<_> = expanded
                .iter()
                .map(|e| {
                    let rendered = e
                        .outcome
                        .is_success()
                        .then(|| self.renderer.file(&e.outcome.file));
                    output::ExpansionReport::new(&e.path, &e.text, &e.outcome, rendered)
                })
                .collect();
            output::print_json(&reports)?;
            return Ok(ok && expanded.iter().all(|e| e.outcome.is_success()));
        }

        for e in &expanded {
            if !e.outcome.is_success() {
                e.report_failures();
                ok = false;
                continue;
            }
            if files.len() > 1 {
                output::print_header(&e.path, self.color);
            }
            let after = self.renderer.file(&e.outcome.file);
            if diff {
                let before = self.renderer.file(&e.original);
                output::print_diff(&before, &after, self.color);
            } else {
                print!("{}", after);
            }
        }
        Ok(ok)
    }

    /// Handles the `check` subcommand. Parse errors are reported per file.
    fn check(&self, path: &Path) -> Result<bool, ParamTestError> {
        let files = self.sources(path)?;
        let (expanded, ok) = self.load_all(&files);
        let mut generated = 0;
        let mut failures = files.len() - expanded.len();
        for e in &expanded {
            e.report_failures();
            generated += e.outcome.generated.len();
            failures += e.outcome.failures.len();
        }
        output::print_summary(files.len(), generated, failures, self.color);
        Ok(ok && failures == 0)
    }

    /// Handles the `list` subcommand.
    fn list(&self, path: &Path) -> Result<bool, ParamTestError> {
        let (expanded, mut ok) = self.load_all(&self.sources(path)?);
        for e in &expanded {
            e.report_failures();
            ok &= e.outcome.is_success();
            output::print_generated(&e.path, &e.outcome.generated);
        }
        Ok(ok)
    }

    fn list_macros(&self) -> Result<bool, ParamTestError> {
        for name in self.registry.names() {
            println!("  @{}", name);
        }
        Ok(true)
    }

    /// Handles the `ast` subcommand.
    fn ast(&self, file: &Path) -> Result<bool, ParamTestError> {
        let text = read_source(file)?;
        let parsed = syntax::parse(&text, &file.display().to_string())?;
        output::print_json(&parsed)?;
        Ok(true)
    }
}
