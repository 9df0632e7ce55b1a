//! Defines the command-line arguments and subcommands for the paramtest CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use termcolor::ColorChoice;

use crate::render::DEFAULT_INDENT_WIDTH;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "paramtest",
    version,
    about = "Expands @ParameterizedTest annotations into concrete test functions."
)]
pub struct ParamTestArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Spaces per indentation level in rendered output.
    #[arg(long, global = true, default_value_t = DEFAULT_INDENT_WIDTH)]
    pub indent: usize,

    /// When to use colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn choice(self) -> ColorChoice {
        match self {
            ColorMode::Auto => ColorChoice::Auto,
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
        }
    }
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the fully expanded source.
    Expand {
        /// A source file, or a directory searched for `.swift` files.
        #[arg(required = true)]
        path: PathBuf,
        /// Print a JSON report instead of source text.
        #[arg(long)]
        json: bool,
        /// Print a line diff between the input and its expansion.
        #[arg(long, conflicts_with = "json")]
        diff: bool,
    },
    /// Expand every file and report failures without printing sources.
    Check {
        /// A source file, or a directory searched for `.swift` files.
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// List the names of the generated test functions.
    List {
        /// A source file, or a directory searched for `.swift` files.
        #[arg(required = true)]
        path: PathBuf,
    },
    /// List all registered annotation names.
    ListMacros,
    /// Show the parsed syntax model of a file as JSON.
    Ast {
        /// The source file to parse.
        #[arg(required = true)]
        file: PathBuf,
    },
}
