use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use trawl_runtime::logging;

mod exit {
    /// Traversal completed; per-entry errors may still have been reported.
    pub const OK: u8 = 0;
    /// Too few arguments.
    pub const USAGE: u8 = 1;
    /// Structurally invalid expression chain.
    pub const EXPRESSION: u8 = 2;
    /// Output write failure, e.g. a closed stdout pipe.
    pub const OUTPUT: u8 = 3;
}

const EXPRESSION_HELP: &str = "\
Expressions (evaluated left to right per entry, stopping at the first
failing filter; matching entries are printed when no action is given):
  -print           print the entry's path
  -ls              print a detailed listing line
  -user NAME|UID   entry is owned by the given user
  -name PATTERN    entry's base name matches the shell pattern
  -type b|c|d|p|f|l|s
                   entry is of the given type
  -nouser          entry's owner has no account
  -path PATTERN    entry's full path matches the shell pattern";

#[derive(Debug, Parser)]
#[command(
    name = "trawl",
    version,
    about = "Walk a directory tree and evaluate an expression chain per entry",
    after_help = EXPRESSION_HELP
)]
struct Cli {
    /// File or directory to start the walk from.
    root: Option<PathBuf>,

    /// Expression chain, passed through verbatim.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    expressions: Vec<String>,
}

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    let Some(root) = cli.root else {
        // Bare invocation: the usage text goes to stdout.
        let mut cmd = Cli::command();
        let _ = cmd.print_help();
        return ExitCode::from(exit::USAGE);
    };

    let root = strip_trailing_separators(root);
    let stdout = io::stdout().lock();
    match trawl_engine::run(&root, &cli.expressions, stdout) {
        Ok(()) => ExitCode::from(exit::OK),
        Err(err) => {
            log::error!("{err}");
            if err.is_usage() {
                ExitCode::from(exit::EXPRESSION)
            } else {
                ExitCode::from(exit::OUTPUT)
            }
        }
    }
}

/// Cosmetic: `trawl /tmp/ -print` reports `/tmp`, not `/tmp/`. A bare `/`
/// and non-UTF-8 roots pass through untouched.
fn strip_trailing_separators(root: PathBuf) -> PathBuf {
    match root.into_os_string().into_string() {
        Ok(mut s) => {
            while s.len() > 1 && s.ends_with('/') {
                s.pop();
            }
            PathBuf::from(s)
        }
        Err(os) => PathBuf::from(os),
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
