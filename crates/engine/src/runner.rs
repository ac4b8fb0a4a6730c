use std::io::Write;
use std::path::Path;

use crate::chain::ChainEvaluator;
use crate::error::ChainError;

/// Walk the tree rooted at `root` and evaluate the expression chain against
/// every entry, writing action output to `out`.
///
/// Unreadable entries are reported and skipped inside the walk. An error
/// from the chain itself aborts the traversal and is returned; the same
/// chain would fail identically on every remaining entry.
pub fn run<W: Write>(root: &Path, tokens: &[String], out: W) -> Result<(), ChainError> {
    let mut evaluator = ChainEvaluator::new(tokens, out);
    trawl_fs::walk(root, &mut |path, status| evaluator.evaluate(path, status))
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
