use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::io::Write;
use std::path::Path;
use std::slice;

use globset::{Glob, GlobMatcher};

use trawl_fs::FileStatus;

use crate::chain::kind::{Expr, ExprKind};
use crate::chain::predicates;
use crate::error::ChainError;
use crate::lookup::LookupCache;

/// Evaluates the shared expression-token sequence against one entry at a
/// time, left to right, stopping at the first failing filter.
///
/// The raw tokens are re-walked for every entry. Only the expensive pieces
/// of an evaluation persist across entries: the [`LookupCache`] slots and
/// the compiled glob matchers.
pub struct ChainEvaluator<'a, W> {
    tokens: &'a [String],
    cache: LookupCache,
    matchers: HashMap<String, GlobMatcher>,
    out: W,
}

impl<'a, W: Write> ChainEvaluator<'a, W> {
    pub fn new(tokens: &'a [String], out: W) -> Self {
        Self {
            tokens,
            cache: LookupCache::new(),
            matchers: HashMap::new(),
            out,
        }
    }

    /// Run the whole chain against one entry.
    ///
    /// Returns `Ok(())` both when the chain ran to completion and when a
    /// filter stopped it early; either way the walk moves on to the next
    /// entry. When the chain completes without any action having fired,
    /// the entry's path is printed as the default action. An `Err` is a
    /// structural chain failure or a failed output write and aborts the
    /// walk.
    pub fn evaluate(&mut self, path: &Path, status: &FileStatus) -> Result<(), ChainError> {
        let mut produced = false;
        let chain: &'a [String] = self.tokens;
        let mut tokens = chain.iter();

        while let Some(expr) = Self::next_expr(&mut tokens)? {
            if !self.apply(expr, path, status)? {
                // Filter failed: the chain stops here for this entry and
                // the default print is suppressed.
                return Ok(());
            }
            if expr.is_action() {
                produced = true;
            }
        }

        if !produced {
            predicates::write_path(&mut self.out, path)?;
        }
        Ok(())
    }

    /// Consume the next expression from the token stream: a keyword plus,
    /// where the keyword requires one, the following value token.
    fn next_expr(tokens: &mut slice::Iter<'a, String>) -> Result<Option<Expr<'a>>, ChainError> {
        let Some(token) = tokens.next() else {
            return Ok(None);
        };

        let kind = match ExprKind::classify(token) {
            Some(kind) => kind,
            None if token.starts_with('-') => {
                return Err(ChainError::UnknownExpression(token.clone()));
            }
            // A bare token where a keyword belongs: a stray value left
            // behind an expression that takes none.
            None => return Err(ChainError::UnexpectedValue(token.clone())),
        };

        let expr = match kind {
            ExprKind::Print => Expr::Print,
            ExprKind::Ls => Expr::Ls,
            ExprKind::NoUser => Expr::NoUser,
            ExprKind::User => Expr::User(Self::take_value(kind, tokens.next())?),
            ExprKind::Name => Expr::Name(Self::take_value(kind, tokens.next())?),
            ExprKind::Type => Expr::Type(Self::take_value(kind, tokens.next())?),
            ExprKind::Path => Expr::Path(Self::take_value(kind, tokens.next())?),
        };
        Ok(Some(expr))
    }

    /// The token following a value-taking keyword, validated. The next
    /// keyword sitting in value position means the value is missing, not
    /// that the keyword is the value.
    fn take_value(kind: ExprKind, token: Option<&'a String>) -> Result<&'a str, ChainError> {
        let value = token.ok_or_else(|| ChainError::MissingValue {
            keyword: kind.keyword(),
        })?;
        if ExprKind::classify(value).is_some() {
            return Err(ChainError::MissingValue {
                keyword: kind.keyword(),
            });
        }
        Ok(value)
    }

    /// Evaluate one expression against the entry. `true` continues the
    /// chain, `false` stops it.
    fn apply(
        &mut self,
        expr: Expr<'_>,
        path: &Path,
        status: &FileStatus,
    ) -> Result<bool, ChainError> {
        match expr {
            Expr::Print => {
                predicates::write_path(&mut self.out, path)?;
                Ok(true)
            }
            Expr::Ls => {
                predicates::write_listing(&mut self.out, &mut self.cache, path, status)?;
                Ok(true)
            }
            Expr::NoUser => Ok(predicates::owner_unresolvable(&mut self.cache, status)),
            Expr::User(value) => predicates::owner_matches(&mut self.cache, value, status),
            Expr::Type(value) => predicates::type_matches(value, status),
            Expr::Name(pattern) => {
                let matcher = self.matcher(pattern)?;
                Ok(predicates::name_matches(matcher, path))
            }
            Expr::Path(pattern) => {
                let matcher = self.matcher(pattern)?;
                Ok(predicates::path_matches(matcher, path))
            }
        }
    }

    /// Compiled matcher for `pattern`, compiling and caching on first use.
    fn matcher(&mut self, pattern: &str) -> Result<&GlobMatcher, ChainError> {
        match self.matchers.entry(pattern.to_owned()) {
            Entry::Occupied(slot) => Ok(slot.into_mut()),
            Entry::Vacant(slot) => {
                let glob = Glob::new(pattern).map_err(|source| ChainError::InvalidPattern {
                    pattern: pattern.to_owned(),
                    source,
                })?;
                Ok(slot.insert(glob.compile_matcher()))
            }
        }
    }
}

#[cfg(test)]
#[path = "evaluator_tests.rs"]
mod tests;
