use std::io;

use thiserror::Error;

/// A failure that ends the whole run.
///
/// The expression chain is shared by every visited entry, so a malformed
/// chain would fail identically on each of them; it is reported once and
/// aborts the traversal. Output-write failures abort for the same reason:
/// every later write would fail the same way.
#[derive(Error, Debug)]
pub enum ChainError {
    #[error("unknown expression '{0}'")]
    UnknownExpression(String),

    #[error("expression '{keyword}' requires a value")]
    MissingValue { keyword: &'static str },

    #[error("unexpected value '{0}' in expression chain")]
    UnexpectedValue(String),

    #[error("invalid type letter '{0}' (expected one of b c d p f l s)")]
    InvalidTypeLetter(String),

    #[error("'{0}' is not a known user name or numeric id")]
    NoSuchUser(String),

    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}

impl ChainError {
    /// Whether the failure is a usage-class problem with the chain itself,
    /// as opposed to a runtime output failure. Callers map the two to
    /// different exit codes.
    pub fn is_usage(&self) -> bool {
        !matches!(self, Self::Output(_))
    }
}
