mod chain;
mod error;
mod lookup;
mod runner;

pub use chain::{ChainEvaluator, Expr, ExprKind};
pub use error::ChainError;
pub use lookup::LookupCache;
pub use runner::run;
