mod evaluator;
mod kind;
mod predicates;

pub use evaluator::ChainEvaluator;
pub use kind::{Expr, ExprKind};
