//! Root finding for single variable functions typed as free text.
//!
//! Input like `2x^3 - x - 2` or `3ex + sin(x)²` is normalized, rewritten
//! with explicit operators, parsed against a fixed namespace of functions
//! and constants and then handed to a Newton-Raphson iterator that keeps
//! the whole trace of its steps.

mod canonical;
mod context;
mod derivative;
mod error;
mod expr;
mod newton;
mod normalize;
mod parser;
mod rewrite;
mod sampling;
mod validate;

#[cfg(test)]
mod eval_test;

pub use canonical::{evaluate, CanonicalExpression};
pub use context::{Builtin, Constant, EvaluationContext, CONTEXT, VARIABLE};
pub use derivative::{derivative, derivative_with_step, STEP};
pub use error::{EvalError, SamplingError, SolverError, ValidationError};
pub use expr::{BinOp, Expr};
pub use newton::{
    solve_canonical, IterationRecord, NewtonRaphson, Outcome, SolveParams, SolveResult, State,
    ABSOLUTE_TOLERANCE, SINGULAR_DERIVATIVE,
};
pub use normalize::normalize;
pub use parser::{ShuntingParser, MAX_DEPTH};
pub use rewrite::rewrite;
pub use sampling::{sample, zero_crossings, Sample, MAGNITUDE_LIMIT};
pub use validate::{validate, MAX_NESTING};

/// Validate `expression` and look for a root starting at `x0`.
pub fn solve(
    expression: &str,
    x0: f64,
    tolerance: f64,
    max_iter: usize,
) -> Result<SolveResult, SolverError> {
    let params = SolveParams::new(x0, tolerance, max_iter)?;
    solve_with(expression, params)
}

pub fn solve_with(expression: &str, params: SolveParams) -> Result<SolveResult, SolverError> {
    let canonical = validate::checked(expression)?;
    tracing::debug!(expression, canonical = %canonical, "solving");
    solve_canonical(&canonical, params)
}

/// f(x) through the same pipeline `solve` uses.
pub fn evaluate_for_plot(expression: &str, x: f64) -> Result<f64, EvalError> {
    CanonicalExpression::new(expression).evaluate(x)
}
