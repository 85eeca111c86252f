use thiserror::Error;

/// Reasons a canonical expression can't produce a number.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// The operation is undefined at this point, eg: `ln(-1)`, `1/0`
    #[error("domain error: {0}")]
    Domain(String),
    #[error("syntax error: {0}")]
    Syntax(String),
    #[error("overflow: {0}")]
    Overflow(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,
    #[error("parentheses nested {depth} levels deep, at most {max} allowed")]
    ExcessiveNesting { depth: usize, max: usize },
    #[error("expression can't be computed: {0}")]
    Uncomputable(EvalError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// f'(x_n) couldn't be computed or is too close to zero to divide by
    #[error("derivative is zero or undefined at iteration {iteration}, x = {x}")]
    SingularDerivative {
        iteration: usize,
        x: f64,
        derivative: Option<f64>,
    },
    #[error("couldn't evaluate f at x = {x} (iteration {iteration})")]
    EvaluationFailed {
        iteration: usize,
        x: f64,
        source: EvalError,
    },
    #[error("invalid expression")]
    InvalidExpression(#[from] ValidationError),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SamplingError {
    #[error("empty sampling interval [{from}, {to}]")]
    EmptyInterval { from: f64, to: f64 },
    #[error("need at least 1 division to sample, got {0}")]
    TooFewPoints(usize),
}
