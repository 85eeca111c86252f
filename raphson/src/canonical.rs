use crate::error::EvalError;
use crate::expr::Expr;
use crate::normalize::normalize;
use crate::parser::ShuntingParser;
use crate::rewrite::rewrite;
use std::fmt;
use tracing::debug;

/// User input turned into explicit ASCII notation and parsed once. Every
/// evaluation of the same input reuses the parsed tree.
#[derive(Clone, Debug, PartialEq)]
pub struct CanonicalExpression {
    text: String,
    tree: Result<Expr, EvalError>,
}

impl CanonicalExpression {
    pub fn new(raw: &str) -> Self {
        let text = rewrite(&normalize(raw));
        let tree = ShuntingParser::parse_str(&text);
        if let Err(ref e) = tree {
            debug!(raw, canonical = %text, error = %e, "expression doesn't parse");
        }
        CanonicalExpression { text, tree }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn tree(&self) -> Result<&Expr, &EvalError> {
        self.tree.as_ref()
    }

    pub fn evaluate(&self, x: f64) -> Result<f64, EvalError> {
        match self.tree {
            Ok(ref expr) => expr.eval(x),
            Err(ref e) => Err(e.clone()),
        }
    }
}

impl fmt::Display for CanonicalExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

pub fn evaluate(canonical: &CanonicalExpression, x: f64) -> Result<f64, EvalError> {
    canonical.evaluate(x)
}
