use crate::canonical::CanonicalExpression;
use crate::derivative::derivative;
use crate::error::SolverError;
use tracing::{debug, info, warn};

/// |f(x_n)| below this is a root no matter what the relative error says.
pub const ABSOLUTE_TOLERANCE: f64 = 1.0e-12;
/// |f'(x_n)| below this can't be divided by.
pub const SINGULAR_DERIVATIVE: f64 = 1.0e-15;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolveParams {
    x0: f64,
    tolerance: f64,
    max_iter: usize,
}

impl SolveParams {
    pub fn new(x0: f64, tolerance: f64, max_iter: usize) -> Result<Self, SolverError> {
        if !x0.is_finite() {
            return Err(SolverError::InvalidParameter(format!(
                "starting point must be a finite number, got {}",
                x0
            )));
        }
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(SolverError::InvalidParameter(format!(
                "tolerance must be greater than 0, got {}",
                tolerance
            )));
        }
        if max_iter == 0 {
            return Err(SolverError::InvalidParameter(
                "max iterations must be greater than 0".to_string(),
            ));
        }
        Ok(SolveParams {
            x0,
            tolerance,
            max_iter,
        })
    }

    pub fn x0(&self) -> f64 {
        self.x0
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn max_iter(&self) -> usize {
        self.max_iter
    }
}

impl Default for SolveParams {
    fn default() -> Self {
        SolveParams {
            x0: 1.5,
            tolerance: 1.0e-4,
            max_iter: 10000,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Running,
    Converged,
    MaxIterationsReached,
    Failed,
}

/// One Newton step: `x_next = x_n - f(x_n) / f'(x_n)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IterationRecord {
    /// 1-based
    pub iteration: usize,
    pub x_n: f64,
    pub f_x_n: f64,
    pub df_x_n: f64,
    pub x_next: f64,
    /// Infinite on the first iteration, there's no previous step to compare.
    pub relative_error: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    Converged {
        root: f64,
        iteration_count: usize,
        final_error: f64,
    },
    MaxIterationsReached {
        approx_root: f64,
        iteration_count: usize,
        final_error: f64,
    },
}

impl Outcome {
    pub fn root(&self) -> f64 {
        match *self {
            Outcome::Converged { root, .. } => root,
            Outcome::MaxIterationsReached { approx_root, .. } => approx_root,
        }
    }

    pub fn iteration_count(&self) -> usize {
        match *self {
            Outcome::Converged {
                iteration_count, ..
            }
            | Outcome::MaxIterationsReached {
                iteration_count, ..
            } => iteration_count,
        }
    }

    pub fn final_error(&self) -> f64 {
        match *self {
            Outcome::Converged { final_error, .. }
            | Outcome::MaxIterationsReached { final_error, .. } => final_error,
        }
    }

    pub fn converged(&self) -> bool {
        matches!(self, Outcome::Converged { .. })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SolveResult {
    pub outcome: Outcome,
    pub trace: Vec<IterationRecord>,
}

// |x_next - x_n| relative to x_next, or to 1 when x_next is exactly 0
fn relative_error(x_n: f64, x_next: f64) -> f64 {
    let scale = if x_next != 0.0 { x_next } else { 1.0 };
    ((x_next - x_n) / scale).abs()
}

/// Newton-Raphson as an iterator over its steps. Stops after yielding the
/// step that converged, the last allowed step or the first error.
pub struct NewtonRaphson<'a> {
    f: &'a CanonicalExpression,
    params: SolveParams,
    x_n: f64,
    iteration: usize,
    state: State,
    outcome: Option<Outcome>,
}

impl<'a> NewtonRaphson<'a> {
    pub fn new(f: &'a CanonicalExpression, params: SolveParams) -> Self {
        NewtonRaphson {
            f,
            params,
            x_n: params.x0(),
            iteration: 0,
            state: State::Running,
            outcome: None,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Available once the state is `Converged` or `MaxIterationsReached`.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    fn step(&self) -> Result<IterationRecord, SolverError> {
        let iteration = self.iteration + 1;
        let x_n = self.x_n;
        let f_x_n = self
            .f
            .evaluate(x_n)
            .map_err(|source| SolverError::EvaluationFailed {
                iteration,
                x: x_n,
                source,
            })?;
        let df_x_n = match derivative(self.f, x_n) {
            Some(d) if d.abs() >= SINGULAR_DERIVATIVE => d,
            derivative => {
                return Err(SolverError::SingularDerivative {
                    iteration,
                    x: x_n,
                    derivative,
                })
            }
        };
        let x_next = x_n - f_x_n / df_x_n;
        let relative_error = if iteration > 1 {
            relative_error(x_n, x_next)
        } else {
            f64::INFINITY
        };
        Ok(IterationRecord {
            iteration,
            x_n,
            f_x_n,
            df_x_n,
            x_next,
            relative_error,
        })
    }

    fn is_converged(&self, record: &IterationRecord) -> bool {
        record.f_x_n.abs() < ABSOLUTE_TOLERANCE
            || (record.iteration > 1 && record.relative_error < self.params.tolerance())
    }
}

impl Iterator for NewtonRaphson<'_> {
    type Item = Result<IterationRecord, SolverError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state != State::Running {
            return None;
        }
        let record = match self.step() {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "newton-raphson aborted");
                self.state = State::Failed;
                return Some(Err(e));
            }
        };
        debug!(
            iteration = record.iteration,
            x_n = record.x_n,
            f_x_n = record.f_x_n,
            df_x_n = record.df_x_n,
            x_next = record.x_next,
            relative_error = record.relative_error,
            "newton step"
        );
        self.iteration = record.iteration;
        if self.is_converged(&record) {
            info!(root = record.x_next, iterations = record.iteration, "converged");
            self.state = State::Converged;
            self.outcome = Some(Outcome::Converged {
                root: record.x_next,
                iteration_count: record.iteration,
                final_error: record.relative_error,
            });
        } else if record.iteration >= self.params.max_iter() {
            info!(approx_root = record.x_next, "reached max iterations");
            self.state = State::MaxIterationsReached;
            self.outcome = Some(Outcome::MaxIterationsReached {
                approx_root: record.x_next,
                iteration_count: record.iteration,
                final_error: record.relative_error,
            });
        } else {
            self.x_n = record.x_next;
        }
        Some(Ok(record))
    }
}

/// Run Newton-Raphson on an already validated expression.
pub fn solve_canonical(
    f: &CanonicalExpression,
    params: SolveParams,
) -> Result<SolveResult, SolverError> {
    let mut iterations = NewtonRaphson::new(f, params);
    let trace = iterations.by_ref().collect::<Result<Vec<_>, _>>()?;
    // the iterator only stops early on an error, which was returned above
    match (iterations.state(), iterations.outcome()) {
        (State::Converged | State::MaxIterationsReached, Some(outcome)) => {
            Ok(SolveResult { outcome, trace })
        }
        (state, _) => Err(SolverError::InvalidParameter(format!(
            "newton-raphson stopped in state {:?} after {} iterations",
            state,
            trace.len()
        ))),
    }
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_run_ends_with_an_outcome() {
        // a cap of 0 can't come out of SolveParams::new but still takes one step
        let params = SolveParams {
            x0: 3.0,
            tolerance: 1.0e-4,
            max_iter: 0,
        };
        let f = CanonicalExpression::new("x^2 - 4");
        let result = solve_canonical(&f, params).unwrap();
        assert_eq!(result.trace.len(), 1);
        assert!(matches!(
            result.outcome,
            Outcome::MaxIterationsReached {
                iteration_count: 1,
                ..
            }
        ));

        let mut iterations = NewtonRaphson::new(&f, SolveParams::default());
        assert_eq!(iterations.outcome(), None);
        let steps = iterations.by_ref().count();
        assert_eq!(iterations.state(), State::Converged);
        assert_eq!(iterations.outcome().map(|o| o.iteration_count()), Some(steps));
    }
}
