use raphson::{IterationRecord, Outcome, Sample, SolveParams, SolveResult};
use std::fmt::Write;

// relative error of the first step is unbounded
fn error_cell(record: &IterationRecord) -> String {
    if record.relative_error.is_finite() {
        format!("{:.6}", record.relative_error)
    } else {
        "-".to_string()
    }
}

pub fn table(trace: &[IterationRecord]) -> String {
    let mut out = format!(
        "{:>5} | {:>14} | {:>12} | {:>12} | {:>14} | {:>10}\n",
        "Iter", "xn", "f(xn)", "f'(xn)", "xn+1", "Error"
    );
    out.push_str(&format!("{}\n", "-".repeat(out.trim_end().chars().count())));
    for r in trace {
        let _ = writeln!(
            out,
            "{:>5} | {:>14.6} | {:>12.4e} | {:>12.4e} | {:>14.6} | {:>10}",
            r.iteration,
            r.x_n,
            r.f_x_n,
            r.df_x_n,
            r.x_next,
            error_cell(r)
        );
    }
    out
}

/// The derivation of every step, the way it'd be done by hand.
pub fn steps(expression: &str, params: &SolveParams, result: &SolveResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "NEWTON-RAPHSON METHOD\n{}", "=".repeat(50));
    let _ = writeln!(out, "f(x) = {}", expression);
    let _ = writeln!(out, "x0 = {}", params.x0());
    let _ = writeln!(out, "tolerance = {}\n", params.tolerance());
    let _ = writeln!(out, "xn+1 = xn - f(xn) / f'(xn)\n");
    for r in &result.trace {
        let _ = writeln!(out, "ITERATION {}\n{}", r.iteration, "-".repeat(20));
        let _ = writeln!(out, "xn = {:.6}", r.x_n);
        let _ = writeln!(out, "f(xn) = {:.6e}", r.f_x_n);
        let _ = writeln!(out, "f'(xn) = {:.6e}", r.df_x_n);
        let _ = writeln!(
            out,
            "xn+1 = {:.6} - ({:.6e}) / ({:.6e}) = {:.6}",
            r.x_n, r.f_x_n, r.df_x_n, r.x_next
        );
        if r.relative_error.is_finite() {
            let _ = writeln!(out, "relative error = {:.6}", r.relative_error);
        }
        out.push('\n');
    }
    out
}

pub fn summary(params: &SolveParams, outcome: &Outcome) -> String {
    let (headline, label) = if outcome.converged() {
        ("converged", "root")
    } else {
        ("reached max iterations", "approximate root")
    };
    let error = if outcome.final_error().is_finite() {
        format!("{:.6}", outcome.final_error())
    } else {
        "-".to_string()
    };
    format!(
        "{}\n{}: {:.10}\niterations: {}\nerror: {}\ntolerance: {}",
        headline,
        label,
        outcome.root(),
        outcome.iteration_count(),
        error,
        params.tolerance()
    )
}

pub fn samples(samples: &[Sample]) -> String {
    let mut out = String::new();
    for s in samples {
        match s.y {
            Some(y) => {
                let _ = writeln!(out, "{:.6}\t{:.6}", s.x, y);
            }
            None => {
                let _ = writeln!(out, "{:.6}\t-", s.x);
            }
        }
    }
    out
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    fn record(iteration: usize, relative_error: f64) -> IterationRecord {
        IterationRecord {
            iteration,
            x_n: 1.5,
            f_x_n: -0.125,
            df_x_n: 5.75,
            x_next: 1.5217391304,
            relative_error,
        }
    }

    #[test]
    fn table_rows() {
        let table = table(&[record(1, f64::INFINITY), record(2, 0.25)]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("f'(xn)"));
        assert!(lines[2].starts_with("    1 |"));
        assert!(lines[2].contains("1.500000"));
        assert!(lines[2].contains("-1.2500e-1"));
        assert!(lines[2].contains("1.521739"));
        assert!(lines[2].trim_end().ends_with('-'));
        assert!(lines[3].ends_with("0.250000"));
    }

    #[test]
    fn steps_skip_first_error() {
        let result = SolveResult {
            outcome: Outcome::Converged {
                root: 1.52,
                iteration_count: 2,
                final_error: 0.25,
            },
            trace: vec![record(1, f64::INFINITY), record(2, 0.25)],
        };
        let text = steps("x^3 - x - 2", &SolveParams::default(), &result);
        assert!(text.contains("f(x) = x^3 - x - 2"));
        assert!(text.contains("ITERATION 1"));
        assert!(text.contains("ITERATION 2"));
        assert_eq!(text.matches("relative error").count(), 1);
    }

    #[test]
    fn summaries() {
        let params = SolveParams::default();
        let converged = Outcome::Converged {
            root: 1.5213797068045745,
            iteration_count: 3,
            final_error: 6.5e-8,
        };
        let text = summary(&params, &converged);
        assert!(text.starts_with("converged"));
        assert!(text.contains("root: 1.5213797068"));
        assert!(text.contains("iterations: 3"));

        let capped = Outcome::MaxIterationsReached {
            approx_root: 2.0,
            iteration_count: 1,
            final_error: f64::INFINITY,
        };
        let text = summary(&params, &capped);
        assert!(text.contains("approximate root: 2.0000000000"));
        assert!(text.contains("error: -"));
    }

    #[test]
    fn sample_gaps() {
        let text = samples(&[Sample { x: 0.0, y: None }, Sample { x: 1.0, y: Some(2.0) }]);
        assert_eq!(text, "0.000000\t-\n1.000000\t2.000000\n");
    }
}
