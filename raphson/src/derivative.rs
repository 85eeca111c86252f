use crate::canonical::CanonicalExpression;

/// Finite difference step.
pub const STEP: f64 = 1.0e-8;

/// Numeric f'(x). `None` when f can't be evaluated around `x`.
pub fn derivative(f: &CanonicalExpression, x: f64) -> Option<f64> {
    derivative_with_step(f, x, STEP)
}

pub fn derivative_with_step(f: &CanonicalExpression, x: f64, h: f64) -> Option<f64> {
    let central = match (f.evaluate(x + h), f.evaluate(x - h)) {
        (Ok(ahead), Ok(behind)) => Some((ahead - behind) / (2.0 * h)),
        _ => None,
    };
    // near the edge of the domain (eg: ln(x) at x ~ h) only look ahead
    central.filter(|d| d.is_finite()).or_else(|| {
        let forward = (f.evaluate(x + h).ok()? - f.evaluate(x).ok()?) / h;
        forward.is_finite().then_some(forward)
    })
}

///////////////////////////////////////////////////////////////////////////////
