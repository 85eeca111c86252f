use crate::canonical::CanonicalExpression;
use crate::error::SamplingError;

/// Values this large are left out of a sample, they only flatten a plot
/// and fake sign changes across poles.
pub const MAGNITUDE_LIMIT: f64 = 1.0e8;

/// A point of the graph of f. `y` is `None` where f is undefined.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: Option<f64>,
}

/// Evaluate f over `divisions + 1` evenly spaced points of `[from, to]`.
pub fn sample(
    f: &CanonicalExpression,
    (from, to): (f64, f64),
    divisions: usize,
) -> Result<Vec<Sample>, SamplingError> {
    if !(from < to) || !from.is_finite() || !to.is_finite() {
        return Err(SamplingError::EmptyInterval { from, to });
    }
    if divisions < 1 {
        return Err(SamplingError::TooFewPoints(divisions));
    }
    let dx = (to - from) / divisions as f64;
    let samples = (0..=divisions)
        .map(|slot| {
            let x = from + dx * slot as f64;
            let y = f.evaluate(x).ok().filter(|y| y.abs() < MAGNITUDE_LIMIT);
            Sample { x, y }
        })
        .collect();
    Ok(samples)
}

/// Linear interpolation of every sign change between two consecutive
/// defined samples.
pub fn zero_crossings(samples: &[Sample]) -> Vec<f64> {
    samples
        .windows(2)
        .filter_map(|w| {
            let &[Sample { x: x0, y: Some(y0) }, Sample { x: x1, y: Some(y1) }] = w else {
                return None;
            };
            (y0 * y1 < 0.0).then(|| x0 - y0 * (x1 - x0) / (y1 - y0))
        })
        .collect()
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evenly_spaced_with_gaps() {
        let f = CanonicalExpression::new("ln(x)");
        let samples = sample(&f, (-1.0, 1.0), 4).unwrap();
        let xs: Vec<f64> = samples.iter().map(|s| s.x).collect();
        assert_eq!(xs, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert_eq!(samples[0].y, None);
        assert_eq!(samples[2].y, None);
        assert_eq!(samples[4].y, Some(0.0));
    }

    #[test]
    fn bad_intervals() {
        let f = CanonicalExpression::new("x");
        assert_eq!(
            sample(&f, (1.0, 1.0), 10),
            Err(SamplingError::EmptyInterval { from: 1.0, to: 1.0 })
        );
        assert_eq!(sample(&f, (0.0, 1.0), 0), Err(SamplingError::TooFewPoints(0)));
    }

    #[test]
    fn finds_crossings() {
        let f = CanonicalExpression::new("x^2 - 2");
        let samples = sample(&f, (-3.0, 3.0), 600).unwrap();
        let roots = zero_crossings(&samples);
        assert_eq!(roots.len(), 2);
        assert!((roots[0] + 2f64.sqrt()).abs() < 1e-3);
        assert!((roots[1] - 2f64.sqrt()).abs() < 1e-3);
    }

    #[test]
    fn poles_are_not_crossings() {
        let f = CanonicalExpression::new("1/x");
        let samples = sample(&f, (-1.0, 1.0), 2).unwrap();
        assert_eq!(samples[1].y, None);
        assert!(zero_crossings(&samples).is_empty());
    }
}
