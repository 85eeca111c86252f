use proptest::prelude::*;
use raphson::{
    derivative, evaluate_for_plot, normalize, rewrite, solve, CanonicalExpression, Outcome,
};

const GLYPHS: &str = "[-+*/^()x0-9. \u{2212}\u{2013}\u{2014}×÷²³√π∞episnc]{0,24}";

proptest! {
    #[test]
    fn normalize_is_idempotent(s in GLYPHS) {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn rewriting_never_fails(s in "\\PC{0,32}") {
        let _ = rewrite(&normalize(&s));
    }

    #[test]
    fn evaluation_never_panics(s in GLYPHS, x in -1.0e3f64..1.0e3) {
        if let Ok(y) = evaluate_for_plot(&s, x) {
            prop_assert!(y.is_finite());
        }
    }

    #[test]
    fn derivative_of_square(x in -10.0f64..10.0) {
        let f = CanonicalExpression::new("x^2");
        let d = derivative(&f, x).unwrap();
        prop_assert!((d - 2.0 * x).abs() < 1e-4, "f'({}) = {}", x, d);
    }

    #[test]
    fn converges_to_square_roots(c in 0.5f64..100.0, x0 in 1.0f64..10.0) {
        let result = solve(&format!("x^2 - {}", c), x0, 1e-10, 100).unwrap();
        let Outcome::Converged { root, iteration_count, .. } = result.outcome else {
            panic!("x^2 - {} from {} didn't converge", c, x0);
        };
        prop_assert!((root - c.sqrt()).abs() < 1e-6);
        prop_assert_eq!(result.trace.len(), iteration_count);
        let last = result.trace[iteration_count - 1];
        prop_assert!(last.f_x_n.abs() < 1e-12 || last.relative_error < 1e-10);
    }
}
