use crate::canonical::{evaluate, CanonicalExpression};
use crate::error::EvalError;
use crate::evaluate_for_plot;

macro_rules! fuzzy_eq {
    ($lhs:expr, $rhs:expr) => {
        assert!(($lhs - $rhs).abs() < 1.0e-10, "{} != {}", $lhs, $rhs)
    };
}

fn eval_at(input: &str, x: f64) -> Result<f64, EvalError> {
    evaluate_for_plot(input, x)
}

#[test]
fn test_eval1() {
    fuzzy_eq!(eval_at("3+4*2/-(1-5)^2^3", 0.0).unwrap(), 2.99987792969);
}

#[test]
fn test_eval2() {
    fuzzy_eq!(
        eval_at("3.4e-2 * sin(pi/3)/(541 % -4) * abs(-7)", 0.0).unwrap(),
        -0.06870468203356546
    );
}

#[test]
fn test_eval3() {
    fuzzy_eq!(eval_at("(-(1-9^2) / (1 + 6^2))^0.5", 0.0).unwrap(), 1.470429244187615496759);
}

#[test]
fn test_eval4() {
    fuzzy_eq!(eval_at("sin(x)^2 + cos(x)^2", 0.345).unwrap(), 1.0);
    fuzzy_eq!(eval_at("sin(e)/cos(e)", 0.0).unwrap(), -0.4505495340698074);
}

#[test]
fn test_implicit_multiplication() {
    let x = 1.5;
    fuzzy_eq!(eval_at("2x^3 - x - 2", x).unwrap(), 2.0 * x * x * x - x - 2.0);
    fuzzy_eq!(eval_at("2pix", x).unwrap(), 2.0 * std::f64::consts::PI * x);
    fuzzy_eq!(eval_at("3ex", x).unwrap(), 3.0 * std::f64::consts::E * x);
    fuzzy_eq!(eval_at("x(x+1)(x-1)", x).unwrap(), x * (x + 1.0) * (x - 1.0));
    fuzzy_eq!(eval_at("2exp(x)", x).unwrap(), 2.0 * x.exp());
    fuzzy_eq!(eval_at("x² − 3×x ÷ 2", x).unwrap(), x * x - 3.0 * x / 2.0);
    fuzzy_eq!(eval_at("√(x) + cbrt(x)", 8.0).unwrap(), 8f64.sqrt() + 2.0);
}

#[test]
fn test_operators() {
    fuzzy_eq!(eval_at("-2^2", 0.0).unwrap(), -4.0);
    fuzzy_eq!(eval_at("2^-1", 0.0).unwrap(), 0.5);
    fuzzy_eq!(eval_at("2^3^2", 0.0).unwrap(), 512.0);
    fuzzy_eq!(eval_at("-7 % 3", 0.0).unwrap(), 2.0);
    fuzzy_eq!(eval_at("7 % -3", 0.0).unwrap(), -2.0);
    fuzzy_eq!(eval_at("(-8)^3", 0.0).unwrap(), -512.0);
}

#[test]
fn test_special_functions() {
    fuzzy_eq!(eval_at("cbrt(x)", -27.0).unwrap(), -3.0);
    fuzzy_eq!(eval_at("root(x, 4)", 81.0).unwrap(), 3.0);
    fuzzy_eq!(eval_at("logb(x, 2)", 1024.0).unwrap(), 10.0);
    fuzzy_eq!(eval_at("log10(x) + log2(x)", 1.0).unwrap(), 0.0);
    fuzzy_eq!(eval_at("sec(x)", 0.0).unwrap(), 1.0);
    fuzzy_eq!(eval_at("floor(x) + ceil(x)", 2.5).unwrap(), 5.0);
}

#[test]
fn test_domain_errors() {
    let undefined = [
        ("csc(x)", 0.0),
        ("cot(x)", 0.0),
        ("1/x", 0.0),
        ("x % 0", 1.0),
        ("ln(x)", 0.0),
        ("sqrt(x)", -4.0),
        ("asin(x)", 2.0),
        ("x^0.5", -1.0),
        ("0^x", -1.0),
    ];
    for (input, x) in undefined.iter() {
        assert!(
            matches!(eval_at(input, *x), Err(EvalError::Domain(_))),
            "{} at {} should be undefined",
            input,
            x
        );
    }
}

#[test]
fn test_overflow() {
    assert!(matches!(eval_at("exp(x)", 1000.0), Err(EvalError::Overflow(_))));
    assert!(matches!(eval_at("1e999 + x", 0.0), Err(EvalError::Overflow(_))));
    assert!(matches!(eval_at("10^x", 400.0), Err(EvalError::Overflow(_))));
}

#[test]
fn test_syntax_errors() {
    for input in ["inf", "x +", "sin x", "2 ** ** 3", "x # 2", "y"].iter() {
        assert!(
            matches!(eval_at(input, 1.0), Err(EvalError::Syntax(_))),
            "{} should not parse",
            input
        );
    }
}

#[test]
fn test_canonical_is_reused() {
    let f = CanonicalExpression::new("x^3 - x - 2");
    assert_eq!(f.as_str(), "x**3 - x - 2");
    assert_eq!(f.to_string(), "x**3 - x - 2");
    assert!(f.tree().is_ok());
    fuzzy_eq!(evaluate(&f, 2.0).unwrap(), 4.0);
    fuzzy_eq!(f.evaluate(-1.0).unwrap(), -2.0);
}

#[test]
fn test_long_chains() {
    let negations = format!("{}x", "-".repeat(50_000));
    assert!(matches!(eval_at(&negations, 1.0), Err(EvalError::Syntax(_))));
    let sum = vec!["x"; 50_000].join("+");
    assert!(matches!(eval_at(&sum, 1.0), Err(EvalError::Syntax(_))));
    // short chains still evaluate
    fuzzy_eq!(eval_at(&format!("{}x", "-".repeat(200)), 3.0).unwrap(), 3.0);
    fuzzy_eq!(eval_at(&vec!["x"; 100].join("+"), 1.0).unwrap(), 100.0);
}
