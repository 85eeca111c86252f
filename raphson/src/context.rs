use crate::error::EvalError;
use std::f64::consts;

/// Name of the only variable an expression may use.
pub const VARIABLE: &str = "x";

// below this magnitude a reciprocal trig denominator counts as zero
const RECIPROCAL_EPSILON: f64 = 1.0e-15;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Builtin {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
    Exp,
    Ln,
    Log10,
    Log2,
    Logb,
    Sqrt,
    Cbrt,
    Root,
    Abs,
    Floor,
    Ceil,
    Csc,
    Sec,
    Cot,
}

const BUILTINS: [Builtin; 26] = [
    Builtin::Sin,
    Builtin::Cos,
    Builtin::Tan,
    Builtin::Asin,
    Builtin::Acos,
    Builtin::Atan,
    Builtin::Sinh,
    Builtin::Cosh,
    Builtin::Tanh,
    Builtin::Asinh,
    Builtin::Acosh,
    Builtin::Atanh,
    Builtin::Exp,
    Builtin::Ln,
    Builtin::Log10,
    Builtin::Log2,
    Builtin::Logb,
    Builtin::Sqrt,
    Builtin::Cbrt,
    Builtin::Root,
    Builtin::Abs,
    Builtin::Floor,
    Builtin::Ceil,
    Builtin::Csc,
    Builtin::Sec,
    Builtin::Cot,
];

fn domain(what: &str, arg: f64) -> EvalError {
    EvalError::Domain(format!("{} is undefined at {}", what, arg))
}

/// `num / den` unless `den` is too close to zero to divide by.
pub fn reciprocal(what: &str, num: f64, den: f64, arg: f64) -> Result<f64, EvalError> {
    if den.abs() < RECIPROCAL_EPSILON {
        return Err(domain(what, arg));
    }
    Ok(num / den)
}

/// `base ** exp` with the failures of real exponentiation reported
/// instead of turned into NaN or infinity.
pub fn power(base: f64, exp: f64) -> Result<f64, EvalError> {
    if base == 0.0 && exp < 0.0 {
        return Err(EvalError::Domain(format!(
            "0 can't be raised to a negative power ({})",
            exp
        )));
    }
    if base < 0.0 && exp.fract() != 0.0 {
        return Err(EvalError::Domain(format!(
            "negative base {} with fractional exponent {}",
            base, exp
        )));
    }
    Ok(base.powf(exp))
}

fn log(what: &str, a: f64, ln: fn(f64) -> f64) -> Result<f64, EvalError> {
    if a <= 0.0 {
        return Err(domain(what, a));
    }
    Ok(ln(a))
}

impl Builtin {
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Sin => "sin",
            Builtin::Cos => "cos",
            Builtin::Tan => "tan",
            Builtin::Asin => "asin",
            Builtin::Acos => "acos",
            Builtin::Atan => "atan",
            Builtin::Sinh => "sinh",
            Builtin::Cosh => "cosh",
            Builtin::Tanh => "tanh",
            Builtin::Asinh => "asinh",
            Builtin::Acosh => "acosh",
            Builtin::Atanh => "atanh",
            Builtin::Exp => "exp",
            Builtin::Ln => "ln",
            Builtin::Log10 => "log10",
            Builtin::Log2 => "log2",
            Builtin::Logb => "logb",
            Builtin::Sqrt => "sqrt",
            Builtin::Cbrt => "cbrt",
            Builtin::Root => "root",
            Builtin::Abs => "abs",
            Builtin::Floor => "floor",
            Builtin::Ceil => "ceil",
            Builtin::Csc => "csc",
            Builtin::Sec => "sec",
            Builtin::Cot => "cot",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            Builtin::Logb | Builtin::Root => 2,
            _ => 1,
        }
    }

    pub fn apply(self, args: &[f64]) -> Result<f64, EvalError> {
        use Builtin::*;
        let name = self.name();
        match (self, args) {
            (Sin, &[a]) => Ok(a.sin()),
            (Cos, &[a]) => Ok(a.cos()),
            (Tan, &[a]) => Ok(a.tan()),
            (Asin | Acos, &[a]) if !(-1.0..=1.0).contains(&a) => Err(domain(name, a)),
            (Asin, &[a]) => Ok(a.asin()),
            (Acos, &[a]) => Ok(a.acos()),
            (Atan, &[a]) => Ok(a.atan()),
            (Sinh, &[a]) => Ok(a.sinh()),
            (Cosh, &[a]) => Ok(a.cosh()),
            (Tanh, &[a]) => Ok(a.tanh()),
            (Asinh, &[a]) => Ok(a.asinh()),
            (Acosh, &[a]) if a < 1.0 => Err(domain(name, a)),
            (Acosh, &[a]) => Ok(a.acosh()),
            (Atanh, &[a]) if a.abs() >= 1.0 => Err(domain(name, a)),
            (Atanh, &[a]) => Ok(a.atanh()),
            (Exp, &[a]) => Ok(a.exp()),
            (Ln, &[a]) => log(name, a, f64::ln),
            (Log10, &[a]) => log(name, a, f64::log10),
            (Log2, &[a]) => log(name, a, f64::log2),
            (Logb, &[a, b]) => {
                let num = log(name, a, f64::ln)?;
                let den = log(name, b, f64::ln)?;
                if den == 0.0 {
                    return Err(EvalError::Domain(format!("logarithm base can't be {}", b)));
                }
                Ok(num / den)
            }
            (Sqrt, &[a]) if a < 0.0 => Err(domain(name, a)),
            (Sqrt, &[a]) => Ok(a.sqrt()),
            // real cube root, keeps the sign of negative arguments
            (Cbrt, &[a]) => Ok(a.cbrt()),
            (Root, &[a, n]) => {
                if n == 0.0 {
                    return Err(EvalError::Domain("root of index 0".to_string()));
                }
                power(a, 1.0 / n)
            }
            (Abs, &[a]) => Ok(a.abs()),
            (Floor, &[a]) => Ok(a.floor()),
            (Ceil, &[a]) => Ok(a.ceil()),
            (Csc, &[a]) => reciprocal(name, 1.0, a.sin(), a),
            (Sec, &[a]) => reciprocal(name, 1.0, a.cos(), a),
            (Cot, &[a]) => reciprocal(name, a.cos(), a.sin(), a),
            _ => Err(EvalError::Syntax(format!(
                "{}() takes {} argument(s), {} given",
                name,
                self.arity(),
                args.len()
            ))),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn name(self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::E => "e",
        }
    }

    pub fn value(self) -> f64 {
        match self {
            Constant::Pi => consts::PI,
            Constant::E => consts::E,
        }
    }
}

/// The fixed namespace expressions are evaluated against. Nothing outside
/// of it can be named from an expression.
pub struct EvaluationContext {
    functions: &'static [Builtin],
    constants: &'static [Constant],
}

pub static CONTEXT: EvaluationContext = EvaluationContext {
    functions: &BUILTINS,
    constants: &[Constant::Pi, Constant::E],
};

impl EvaluationContext {
    pub fn function(&self, name: &str) -> Option<Builtin> {
        self.functions.iter().copied().find(|f| f.name() == name)
    }

    pub fn constant(&self, name: &str) -> Option<Constant> {
        self.constants.iter().copied().find(|c| c.name() == name)
    }

    pub fn functions(&self) -> &'static [Builtin] {
        self.functions
    }

    /// Every name an expression may mention: functions, constants and `x`.
    pub fn names(&self) -> Vec<&'static str> {
        let functions = self.functions.iter().map(|f| f.name());
        let constants = self.constants.iter().map(|c| c.name());
        functions
            .chain(constants)
            .chain(std::iter::once(VARIABLE))
            .collect()
    }
}

///////////////////////////////////////////////////////////////////////////////
