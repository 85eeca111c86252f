use crate::context::{power, Builtin, Constant, VARIABLE};
use crate::error::EvalError;
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

#[derive(PartialEq, Debug)]
pub enum Assoc {
    Left,
    Right,
}

impl BinOp {
    pub fn from_symbol(symbol: &str) -> Option<BinOp> {
        match symbol {
            "+" => Some(BinOp::Add),
            "-" => Some(BinOp::Sub),
            "*" => Some(BinOp::Mul),
            "/" => Some(BinOp::Div),
            "%" => Some(BinOp::Rem),
            "**" => Some(BinOp::Pow),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
            BinOp::Pow => "**",
        }
    }

    pub fn precedence(self) -> (usize, Assoc) {
        match self {
            BinOp::Add | BinOp::Sub => (2, Assoc::Left),
            BinOp::Mul | BinOp::Div | BinOp::Rem => (3, Assoc::Left),
            BinOp::Pow => (5, Assoc::Right),
        }
    }

    pub fn apply(self, l: f64, r: f64) -> Result<f64, EvalError> {
        match self {
            BinOp::Add => Ok(l + r),
            BinOp::Sub => Ok(l - r),
            BinOp::Mul => Ok(l * r),
            BinOp::Div if r == 0.0 => Err(EvalError::Domain(format!("{} / 0", l))),
            BinOp::Div => Ok(l / r),
            BinOp::Rem if r == 0.0 => Err(EvalError::Domain(format!("{} % 0", l))),
            BinOp::Rem => {
                // floored modulo: the result takes the sign of the divisor
                let m = l % r;
                if m != 0.0 && (m < 0.0) != (r < 0.0) {
                    Ok(m + r)
                } else {
                    Ok(m)
                }
            }
            BinOp::Pow => power(l, r),
        }
    }
}

/// Parsed form of a canonical expression. Names are already resolved
/// against the evaluation context, `x` is the only free variable.
#[derive(Clone, PartialEq, Debug)]
pub enum Expr {
    Number(f64),
    Var,
    Const(Constant),
    Neg(Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    Call(Builtin, Vec<Expr>),
}

const NEG_PRECEDENCE: usize = 4;
const ATOM_PRECEDENCE: usize = 9;

impl Expr {
    pub fn eval(&self, x: f64) -> Result<f64, EvalError> {
        let value = match self {
            Expr::Number(n) => *n,
            Expr::Var => x,
            Expr::Const(c) => c.value(),
            Expr::Neg(e) => -e.eval(x)?,
            Expr::Binary(op, l, r) => op.apply(l.eval(x)?, r.eval(x)?)?,
            Expr::Call(f, args) => {
                let args = args
                    .iter()
                    .map(|arg| arg.eval(x))
                    .collect::<Result<Vec<_>, _>>()?;
                f.apply(&args)?
            }
        };
        if value.is_nan() {
            Err(EvalError::Domain(format!("{} is not a number", self)))
        } else if value.is_infinite() {
            Err(EvalError::Overflow(format!("{} is too large", self)))
        } else {
            Ok(value)
        }
    }

    fn precedence(&self) -> usize {
        match self {
            Expr::Neg(_) => NEG_PRECEDENCE,
            Expr::Binary(op, _, _) => op.precedence().0,
            _ => ATOM_PRECEDENCE,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn printer(root: &Expr) -> String {
            match root {
                Expr::Number(n) => format!("{}", n),
                Expr::Var => VARIABLE.to_string(),
                Expr::Const(c) => c.name().to_string(),
                Expr::Neg(operand) => {
                    if NEG_PRECEDENCE > operand.precedence() {
                        format!("-({})", printer(operand))
                    } else {
                        format!("-{}", printer(operand))
                    }
                }
                Expr::Binary(op, lhs, rhs) => {
                    let (prec, assoc) = op.precedence();
                    let lh = if prec > lhs.precedence()
                        || (prec == lhs.precedence() && assoc != Assoc::Left)
                    {
                        format!("({})", printer(lhs))
                    } else {
                        printer(lhs)
                    };
                    let rh = if prec > rhs.precedence()
                        || (prec == rhs.precedence() && assoc != Assoc::Right)
                    {
                        format!("({})", printer(rhs))
                    } else {
                        printer(rhs)
                    };
                    format!("{} {} {}", lh, op.symbol(), rh)
                }
                Expr::Call(func, args) => {
                    let args = args.iter().map(printer).collect::<Vec<String>>().join(", ");
                    format!("{}({})", func.name(), args)
                }
            }
        }

        write!(f, "{}", printer(self))
    }
}
