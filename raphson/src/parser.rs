use crate::context::{CONTEXT, VARIABLE};
use crate::error::EvalError;
use crate::expr::{Assoc, BinOp, Expr};
use lexers::{MathToken, MathTokenizer};

fn syntax(msg: String) -> EvalError {
    EvalError::Syntax(msg)
}

fn describe(token: &MathToken) -> String {
    match token {
        MathToken::Number(n) => n.to_string(),
        MathToken::Variable(s)
        | MathToken::Function(s, _)
        | MathToken::UOp(s)
        | MathToken::BOp(s)
        | MathToken::Unknown(s) => s.clone(),
        MathToken::OParen => "(".to_string(),
        MathToken::CParen => ")".to_string(),
        MathToken::Comma => ",".to_string(),
    }
}

pub fn precedence(mt: &MathToken) -> (usize, Assoc) {
    // Unary signs sit between '*' and '**' like in most languages, so
    // '-2**2' is -(2**2) but '2**-1' still finds its exponent because
    // prefix operators are pushed without popping anything.
    match *mt {
        MathToken::OParen => (1, Assoc::Left), // keep at bottom
        MathToken::BOp(ref o) => match BinOp::from_symbol(o) {
            Some(op) => op.precedence(),
            None => (99, Assoc::Left),
        },
        MathToken::UOp(_) => (4, Assoc::Right),
        MathToken::Function(_, _) => (7, Assoc::Left),
        _ => (99, Assoc::Left),
    }
}

// a bare name can only be the variable or a constant
fn resolve_name(name: &str) -> Result<Expr, EvalError> {
    if name == VARIABLE {
        Ok(Expr::Var)
    } else if let Some(c) = CONTEXT.constant(name) {
        Ok(Expr::Const(c))
    } else if CONTEXT.function(name).is_some() {
        Err(syntax(format!("{} needs an argument list", name)))
    } else {
        Err(syntax(format!("unknown name '{}'", name)))
    }
}

/// Deepest tree the parser builds. Evaluating, printing and dropping an
/// `Expr` recurse once per level, so chains like `----x` or `x+x+...+x`
/// are cut off here instead of exhausting the stack.
pub const MAX_DEPTH: usize = 256;

// parsed subtrees along with their depth
type Operands = Vec<(Expr, usize)>;

fn push_node(out: &mut Operands, expr: Expr, depth: usize) -> Result<(), EvalError> {
    if depth > MAX_DEPTH {
        return Err(syntax(format!(
            "expression nests deeper than {} levels",
            MAX_DEPTH
        )));
    }
    out.push((expr, depth));
    Ok(())
}

// pop operands for an operator or function from the stack and push the
// resulting subtree back
fn reduce(out: &mut Operands, token: MathToken) -> Result<(), EvalError> {
    let missing = || syntax("missing operand".to_string());
    match token {
        MathToken::BOp(op) => {
            let binop =
                BinOp::from_symbol(&op).ok_or_else(|| syntax(format!("unknown operator {}", op)))?;
            let (r, r_depth) = out.pop().ok_or_else(missing)?;
            let (l, l_depth) = out.pop().ok_or_else(missing)?;
            let depth = 1 + l_depth.max(r_depth);
            push_node(out, Expr::Binary(binop, Box::new(l), Box::new(r)), depth)?;
        }
        MathToken::UOp(op) => {
            let (operand, depth) = out.pop().ok_or_else(missing)?;
            match op.as_ref() {
                "-" => push_node(out, Expr::Neg(Box::new(operand)), depth + 1)?,
                _ => out.push((operand, depth)), // unary '+'
            }
        }
        MathToken::Function(name, arity) => {
            let func = CONTEXT
                .function(&name)
                .ok_or_else(|| syntax(format!("unknown function '{}'", name)))?;
            if func.arity() != arity {
                return Err(syntax(format!(
                    "{}() takes {} argument(s), {} given",
                    name,
                    func.arity(),
                    arity
                )));
            }
            if arity > out.len() {
                return Err(missing());
            }
            let args = out.split_off(out.len() - arity);
            let depth = 1 + args.iter().map(|(_, d)| *d).max().unwrap_or(0);
            let args = args.into_iter().map(|(arg, _)| arg).collect();
            push_node(out, Expr::Call(func, args), depth)?;
        }
        MathToken::OParen => return Err(syntax("missing closing paren".to_string())),
        other => return Err(syntax(format!("unexpected '{}'", describe(&other)))),
    }
    Ok(())
}

pub struct ShuntingParser;

impl ShuntingParser {
    pub fn parse_str(expr: &str) -> Result<Expr, EvalError> {
        Self::parse(&mut MathTokenizer::new(expr.chars()))
    }

    pub fn parse(lex: &mut impl Iterator<Item = MathToken>) -> Result<Expr, EvalError> {
        let mut out = Vec::new();
        let mut stack = Vec::new();
        let mut arity = Vec::<usize>::new();
        // an operand (number, name, call, group or prefix op) must come next
        let mut expect_operand = true;

        for token in lex {
            match token {
                MathToken::Number(_) | MathToken::Variable(_) if !expect_operand => {
                    return Err(syntax(format!("missing operator before '{}'", describe(&token))));
                }
                MathToken::Number(n) => {
                    out.push((Expr::Number(n), 1));
                    expect_operand = false;
                }
                MathToken::Variable(ref name) => {
                    out.push((resolve_name(name)?, 1));
                    expect_operand = false;
                }
                MathToken::OParen | MathToken::Function(_, _) if !expect_operand => {
                    return Err(syntax("missing operator before '('".to_string()));
                }
                MathToken::OParen => stack.push(token),
                MathToken::Function(_, _) => {
                    stack.push(token);
                    arity.push(1);
                }
                MathToken::Comma | MathToken::CParen if expect_operand => {
                    return Err(syntax(format!("missing operand before '{}'", describe(&token))));
                }
                MathToken::Comma | MathToken::CParen => {
                    while let Some(top) = stack.pop() {
                        if top == MathToken::OParen {
                            stack.push(top);
                            break;
                        }
                        reduce(&mut out, top)?;
                    }
                    if stack.last() != Some(&MathToken::OParen) {
                        return Err(syntax("missing opening paren".to_string()));
                    }
                    // end of grouping: check if this is a function call
                    let in_call =
                        stack.len() > 1 && matches!(stack[stack.len() - 2], MathToken::Function(..));
                    if token == MathToken::CParen {
                        stack.pop(); // peel matching OParen
                        if in_call {
                            if let (Some(MathToken::Function(func, _)), Some(n)) =
                                (stack.pop(), arity.pop())
                            {
                                reduce(&mut out, MathToken::Function(func, n))?;
                            }
                        }
                        expect_operand = false;
                    } else if !in_call {
                        return Err(syntax("',' outside of a function call".to_string()));
                    } else {
                        if let Some(a) = arity.last_mut() {
                            *a += 1;
                        }
                        expect_operand = true;
                    }
                }
                MathToken::UOp(_) => stack.push(token),
                MathToken::BOp(_) if expect_operand => {
                    return Err(syntax(format!("missing operand before '{}'", describe(&token))));
                }
                MathToken::BOp(_) => {
                    let (prec_rhs, assoc_rhs) = precedence(&token);
                    while let Some(top) = stack.pop() {
                        let (prec_lhs, _) = precedence(&top);
                        if prec_lhs > prec_rhs || (prec_lhs == prec_rhs && assoc_rhs == Assoc::Left)
                        {
                            reduce(&mut out, top)?;
                        } else {
                            stack.push(top);
                            break;
                        }
                    }
                    stack.push(token);
                    expect_operand = true;
                }
                MathToken::Unknown(lexeme) => {
                    return Err(syntax(format!("unexpected '{}'", lexeme)));
                }
            }
        }

        if expect_operand {
            return Err(syntax(if out.is_empty() && stack.is_empty() {
                "empty expression".to_string()
            } else {
                "missing operand at the end".to_string()
            }));
        }
        while let Some(top) = stack.pop() {
            reduce(&mut out, top)?;
        }
        match (out.pop(), out.is_empty()) {
            (Some((expr, _)), true) => Ok(expr),
            _ => Err(syntax("dangling operands".to_string())),
        }
    }
}
