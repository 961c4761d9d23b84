//! Arithmetic expressions in one or more free variables.
//!
//! ```
//! use axiscope::expr::{Bindings, Expression};
//!
//! let expr = Expression::parse("2x^2 + sin(pi x)").unwrap();
//! let y = expr.evaluate(&Bindings::new().with("x", 1.0)).unwrap();
//! assert!((y - 2.0).abs() < 1e-12);
//! ```

mod functions;
mod lexer;
mod parser;

use std::fmt;

use thiserror::Error;

pub use functions::Function;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinaryOp {
    fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "^",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Number(f64),
    Var(String),
    Unary(UnaryOp, Box<Node>),
    Binary(BinaryOp, Box<Node>, Box<Node>),
    Call(Function, Vec<Node>),
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number(v) => write!(f, "{v}"),
            Node::Var(name) => f.write_str(name),
            Node::Unary(UnaryOp::Neg, operand) => write!(f, "(-{operand})"),
            Node::Binary(op, lhs, rhs) => write!(f, "({lhs} {} {rhs})", op.symbol()),
            Node::Call(func, args) => {
                write!(f, "{}(", func.name())?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ParseError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("unexpected '{found}' at offset {offset}")]
    UnexpectedToken { found: String, offset: usize },

    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEnd { offset: usize },

    #[error("unknown function '{name}' at offset {offset}")]
    UnknownFunction { name: String, offset: usize },

    #[error("expression nested too deeply at offset {offset}")]
    TooDeep { offset: usize },

    #[error("{name}() expects {expected} argument(s) but got {found} (offset {offset})")]
    ArgumentCount {
        name: &'static str,
        expected: String,
        found: usize,
        offset: usize,
    },
}

impl ParseError {
    /// Byte offset into the source text where the problem was found.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::Empty => 0,
            ParseError::UnexpectedChar { offset, .. }
            | ParseError::UnexpectedToken { offset, .. }
            | ParseError::UnexpectedEnd { offset }
            | ParseError::UnknownFunction { offset, .. }
            | ParseError::TooDeep { offset }
            | ParseError::ArgumentCount { offset, .. } => *offset,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvalError {
    #[error("undefined symbol '{0}'")]
    UndefinedSymbol(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("{0} is undefined here")]
    Domain(&'static str),
}

/// Values for the free variables of an expression.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bindings {
    values: Vec<(String, f64)>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: f64) {
        match self.values.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name.to_owned(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, v)| v)
    }
}

/// A parsed expression ready for repeated evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct Expression {
    source: String,
    root: Node,
}

impl Expression {
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let root = parser::parse(source)?;
        Ok(Self {
            source: source.to_owned(),
            root,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Names of the free variables, in order of first appearance.
    pub fn variables(&self) -> Vec<&str> {
        fn walk<'a>(node: &'a Node, out: &mut Vec<&'a str>) {
            match node {
                Node::Number(_) => {}
                Node::Var(name) => {
                    if !out.contains(&name.as_str()) {
                        out.push(name);
                    }
                }
                Node::Unary(_, operand) => walk(operand, out),
                Node::Binary(_, lhs, rhs) => {
                    walk(lhs, out);
                    walk(rhs, out);
                }
                Node::Call(_, args) => args.iter().for_each(|a| walk(a, out)),
            }
        }
        let mut out = Vec::new();
        walk(&self.root, &mut out);
        out
    }

    pub fn evaluate(&self, bindings: &Bindings) -> Result<f64, EvalError> {
        eval(&self.root, bindings)
    }
}

fn finite(value: f64, what: &'static str) -> Result<f64, EvalError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::Domain(what))
    }
}

fn eval(node: &Node, bindings: &Bindings) -> Result<f64, EvalError> {
    match node {
        Node::Number(v) => Ok(*v),
        Node::Var(name) => bindings
            .get(name)
            .ok_or_else(|| EvalError::UndefinedSymbol(name.clone())),
        Node::Unary(UnaryOp::Neg, operand) => Ok(-eval(operand, bindings)?),
        Node::Binary(op, lhs, rhs) => {
            let a = eval(lhs, bindings)?;
            let b = eval(rhs, bindings)?;
            match op {
                BinaryOp::Add => finite(a + b, "sum"),
                BinaryOp::Sub => finite(a - b, "difference"),
                BinaryOp::Mul => finite(a * b, "product"),
                BinaryOp::Div => {
                    if b == 0.0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    finite(a / b, "quotient")
                }
                BinaryOp::Mod => functions::floored_mod(a, b),
                BinaryOp::Pow => finite(a.powf(b), "power"),
            }
        }
        Node::Call(func, args) => {
            let values = args
                .iter()
                .map(|a| eval(a, bindings))
                .collect::<Result<Vec<_>, _>>()?;
            func.apply(&values)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(src: &str) -> String {
        Expression::parse(src).expect("parses").root().to_string()
    }

    fn at(src: &str, x: f64) -> Result<f64, EvalError> {
        Expression::parse(src)
            .expect("parses")
            .evaluate(&Bindings::new().with("x", x))
    }

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(shape("1 + 2 * 3"), "(1 + (2 * 3))");
        assert_eq!(shape("2 ^ 3 ^ 2"), "(2 ^ (3 ^ 2))");
        assert_eq!(shape("-x^2"), "(-(x ^ 2))");
        assert_eq!(shape("8 / 4 / 2"), "((8 / 4) / 2)");
        assert_eq!(shape("2^-1"), "(2 ^ (-1))");
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(shape("2x"), "(2 * x)");
        assert_eq!(shape("3(x + 1)"), "(3 * (x + 1))");
        assert_eq!(shape("(x+1)(x-1)"), "((x + 1) * (x - 1))");
        assert_eq!(shape("2 sin(x)"), "(2 * sin(x))");
    }

    #[test]
    fn constants_fold_at_parse_time() {
        assert_eq!(Expression::parse("pi").map(|e| e.variables().len()), Ok(0));
        let tau = at("tau / 2", 0.0).expect("finite");
        assert!((tau - std::f64::consts::PI).abs() < 1e-15);
    }

    #[test]
    fn evaluation_errors() {
        assert_eq!(at("1/x", 0.0), Err(EvalError::DivisionByZero));
        assert_eq!(at("x % 0", 3.0), Err(EvalError::DivisionByZero));
        assert!(matches!(at("sqrt(x)", -1.0), Err(EvalError::Domain(_))));
        assert!(matches!(at("log(x)", 0.0), Err(EvalError::Domain(_))));
        assert_eq!(at("y + 1", 0.0), Err(EvalError::UndefinedSymbol("y".into())));
    }

    #[test]
    fn floored_modulo_follows_divisor_sign() {
        assert_eq!(at("x % 3", -1.0), Ok(2.0));
        assert_eq!(at("mod(x, -3)", 1.0), Ok(-2.0));
    }

    #[test]
    fn parse_errors_carry_offsets() {
        assert_eq!(Expression::parse("   "), Err(ParseError::Empty));
        assert_eq!(
            Expression::parse("x + $").map(|_| ()).map_err(|e| e.offset()),
            Err(4)
        );
        assert!(matches!(
            Expression::parse("x +"),
            Err(ParseError::UnexpectedEnd { offset: 3 })
        ));
        assert!(matches!(
            Expression::parse("foo(x)"),
            Err(ParseError::UnknownFunction { offset: 0, .. })
        ));
        assert!(matches!(
            Expression::parse("sin(x, 2)"),
            Err(ParseError::ArgumentCount { found: 2, .. })
        ));
        assert!(matches!(
            Expression::parse("(x + 1"),
            Err(ParseError::UnexpectedEnd { .. })
        ));
    }
}
