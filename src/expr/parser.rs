use super::functions::{Function, constant};
use super::lexer::{Token, TokenKind, tokenize};
use super::{BinaryOp, Node, ParseError, UnaryOp};

// Binding powers, (left, right). Higher binds tighter.
const ADDITIVE: (u8, u8) = (10, 11);
const MULTIPLICATIVE: (u8, u8) = (20, 21);
const PREFIX: u8 = 30;
// Right-associative, and tighter than prefix minus: -x^2 == -(x^2).
const POWER: (u8, u8) = (41, 40);

/// Deepest nesting of parentheses, prefix operators, call arguments and `^`
/// chains accepted before parsing gives up.
pub(super) const MAX_DEPTH: usize = 256;

pub(super) fn parse(src: &str) -> Result<Node, ParseError> {
    let tokens = tokenize(src)?;
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        end: src.len(),
        depth: 0,
    };
    let root = parser.expr_bp(0)?;
    match parser.peek() {
        None => Ok(root),
        Some(tok) => Err(unexpected(tok)),
    }
}

fn unexpected(tok: &Token) -> ParseError {
    ParseError::UnexpectedToken {
        found: tok.kind.describe(),
        offset: tok.offset,
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Offset reported when input runs out.
    end: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Result<Token, ParseError> {
        let tok = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or(ParseError::UnexpectedEnd { offset: self.end })?;
        self.pos += 1;
        Ok(tok)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        let tok = self.next()?;
        if tok.kind == kind {
            Ok(tok)
        } else {
            Err(unexpected(&tok))
        }
    }

    fn expr_bp(&mut self, min_bp: u8) -> Result<Node, ParseError> {
        if self.depth >= MAX_DEPTH {
            let offset = self.peek().map_or(self.end, |t| t.offset);
            return Err(ParseError::TooDeep { offset });
        }
        self.depth += 1;
        let node = self.binary(min_bp);
        self.depth -= 1;
        node
    }

    fn binary(&mut self, min_bp: u8) -> Result<Node, ParseError> {
        let mut lhs = self.prefix()?;

        loop {
            let Some(tok) = self.peek() else { break };
            let (op, (l_bp, r_bp), implicit) = match &tok.kind {
                TokenKind::Plus => (BinaryOp::Add, ADDITIVE, false),
                TokenKind::Minus => (BinaryOp::Sub, ADDITIVE, false),
                TokenKind::Star => (BinaryOp::Mul, MULTIPLICATIVE, false),
                TokenKind::Slash => (BinaryOp::Div, MULTIPLICATIVE, false),
                TokenKind::Percent => (BinaryOp::Mod, MULTIPLICATIVE, false),
                TokenKind::Caret => (BinaryOp::Pow, POWER, false),
                // 2x, 3(x + 1), (x + 1)(x - 1)
                TokenKind::Ident(_) | TokenKind::LParen => (BinaryOp::Mul, MULTIPLICATIVE, true),
                TokenKind::RParen | TokenKind::Comma => break,
                TokenKind::Number(_) => return Err(unexpected(tok)),
            };
            if l_bp < min_bp {
                break;
            }
            if !implicit {
                self.pos += 1;
            }
            let rhs = self.expr_bp(r_bp)?;
            lhs = Node::Binary(op, Box::new(lhs), Box::new(rhs));
        }

        Ok(lhs)
    }

    fn prefix(&mut self) -> Result<Node, ParseError> {
        let tok = self.next()?;
        match tok.kind {
            TokenKind::Number(v) => Ok(Node::Number(v)),
            TokenKind::Minus => {
                let operand = self.expr_bp(PREFIX)?;
                Ok(Node::Unary(UnaryOp::Neg, Box::new(operand)))
            }
            TokenKind::Plus => self.expr_bp(PREFIX),
            TokenKind::LParen => {
                let inner = self.expr_bp(0)?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Ident(name) => {
                let is_call = matches!(self.peek(), Some(t) if t.kind == TokenKind::LParen);
                if is_call {
                    self.call(name, tok.offset)
                } else if let Some(value) = constant(&name) {
                    Ok(Node::Number(value))
                } else {
                    Ok(Node::Var(name))
                }
            }
            _ => Err(unexpected(&tok)),
        }
    }

    fn call(&mut self, name: String, offset: usize) -> Result<Node, ParseError> {
        let func = Function::from_name(&name)
            .ok_or(ParseError::UnknownFunction { name, offset })?;
        self.expect(TokenKind::LParen)?;

        let mut args = Vec::new();
        if matches!(self.peek(), Some(t) if t.kind == TokenKind::RParen) {
            self.pos += 1;
        } else {
            loop {
                args.push(self.expr_bp(0)?);
                let tok = self.next()?;
                match tok.kind {
                    TokenKind::Comma => continue,
                    TokenKind::RParen => break,
                    _ => return Err(unexpected(&tok)),
                }
            }
        }

        let (min, max) = func.arity();
        if args.len() < min || args.len() > max {
            let expected = if min == max {
                min.to_string()
            } else if max == usize::MAX {
                format!("at least {min}")
            } else {
                format!("{min} to {max}")
            };
            return Err(ParseError::ArgumentCount {
                name: func.name(),
                expected,
                found: args.len(),
                offset,
            });
        }

        Ok(Node::Call(func, args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_numbers_are_rejected() {
        assert_eq!(
            parse("2 3"),
            Err(ParseError::UnexpectedToken {
                found: "3".into(),
                offset: 2
            })
        );
    }

    #[test]
    fn stray_closing_paren() {
        assert!(matches!(
            parse("x)"),
            Err(ParseError::UnexpectedToken { offset: 1, .. })
        ));
    }

    #[test]
    fn nesting_is_bounded() {
        let ok = format!("{}x{}", "(".repeat(MAX_DEPTH - 1), ")".repeat(MAX_DEPTH - 1));
        assert!(parse(&ok).is_ok());

        let deep = format!("{}x", "(".repeat(MAX_DEPTH));
        assert!(matches!(parse(&deep), Err(ParseError::TooDeep { .. })));
        assert!(matches!(
            parse(&"-".repeat(100_000)),
            Err(ParseError::TooDeep { .. })
        ));
        assert!(matches!(
            parse(&"x^".repeat(100_000)),
            Err(ParseError::TooDeep { .. })
        ));
    }

    #[test]
    fn variadic_calls() {
        let node = parse("max(1, x, 3)").expect("parses");
        assert!(matches!(node, Node::Call(Function::Max, ref args) if args.len() == 3));
        assert!(matches!(
            parse("max()"),
            Err(ParseError::ArgumentCount { found: 0, .. })
        ));
    }
}
