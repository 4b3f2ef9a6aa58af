//! Arithmetic expression evaluation for the `calc` command.
//!
//! Expressions are restricted to numbers, the constant `pi`, parentheses
//! and the operators `+ - * / // % **`. Integers stay integers until an
//! operation needs a fraction (`/` always produces a float), mirroring
//! what users expect from a desk calculator:
//!
//! ```text
//! 2+3*4     = 14
//! 7/2       = 3.5
//! 4/2       = 2.0
//! -7//2     = -4
//! 2**-1     = 0.5
//! ```

use std::f64::consts::PI;
use std::fmt;

/// Deepest nesting of parentheses, unary signs and powers accepted.
pub const MAX_DEPTH: usize = 256;

/// Errors that can occur while evaluating an expression.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalcError {
    /// The expression contains a character outside the calculator alphabet.
    #[error("Expression contains invalid character '{0}'")]
    InvalidCharacter(char),

    /// The expression is not well formed.
    #[error("Cannot evaluate expression: {0}")]
    Syntax(String),

    /// Division, floor division or modulo by zero.
    #[error("Cannot evaluate expression: division by zero")]
    DivisionByZero,

    /// The result overflowed to infinity or is not a number.
    #[error("Cannot evaluate expression: result is not a finite number")]
    NotFinite,
}

/// A computed value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
}

impl Value {
    fn as_f64(self) -> f64 {
        match self {
            Value::Int(i) => i as f64,
            Value::Float(f) => f,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Value::Int(i) => i == 0,
            Value::Float(f) => f == 0.0,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) if x.fract() == 0.0 && x.abs() < 1e16 => write!(f, "{x:.1}"),
            Value::Float(x) => write!(f, "{x}"),
        }
    }
}

/// Evaluates an arithmetic expression.
pub fn evaluate(expr: &str) -> Result<Value, CalcError> {
    let tokens = tokenize(expr)?;
    if tokens.is_empty() {
        return Err(CalcError::Syntax("empty expression".to_string()));
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expression()?;
    if let Some(tok) = parser.peek() {
        return Err(CalcError::Syntax(format!("unexpected {tok}")));
    }

    match value {
        Value::Float(f) if !f.is_finite() => Err(CalcError::NotFinite),
        v => Ok(v),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(Value),
    Plus,
    Minus,
    Star,
    Slash,
    DoubleSlash,
    Percent,
    Power,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Num(v) => write!(f, "number {v}"),
            Token::Plus => write!(f, "'+'"),
            Token::Minus => write!(f, "'-'"),
            Token::Star => write!(f, "'*'"),
            Token::Slash => write!(f, "'/'"),
            Token::DoubleSlash => write!(f, "'//'"),
            Token::Percent => write!(f, "'%'"),
            Token::Power => write!(f, "'**'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
        }
    }
}

fn tokenize(expr: &str) -> Result<Vec<Token>, CalcError> {
    let chars: Vec<char> = expr.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' => i += 1,
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' if chars.get(i + 1) == Some(&'*') => {
                tokens.push(Token::Power);
                i += 2;
            }
            '*' => {
                tokens.push(Token::Star);
                i += 1;
            }
            '/' if chars.get(i + 1) == Some(&'/') => {
                tokens.push(Token::DoubleSlash);
                i += 2;
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '%' => {
                tokens.push(Token::Percent);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            'p' if chars.get(i + 1) == Some(&'i') => {
                tokens.push(Token::Num(Value::Float(PI)));
                i += 2;
            }
            '0'..='9' | '.' => {
                let (value, next) = number(&chars, i)?;
                tokens.push(Token::Num(value));
                i = next;
            }
            other => return Err(CalcError::InvalidCharacter(other)),
        }
    }

    Ok(tokens)
}

/// Scans a numeric literal starting at `start`; returns it and the index
/// just past it.
fn number(chars: &[char], start: usize) -> Result<(Value, usize), CalcError> {
    let mut i = start;
    let mut is_float = false;

    while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
        if chars[i] == '.' {
            if is_float {
                return Err(CalcError::Syntax("malformed number".to_string()));
            }
            is_float = true;
        }
        i += 1;
    }

    if i < chars.len() && matches!(chars[i], 'e' | 'E') {
        let mut j = i + 1;
        if j < chars.len() && matches!(chars[j], '+' | '-') {
            j += 1;
        }
        let digits_start = j;
        while j < chars.len() && chars[j].is_ascii_digit() {
            j += 1;
        }
        if j == digits_start {
            return Err(CalcError::Syntax("malformed exponent".to_string()));
        }
        is_float = true;
        i = j;
    }

    let literal: String = chars[start..i].iter().collect();
    if literal == "." {
        return Err(CalcError::Syntax("malformed number".to_string()));
    }

    let value = if is_float {
        literal
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| CalcError::Syntax(format!("malformed number '{literal}'")))?
    } else {
        match literal.parse::<i64>() {
            Ok(n) => Value::Int(n),
            Err(_) => literal
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| CalcError::Syntax(format!("malformed number '{literal}'")))?,
        }
    };

    Ok((value, i))
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.peek();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    /// Runs `f` one nesting level deeper, failing past [`MAX_DEPTH`].
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, CalcError>,
    ) -> Result<T, CalcError> {
        if self.depth >= MAX_DEPTH {
            return Err(CalcError::Syntax("expression nested too deeply".to_string()));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // expression := term (('+' | '-') term)*
    fn expression(&mut self) -> Result<Value, CalcError> {
        let mut lhs = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            lhs = binary(op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    // term := unary (('*' | '/' | '//' | '%') unary)*
    fn term(&mut self) -> Result<Value, CalcError> {
        let mut lhs = self.unary()?;
        while let Some(op @ (Token::Star | Token::Slash | Token::DoubleSlash | Token::Percent)) =
            self.peek()
        {
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = binary(op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    // unary := ('+' | '-') unary | power
    fn unary(&mut self) -> Result<Value, CalcError> {
        match self.peek() {
            Some(Token::Plus) => {
                self.pos += 1;
                self.nested(Self::unary)
            }
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(match self.nested(Self::unary)? {
                    Value::Int(i) => i
                        .checked_neg()
                        .map(Value::Int)
                        .unwrap_or(Value::Float(-(i as f64))),
                    Value::Float(f) => Value::Float(-f),
                })
            }
            _ => self.power(),
        }
    }

    // power := atom ('**' unary)?
    // Binds tighter than a unary minus on its left: -2**2 == -4.
    fn power(&mut self) -> Result<Value, CalcError> {
        let base = self.atom()?;
        if self.peek() == Some(Token::Power) {
            self.pos += 1;
            let exponent = self.nested(Self::unary)?;
            return binary(Token::Power, base, exponent);
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Value, CalcError> {
        match self.next() {
            Some(Token::Num(v)) => Ok(v),
            Some(Token::LParen) => {
                let value = self.nested(Self::expression)?;
                match self.next() {
                    Some(Token::RParen) => Ok(value),
                    Some(tok) => Err(CalcError::Syntax(format!("expected ')', found {tok}"))),
                    None => Err(CalcError::Syntax("missing ')'".to_string())),
                }
            }
            Some(tok) => Err(CalcError::Syntax(format!("unexpected {tok}"))),
            None => Err(CalcError::Syntax("unexpected end of expression".to_string())),
        }
    }
}

fn binary(op: Token, lhs: Value, rhs: Value) -> Result<Value, CalcError> {
    if matches!(op, Token::Slash | Token::DoubleSlash | Token::Percent) && rhs.is_zero() {
        return Err(CalcError::DivisionByZero);
    }

    if let (Value::Int(a), Value::Int(b)) = (lhs, rhs) {
        let exact = match op {
            Token::Plus => a.checked_add(b),
            Token::Minus => a.checked_sub(b),
            Token::Star => a.checked_mul(b),
            Token::DoubleSlash => floor_div(a, b),
            Token::Percent => floor_mod(a, b),
            Token::Power if b >= 0 => u32::try_from(b).ok().and_then(|e| a.checked_pow(e)),
            _ => None,
        };
        if let Some(n) = exact {
            return Ok(Value::Int(n));
        }
    }

    let (a, b) = (lhs.as_f64(), rhs.as_f64());
    let result = match op {
        Token::Plus => a + b,
        Token::Minus => a - b,
        Token::Star => a * b,
        Token::Slash => a / b,
        Token::DoubleSlash => (a / b).floor(),
        Token::Percent => a - b * (a / b).floor(),
        Token::Power => {
            if a == 0.0 && b < 0.0 {
                return Err(CalcError::DivisionByZero);
            }
            a.powf(b)
        }
        other => return Err(CalcError::Syntax(format!("unexpected {other}"))),
    };

    if result.is_nan() {
        return Err(CalcError::NotFinite);
    }
    Ok(Value::Float(result))
}

fn floor_div(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        q.checked_sub(1)
    } else {
        Some(q)
    }
}

fn floor_mod(a: i64, b: i64) -> Option<i64> {
    let r = a.checked_rem(b)?;
    if r != 0 && ((r < 0) != (b < 0)) {
        Some(r + b)
    } else {
        Some(r)
    }
}
