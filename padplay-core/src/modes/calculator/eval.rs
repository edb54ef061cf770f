//! Arithmetic evaluator
//!
//! Recursive descent over the calculator alphabet:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := '-' factor | number
//! number := digits ['.' digits] | '.' digits | digits '.'
//! ```
//!
//! Integers stay exact until an operation overflows `i64`, which promotes
//! the result to a real. Division always yields a real.

use core::fmt::{self, Write};

use heapless::String;

/// Evaluation result
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Value {
    Int(i64),
    Real(f64),
}

/// Evaluation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EvalError {
    /// Nothing to evaluate
    Empty,
    /// Malformed or incomplete expression
    Syntax,
    /// Divisor evaluated to zero
    DivisionByZero,
    /// Result is not a finite number
    Overflow,
}

/// Evaluate an expression
pub fn evaluate(expr: &str) -> Result<Value, EvalError> {
    if expr.is_empty() {
        return Err(EvalError::Empty);
    }

    let mut parser = Parser {
        src: expr.as_bytes(),
        pos: 0,
    };
    let value = parser.expr()?;
    if parser.pos != parser.src.len() {
        return Err(EvalError::Syntax);
    }
    Ok(value)
}

struct Parser<'a> {
    src: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn expr(&mut self) -> Result<Value, EvalError> {
        let mut acc = self.term()?;
        loop {
            match self.peek() {
                Some(b'+') => {
                    self.pos += 1;
                    acc = add(acc, self.term()?)?;
                }
                Some(b'-') => {
                    self.pos += 1;
                    acc = sub(acc, self.term()?)?;
                }
                _ => return Ok(acc),
            }
        }
    }

    fn term(&mut self) -> Result<Value, EvalError> {
        let mut acc = self.factor()?;
        loop {
            match self.peek() {
                Some(b'*') => {
                    self.pos += 1;
                    acc = mul(acc, self.factor()?)?;
                }
                Some(b'/') => {
                    self.pos += 1;
                    acc = div(acc, self.factor()?)?;
                }
                _ => return Ok(acc),
            }
        }
    }

    fn factor(&mut self) -> Result<Value, EvalError> {
        if self.peek() == Some(b'-') {
            self.pos += 1;
            return neg(self.factor()?);
        }
        self.number()
    }

    fn number(&mut self) -> Result<Value, EvalError> {
        let start = self.pos;
        let mut digits = 0;
        let mut point = false;

        while let Some(b) = self.peek() {
            match b {
                b'0'..=b'9' => digits += 1,
                b'.' if !point => point = true,
                _ => break,
            }
            self.pos += 1;
        }

        if digits == 0 {
            return Err(EvalError::Syntax);
        }

        let text = core::str::from_utf8(&self.src[start..self.pos]).map_err(|_| EvalError::Syntax)?;
        if !point {
            if let Ok(v) = text.parse::<i64>() {
                return Ok(Value::Int(v));
            }
        }
        text.parse::<f64>()
            .map_err(|_| EvalError::Syntax)
            .and_then(real)
    }
}

impl Value {
    fn as_real(self) -> f64 {
        match self {
            Value::Int(v) => v as f64,
            Value::Real(v) => v,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Value::Int(v) => v == 0,
            Value::Real(v) => v == 0.0,
        }
    }
}

fn real(v: f64) -> Result<Value, EvalError> {
    if v.is_finite() {
        Ok(Value::Real(v))
    } else {
        Err(EvalError::Overflow)
    }
}

fn add(a: Value, b: Value) -> Result<Value, EvalError> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => match x.checked_add(y) {
            Some(v) => Ok(Value::Int(v)),
            None => real(x as f64 + y as f64),
        },
        _ => real(a.as_real() + b.as_real()),
    }
}

fn sub(a: Value, b: Value) -> Result<Value, EvalError> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => match x.checked_sub(y) {
            Some(v) => Ok(Value::Int(v)),
            None => real(x as f64 - y as f64),
        },
        _ => real(a.as_real() - b.as_real()),
    }
}

fn mul(a: Value, b: Value) -> Result<Value, EvalError> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => match x.checked_mul(y) {
            Some(v) => Ok(Value::Int(v)),
            None => real(x as f64 * y as f64),
        },
        _ => real(a.as_real() * b.as_real()),
    }
}

fn div(a: Value, b: Value) -> Result<Value, EvalError> {
    if b.is_zero() {
        return Err(EvalError::DivisionByZero);
    }
    real(a.as_real() / b.as_real())
}

fn neg(a: Value) -> Result<Value, EvalError> {
    match a {
        Value::Int(x) => match x.checked_neg() {
            Some(v) => Ok(Value::Int(v)),
            None => real(-(x as f64)),
        },
        Value::Real(x) => real(-x),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Real(v) => {
                let magnitude = if v < 0.0 { -v } else { v };
                if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
                    write_exponent(f, v)
                } else if v == (v as i64) as f64 {
                    // Whole reals keep a trailing ".0"
                    write!(f, "{:.1}", v)
                } else {
                    write!(f, "{}", v)
                }
            }
        }
    }
}

/// Scientific notation with a signed, at least two digit exponent
/// (`1e+20`, `1.5e-07`)
fn write_exponent(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    let mut raw: String<32> = String::new();
    write!(raw, "{:e}", v)?;

    match raw.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            write!(f, "{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => f.write_str(&raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(value: Value) -> String<32> {
        let mut s = String::new();
        write!(s, "{}", value).unwrap();
        s
    }

    #[test]
    fn test_integer_arithmetic() {
        assert_eq!(evaluate("5+3"), Ok(Value::Int(8)));
        assert_eq!(evaluate("2+3*4"), Ok(Value::Int(14)));
        assert_eq!(evaluate("10-4-3"), Ok(Value::Int(3)));
        assert_eq!(evaluate("-5*2"), Ok(Value::Int(-10)));
    }

    #[test]
    fn test_division_is_real() {
        assert_eq!(evaluate("7/2"), Ok(Value::Real(3.5)));
        assert_eq!(evaluate("4/2"), Ok(Value::Real(2.0)));
        assert_eq!(evaluate("8/2/2"), Ok(Value::Real(2.0)));
    }

    #[test]
    fn test_decimal_forms() {
        assert_eq!(evaluate("1.5+1"), Ok(Value::Real(2.5)));
        assert_eq!(evaluate("5.+1"), Ok(Value::Real(6.0)));
        assert_eq!(evaluate("5+.5"), Ok(Value::Real(5.5)));
        assert_eq!(evaluate("-.5"), Ok(Value::Real(-0.5)));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(evaluate("5/0"), Err(EvalError::DivisionByZero));
        assert_eq!(evaluate("5/0.0"), Err(EvalError::DivisionByZero));
        assert_eq!(evaluate("1/2-1/2"), Ok(Value::Real(0.0)));
    }

    #[test]
    fn test_malformed() {
        assert_eq!(evaluate(""), Err(EvalError::Empty));
        assert_eq!(evaluate("5+"), Err(EvalError::Syntax));
        assert_eq!(evaluate("-"), Err(EvalError::Syntax));
        assert_eq!(evaluate("."), Err(EvalError::Syntax));
        assert_eq!(evaluate("5+."), Err(EvalError::Syntax));
        assert_eq!(evaluate("1..2"), Err(EvalError::Syntax));
        assert_eq!(evaluate("*5"), Err(EvalError::Syntax));
    }

    #[test]
    fn test_overflow_promotes_to_real() {
        assert_eq!(
            evaluate("9999999999*9999999999"),
            Ok(Value::Real(9999999999.0 * 9999999999.0))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(show(Value::Int(8)).as_str(), "8");
        assert_eq!(show(Value::Int(-3)).as_str(), "-3");
        assert_eq!(show(Value::Real(3.5)).as_str(), "3.5");
        assert_eq!(show(Value::Real(2.0)).as_str(), "2.0");
        assert_eq!(show(Value::Real(0.0)).as_str(), "0.0");
        assert_eq!(show(Value::Real(1e20)).as_str(), "1e+20");
        assert_eq!(show(Value::Real(0.00001)).as_str(), "1e-05");
    }

    #[test]
    fn test_display_exponent_form() {
        assert_eq!(show(Value::Real(1.5e-7)).as_str(), "1.5e-07");
        assert_eq!(show(Value::Real(-2.5e16)).as_str(), "-2.5e+16");
        assert_eq!(show(Value::Real(1e300)).as_str(), "1e+300");
        // Just inside the plain range
        assert_eq!(show(Value::Real(0.0001)).as_str(), "0.0001");
    }
}
