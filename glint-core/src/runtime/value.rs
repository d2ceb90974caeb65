//! Runtime values

use super::object::{ObjString, Object};
use std::fmt;
use std::rc::Rc;

/// A Glint value
///
/// Everything but object references is copied by value; object references
/// share the heap allocation.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Number(f64),
    Obj(Object),
}

impl Value {
    // ==================== Constructors ====================

    #[inline]
    pub fn number(n: f64) -> Self {
        Value::Number(n)
    }

    #[inline]
    pub fn bool(b: bool) -> Self {
        Value::Bool(b)
    }

    #[inline]
    pub fn string(s: Rc<ObjString>) -> Self {
        Value::Obj(Object::String(s))
    }

    // ==================== Predicates ====================

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::Obj(Object::String(_)))
    }

    /// `nil` and `false` are falsey, everything else (including `0`) is truthy
    pub fn is_falsey(&self) -> bool {
        matches!(self, Value::Nil | Value::Bool(false))
    }

    // ==================== Accessors ====================

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&Rc<ObjString>> {
        match self {
            Value::Obj(obj) => obj.as_string(),
            _ => None,
        }
    }

    /// Name of the value's type, for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Obj(Object::String(_)) => "string",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Obj(a), Value::Obj(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => format_number(*n, f),
            Value::Obj(obj) => write!(f, "{obj}"),
        }
    }
}

/// Significant digits printed for numbers
const NUMBER_PRECISION: i32 = 6;

/// `%g` rendering: six significant digits, trailing zeros dropped, exponent
/// form below 1e-4 and from 1e6 up
fn format_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        return f.write_str("nan");
    }
    if n.is_infinite() {
        return f.write_str(if n > 0.0 { "inf" } else { "-inf" });
    }

    // Rounded to the target precision first, so 999999.7 moves to 1e+06
    let scientific = format!("{:.*e}", (NUMBER_PRECISION - 1) as usize, n);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..NUMBER_PRECISION).contains(&exponent) {
        let decimals = (NUMBER_PRECISION - 1 - exponent) as usize;
        let fixed = format!("{n:.decimals$}");
        f.write_str(trim_fraction(&fixed))
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        write!(f, "{}e{sign}{:02}", trim_fraction(mantissa), exponent.abs())
    }
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Value::Nil.to_string(), "nil");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Number(30.0).to_string(), "30");
        assert_eq!(Value::Number(-1.3).to_string(), "-1.3");
        assert_eq!(Value::Number(0.1).to_string(), "0.1");
        assert_eq!(Value::Number(f64::NAN).to_string(), "nan");
        assert_eq!(Value::Number(f64::INFINITY).to_string(), "inf");
        assert_eq!(Value::Number(f64::NEG_INFINITY).to_string(), "-inf");
        let s = Value::string(Rc::new(ObjString::new("raw bytes")));
        assert_eq!(s.to_string(), "raw bytes");
    }

    #[test]
    fn test_number_display_matches_printf_g() {
        let cases = [
            (-1.2999999999999998, "-1.3"),
            (0.1 + 0.2, "0.3"),
            (2.5, "2.5"),
            (100.0, "100"),
            (123456.0, "123456"),
            (1234567.0, "1.23457e+06"),
            (999999.7, "1e+06"),
            (1e20, "1e+20"),
            (0.0001, "0.0001"),
            (0.00001, "1e-05"),
            (1.5e-7, "1.5e-07"),
            (3.14159265, "3.14159"),
            (0.0, "0"),
            (-0.0, "-0"),
        ];
        for (n, expected) in cases {
            assert_eq!(Value::Number(n).to_string(), expected, "{n:e}");
        }
    }

    #[test]
    fn test_falsiness() {
        assert!(Value::Nil.is_falsey());
        assert!(Value::Bool(false).is_falsey());
        assert!(!Value::Bool(true).is_falsey());
        assert!(!Value::Number(0.0).is_falsey());
        assert!(!Value::string(Rc::new(ObjString::new(""))).is_falsey());
    }

    #[test]
    fn test_equality() {
        assert_eq!(Value::Nil, Value::Nil);
        assert_eq!(Value::Number(1.5), Value::Number(1.5));
        assert_ne!(Value::Number(f64::NAN), Value::Number(f64::NAN));
        assert_ne!(Value::Nil, Value::Bool(false));
        assert_ne!(Value::Number(0.0), Value::Bool(false));

        let shared = Rc::new(ObjString::new("k"));
        assert_eq!(Value::string(shared.clone()), Value::string(shared));
        // Equal contents in two allocations are different values: only the
        // heap's interning makes contents and identity coincide.
        assert_ne!(
            Value::string(Rc::new(ObjString::new("k"))),
            Value::string(Rc::new(ObjString::new("k")))
        );
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Number(2.0).as_number(), Some(2.0));
        assert_eq!(Value::Nil.as_number(), None);
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert!(Value::string(Rc::new(ObjString::new("s"))).is_string());
        assert_eq!(Value::Number(1.0).type_name(), "number");
    }
}
