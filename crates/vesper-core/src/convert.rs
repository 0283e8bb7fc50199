//! Numeric coercion
//!
//! ToNumber over the tagged union, the StringToNumber lexical grammar, and
//! the ToIntegerOrInfinity clamp that turns an arbitrary depth argument into
//! a recursion bound. Object-like values participate through the
//! [`NumericConvertible`] conversion hook.

use std::fmt;

use crate::sequence::{Sequence, Slot};
use crate::value::Value;
use crate::CoercionError;

/// Conversion hook for object-like values
///
/// Invoked when an object is coerced to a number (or to a string while
/// joining a sequence). Returning `None` means the object has no conversion
/// protocol at all — the null-prototype case — which surfaces as a
/// TypeError-class [`CoercionError`]. The hook may perform arbitrary
/// side-effecting work; it is called once per coercion.
pub trait NumericConvertible: fmt::Debug {
    /// Produce the primitive this object converts through, if any
    fn to_primitive(&self) -> Option<Value>;

    /// Class name used in diagnostics
    fn class_name(&self) -> &'static str {
        "Object"
    }
}

/// Recursion bound for the flatten operation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Depth {
    /// Expand at most this many nesting levels
    Finite(usize),
    /// Unbounded expansion (depth argument was positive infinity)
    Infinite,
}

impl Depth {
    /// Check if no further expansion is allowed
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Depth::Finite(0))
    }

    /// The bound one nesting level down
    pub fn decrement(&self) -> Depth {
        match self {
            Depth::Finite(n) => Depth::Finite(n.saturating_sub(1)),
            Depth::Infinite => Depth::Infinite,
        }
    }
}

/// Convert a value to a number (ECMAScript ToNumber)
///
/// Symbols and objects without a usable conversion protocol fail with a
/// [`CoercionError`]; every other input coerces, however unusual, often
/// to NaN.
pub fn to_number(value: &Value) -> Result<f64, CoercionError> {
    match value {
        Value::Undefined => Ok(f64::NAN),
        Value::Null => Ok(0.0),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => Ok(*n),
        Value::String(s) => Ok(string_to_number(s)),
        Value::Symbol(_) => Err(CoercionError::SymbolToNumber),
        // Arrays convert through their joined string form: [] -> "" -> 0
        Value::Sequence(seq) => Ok(string_to_number(&sequence_to_string(seq)?)),
        Value::Object(obj) => {
            let primitive = obj
                .to_primitive()
                .ok_or(CoercionError::NoPrimitiveConversion)?;
            match primitive {
                // The hook must yield a primitive
                Value::Sequence(_) | Value::Object(_) => {
                    Err(CoercionError::NoPrimitiveConversion)
                }
                other => to_number(&other),
            }
        }
    }
}

/// Clamp a coerced number to an effective recursion depth
///
/// NaN and anything ≤ 0 (negative numbers, negative infinity, `-0`) yield
/// depth 0; positive infinity is unbounded; fractional values truncate
/// toward zero.
pub fn to_integer_or_infinity(number: f64) -> Depth {
    if number.is_nan() || number <= 0.0 {
        Depth::Finite(0)
    } else if number == f64::INFINITY {
        Depth::Infinite
    } else {
        Depth::Finite(number.trunc() as usize)
    }
}

/// Convert a string to a number (ECMAScript StringToNumber)
pub fn string_to_number(text: &str) -> f64 {
    let trimmed = text.trim_matches(is_text_whitespace);
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(digits) = strip_radix_prefix(trimmed, "0x", "0X") {
        return parse_radix(digits, 16);
    }
    if let Some(digits) = strip_radix_prefix(trimmed, "0o", "0O") {
        return parse_radix(digits, 8);
    }
    if let Some(digits) = strip_radix_prefix(trimmed, "0b", "0B") {
        return parse_radix(digits, 2);
    }
    // Rust's f64 parser accepts forms the numeric grammar rejects ("inf",
    // "nan"), so restrict to decimal-literal characters before parsing.
    if trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        trimmed.parse::<f64>().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

fn strip_radix_prefix<'a>(text: &'a str, lower: &str, upper: &str) -> Option<&'a str> {
    text.strip_prefix(lower).or_else(|| text.strip_prefix(upper))
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    let mut acc = 0.0f64;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => acc = acc * radix as f64 + d as f64,
            None => return f64::NAN,
        }
    }
    acc
}

fn is_text_whitespace(c: char) -> bool {
    // Unicode whitespace plus the BOM, which the numeric grammar also trims
    c.is_whitespace() || c == '\u{FEFF}'
}

/// String form of a number, matching the host's number-to-string rules for
/// the values this runtime produces
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n == f64::INFINITY {
        return "Infinity".to_string();
    }
    if n == f64::NEG_INFINITY {
        return "-Infinity".to_string();
    }
    if n == n.trunc() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Joined string form of a sequence (the array ToPrimitive path)
///
/// Holes, undefined and null contribute empty strings; nested sequences
/// join recursively; symbols fail as they do in the host.
pub fn sequence_to_string(seq: &Sequence) -> Result<String, CoercionError> {
    let mut parts = Vec::with_capacity(seq.len());
    for slot in seq.slots() {
        match slot {
            Slot::Hole => parts.push(String::new()),
            Slot::Value(value) => parts.push(element_to_string(value)?),
        }
    }
    Ok(parts.join(","))
}

fn element_to_string(value: &Value) -> Result<String, CoercionError> {
    match value {
        Value::Undefined | Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(number_to_string(*n)),
        Value::String(s) => Ok(s.to_string()),
        Value::Symbol(_) => Err(CoercionError::SymbolToString),
        Value::Sequence(seq) => sequence_to_string(seq),
        Value::Object(obj) => {
            let primitive = obj
                .to_primitive()
                .ok_or(CoercionError::NoPrimitiveConversion)?;
            match primitive {
                Value::Sequence(_) | Value::Object(_) => {
                    Err(CoercionError::NoPrimitiveConversion)
                }
                other => element_to_string(&other),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_number_primitives() {
        assert!(to_number(&Value::Undefined).unwrap().is_nan());
        assert_eq!(to_number(&Value::Null).unwrap(), 0.0);
        assert_eq!(to_number(&Value::Bool(true)).unwrap(), 1.0);
        assert_eq!(to_number(&Value::Bool(false)).unwrap(), 0.0);
        assert_eq!(to_number(&Value::number(2.5)).unwrap(), 2.5);
    }

    #[test]
    fn test_to_number_strings() {
        assert_eq!(to_number(&Value::string("")).unwrap(), 0.0);
        assert_eq!(to_number(&Value::string("  42  ")).unwrap(), 42.0);
        assert_eq!(to_number(&Value::string("1.5e2")).unwrap(), 150.0);
        assert_eq!(to_number(&Value::string("+1.5")).unwrap(), 1.5);
        assert_eq!(to_number(&Value::string("0x10")).unwrap(), 16.0);
        assert_eq!(to_number(&Value::string("0b101")).unwrap(), 5.0);
        assert_eq!(to_number(&Value::string("0o17")).unwrap(), 15.0);
        assert_eq!(to_number(&Value::string("Infinity")).unwrap(), f64::INFINITY);
        assert_eq!(
            to_number(&Value::string("-Infinity")).unwrap(),
            f64::NEG_INFINITY
        );
        assert!(to_number(&Value::string("foo")).unwrap().is_nan());
        assert!(to_number(&Value::string("inf")).unwrap().is_nan());
        assert!(to_number(&Value::string("nan")).unwrap().is_nan());
        assert!(to_number(&Value::string("1 2")).unwrap().is_nan());
        assert!(to_number(&Value::string("0xZZ")).unwrap().is_nan());
    }

    #[test]
    fn test_to_number_sequences() {
        // [] -> "" -> 0
        assert_eq!(to_number(&Value::sequence(Sequence::new())).unwrap(), 0.0);
        // [7] -> "7" -> 7
        let single = Sequence::from_values(vec![Value::number(7.0)]);
        assert_eq!(to_number(&Value::sequence(single)).unwrap(), 7.0);
        // [1, 2] -> "1,2" -> NaN
        let pair = Sequence::from_values(vec![Value::number(1.0), Value::number(2.0)]);
        assert!(to_number(&Value::sequence(pair)).unwrap().is_nan());
    }

    #[test]
    fn test_to_number_symbol_fails() {
        let err = to_number(&Value::symbol(Some("tag"))).unwrap_err();
        assert!(matches!(err, CoercionError::SymbolToNumber));
    }

    #[test]
    fn test_depth_clamp() {
        assert_eq!(to_integer_or_infinity(f64::NAN), Depth::Finite(0));
        assert_eq!(to_integer_or_infinity(-1.0), Depth::Finite(0));
        assert_eq!(to_integer_or_infinity(f64::NEG_INFINITY), Depth::Finite(0));
        assert_eq!(to_integer_or_infinity(-0.0), Depth::Finite(0));
        assert_eq!(to_integer_or_infinity(0.0), Depth::Finite(0));
        assert_eq!(to_integer_or_infinity(1.0), Depth::Finite(1));
        assert_eq!(to_integer_or_infinity(1.9), Depth::Finite(1));
        assert_eq!(to_integer_or_infinity(f64::INFINITY), Depth::Infinite);
    }

    #[test]
    fn test_depth_decrement() {
        assert_eq!(Depth::Finite(2).decrement(), Depth::Finite(1));
        assert_eq!(Depth::Finite(0).decrement(), Depth::Finite(0));
        assert_eq!(Depth::Infinite.decrement(), Depth::Infinite);
        assert!(Depth::Finite(0).is_exhausted());
        assert!(!Depth::Infinite.is_exhausted());
    }

    #[test]
    fn test_number_to_string() {
        assert_eq!(number_to_string(42.0), "42");
        assert_eq!(number_to_string(-0.0), "0");
        assert_eq!(number_to_string(1.5), "1.5");
        assert_eq!(number_to_string(f64::NAN), "NaN");
        assert_eq!(number_to_string(f64::INFINITY), "Infinity");
    }

    #[test]
    fn test_sequence_to_string() {
        let mut seq = Sequence::from_values(vec![Value::number(1.0), Value::Null]);
        seq.push_hole();
        seq.push(Value::string("x"));
        assert_eq!(sequence_to_string(&seq).unwrap(), "1,,,x");
    }

    #[test]
    fn test_sequence_to_string_symbol_fails() {
        let seq = Sequence::from_values(vec![Value::symbol(None)]);
        let err = sequence_to_string(&seq).unwrap_err();
        assert!(matches!(err, CoercionError::SymbolToString));
    }
}
