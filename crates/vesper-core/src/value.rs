//! Dynamic value representation
//!
//! A closed tagged union over the value kinds the flatten runtime needs.
//! Heap-backed kinds (strings, sequences, objects) are reference-counted so
//! that cloning a `Value` never copies the underlying data — appending an
//! element to a flattened output preserves the original reference.

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::convert::NumericConvertible;
use crate::sequence::Sequence;

/// Tagged-union value representation
///
/// Kinds mirror the host type system: primitives are stored inline, strings
/// and composites behind `Rc`. `Undefined` is a present value and is distinct
/// from a sequence hole (an absent slot).
#[derive(Clone)]
pub enum Value {
    /// The undefined value
    Undefined,
    /// The null value
    Null,
    /// Boolean (true/false)
    Bool(bool),
    /// Number (always f64)
    Number(f64),
    /// Immutable string
    String(Rc<str>),
    /// Unique-identity symbol
    Symbol(Symbol),
    /// Nested sequence (array)
    Sequence(Rc<Sequence>),
    /// Object carrying a numeric-conversion hook
    Object(Rc<dyn NumericConvertible>),
}

impl Value {
    /// Create a number value
    pub fn number(n: f64) -> Self {
        Value::Number(n)
    }

    /// Create a string value
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::String(s.into())
    }

    /// Create a fresh symbol value
    pub fn symbol(description: Option<&str>) -> Self {
        Value::Symbol(Symbol::new(description))
    }

    /// Create a sequence value
    pub fn sequence(seq: Sequence) -> Self {
        Value::Sequence(Rc::new(seq))
    }

    /// Create an object value from anything implementing the conversion hook
    pub fn object(obj: Rc<dyn NumericConvertible>) -> Self {
        Value::Object(obj)
    }

    /// Check if this value is undefined
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value is a sequence
    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    /// Extract boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract number value
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract string contents
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extract the nested sequence
    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Value::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    /// Get the type name as a string (for the typeof operator)
    ///
    /// Sequences and null report "object", following JavaScript convention.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "object",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Sequence(_) => "object",
            Value::Object(_) => "object",
        }
    }

    /// Check if value is truthy (for conditionals)
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            // Symbols and composites are always truthy
            Value::Symbol(_) | Value::Sequence(_) | Value::Object(_) => true,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Undefined
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "bool({b})"),
            Value::Number(n) => write!(f, "number({n})"),
            Value::String(s) => write!(f, "string({s:?})"),
            Value::Symbol(sym) => write!(f, "{sym:?}"),
            Value::Sequence(seq) => write!(f, "{seq:?}"),
            Value::Object(obj) => write!(f, "[object {}]", obj.class_name()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{}", crate::convert::number_to_string(*n)),
            Value::String(s) => write!(f, "{s}"),
            Value::Symbol(sym) => match sym.description() {
                Some(desc) => write!(f, "Symbol({desc})"),
                None => write!(f, "Symbol()"),
            },
            Value::Sequence(seq) => write!(f, "{seq}"),
            Value::Object(obj) => write!(f, "[object {}]", obj.class_name()),
        }
    }
}

/// Unique-identity symbol
///
/// Identity is all that matters here: two symbols are equal only when they
/// are the same symbol, and coercing any symbol to a number is a TypeError.
#[derive(Clone)]
pub struct Symbol {
    id: u64,
    description: Option<Rc<str>>,
}

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(1);

impl Symbol {
    /// Create a fresh symbol with a unique identity
    pub fn new(description: Option<&str>) -> Self {
        Symbol {
            id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
            description: description.map(Rc::from),
        }
    }

    /// The optional description given at creation
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(desc) => write!(f, "symbol({desc})"),
            None => write!(f, "symbol(#{})", self.id),
        }
    }
}

/// Order-sensitive structural equality over the tagged union
///
/// Numbers compare with SameValue semantics: NaN equals NaN and `-0` is
/// distinct from `0`. Sequences compare slot by slot, with holes distinct
/// from present `undefined` slots. Symbols and objects compare by identity.
pub fn deep_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) => true,
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => same_value_number(*x, *y),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Symbol(x), Value::Symbol(y)) => x == y,
        (Value::Sequence(x), Value::Sequence(y)) => x.structurally_equals(y),
        (Value::Object(x), Value::Object(y)) => Rc::ptr_eq(x, y),
        _ => false,
    }
}

fn same_value_number(x: f64, y: f64) -> bool {
    if x.is_nan() && y.is_nan() {
        return true;
    }
    x == y && x.is_sign_negative() == y.is_sign_negative()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::PlainObject;

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Undefined.type_name(), "undefined");
        assert_eq!(Value::Null.type_name(), "object");
        assert_eq!(Value::Bool(true).type_name(), "boolean");
        assert_eq!(Value::number(1.5).type_name(), "number");
        assert_eq!(Value::string("hi").type_name(), "string");
        assert_eq!(Value::symbol(None).type_name(), "symbol");
        assert_eq!(Value::sequence(Sequence::new()).type_name(), "object");
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::Undefined.is_truthy());
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::number(0.0).is_truthy());
        assert!(!Value::number(f64::NAN).is_truthy());
        assert!(!Value::string("").is_truthy());
        assert!(Value::Bool(true).is_truthy());
        assert!(Value::number(-1.0).is_truthy());
        assert!(Value::string("x").is_truthy());
        assert!(Value::symbol(None).is_truthy());
        assert!(Value::sequence(Sequence::new()).is_truthy());
    }

    #[test]
    fn test_symbol_identity() {
        let a = Symbol::new(Some("tag"));
        let b = Symbol::new(Some("tag"));
        assert_ne!(a, b, "same description, distinct identity");
        assert_eq!(a.clone(), a);
        assert_eq!(a.description(), Some("tag"));
    }

    #[test]
    fn test_deep_equals_primitives() {
        assert!(deep_equals(&Value::Null, &Value::Null));
        assert!(deep_equals(&Value::number(42.0), &Value::number(42.0)));
        assert!(!deep_equals(&Value::Null, &Value::Undefined));
        assert!(!deep_equals(&Value::number(1.0), &Value::string("1")));
    }

    #[test]
    fn test_deep_equals_same_value_numbers() {
        assert!(deep_equals(
            &Value::number(f64::NAN),
            &Value::number(f64::NAN)
        ));
        assert!(!deep_equals(&Value::number(0.0), &Value::number(-0.0)));
        assert!(deep_equals(&Value::number(-0.0), &Value::number(-0.0)));
    }

    #[test]
    fn test_deep_equals_objects_by_identity() {
        let obj = PlainObject::new();
        let a = Value::object(obj.clone());
        let b = Value::object(obj);
        assert!(deep_equals(&a, &b));
        assert!(!deep_equals(&a, &Value::object(PlainObject::new())));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Value::Undefined), "undefined");
        assert_eq!(format!("{}", Value::number(42.0)), "42");
        assert_eq!(format!("{}", Value::number(1.5)), "1.5");
        assert_eq!(format!("{}", Value::string("hi")), "hi");
        assert_eq!(format!("{}", Value::Bool(false)), "false");
    }

    #[test]
    fn test_clone_preserves_reference() {
        let inner = Rc::new(Sequence::from_values(vec![Value::number(1.0)]));
        let a = Value::Sequence(inner.clone());
        let b = a.clone();
        match (&a, &b) {
            (Value::Sequence(x), Value::Sequence(y)) => assert!(Rc::ptr_eq(x, y)),
            _ => unreachable!(),
        }
    }
}
