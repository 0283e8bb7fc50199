//! Object fixtures implementing the numeric-conversion hook
//!
//! Each fixture corresponds to an object shape a depth argument can take:
//! ordinary objects, objects created with no prototype, functions, regex
//! pattern objects, and trap-free proxies. Only the conversion behavior
//! matters to the flatten runtime; everything else about these objects is
//! out of scope.

use std::cell::Cell;
use std::rc::Rc;

use regex::Regex;

use crate::convert::NumericConvertible;
use crate::value::Value;

/// Ordinary object: converts through its default string form
#[derive(Debug, Default)]
pub struct PlainObject;

impl PlainObject {
    /// Create an ordinary object
    pub fn new() -> Rc<Self> {
        Rc::new(PlainObject)
    }
}

impl NumericConvertible for PlainObject {
    fn to_primitive(&self) -> Option<Value> {
        Some(Value::string("[object Object]"))
    }
}

/// Object created with no prototype: no conversion protocol at all
#[derive(Debug, Default)]
pub struct NullProtoObject;

impl NullProtoObject {
    /// Create a prototype-less object
    pub fn new() -> Rc<Self> {
        Rc::new(NullProtoObject)
    }
}

impl NumericConvertible for NullProtoObject {
    fn to_primitive(&self) -> Option<Value> {
        None
    }
}

/// Function used as a plain value
///
/// Converts through its source text (always NaN as a number) and carries
/// the reflection metadata callers can introspect: canonical name and
/// formal parameter count.
#[derive(Debug)]
pub struct FunctionObject {
    name: &'static str,
    length: usize,
    source: String,
}

impl FunctionObject {
    /// Create a named function fixture
    pub fn new(name: &'static str, length: usize) -> Rc<Self> {
        Rc::new(FunctionObject {
            name,
            length,
            source: format!("function {name}() {{ [native code] }}"),
        })
    }

    /// Create an arrow-function fixture from its source text
    pub fn arrow(source: &str) -> Rc<Self> {
        Rc::new(FunctionObject {
            name: "",
            length: source.matches(',').count() + 1,
            source: source.to_string(),
        })
    }

    /// Canonical function name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Formal parameter count
    pub fn length(&self) -> usize {
        self.length
    }
}

impl NumericConvertible for FunctionObject {
    fn to_primitive(&self) -> Option<Value> {
        Some(Value::string(self.source.as_str()))
    }

    fn class_name(&self) -> &'static str {
        "Function"
    }
}

/// Regex pattern object
#[derive(Debug)]
pub struct PatternObject {
    regex: Regex,
}

impl PatternObject {
    /// Compile a pattern object from its source
    pub fn new(pattern: &str) -> Result<Rc<Self>, regex::Error> {
        Ok(Rc::new(PatternObject {
            regex: Regex::new(pattern)?,
        }))
    }

    /// Test the pattern against a string
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// The pattern source text
    pub fn source(&self) -> &str {
        self.regex.as_str()
    }
}

impl NumericConvertible for PatternObject {
    fn to_primitive(&self) -> Option<Value> {
        Some(Value::string(format!("/{}/", self.regex.as_str())))
    }

    fn class_name(&self) -> &'static str {
        "RegExp"
    }
}

/// Trap-free proxy: delegates conversion to its target, recording each
/// hook invocation as the observable side effect
#[derive(Debug)]
pub struct ProxyObject {
    target: Rc<dyn NumericConvertible>,
    conversions: Cell<usize>,
}

impl ProxyObject {
    /// Wrap a target object
    pub fn new(target: Rc<dyn NumericConvertible>) -> Rc<Self> {
        Rc::new(ProxyObject {
            target,
            conversions: Cell::new(0),
        })
    }

    /// How many times the conversion hook has fired
    pub fn conversion_count(&self) -> usize {
        self.conversions.get()
    }
}

impl NumericConvertible for ProxyObject {
    fn to_primitive(&self) -> Option<Value> {
        self.conversions.set(self.conversions.get() + 1);
        self.target.to_primitive()
    }

    fn class_name(&self) -> &'static str {
        "Proxy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::to_number;

    #[test]
    fn test_plain_object_coerces_to_nan() {
        let n = to_number(&Value::object(PlainObject::new())).unwrap();
        assert!(n.is_nan());
    }

    #[test]
    fn test_null_proto_object_has_no_protocol() {
        assert!(NullProtoObject::new().to_primitive().is_none());
        assert!(to_number(&Value::object(NullProtoObject::new())).is_err());
    }

    #[test]
    fn test_function_metadata() {
        let func = FunctionObject::new("flat", 0);
        assert_eq!(func.name(), "flat");
        assert_eq!(func.length(), 0);
        assert!(to_number(&Value::object(func)).unwrap().is_nan());
    }

    #[test]
    fn test_pattern_object() {
        let pattern = PatternObject::new(".").unwrap();
        assert!(pattern.is_match("a"));
        assert_eq!(pattern.source(), ".");
        assert!(to_number(&Value::object(pattern)).unwrap().is_nan());
    }

    #[test]
    fn test_proxy_delegates_and_records() {
        let proxy = ProxyObject::new(PlainObject::new());
        assert_eq!(proxy.conversion_count(), 0);
        let n = to_number(&Value::object(proxy.clone())).unwrap();
        assert!(n.is_nan(), "trap-free proxy coerces like its target");
        assert_eq!(proxy.conversion_count(), 1, "hook fires once per coercion");
    }

    #[test]
    fn test_proxy_over_null_proto_fails() {
        let proxy = ProxyObject::new(NullProtoObject::new());
        assert!(to_number(&Value::object(proxy.clone())).is_err());
        assert_eq!(proxy.conversion_count(), 1);
    }
}
