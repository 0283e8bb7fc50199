//! Built-in method surface
//!
//! Method-id constants, name lookup, reflection metadata and the dispatch
//! handler for built-in array methods. Callers address methods by id the
//! way a compiled method-call site would; the descriptor table carries the
//! introspectable name and formal parameter count.

use crate::flatten::flatten;
use crate::sequence::Sequence;
use crate::value::Value;
use crate::{VesperError, VesperResult};

/// Built-in method IDs for arrays
pub mod array {
    /// `arr.flat(depth?)` - flatten nested sequences up to a depth
    pub const FLAT: u16 = 0x0100;
}

/// Reflection metadata for a built-in method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodDescriptor {
    /// Method id used at call sites
    pub id: u16,
    /// Canonical method name
    pub name: &'static str,
    /// Formal parameter count (required parameters only)
    pub length: usize,
}

/// Descriptor table for built-in array methods
pub const ARRAY_METHODS: &[MethodDescriptor] = &[MethodDescriptor {
    id: array::FLAT,
    name: "flat",
    length: 0,
}];

/// Look up a built-in method ID by type and method name
///
/// Returns Some(method_id) if the method is a built-in, None otherwise.
pub fn lookup_builtin_method(type_name: &str, method_name: &str) -> Option<u16> {
    match type_name {
        "Array" | "array" => ARRAY_METHODS
            .iter()
            .find(|m| m.name == method_name)
            .map(|m| m.id),
        _ => None,
    }
}

/// Reflection metadata for a method id
pub fn describe_method(method_id: u16) -> Option<&'static MethodDescriptor> {
    ARRAY_METHODS.iter().find(|m| m.id == method_id)
}

/// Check if a method ID is a built-in array method
pub fn is_array_method(method_id: u16) -> bool {
    (0x0100..=0x01FF).contains(&method_id)
}

/// Handle built-in array methods
///
/// The method-call surface: `flat` takes zero required arguments and one
/// optional depth argument. Coercion failures surface as type errors.
pub fn call_array_method(
    receiver: &Sequence,
    method_id: u16,
    args: &[Value],
) -> VesperResult<Value> {
    match method_id {
        array::FLAT => {
            if args.len() > 1 {
                return Err(VesperError::RuntimeError(format!(
                    "Array.flat expects at most 1 argument, got {}",
                    args.len()
                )));
            }
            let result = flatten(receiver, args.first())?;
            Ok(Value::sequence(result))
        }
        _ => Err(VesperError::RuntimeError(format!(
            "Array method {:#06x} not implemented",
            method_id
        ))),
    }
}
