//! Vesper core runtime
//!
//! This crate provides the dynamic value model and the array flattening
//! primitive built on top of it:
//! - Tagged-union value representation (`Value`, `Symbol`)
//! - Sequences with hole-aware slots (`Sequence`, `Slot`)
//! - ToNumber / ToIntegerOrInfinity coercion (`convert`)
//! - Object fixtures implementing the numeric-conversion hook (`object`)
//! - The flatten operation and its builtin method surface

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod builtin;
pub mod convert;
pub mod flatten;
pub mod object;
pub mod sequence;
pub mod value;

pub use builtin::{call_array_method, lookup_builtin_method, MethodDescriptor};
pub use convert::{to_integer_or_infinity, to_number, Depth, NumericConvertible};
pub use flatten::flatten;
pub use sequence::{Sequence, Slot};
pub use value::{deep_equals, Symbol, Value};

/// Coercion failures raised while converting a value to a number or string.
///
/// These are the only failure modes of the flatten operation; they surface
/// before any traversal begins, so no partial output is ever produced.
#[derive(Debug, thiserror::Error)]
pub enum CoercionError {
    /// A symbol was used where a number is required
    #[error("Cannot convert a Symbol value to a number")]
    SymbolToNumber,

    /// A symbol was used where a string is required
    #[error("Cannot convert a Symbol value to a string")]
    SymbolToString,

    /// An object exposes no usable conversion protocol, or its conversion
    /// hook failed to produce a primitive
    #[error("Cannot convert object to primitive value")]
    NoPrimitiveConversion,
}

/// Runtime errors surfaced by the builtin method dispatch
#[derive(Debug, thiserror::Error)]
pub enum VesperError {
    /// Type error
    #[error("Type error: {0}")]
    TypeError(String),

    /// Runtime error
    #[error("Runtime error: {0}")]
    RuntimeError(String),
}

impl From<CoercionError> for VesperError {
    fn from(err: CoercionError) -> Self {
        VesperError::TypeError(err.to_string())
    }
}

/// Result alias for builtin dispatch
pub type VesperResult<T> = Result<T, VesperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coercion_error_maps_to_type_error() {
        let err: VesperError = CoercionError::SymbolToNumber.into();
        match err {
            VesperError::TypeError(msg) => {
                assert!(msg.contains("Symbol"), "message should name the symbol: {msg}")
            }
            other => panic!("expected TypeError, got {other:?}"),
        }
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            CoercionError::NoPrimitiveConversion.to_string(),
            "Cannot convert object to primitive value"
        );
        assert_eq!(
            VesperError::RuntimeError("boom".to_string()).to_string(),
            "Runtime error: boom"
        );
    }
}
